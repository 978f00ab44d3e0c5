pub mod file;
pub mod memory;
pub mod settings;
pub mod shift;
pub mod traits;

// Re-export
pub use file::FileStore;
pub use memory::MemoryStore;
pub use settings::SettingsRepository;
pub use shift::ShiftRepository;
pub use traits::{KeyValueStore, Setting, StoreKey};
