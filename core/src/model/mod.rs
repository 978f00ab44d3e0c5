pub mod aggregate;
pub mod entry;
pub mod rate;
