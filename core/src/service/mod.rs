pub mod aggregator;
pub mod dto;
pub mod editor;
pub mod settlement;
