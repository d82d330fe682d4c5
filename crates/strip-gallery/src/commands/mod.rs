pub mod catalog;
pub mod completion;
pub mod config;
pub mod simulate;
pub mod version;
