pub mod config;
pub mod easings;
pub mod layout;
pub mod simulate;
