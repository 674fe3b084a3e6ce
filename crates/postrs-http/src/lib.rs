pub mod error;
pub mod sender;
pub mod types;
