pub mod collection;
pub mod environment;
pub mod error;
pub mod overrides;
mod serde_util;

pub use collection::*;
pub use environment::Environments;
pub use overrides::RequestOverrides;
