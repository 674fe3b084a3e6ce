pub mod auth;
pub mod collection;
pub mod error;
pub mod names;
pub mod request;
#[cfg(test)]
mod test_sender;

pub use collection::PostCollection;
pub use error::Error;
pub use request::{RequestContext, build_and_send, build_request};
pub type Result<T> = error::Result<T>;
