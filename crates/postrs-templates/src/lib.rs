pub mod error;
pub mod parser;
pub mod renderer;

pub use parser::*;
pub use renderer::*;
