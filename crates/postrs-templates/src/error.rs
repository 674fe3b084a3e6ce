use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum Error {
    #[error("Variable not found: {0}")]
    VariableNotFound(String),
}

pub type Result<T> = std::result::Result<T, Error>;
