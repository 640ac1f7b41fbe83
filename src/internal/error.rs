use thiserror::Error;

/// Unified error type for the Tessera library.
#[derive(Error, Debug)]
pub enum Error {
    /// Error related to element-type normalization.
    #[error("Dtype Error: {0}")]
    DtypeError(String),

    /// Error related to schema construction or declaration parsing.
    #[error("Schema Error: {0}")]
    SchemaError(String),
}

/// A specialized `Result` type for Tessera operations.
pub type Result<T> = std::result::Result<T, Error>;
