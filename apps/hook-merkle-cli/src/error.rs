use thiserror::Error;

pub type CliResult<T> = Result<T, CliError>;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Address list error: {0}")]
    Lists(#[from] hook_merkle_lists::ListError),

    #[error("Tree compilation failed: {0}")]
    Compiler(#[from] hook_merkle_sdk::CompilerError),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Verification failed: {0}")]
    Verification(String),
}
