#[derive(Debug, thiserror::Error)]
pub enum CompilerError {
    #[error(transparent)]
    Tree(#[from] hook_merkle_tree::TreeError),

    #[error(transparent)]
    Lists(#[from] hook_merkle_lists::ListError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    #[error("Unknown hook: {0}")]
    UnknownHook(String),

    #[error("Hook {0} has no deployment address")]
    MissingHookAddress(String),

    #[error("Hook {0} is defined more than once")]
    DuplicateHook(String),

    #[error("Hook {hook} declares argument {argument} more than once")]
    DuplicateArgument { hook: String, argument: String },

    #[error("Hook {hook} argument {argument} has unknown role: {role}")]
    UnknownRole {
        hook: String,
        argument: String,
        role: String,
    },

    #[error("Expected at least {expected} hook addresses, got {actual}")]
    HookAddressCount { expected: usize, actual: usize },

    #[error("Invalid hook address: {0}")]
    InvalidHookAddress(String),

    #[error("Tree dump verification failed: {0}")]
    Verification(String),
}

pub type CompilerResult<T> = std::result::Result<T, CompilerError>;
