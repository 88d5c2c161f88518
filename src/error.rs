use std::path::PathBuf;

/// Errors raised while assembling the reasoner or storing its parameters. None of
/// these can occur per call; once a `Reasoner` exists every reasoning operation is total.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A projection's input width does not match what feeds it.
    #[error("{layer} expects {expected} inputs but is fed {found}")]
    InputWidth { layer: &'static str, expected: usize, found: usize },

    /// A projection's output width does not match what consumes it.
    #[error("{layer} produces {found} outputs but {expected} are required")]
    OutputWidth { layer: &'static str, expected: usize, found: usize },

    /// A linear layer whose bias length disagrees with its weight rows.
    #[error("bias has {found} entries but weight has {expected} rows")]
    BiasLength { expected: usize, found: usize },

    /// A configuration value outside its valid range.
    #[error("invalid setting `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },

    #[error("failed to read {}", path.display())]
    Io { path: PathBuf, #[source] source: std::io::Error },

    #[error("failed to write {}", path.display())]
    Write { path: PathBuf, #[source] source: std::io::Error },

    #[error("failed to parse scorer parameters in {}", path.display())]
    Params { path: PathBuf, #[source] source: serde_json::Error },

    #[error("failed to parse configuration")]
    Toml(#[from] toml::de::Error),
}

impl ConfigError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        ConfigError::Invalid { field, reason: reason.into() }
    }
}
