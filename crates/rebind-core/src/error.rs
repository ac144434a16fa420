//! Error types for Rebind

use thiserror::Error;

/// The main error type for Rebind operations
#[derive(Debug, Error)]
pub enum RebindError {
    #[error("Nothing is selected")]
    NoSelection,

    #[error("Selected object '{0}' has no animator")]
    MissingAnimator(String),

    #[error("Animator on '{0}' has no controller assigned")]
    MissingController(String),

    #[error("Node not found: {0}")]
    NodeNotFound(String),

    #[error("Node '{node}' is not reachable from root '{root}'")]
    DetachedNode { node: String, root: String },

    #[error("Clip not found: {0}")]
    ClipNotFound(String),

    #[error("Curve '{category}' element {index} has no path field")]
    MissingPath { category: String, index: usize },

    #[error("Invalid hierarchy: {0}")]
    HierarchyError(String),

    #[error("Controller error: {0}")]
    ControllerError(String),

    #[error("Clip error: {0}")]
    ClipError(String),

    #[error("Config error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParseError(String),
}

/// Result type alias for Rebind operations
pub type Result<T> = std::result::Result<T, RebindError>;

impl From<toml::de::Error> for RebindError {
    fn from(err: toml::de::Error) -> Self {
        RebindError::TomlParseError(err.to_string())
    }
}

impl From<toml_edit::TomlError> for RebindError {
    fn from(err: toml_edit::TomlError) -> Self {
        RebindError::TomlParseError(err.to_string())
    }
}
