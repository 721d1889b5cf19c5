//! Error types for flyout-widgets.

use thiserror::Error;

/// Errors surfaced by the dialog.
#[derive(Debug, Error)]
pub enum DialogError {
    /// The mount target selector matched nothing in the document.
    #[error("mount target not found: no element matches selector `{selector}`")]
    MountTargetNotFound {
        /// Selector that failed to resolve
        selector: String,
    },

    /// Declarative configuration could not be parsed.
    #[error("invalid dialog configuration: {0}")]
    Config(#[from] serde_yaml_ng::Error),
}

/// Result alias for dialog operations.
pub type Result<T> = std::result::Result<T, DialogError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mount_target_not_found_display() {
        let err = DialogError::MountTargetNotFound {
            selector: "#portal".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "mount target not found: no element matches selector `#portal`"
        );
    }

    #[test]
    fn test_config_error_from_yaml() {
        let yaml_err = serde_yaml_ng::from_str::<u32>("not a number").unwrap_err();
        let err: DialogError = yaml_err.into();
        assert!(matches!(err, DialogError::Config(_)));
        assert!(err.to_string().starts_with("invalid dialog configuration"));
    }
}
