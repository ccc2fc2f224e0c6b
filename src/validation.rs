//! Label validation for logger configuration.
//!
//! Only the configured labels (message, level, time) are checked, once, when a logger
//! is built. Free-form field labels are emitted as given.

/// Reasons a configured label cannot be used
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LabelError {
    #[error("label is empty")]
    Empty,

    #[error("label contains whitespace")]
    Whitespace,

    #[error("label contains the '=' separator")]
    Separator,

    #[error("label contains a double quote")]
    Quote,

    #[error("label contains control characters: {chars}")]
    ControlCharacters { chars: String },
}

/// Check that `label` can appear on the left of `=` without breaking the line.
pub fn validate_label(label: &str) -> Result<(), LabelError> {
    if label.is_empty() {
        return Err(LabelError::Empty);
    }
    if label.chars().any(char::is_whitespace) {
        return Err(LabelError::Whitespace);
    }
    if label.contains('=') {
        return Err(LabelError::Separator);
    }
    if label.contains('"') {
        return Err(LabelError::Quote);
    }
    if label.chars().any(char::is_control) {
        let chars = label
            .chars()
            .filter(|c| c.is_control())
            .map(|c| format!("\\u{{{:04x}}}", c as u32))
            .collect::<Vec<_>>()
            .join(", ");
        return Err(LabelError::ControlCharacters { chars });
    }
    Ok(())
}
