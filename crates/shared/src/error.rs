use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequestBuildError {
    #[error("unterminated placeholder starting at byte {offset} in template '{template}'")]
    Unterminated { template: String, offset: usize },
    #[error("empty placeholder at byte {offset} in template '{template}'")]
    EmptyPlaceholder { template: String, offset: usize },
    #[error("failed to encode {endpoint} request body: {reason}")]
    Body {
        endpoint: &'static str,
        reason: String,
    },
}
