use thiserror::Error;

/// Everything the rule-algebra core can fail with.
///
/// Parse/construction failures and evaluation failures share this type; callers
/// distinguish them by matching on the variant, not by a separate error type per
/// stage.
#[derive(Debug, Error)]
pub enum Error {
    #[error("pattern shape error: {0}")]
    PatternShape(String),

    #[error("malformed rule text: {0}")]
    MalformedRuleText(String),

    #[error("malformed board text: {0}")]
    MalformedBoardText(String),

    #[error("repeat bounds invalid: at_most ({at_most}) < at_least ({at_least})")]
    RepeatBounds { at_least: u32, at_most: u32 },

    #[error("symmetry action applied to unsupported value kind: {0}")]
    TypeMismatch(String),

    #[error("repeat exceeded visited-state limit of {limit}")]
    RuntimeLimit { limit: usize },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
