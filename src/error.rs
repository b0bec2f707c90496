use thiserror::Error;

/// Everything that can stop a watch run. Nothing here is retried.
#[derive(Debug, Error)]
pub enum WatchError {
    /// The remote site answered with a non-success status. We treat that as
    /// having been flagged as a bot.
    #[error("we probably got caught: non-success status from {url}")]
    Blocked { url: String },

    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("could not parse a date from {input:?}")]
    InvalidDate { input: String },

    #[error("could not parse a price from {text:?}")]
    InvalidPrice { text: String },

    #[error("fare node is missing the {attribute} attribute")]
    MissingAttribute { attribute: String },

    #[error("invalid css selector {selector:?}: {reason}")]
    Selector { selector: String, reason: String },

    #[error(transparent)]
    Pattern(#[from] regex::Error),

    #[error("failed to load env variables into config struct: {0}")]
    Config(#[from] envy::Error),
}

pub type WatchResult<T> = Result<T, WatchError>;
