use thiserror::Error;

#[derive(Debug, Error)]
pub enum LinkError {
    /// TOML parse / deserialization error.
    #[error("config parse error: {0}")]
    ConfigParse(String),
    /// Selection, threshold or coverage out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
    /// A selection references a list that was not supplied.
    #[error("unknown list: {0}")]
    UnknownListIdentifier(String),
}
