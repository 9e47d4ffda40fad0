use thiserror::Error;

/// Errors raised while parsing a policy configuration string.
///
/// All of these are fatal at startup: a session must not be built from a
/// policy whose parameters did not parse cleanly.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// The key is not a parameter of the named policy.
    #[error("{policy} has no parameter `{key}`; supported parameters: {supported}")]
    UnknownKey {
        policy: &'static str,
        key: String,
        supported: &'static str,
    },

    /// Non-numeric characters followed the parsed number.
    #[error("trailing characters `{trailing}` after number in `{key}={value}`")]
    TrailingGarbage {
        key: String,
        value: String,
        trailing: String,
    },

    /// The value is empty, non-numeric, or out of range for the parameter.
    #[error("invalid value `{value}` for parameter `{key}`")]
    InvalidValue { key: String, value: String },
}
