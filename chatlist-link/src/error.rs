/// Errors produced while parsing SimpleX links and SMP server addresses.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LinkError {
    #[error("Unknown link scheme")]
    UnknownScheme,

    #[error("Unknown link path: {0}")]
    UnknownPath(String),

    #[error("Link has no query fragment")]
    MissingQuery,

    #[error("Missing link parameter: {0}")]
    MissingParam(&'static str),

    #[error("Invalid percent-encoding in parameter {0}")]
    InvalidEncoding(String),

    #[error("Invalid version range: {0}")]
    InvalidVersion(String),

    #[error("Invalid link data: {0}")]
    InvalidData(String),

    #[error("Invalid SMP server address: {0}")]
    InvalidServer(String),

    #[error("Invalid key hash: {0}")]
    InvalidKeyHash(String),
}
