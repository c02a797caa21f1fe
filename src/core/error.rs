use thiserror::Error;

/// Errors that abort a lookup run.
///
/// Conditions that are expected in normal operation (a company that is not
/// registered for VAT, a missing optional registry field, an address line that
/// does not match the text pattern) are never reported through this type.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AresError {
    /// The business identifier is malformed or fails the mod-11 checksum.
    #[error("invalid IČO '{0}'")]
    InvalidIdentifier(String),

    /// The registry returned more than one record for a single IČO.
    #[error("registry returned {0} records, expected at most one")]
    AmbiguousResult(u64),

    /// Transport failure or non-success HTTP status.
    #[error("network error: {0}")]
    Network(String),

    /// A remote call (or its recorded substitute) returned no content.
    #[error("empty response from {0}")]
    EmptyResponse(String),

    /// Malformed XML or a document missing a mandatory node.
    #[error("XML error: {0}")]
    Xml(String),

    /// The output text cannot be represented in the configured charset.
    #[error("encoding error: {0}")]
    Encoding(String),

    /// Invalid or unreadable configuration.
    #[error("configuration error: {0}")]
    Config(String),

    /// Reading a recorded response or writing the output file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
