use thiserror::Error;

/// Failure classes for gateway request processing.
///
/// The `Display` strings of the client-error variants are part of the HTTP
/// contract toward aggregating resolvers.
#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum GatewayError {
    /// No decodable request bytes were present in the inbound body.
    #[error("Missing request data")]
    MissingPayload,

    /// Bytes were present but do not conform to the expected schema.
    #[error("Malformed request data: {0}")]
    Decode(String),

    /// The request tuple decoded but carries an unknown lookup kind.
    #[error("Unsupported request kind: {0}")]
    UnsupportedKind(u8),

    /// The authoritative read reverted or the transport failed.
    #[error("Chain read failed: {0}")]
    ChainRead(String),

    /// Anything else unexpected.
    #[error("Internal gateway error: {0}")]
    Internal(String),
}

impl GatewayError {
    /// True when the failure was caused by the client request rather than
    /// the gateway or its upstream.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            GatewayError::MissingPayload
                | GatewayError::Decode(_)
                | GatewayError::UnsupportedKind(_)
        )
    }
}
