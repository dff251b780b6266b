//! Error types for the Pesapal client.
//!
//! Only conditions that prevent producing a result envelope surface as
//! [`Error`]: transport failures, unreadable bodies, and gateway responses
//! that violate the documented contract. Gateway-level rejections (bad
//! credentials, declined payments, non-200 statuses) are classified into
//! [`Outcome`](crate::types::Outcome) values instead.

/// Errors that can occur while talking to the gateway.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// URL parse error.
    #[error("URL parse error: {context}: {source}")]
    UrlParse {
        /// Human-readable context.
        context: &'static str,
        /// The underlying parse error.
        #[source]
        source: url::ParseError,
    },

    /// The HTTP request could not complete (connect failure, timeout).
    #[error("HTTP error: {context}: {source}")]
    Http {
        /// Human-readable context.
        context: &'static str,
        /// The underlying reqwest error.
        #[source]
        source: reqwest::Error,
    },

    /// The response body could not be read.
    #[error("failed to read response body: {context}: {source}")]
    BodyRead {
        /// Human-readable context.
        context: &'static str,
        /// The underlying reqwest error.
        #[source]
        source: reqwest::Error,
    },

    /// The gateway returned HTTP 200 but the body is not the documented
    /// shape (invalid JSON, or a required field is absent).
    #[error("malformed gateway response: {context}: {detail}")]
    MalformedResponse {
        /// Human-readable context.
        context: &'static str,
        /// What was wrong with the body.
        detail: String,
    },

    /// The bearer token contains bytes that cannot be sent in an HTTP
    /// header.
    #[error("bearer token is not a valid header value")]
    InvalidToken(#[source] reqwest::header::InvalidHeaderValue),
}

impl Error {
    pub(crate) fn malformed(context: &'static str, detail: impl Into<String>) -> Self {
        Self::MalformedResponse {
            context,
            detail: detail.into(),
        }
    }
}
