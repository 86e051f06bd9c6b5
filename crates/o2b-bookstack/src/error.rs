//! Error types for Bookstack integration.

use std::path::PathBuf;
use std::str::Utf8Error;

/// Error from Bookstack API or vault operations.
#[derive(Debug, thiserror::Error)]
pub enum BookstackError {
    /// `BOOKSTACK_BASE_URL` was empty when a request was attempted.
    #[error("BOOKSTACK_BASE_URL is not set")]
    MissingBaseUrl,

    /// HTTP request failed (network error, timeout, etc).
    #[error("HTTP request failed: {0}")]
    Request(#[from] ureq::Error),

    /// Server returned an error status.
    #[error("API request failed: {message} (Status: {status}, URL: {url})")]
    Http {
        /// Message extracted from the error body.
        message: String,
        /// HTTP status code.
        status: u16,
        /// Requested URL.
        url: String,
    },

    /// Response body is not valid UTF-8.
    #[error("Failed to decode API response: {source}\nResponse (first 200 bytes): {preview}")]
    Decode {
        /// Underlying error.
        source: Utf8Error,
        /// Escaped leading bytes of the body.
        preview: String,
    },

    /// Response body is not valid JSON.
    #[error("Failed to parse API response as JSON: {source}\nResponse: {preview}")]
    Parse {
        /// Underlying error.
        source: serde_json::Error,
        /// Leading characters of the body.
        preview: String,
    },

    /// Response carried an error payload instead of `data`.
    #[error("API error: {message}\nFull response: {response}")]
    Api {
        /// Message from the `message` or `error` field.
        message: String,
        /// Whole decoded response.
        response: serde_json::Value,
    },

    /// Response had neither `data`, a list, nor an error payload.
    #[error(
        "Unexpected API response structure. Expected 'data' key but got: {keys:?}\n\
         Full response: {response}\n\
         This might indicate:\n  \
         1. Invalid API credentials (check BOOKSTACK_TOKEN_ID and BOOKSTACK_TOKEN_SECRET)\n  \
         2. Incorrect BOOKSTACK_BASE_URL\n  \
         3. API endpoint format has changed"
    )]
    UnexpectedEnvelope {
        /// Top-level keys that were present.
        keys: Vec<String>,
        /// Whole decoded response.
        response: serde_json::Value,
    },

    /// Payload did not match the expected record type.
    #[error("Unexpected record format: {0}")]
    Deserialize(#[from] serde_json::Error),

    /// Vault directory could not be read.
    #[error("I/O error reading {}: {source}", .path.display())]
    Io {
        /// Path being read.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },
}
