// SPDX-License-Identifier: MPL-2.0
//! Request gateway: the one way the client talks to the café server.
//!
//! Every call goes through [`Gateway::send`], which returns a typed
//! `Result` instead of success/error callbacks:
//!
//! - GET payloads are encoded as a query string; other methods send the
//!   payload as a JSON body with `Content-Type: application/json`.
//! - Any 2xx response whose body decodes is `Ok`. The server's own
//!   `success` flag is part of the decoded value and is the caller's concern.
//! - Transport failures, non-2xx statuses, timeouts and malformed bodies
//!   are `Err`.
//!
//! Callers without their own failure handling use
//! [`Gateway::send_or_notify`], which turns an error into a single generic
//! error banner.
//!
//! There is no retry and no de-duplication of identical concurrent calls.

mod client;
mod request;

pub use client::{Gateway, REQUEST_FAILED_KEY};
pub use request::{Method, Request};

use std::fmt;

/// Why a gateway call did not produce a decoded response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestError {
    /// The base URL or target could not be turned into a URL.
    InvalidUrl(String),
    /// The payload cannot be expressed for this method.
    InvalidPayload(String),
    /// Connection, DNS or I/O failure.
    Transport(String),
    /// The configured timeout elapsed.
    Timeout,
    /// The server answered with a non-2xx status.
    Status(u16),
    /// The body was not the expected JSON.
    Decode(String),
}

impl RequestError {
    pub(crate) fn from_reqwest(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            RequestError::Timeout
        } else if let Some(status) = err.status() {
            RequestError::Status(status.as_u16())
        } else if err.is_decode() {
            RequestError::Decode(err.to_string())
        } else {
            RequestError::Transport(err.to_string())
        }
    }

    /// Returns whether the request never got an HTTP answer.
    #[must_use]
    pub fn is_transport(&self) -> bool {
        matches!(self, RequestError::Transport(_) | RequestError::Timeout)
    }
}

impl fmt::Display for RequestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestError::InvalidUrl(msg) => write!(f, "invalid URL: {msg}"),
            RequestError::InvalidPayload(msg) => write!(f, "invalid payload: {msg}"),
            RequestError::Transport(msg) => write!(f, "transport failure: {msg}"),
            RequestError::Timeout => write!(f, "request timed out"),
            RequestError::Status(code) => write!(f, "HTTP status {code}"),
            RequestError::Decode(msg) => write!(f, "malformed response: {msg}"),
        }
    }
}

impl std::error::Error for RequestError {}
