//! Error Taxonomy and Rosetta Error Catalog
//!
//! Every failure a route can surface maps onto a fixed catalog entry. The
//! catalog is advertised verbatim in `/network/options` so client tooling
//! can branch on stable codes. Upstream failure detail is logged, never
//! serialized into the response body.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Catalog entry identifiers.
///
/// The even codes 12-26 predate this implementation and must stay stable.
/// Codes 17 and 19 are the not-found refinements: unlike the upstream-fetch
/// failures they are not retriable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed client input (HTTP 400)
    InvalidRequest,
    /// Failed fetching network version/options from the daemon
    NetworkVersion,
    /// Failed fetching block information from the daemon
    BlockInfo,
    /// The daemon reports no block for the given identifier
    BlockNotFound,
    /// Failed fetching transaction information from the daemon
    TransactionInfo,
    /// The daemon reports no transaction for the given id
    TransactionNotFound,
    /// Failed fetching mempool contents from the daemon
    MempoolInfo,
    /// Failed fetching address balance from the daemon
    BalanceInfo,
    /// Failed fetching address UTXOs from the daemon
    UtxoInfo,
    /// Failed deriving or constructing through the daemon wallet
    AddressDerivation,
}

impl ErrorKind {
    /// Stable catalog code
    pub fn code(&self) -> u32 {
        match self {
            ErrorKind::InvalidRequest => 12,
            ErrorKind::NetworkVersion => 14,
            ErrorKind::BlockInfo => 16,
            ErrorKind::BlockNotFound => 17,
            ErrorKind::TransactionInfo => 18,
            ErrorKind::TransactionNotFound => 19,
            ErrorKind::MempoolInfo => 20,
            ErrorKind::BalanceInfo => 22,
            ErrorKind::UtxoInfo => 24,
            ErrorKind::AddressDerivation => 26,
        }
    }

    /// Short message for the catalog and error envelope
    pub fn message(&self) -> &'static str {
        match self {
            ErrorKind::InvalidRequest => "Invalid request format",
            ErrorKind::NetworkVersion => "Failed to fetch network version",
            ErrorKind::BlockInfo => "Failed to fetch block information",
            ErrorKind::BlockNotFound => "Block not found",
            ErrorKind::TransactionInfo => "Failed to fetch transaction information",
            ErrorKind::TransactionNotFound => "Transaction not found",
            ErrorKind::MempoolInfo => "Failed to fetch mempool information",
            ErrorKind::BalanceInfo => "Failed to fetch balance information",
            ErrorKind::UtxoInfo => "Failed to fetch UTXOs",
            ErrorKind::AddressDerivation => "Failed to create new wallet address",
        }
    }

    /// Human description for the catalog and error envelope
    pub fn description(&self) -> &'static str {
        match self {
            ErrorKind::InvalidRequest => {
                "This error is returned when the request body is missing or improperly formatted."
            }
            ErrorKind::NetworkVersion => {
                "There was an error while fetching network version from the RPC"
            }
            ErrorKind::BlockInfo => {
                "There was an error while fetching block information from the RPC"
            }
            ErrorKind::BlockNotFound => {
                "The daemon reports no block for the requested identifier"
            }
            ErrorKind::TransactionInfo => {
                "There was an error while fetching transaction information from the RPC"
            }
            ErrorKind::TransactionNotFound => {
                "The daemon reports no transaction for the requested id"
            }
            ErrorKind::MempoolInfo => {
                "There was an error while fetching mempool information from the RPC"
            }
            ErrorKind::BalanceInfo => {
                "There was an error while fetching balance information from the API"
            }
            ErrorKind::UtxoInfo => "There was an error while fetching UTXOs from the API",
            ErrorKind::AddressDerivation => {
                "There was an error while fetching the information from the Local RPC"
            }
        }
    }

    /// Whether a client retry can plausibly succeed
    pub fn retriable(&self) -> bool {
        !matches!(
            self,
            ErrorKind::InvalidRequest | ErrorKind::BlockNotFound | ErrorKind::TransactionNotFound
        )
    }

    /// HTTP status the envelope is served with
    pub fn status(&self) -> StatusCode {
        match self {
            ErrorKind::InvalidRequest => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Every catalog entry, in code order
    pub fn all() -> &'static [ErrorKind] {
        &[
            ErrorKind::InvalidRequest,
            ErrorKind::NetworkVersion,
            ErrorKind::BlockInfo,
            ErrorKind::BlockNotFound,
            ErrorKind::TransactionInfo,
            ErrorKind::TransactionNotFound,
            ErrorKind::MempoolInfo,
            ErrorKind::BalanceInfo,
            ErrorKind::UtxoInfo,
            ErrorKind::AddressDerivation,
        ]
    }
}

/// API-level error: a catalog entry plus internal detail.
///
/// The detail is for operators (tracing) and tests; it is never sent to the
/// client except for `InvalidRequest`, where it describes the client's own
/// input problem.
#[derive(Debug, Error)]
#[error("{}: {}", .kind.message(), .detail)]
pub struct ApiError {
    pub kind: ErrorKind,
    pub detail: String,
}

impl ApiError {
    pub fn new(kind: ErrorKind, detail: impl Into<String>) -> Self {
        Self {
            kind,
            detail: detail.into(),
        }
    }

    /// Malformed client input (HTTP 400)
    pub fn invalid_request(detail: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidRequest, detail)
    }
}

/// 400 envelope: `{"error": "..."}`
#[derive(Serialize)]
struct ClientErrorBody {
    error: String,
}

/// 500 envelope: `{"code": .., "message": .., "description": .., "retriable": ..}`
#[derive(Serialize)]
struct UpstreamErrorBody {
    code: u32,
    message: &'static str,
    description: &'static str,
    retriable: bool,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let kind = self.kind;

        if kind == ErrorKind::InvalidRequest {
            let body = ClientErrorBody { error: self.detail };
            return (kind.status(), Json(body)).into_response();
        }

        // Internal detail stays on the server side.
        tracing::warn!(
            code = kind.code(),
            detail = %self.detail,
            "request failed: {}",
            kind.message()
        );

        let body = UpstreamErrorBody {
            code: kind.code(),
            message: kind.message(),
            description: kind.description(),
            retriable: kind.retriable(),
        };
        (kind.status(), Json(body)).into_response()
    }
}

/// Result type alias used by the resolvers and routes
pub type Result<T> = std::result::Result<T, ApiError>;
