//! Wire types for the delete-by-key endpoint

use serde::{Deserialize, Serialize};

use crate::sheet::Identifier;

/// Request body: `{"vendorGoodsCode": "<code>"}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteRequest {
    pub vendor_goods_code: String,
}

impl DeleteRequest {
    pub fn new(identifier: &Identifier) -> Self {
        Self {
            vendor_goods_code: identifier.as_str().to_string(),
        }
    }
}

/// Response body fields the endpoint may send back. Every field is optional
/// because error responses only carry a subset.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseBody {
    pub success: Option<bool>,
    pub vendor_goods_code: Option<String>,
    pub deleted_count: Option<u64>,
    pub message: Option<String>,
    pub error: Option<String>,
}

impl ResponseBody {
    /// Parse a body leniently; unparseable bodies yield an empty struct
    pub fn parse(text: &str) -> Self {
        serde_json::from_str(text).unwrap_or_default()
    }

    /// Human-readable reason, preferring `error` over `message`
    pub fn reason(&self) -> Option<String> {
        self.error.clone().or_else(|| self.message.clone())
    }
}

/// Outcome of one delete call that reached the server.
///
/// Transport faults are not represented here; the collaborator returns them as `Err`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteResponse {
    /// 2xx: the matching records were removed
    Deleted { deleted_count: u64 },
    /// 404: no record matched the identifier
    NotFound { message: Option<String> },
    /// 400: the request itself was refused, e.g. identifier missing
    Rejected { message: Option<String> },
    /// Any other status, typically 500
    Fault { status: u16, message: Option<String> },
}

impl DeleteResponse {
    /// Classify an HTTP status and body
    pub fn from_status(status: u16, body: &ResponseBody) -> Self {
        match status {
            200..=299 => Self::Deleted {
                deleted_count: body.deleted_count.unwrap_or(0),
            },
            404 => Self::NotFound {
                message: body.reason(),
            },
            400 => Self::Rejected {
                message: body.reason(),
            },
            _ => Self::Fault {
                status,
                message: body.reason(),
            },
        }
    }

    /// Equivalent HTTP status code
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Deleted { .. } => 200,
            Self::NotFound { .. } => 404,
            Self::Rejected { .. } => 400,
            Self::Fault { status, .. } => *status,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Deleted { .. })
    }

    pub fn is_error(&self) -> bool {
        !self.is_success()
    }
}
