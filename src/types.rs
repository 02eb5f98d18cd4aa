use crate::extract::{ShopDetail, ShopSummary};
use serde::Serialize;

/// Success/failure envelope returned by every operation.
///
/// On success the payload's fields sit next to `success`; on failure only
/// `success` and `error` are present.
#[derive(Debug, Clone, Serialize)]
pub struct QueryResult<T> {
    pub success: bool,
    #[serde(flatten)]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> QueryResult<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn err(msg: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(msg.into()),
        }
    }

    pub fn from_result(res: crate::Result<T>) -> Self {
        match res {
            Ok(v) => Self::ok(v),
            Err(e) => Self::err(e.to_string()),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.success
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

/// Ranking list plus the query it answers.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RankResponse {
    pub city: String,
    pub category: String,
    pub region: String,
    pub sort: String,
    pub url: String,
    pub result: Vec<ShopSummary>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DetailResponse {
    pub url: String,
    #[serde(flatten)]
    pub detail: ShopDetail,
}

/// Outcome of the startup login check.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionCheck {
    pub username: String,
    pub url: String,
}
