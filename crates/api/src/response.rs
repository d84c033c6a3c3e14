//! Response payloads that are not plain entities.

use serde::Serialize;

/// Body returned by `DELETE /products`.
#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub message: &'static str,
    /// Number of products actually removed.
    pub deleted: u64,
}
