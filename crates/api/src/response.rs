//! Shared response payloads that are not records themselves.

use serde::Serialize;

/// `{ "message": ... }` confirmation body.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}
