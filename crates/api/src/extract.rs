//! Extractors whose rejections go through [`AppError`].
//!
//! Plain `axum::Json` and `axum::extract::Path` answer malformed input with
//! a text body. These wrappers keep every error response in the same
//! `{ "error", "code" }` shape.

use axum::extract::{FromRequest, FromRequestParts};

use crate::error::AppError;

/// `axum::Json` with an [`AppError`] rejection.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

/// `axum::extract::Path` with an [`AppError`] rejection.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct AppPath<T>(pub T);
