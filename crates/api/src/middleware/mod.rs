//! Request middleware.
//!
//! - [`request_log::log_request`] -- logs method, path and body of every request.

pub mod request_log;
