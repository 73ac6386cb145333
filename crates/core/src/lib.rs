//! Domain building blocks for the gradebook service.
//!
//! Everything in this crate is pure: no I/O, no async. The store and the
//! HTTP layer both depend on it, and so can any client that needs the same
//! grade rule or roster views.

pub mod error;
pub mod grading;
pub mod roster;
pub mod student;
pub mod types;
