//! # REST API Interface Layer
//!
//! HTTP endpoints for the grocery expense tracker. Handlers log the request,
//! call into the domain layer and translate failures into status codes.
//! Validation findings are not failures: they travel back as diagnostics in
//! a successful response.

pub mod expense_apis;
pub mod mappers;
pub mod summary_apis;
