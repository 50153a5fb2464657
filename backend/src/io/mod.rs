//! # IO Module
//!
//! Interface layer between HTTP clients and the expense domain. Handlers hand
//! decoded requests to domain services and shape the results into JSON
//! responses with the appropriate status codes.
//!
//! ## Supported Operations
//!
//! - **GET /api/expenses/form**: Initial values for the expense form
//! - **POST /api/expenses**: Submit an expense through validation and storage
//! - **POST /api/expenses/validate**: Validate an expense without storing it
//! - **GET /api/expenses**: The full stored dataset
//! - **GET /api/expenses/table**: The dataset formatted for display
//! - **GET /api/expenses/summary**: Totals over a date range
//! - **GET /api/expenses/chart**: Cost over date series

pub mod rest;

pub use rest::*;
