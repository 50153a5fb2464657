//! # Domain Module
//!
//! Business logic for the grocery expense tracker, independent of HTTP and
//! of the storage backend.
//!
//! ## Module Organization
//!
//! - **validation**: pure acceptance rules and diagnostics for a candidate expense
//! - **expense_service**: listing expenses and the submission workflow
//! - **expense_table**: table formatting for display
//! - **range_summary**: date-range filtering and spend totals
//! - **chart**: optional cost-over-date series
//! - **money**: cent rounding and currency formatting
//!
//! ## Business Rules
//!
//! - An expense is accepted when its cost is above zero and it has a location
//! - A missing comment is worth a warning, never a rejection
//! - Costs are rounded half-up to two decimals before validation
//! - Dates are calendar dates stored at midnight
//! - Stored expenses are never changed; submissions only append

pub mod chart;
pub mod expense_service;
pub mod expense_table;
pub mod models;
pub mod money;
pub mod range_summary;
pub mod validation;

pub use expense_service::*;
pub use expense_table::*;
