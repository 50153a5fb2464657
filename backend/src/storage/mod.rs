//! # Storage Module
//!
//! Persistence for expense records.
//!
//! Expenses live as JSON documents in a single logical collection. The
//! backing store is SQLite reached through `sqlx`; the connection string
//! comes from configuration and the pool is opened once per process, then
//! handed to repositories explicitly through [`DbConnection`].
//!
//! ## Design Principles
//!
//! - **Repository Pattern**: the domain only sees [`ExpenseStorage`]
//! - **Append Only**: documents are inserted, never updated or deleted
//! - **Tolerant Reads**: stored dates are accepted in several encodings
//! - **Checked Writes**: a document must pass its shape check before insert

pub mod connection;
pub mod document;
pub mod expense_repository;
pub mod traits;

pub use connection::DbConnection;
pub use document::{ExpenseDocument, ShapeError};
pub use expense_repository::ExpenseRepository;
pub use traits::{Connection, ExpenseStorage, InsertError};
