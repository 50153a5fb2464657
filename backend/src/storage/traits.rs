//! # Storage Traits
//!
//! Abstractions that let the domain layer work against any expense store.

use anyhow::Result;
use async_trait::async_trait;
use thiserror::Error;

use super::document::ShapeError;
use crate::domain::models::expense::ExpenseRecord;

/// Why an insert did not happen
#[derive(Debug, Error)]
pub enum InsertError {
    /// The document failed its pre-insert shape check
    #[error("expense document has an unexpected shape: {0}")]
    Shape(#[from] ShapeError),

    /// The store itself failed (connection, I/O, serialization)
    #[error("expense store failure: {0}")]
    Storage(#[from] anyhow::Error),
}

/// Interface for expense storage operations
#[async_trait]
pub trait ExpenseStorage: Send + Sync {
    /// Return every stored expense, dates normalized to `NaiveDateTime`.
    /// Ordering is whatever the store returns.
    async fn fetch_all(&self) -> Result<Vec<ExpenseRecord>>;

    /// Unconditionally append one expense
    async fn insert_one(&self, record: &ExpenseRecord) -> Result<(), InsertError>;
}

/// A storage connection that can hand out repositories.
///
/// Services are generic over the connection so tests can swap in a
/// different store without touching domain code.
pub trait Connection: Send + Sync + Clone {
    type ExpenseRepository: ExpenseStorage + Clone;

    fn create_expense_repository(&self) -> Self::ExpenseRepository;
}
