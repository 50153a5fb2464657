//! Expense service domain logic: listing, validation and the submission
//! workflow that ties them to storage.
use anyhow::Result;
use chrono::{Local, NaiveDate};
use shared::{
    Diagnostic, DiagnosticField, Expense, ExpenseFormDefaults, ExpenseFormInput,
    SubmissionOutcome, ValidationOutcome,
};
use tracing::{error, info, warn};

use crate::domain::models::expense::ExpenseRecord;
use crate::domain::validation::validate_expense;
use crate::io::rest::mappers::expense_mapper::ExpenseMapper;
use crate::storage::{Connection, ExpenseStorage, InsertError};

pub const INSERT_SUCCESS_MESSAGE: &str = "Row inserted successfully";
pub const SHAPE_FAILURE_MESSAGE: &str = "A type error occurred";
pub const STORAGE_FAILURE_MESSAGE: &str = "The expense could not be saved";
pub const REFRESH_FAILURE_MESSAGE: &str = "The expense list could not be refreshed";

/// Increment offered by the cost input
pub const COST_STEP: f64 = 1.0;

#[derive(Clone)]
pub struct ExpenseService<C: Connection> {
    expense_repository: C::ExpenseRepository,
    auto_refresh_after_insert: bool,
}

impl<C: Connection> ExpenseService<C> {
    pub fn new(connection: &C, auto_refresh_after_insert: bool) -> Self {
        Self {
            expense_repository: connection.create_expense_repository(),
            auto_refresh_after_insert,
        }
    }

    pub fn auto_refresh_after_insert(&self) -> bool {
        self.auto_refresh_after_insert
    }

    /// Initial values for an empty expense form
    pub fn form_defaults(&self, today: NaiveDate) -> ExpenseFormDefaults {
        ExpenseFormDefaults {
            date: today,
            max_date: today,
            cost: 0.0,
            cost_step: COST_STEP,
            location: String::new(),
            comment: String::new(),
            gift: false,
        }
    }

    /// Every stored expense, in store order
    pub async fn list_expenses(&self) -> Result<Vec<Expense>> {
        let records = self.expense_repository.fetch_all().await?;
        Ok(records.into_iter().map(ExpenseMapper::to_dto).collect())
    }

    /// Validate form input without persisting anything
    pub fn validate_form(&self, input: ExpenseFormInput, today: NaiveDate) -> ValidationOutcome {
        let candidate = ExpenseRecord::from_form(input, today);
        validate_expense(&candidate)
    }

    /// Submit the expense form, dating undated input with today's local date
    pub async fn submit_expense(&self, input: ExpenseFormInput) -> SubmissionOutcome {
        self.submit_expense_on(input, Local::now().date_naive()).await
    }

    /// Run the submission workflow.
    ///
    /// Rejected input is never persisted and the validation diagnostics are
    /// the only effect. Accepted input is inserted; insert failures become a
    /// single error diagnostic and never abort the interaction. After a
    /// successful insert the dataset is re-read when auto-refresh is on.
    pub async fn submit_expense_on(&self, input: ExpenseFormInput, today: NaiveDate) -> SubmissionOutcome {
        let candidate = ExpenseRecord::from_form(input, today);
        let validation = validate_expense(&candidate);
        let mut diagnostics = validation.diagnostics;

        if !validation.accepted {
            info!("Expense rejected by validation: {} diagnostic(s)", diagnostics.len());
            return SubmissionOutcome {
                accepted: false,
                dataset_refreshed: false,
                diagnostics,
                expenses: None,
            };
        }

        match self.expense_repository.insert_one(&candidate).await {
            Ok(()) => {
                info!(
                    "Expense stored: {} at '{}' on {}",
                    candidate.cost,
                    candidate.location,
                    candidate.calendar_date()
                );
                diagnostics.push(Diagnostic::info(DiagnosticField::Record, INSERT_SUCCESS_MESSAGE));
            }
            Err(InsertError::Shape(reason)) => {
                warn!("Expense failed shape check: {}", reason);
                diagnostics.push(Diagnostic::error(DiagnosticField::Record, SHAPE_FAILURE_MESSAGE));
                return Self::accepted_without_refresh(diagnostics);
            }
            Err(InsertError::Storage(e)) => {
                error!("Failed to store expense: {:#}", e);
                diagnostics.push(Diagnostic::error(DiagnosticField::Record, STORAGE_FAILURE_MESSAGE));
                return Self::accepted_without_refresh(diagnostics);
            }
        }

        if !self.auto_refresh_after_insert {
            return Self::accepted_without_refresh(diagnostics);
        }

        match self.list_expenses().await {
            Ok(expenses) => SubmissionOutcome {
                accepted: true,
                dataset_refreshed: true,
                diagnostics,
                expenses: Some(expenses),
            },
            Err(e) => {
                error!("Failed to refresh expenses after insert: {:#}", e);
                diagnostics.push(Diagnostic::warning(DiagnosticField::Record, REFRESH_FAILURE_MESSAGE));
                Self::accepted_without_refresh(diagnostics)
            }
        }
    }

    fn accepted_without_refresh(diagnostics: Vec<Diagnostic>) -> SubmissionOutcome {
        SubmissionOutcome {
            accepted: true,
            dataset_refreshed: false,
            diagnostics,
            expenses: None,
        }
    }
}
