//! Error types for the ledger

use crate::types::{ExpenseId, MemberId};
use rust_decimal::Decimal;
use thiserror::Error;

/// Result type for ledger operations
pub type Result<T> = std::result::Result<T, Error>;

/// Ledger errors
#[derive(Error, Debug)]
pub enum Error {
    /// Expense references a member outside the roster
    #[error("Unknown member {member_id} referenced by expense {expense_id}")]
    UnknownMember {
        /// Offending member id
        member_id: MemberId,
        /// Expense carrying the reference
        expense_id: ExpenseId,
    },

    /// Split does not add up to the expense amount
    #[error("Invalid split for expense {expense_id}: off by {discrepancy}")]
    InvalidSplit {
        /// Offending expense
        expense_id: ExpenseId,
        /// Expense amount minus split sum
        discrepancy: Decimal,
    },

    /// Non-positive expense amount or negative share
    #[error("Invalid amount {amount} in expense {expense_id}")]
    InvalidAmount {
        /// Offending expense
        expense_id: ExpenseId,
        /// Offending amount
        amount: Decimal,
    },

    /// Roster lists the same member twice
    #[error("Duplicate member in roster: {0}")]
    DuplicateMember(MemberId),

    /// Split requested over no participants
    #[error("Cannot split an expense among zero participants")]
    EmptySplit,

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
