//! Balance aggregation
//!
//! Folds a set of expense records into one net balance per roster member.
//!
//! # Algorithm
//!
//! 1. Index the roster (rejecting duplicates)
//! 2. Validate every expense: positive amount, known payer, known and
//!    non-negative shares, split sum within tolerance of the amount
//! 3. Only then accumulate `paid - owed` per member
//!
//! Validation completes before any balance is touched, so a failed call
//! leaves nothing half-computed.
//!
//! A split accepted within tolerance is booked at its share total: the payer
//! absorbs the leftover discrepancy. Every record then nets to exactly zero,
//! so balances of a closed group sum to zero however many records carry
//! rounding slack.

use crate::{
    config::Config,
    types::{ExpenseRecord, Group, MemberId, NetBalance},
    Error, Result,
};
use rust_decimal::Decimal;
use std::collections::HashMap;

/// Stateless balance aggregator
#[derive(Debug, Clone, Default)]
pub struct Ledger {
    config: Config,
}

impl Ledger {
    /// Create new ledger aggregator
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Active configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Compute one net balance per member, in roster order
    pub fn aggregate(
        &self,
        members: &[MemberId],
        expenses: &[ExpenseRecord],
    ) -> Result<Vec<NetBalance>> {
        let index = Self::index_roster(members)?;

        for expense in expenses {
            self.validate_expense(&index, expense)?;
        }

        let mut totals = vec![Decimal::ZERO; members.len()];
        for expense in expenses {
            totals[index[&expense.paid_by]] += expense.split_total();
            for share in &expense.split {
                totals[index[&share.member_id]] -= share.amount;
            }
        }

        tracing::debug!(
            members = members.len(),
            expenses = expenses.len(),
            "Aggregated net balances"
        );

        Ok(members
            .iter()
            .zip(totals)
            .map(|(member_id, balance)| NetBalance {
                member_id: member_id.clone(),
                balance,
            })
            .collect())
    }

    /// Aggregate the expenses scoped to `group`
    pub fn aggregate_group(
        &self,
        group: &Group,
        expenses: &[ExpenseRecord],
    ) -> Result<Vec<NetBalance>> {
        let scoped: Vec<ExpenseRecord> = group.expenses(expenses).into_iter().cloned().collect();
        self.aggregate(&group.roster(), &scoped)
    }

    /// Map member id to roster position
    fn index_roster(members: &[MemberId]) -> Result<HashMap<&MemberId, usize>> {
        let mut index = HashMap::with_capacity(members.len());
        for (position, member_id) in members.iter().enumerate() {
            if index.insert(member_id, position).is_some() {
                return Err(Error::DuplicateMember(member_id.clone()));
            }
        }
        Ok(index)
    }

    /// Check a single expense against the roster and tolerance
    fn validate_expense(
        &self,
        index: &HashMap<&MemberId, usize>,
        expense: &ExpenseRecord,
    ) -> Result<()> {
        if expense.amount <= Decimal::ZERO {
            return Err(Error::InvalidAmount {
                expense_id: expense.id.clone(),
                amount: expense.amount,
            });
        }

        if !index.contains_key(&expense.paid_by) {
            return Err(Error::UnknownMember {
                member_id: expense.paid_by.clone(),
                expense_id: expense.id.clone(),
            });
        }

        for share in &expense.split {
            if !index.contains_key(&share.member_id) {
                return Err(Error::UnknownMember {
                    member_id: share.member_id.clone(),
                    expense_id: expense.id.clone(),
                });
            }

            if share.amount < Decimal::ZERO {
                return Err(Error::InvalidAmount {
                    expense_id: expense.id.clone(),
                    amount: share.amount,
                });
            }
        }

        let discrepancy = expense.discrepancy();
        if discrepancy.abs() > self.config.tolerance {
            return Err(Error::InvalidSplit {
                expense_id: expense.id.clone(),
                discrepancy,
            });
        }

        Ok(())
    }
}

/// Aggregate with the default configuration (one-cent tolerance)
pub fn aggregate(members: &[MemberId], expenses: &[ExpenseRecord]) -> Result<Vec<NetBalance>> {
    Ledger::default().aggregate(members, expenses)
}

/// Aggregate a group's expenses with the default configuration
pub fn aggregate_group(group: &Group, expenses: &[ExpenseRecord]) -> Result<Vec<NetBalance>> {
    Ledger::default().aggregate_group(group, expenses)
}
