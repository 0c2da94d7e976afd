//! Split builders

use crate::{
    types::{ExpenseRecord, MemberId, Share},
    Error, Result,
};
use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};

/// Divide `amount` evenly among `participants`.
///
/// Each share is rounded down to `scale` decimal places; the leftover minor
/// units go one each to the first participants in order. The shares always
/// sum to exactly `amount`.
pub fn split_equally(amount: Decimal, participants: &[MemberId], scale: u32) -> Result<Vec<Share>> {
    if participants.is_empty() {
        return Err(Error::EmptySplit);
    }

    let count = Decimal::from(participants.len());
    let unit = Decimal::new(1, scale);
    let base = (amount / count).round_dp_with_strategy(scale, RoundingStrategy::ToZero);
    let mut leftover = amount - base * count;

    let mut shares: Vec<Share> = participants
        .iter()
        .map(|member_id| {
            let mut share = base;
            if leftover >= unit {
                share += unit;
                leftover -= unit;
            }
            Share {
                member_id: member_id.clone(),
                amount: share,
            }
        })
        .collect();

    // Sub-unit precision in `amount` itself
    if !leftover.is_zero() {
        shares[0].amount += leftover;
    }

    Ok(shares)
}

impl ExpenseRecord {
    /// Build a record whose amount is split evenly among `participants`
    pub fn split_equally(
        id: impl Into<String>,
        paid_by: impl Into<String>,
        amount: Decimal,
        participants: &[MemberId],
        date: NaiveDate,
        scale: u32,
    ) -> Result<Self> {
        let split = split_equally(amount, participants, scale)?;
        Ok(ExpenseRecord::new(id, paid_by, amount, split, date))
    }
}
