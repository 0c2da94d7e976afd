//! Core types for settlement engine

use ledger_core::{MemberId, NetBalance};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Point-to-point payment that settles part of a debt
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transfer {
    /// Member who pays (a debtor)
    pub payer: MemberId,

    /// Member who receives (a creditor)
    pub payee: MemberId,

    /// Amount paid, strictly positive
    pub amount: Decimal,
}

/// Ordered list of transfers that brings every balance to zero
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SettlementPlan {
    /// Transfers, in execution order
    pub transfers: Vec<Transfer>,
}

impl SettlementPlan {
    /// Wrap an ordered transfer list
    pub fn new(transfers: Vec<Transfer>) -> Self {
        Self { transfers }
    }

    /// Number of transfers
    pub fn len(&self) -> usize {
        self.transfers.len()
    }

    /// True if nobody needs to pay anyone
    pub fn is_empty(&self) -> bool {
        self.transfers.is_empty()
    }

    /// Iterate transfers in order
    pub fn iter(&self) -> std::slice::Iter<'_, Transfer> {
        self.transfers.iter()
    }

    /// Total money moved by the plan
    pub fn total_volume(&self) -> Decimal {
        self.transfers.iter().map(|t| t.amount).sum()
    }

    /// Balances after executing every transfer.
    ///
    /// Paying reduces the payer's debt and the payee's credit. Output keeps
    /// the input order; members only named by a transfer are appended.
    pub fn apply(&self, balances: &[NetBalance]) -> Vec<NetBalance> {
        let mut result: Vec<NetBalance> = balances.to_vec();
        let mut index: HashMap<MemberId, usize> = result
            .iter()
            .enumerate()
            .map(|(i, b)| (b.member_id.clone(), i))
            .collect();

        for transfer in &self.transfers {
            for (member_id, delta) in [
                (&transfer.payer, transfer.amount),
                (&transfer.payee, -transfer.amount),
            ] {
                let slot = *index.entry(member_id.clone()).or_insert_with(|| {
                    result.push(NetBalance {
                        member_id: member_id.clone(),
                        balance: Decimal::ZERO,
                    });
                    result.len() - 1
                });
                result[slot].balance += delta;
            }
        }

        result
    }

    /// True if executing the plan leaves every balance within `tolerance` of zero
    pub fn settles(&self, balances: &[NetBalance], tolerance: Decimal) -> bool {
        self.apply(balances)
            .iter()
            .all(|b| b.balance.abs() <= tolerance)
    }
}

impl IntoIterator for SettlementPlan {
    type Item = Transfer;
    type IntoIter = std::vec::IntoIter<Transfer>;

    fn into_iter(self) -> Self::IntoIter {
        self.transfers.into_iter()
    }
}

impl<'a> IntoIterator for &'a SettlementPlan {
    type Item = &'a Transfer;
    type IntoIter = std::slice::Iter<'a, Transfer>;

    fn into_iter(self) -> Self::IntoIter {
        self.transfers.iter()
    }
}

/// Balances and the plan that settles them
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settlement {
    /// Net balance per roster member
    pub balances: Vec<NetBalance>,

    /// Transfers that zero those balances
    pub plan: SettlementPlan,
}

/// Netting statistics
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NettingStats {
    /// Members with a non-zero balance
    pub participant_count: usize,

    /// Transfers in the plan
    pub transfer_count: usize,

    /// Total money moved
    pub total_volume: Decimal,
}

impl Settlement {
    /// Summarize the plan against its balances
    pub fn stats(&self, tolerance: Decimal) -> NettingStats {
        NettingStats {
            participant_count: self
                .balances
                .iter()
                .filter(|b| b.balance.abs() > tolerance)
                .count(),
            transfer_count: self.plan.len(),
            total_volume: self.plan.total_volume(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transfer(payer: &str, payee: &str, amount: i64) -> Transfer {
        Transfer {
            payer: MemberId::new(payer),
            payee: MemberId::new(payee),
            amount: Decimal::new(amount, 0),
        }
    }

    #[test]
    fn test_apply_zeroes_balances() {
        let balances = vec![
            NetBalance::new("A", Decimal::new(60, 0)),
            NetBalance::new("B", Decimal::new(-30, 0)),
            NetBalance::new("C", Decimal::new(-30, 0)),
        ];
        let plan = SettlementPlan::new(vec![transfer("B", "A", 30), transfer("C", "A", 30)]);

        let after = plan.apply(&balances);
        assert!(after.iter().all(|b| b.balance.is_zero()));
        assert_eq!(after[0].member_id.as_str(), "A");
        assert!(plan.settles(&balances, Decimal::ZERO));
        assert_eq!(plan.total_volume(), Decimal::new(60, 0));
    }

    #[test]
    fn test_apply_appends_unlisted_members() {
        let plan = SettlementPlan::new(vec![transfer("X", "Y", 5)]);
        let after = plan.apply(&[]);

        assert_eq!(after.len(), 2);
        assert_eq!(after[0], NetBalance::new("X", Decimal::new(5, 0)));
        assert_eq!(after[1], NetBalance::new("Y", Decimal::new(-5, 0)));
    }

    #[test]
    fn test_incomplete_plan_detected() {
        let balances = vec![
            NetBalance::new("A", Decimal::new(60, 0)),
            NetBalance::new("B", Decimal::new(-30, 0)),
            NetBalance::new("C", Decimal::new(-30, 0)),
        ];
        let plan = SettlementPlan::new(vec![transfer("B", "A", 30)]);
        assert!(!plan.settles(&balances, Decimal::new(1, 2)));
    }

    #[test]
    fn test_stats() {
        let settlement = Settlement {
            balances: vec![
                NetBalance::new("A", Decimal::new(10, 0)),
                NetBalance::new("B", Decimal::new(-10, 0)),
                NetBalance::new("C", Decimal::ZERO),
            ],
            plan: SettlementPlan::new(vec![transfer("B", "A", 10)]),
        };

        let stats = settlement.stats(Decimal::new(1, 2));
        assert_eq!(stats.participant_count, 2);
        assert_eq!(stats.transfer_count, 1);
        assert_eq!(stats.total_volume, Decimal::new(10, 0));
    }
}
