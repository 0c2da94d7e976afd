//! Multilateral settlement netting
//!
//! Turns a zero-sum set of net balances into point-to-point transfers.
//!
//! # Algorithm
//!
//! 1. Check the balances sum to zero (within tolerance)
//! 2. Drop members already square; split the rest into debtors and creditors
//! 3. Match the largest debtor with the largest creditor, ties going to the
//!    lower member id, and move `min(debt, credit)` between them
//! 4. Retire whoever reaches zero; repeat until one side runs out
//!
//! Balances within tolerance of zero count as square, but only while the
//! dust written off that way leaves the other members within tolerance as
//! well. Otherwise many sub-cent balances could add up to a debt nobody pays.
//!
//! Every round retires at least one member and the last round retires two
//! unless someone is left holding dust, so `N` non-zero members settle in at
//! most `N - 1` transfers. Greedy is not always the global minimum; the
//! [`NettingStrategy::Exact`] solver finds it for small groups.
//!
//! # Example
//!
//! ```text
//! Net positions:
//!   A: +50   B: +30   C: -40   D: -40
//!
//! Transfers:
//!   C pays A: 40    (A: +10, C settled)
//!   D pays B: 30    (B settled, D: -10)
//!   D pays A: 10    (everyone settled)
//! ```

use crate::{
    config::{NettingConfig, NettingStrategy, EXACT_PARTICIPANT_CAP},
    exact,
    types::{SettlementPlan, Transfer},
    Error, Result,
};
use ledger_core::{residual, MemberId, NetBalance};
use rust_decimal::Decimal;
use std::cmp::Ordering;
use std::collections::{BTreeMap, BinaryHeap};

/// Netting engine
#[derive(Debug, Clone)]
pub struct NettingEngine {
    /// Strategy and exact-solver limit
    config: NettingConfig,

    /// Balances within this distance of zero count as settled
    tolerance: Decimal,
}

impl Default for NettingEngine {
    fn default() -> Self {
        Self::new(NettingConfig::default(), ledger_core::Config::default().tolerance)
    }
}

impl NettingEngine {
    /// Create new netting engine
    pub fn new(config: NettingConfig, tolerance: Decimal) -> Self {
        Self { config, tolerance }
    }

    /// Settlement tolerance
    pub fn tolerance(&self) -> Decimal {
        self.tolerance
    }

    /// Compute the transfers that settle `balances`.
    ///
    /// Entries sharing a member id are summed. Fails with
    /// [`Error::UnbalancedLedger`] when the balances do not sum to zero.
    pub fn optimize(&self, balances: &[NetBalance]) -> Result<SettlementPlan> {
        let residual = residual(balances);
        if residual.abs() > self.tolerance {
            return Err(Error::UnbalancedLedger { residual });
        }

        let participants = Self::open_positions(balances);
        let exact_limit = self.config.exact_max_participants.min(EXACT_PARTICIPANT_CAP);

        let transfers = match self.config.strategy {
            NettingStrategy::Exact if participants.len() <= exact_limit => {
                self.settle_exact(&participants)
            }
            NettingStrategy::Exact => {
                tracing::debug!(
                    participants = participants.len(),
                    limit = exact_limit,
                    "Too many participants for exact netting, using greedy"
                );
                settle_greedy(&participants, self.tolerance)
            }
            NettingStrategy::Greedy => settle_greedy(&participants, self.tolerance),
        };

        tracing::debug!(
            participants = participants.len(),
            transfers = transfers.len(),
            strategy = %self.config.strategy,
            "Netting complete"
        );

        Ok(SettlementPlan::new(transfers))
    }

    /// Non-zero balances, merged per member and ordered by member id
    fn open_positions(balances: &[NetBalance]) -> Vec<NetBalance> {
        let mut merged: BTreeMap<&MemberId, Decimal> = BTreeMap::new();
        for entry in balances {
            *merged.entry(&entry.member_id).or_insert(Decimal::ZERO) += entry.balance;
        }

        merged
            .into_iter()
            .filter(|(_, balance)| !balance.is_zero())
            .map(|(member_id, balance)| NetBalance {
                member_id: member_id.clone(),
                balance,
            })
            .collect()
    }

    /// Greedy settlement inside each subgroup of the best zero-sum partition
    fn settle_exact(&self, participants: &[NetBalance]) -> Vec<Transfer> {
        let mut transfers = Vec::new();
        for group in exact::zero_sum_partition(participants, self.tolerance) {
            let members: Vec<NetBalance> =
                group.into_iter().map(|i| participants[i].clone()).collect();
            transfers.extend(settle_greedy(&members, self.tolerance));
        }
        transfers
    }
}

/// Compute a settlement plan with the default engine (greedy, one-cent tolerance)
pub fn optimize(balances: &[NetBalance]) -> Result<SettlementPlan> {
    NettingEngine::default().optimize(balances)
}

/// Outstanding amount for one side of the match
#[derive(Debug, Clone, PartialEq, Eq)]
struct Position {
    outstanding: Decimal,
    member_id: MemberId,
}

impl Ord for Position {
    fn cmp(&self, other: &Self) -> Ordering {
        // Max-heap: larger amount first, then lower member id
        self.outstanding
            .cmp(&other.outstanding)
            .then_with(|| other.member_id.cmp(&self.member_id))
    }
}

impl PartialOrd for Position {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Tracks rounding dust written off as settled.
///
/// Whatever is written off stays with the remaining members, so a balance
/// within tolerance of zero only counts as settled while the total written
/// off keeps the remainder within tolerance too.
#[derive(Debug)]
struct Dust {
    residual: Decimal,
    written_off: Decimal,
    tolerance: Decimal,
}

impl Dust {
    fn new(residual: Decimal, tolerance: Decimal) -> Self {
        Self {
            residual,
            written_off: Decimal::ZERO,
            tolerance,
        }
    }

    /// True if a member left at `balance` is settled
    fn absorb(&mut self, balance: Decimal) -> bool {
        if balance.is_zero() {
            return true;
        }

        let written_off = self.written_off + balance;
        if balance.abs() <= self.tolerance && (self.residual - written_off).abs() <= self.tolerance
        {
            self.written_off = written_off;
            return true;
        }

        false
    }
}

/// Largest-debtor-pays-largest-creditor matching.
///
/// Expects balances that sum to zero within `tolerance`. Every member ends
/// within `tolerance` of zero.
pub(crate) fn settle_greedy(balances: &[NetBalance], tolerance: Decimal) -> Vec<Transfer> {
    let mut dust = Dust::new(residual(balances), tolerance);
    let mut debtors = BinaryHeap::new();
    let mut creditors = BinaryHeap::new();

    for entry in balances {
        if dust.absorb(entry.balance) {
            continue;
        }

        let position = Position {
            outstanding: entry.balance.abs(),
            member_id: entry.member_id.clone(),
        };
        if entry.balance < Decimal::ZERO {
            debtors.push(position);
        } else {
            creditors.push(position);
        }
    }

    let mut transfers = Vec::with_capacity(debtors.len() + creditors.len());

    loop {
        let (Some(mut debtor), Some(mut creditor)) = (debtors.pop(), creditors.pop()) else {
            break;
        };

        let amount = debtor.outstanding.min(creditor.outstanding);
        transfers.push(Transfer {
            payer: debtor.member_id.clone(),
            payee: creditor.member_id.clone(),
            amount,
        });

        debtor.outstanding -= amount;
        creditor.outstanding -= amount;

        if !dust.absorb(-debtor.outstanding) {
            debtors.push(debtor);
        }
        if !dust.absorb(creditor.outstanding) {
            creditors.push(creditor);
        }
    }

    transfers
}
