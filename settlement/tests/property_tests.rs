//! Property-based tests for settlement invariants
//!
//! These tests use proptest to verify critical invariants:
//! - Settlement correctness: applying the plan zeroes every balance
//! - Transfer bound: at most N - 1 transfers for N non-zero members
//! - Positivity: every transfer moves a strictly positive amount
//! - Determinism: same balances → same plan
//! - Exact solver never needs more transfers than greedy

use chrono::NaiveDate;
use ledger_core::{ExpenseRecord, MemberId, NetBalance, Share};
use proptest::prelude::*;
use rust_decimal::Decimal;
use settlement::{
    optimize, Config, NettingConfig, NettingEngine, NettingStrategy, SettlementEngine,
    SettlementPlan,
};

const ROSTER: [&str; 4] = ["ana", "ben", "cleo", "dev"];

/// Strategy for generating zero-sum balance sets (amounts in cents)
fn balances_strategy(max_members: usize) -> impl Strategy<Value = Vec<NetBalance>> {
    prop::collection::vec(-50_000i64..50_000i64, 1..max_members).prop_map(|cents| {
        let closing: i64 = -cents.iter().sum::<i64>();
        cents
            .into_iter()
            .chain(std::iter::once(closing))
            .enumerate()
            .map(|(i, c)| NetBalance::new(format!("m{:02}", i), Decimal::new(c, 2)))
            .collect()
    })
}

/// Strategy for small integer balance sets where zero-sum subgroups are common
fn small_balances_strategy() -> impl Strategy<Value = Vec<NetBalance>> {
    prop::collection::vec(-6i64..=6i64, 1..8).prop_map(|units| {
        let closing: i64 = -units.iter().sum::<i64>();
        units
            .into_iter()
            .chain(std::iter::once(closing))
            .enumerate()
            .map(|(i, u)| NetBalance::new(format!("m{}", i), Decimal::new(u, 0)))
            .collect()
    })
}

/// Strategy for an expense split evenly in whole cents, off by up to one cent
fn slack_expense_strategy() -> impl Strategy<Value = ExpenseRecord> {
    (
        0usize..ROSTER.len(),
        3i64..100_000i64,
        proptest::sample::subsequence(ROSTER.to_vec(), 1..=ROSTER.len()),
        -1i64..=1i64,
    )
        .prop_map(|(payer, cents, participants, nudge)| {
            let each = cents / participants.len() as i64;
            let mut split: Vec<Share> = participants
                .iter()
                .map(|member| Share::new(*member, Decimal::new(each, 2)))
                .collect();
            // Hand the remainder to the first participant, then nudge by a cent
            let remainder = cents - each * participants.len() as i64;
            let first = (split[0].amount + Decimal::new(remainder + nudge, 2)).max(Decimal::ZERO);
            split[0].amount = first;

            ExpenseRecord::new(
                format!("e{}-{}", payer, cents),
                ROSTER[payer],
                Decimal::new(cents, 2),
                split,
                NaiveDate::from_ymd_opt(2024, 7, 20).unwrap(),
            )
        })
}

fn non_zero(balances: &[NetBalance]) -> usize {
    balances.iter().filter(|b| !b.balance.is_zero()).count()
}

fn exact_engine() -> NettingEngine {
    NettingEngine::new(
        NettingConfig {
            strategy: NettingStrategy::Exact,
            exact_max_participants: 8,
        },
        tolerance(),
    )
}

fn tolerance() -> Decimal {
    Decimal::new(1, 2)
}

fn assert_valid(plan: &SettlementPlan, balances: &[NetBalance]) -> Result<(), TestCaseError> {
    prop_assert!(plan.settles(balances, tolerance()));
    prop_assert!(plan.iter().all(|t| t.amount > Decimal::ZERO));
    prop_assert!(plan.iter().all(|t| t.payer != t.payee));
    prop_assert!(plan.len() <= non_zero(balances).saturating_sub(1));
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(300))]

    /// Property: the greedy plan settles everyone within the transfer bound
    #[test]
    fn prop_greedy_settles(balances in balances_strategy(40)) {
        let plan = optimize(&balances).unwrap();
        assert_valid(&plan, &balances)?;
    }

    /// Property: rounding dust never piles up beyond tolerance
    #[test]
    fn prop_dust_stays_within_tolerance(
        dust in prop::collection::vec(prop_oneof![Just(-1i64), Just(1i64)], 1..30),
        whole in prop::collection::vec(-500i64..500i64, 0..5),
    ) {
        // One-cent balances plus a few larger ones, closed to zero by the last member
        let cents: Vec<i64> = dust.into_iter().chain(whole).collect();
        let closing: i64 = -cents.iter().sum::<i64>();
        let balances: Vec<NetBalance> = cents
            .into_iter()
            .chain(std::iter::once(closing))
            .enumerate()
            .map(|(i, c)| NetBalance::new(format!("d{:02}", i), Decimal::new(c, 2)))
            .collect();

        let plan = optimize(&balances).unwrap();
        assert_valid(&plan, &balances)?;
    }

    /// Property: same balances always produce the same plan
    #[test]
    fn prop_deterministic(balances in balances_strategy(20)) {
        prop_assert_eq!(optimize(&balances).unwrap(), optimize(&balances).unwrap());
    }

    /// Property: input order does not change the plan
    #[test]
    fn prop_order_independent(balances in balances_strategy(20)) {
        let mut reversed = balances.clone();
        reversed.reverse();
        prop_assert_eq!(optimize(&balances).unwrap(), optimize(&reversed).unwrap());
    }

    /// Property: any residual beyond tolerance is rejected
    #[test]
    fn prop_unbalanced_rejected(
        balances in balances_strategy(20),
        skew in prop_oneof![(2i64..10_000i64), (-10_000i64..-1i64)],
    ) {
        let mut balances = balances;
        balances[0].balance += Decimal::new(skew, 2);

        match optimize(&balances) {
            Err(settlement::Error::UnbalancedLedger { residual }) => {
                prop_assert_eq!(residual, Decimal::new(skew, 2));
            }
            other => prop_assert!(false, "expected UnbalancedLedger, got {:?}", other),
        }
    }

    /// Property: expenses accepted within tolerance always settle
    #[test]
    fn prop_slack_expenses_settle(
        expenses in prop::collection::vec(slack_expense_strategy(), 1..80),
    ) {
        let members: Vec<MemberId> = ROSTER.iter().map(|id| MemberId::new(*id)).collect();
        let engine = SettlementEngine::new(Config::default()).unwrap();

        let settlement = engine.settle(&members, &expenses).unwrap();

        prop_assert!(ledger_core::residual(&settlement.balances).abs() <= tolerance());
        assert_valid(&settlement.plan, &settlement.balances)?;
    }

    /// Property: the exact solver is valid and never worse than greedy
    #[test]
    fn prop_exact_at_most_greedy(balances in small_balances_strategy()) {
        let greedy = optimize(&balances).unwrap();
        let exact = exact_engine().optimize(&balances).unwrap();

        assert_valid(&exact, &balances)?;
        prop_assert!(exact.len() <= greedy.len());
    }
}
