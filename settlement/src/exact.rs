//! Exact transfer minimization for small groups
//!
//! A group of `k` members whose balances sum to zero can always be settled
//! in `k - 1` transfers, and no fewer if it has no zero-sum proper subset.
//! The fewest transfers for `N` members is therefore `N - G`, where `G` is
//! the largest number of zero-sum subgroups the members can be partitioned
//! into. Finding `G` is a search over subsets (exponential in `N`), so the
//! engine only runs it below a configured participant limit.

use ledger_core::NetBalance;
use rust_decimal::Decimal;

/// Best partition found for a member subset
#[derive(Debug, Clone, Copy)]
struct Choice {
    /// Subgroups in the partition
    groups: u32,
    /// First subgroup (always holds the subset's lowest member)
    first: usize,
}

/// Partition `balances` into the largest number of zero-sum subgroups.
///
/// Returns groups of indices into `balances`. Groups are ordered by their
/// lowest index and indices within a group ascend. Expects the whole set to
/// sum to zero within `tolerance` and fewer than `usize::BITS` entries.
pub(crate) fn zero_sum_partition(balances: &[NetBalance], tolerance: Decimal) -> Vec<Vec<usize>> {
    let n = balances.len();
    if n == 0 {
        return Vec::new();
    }

    let full = (1usize << n) - 1;

    let mut sums = vec![Decimal::ZERO; full + 1];
    for mask in 1..=full {
        let low = mask.trailing_zeros() as usize;
        sums[mask] = sums[mask & (mask - 1)] + balances[low].balance;
    }

    let mut memo: Vec<Option<Choice>> = vec![None; full + 1];
    best(full, &sums, tolerance, &mut memo);

    let mut groups = Vec::new();
    let mut mask = full;
    while mask != 0 {
        let Some(choice) = memo[mask] else { break };
        groups.push(
            (0..n)
                .filter(|&i| ((choice.first >> i) & 1) == 1)
                .collect::<Vec<usize>>(),
        );
        mask ^= choice.first;
    }

    groups
}

/// Largest zero-sum partition of `mask`, which must itself be zero-sum
fn best(mask: usize, sums: &[Decimal], tolerance: Decimal, memo: &mut [Option<Choice>]) -> u32 {
    if mask == 0 {
        return 0;
    }
    if let Some(choice) = memo[mask] {
        return choice.groups;
    }

    let zero = |m: usize| sums[m].abs() <= tolerance;

    let low = mask & mask.wrapping_neg();
    let rest = mask ^ low;

    // The whole subset as one group
    let mut choice = Choice {
        groups: 1,
        first: mask,
    };

    // Every proper subgroup containing the lowest member
    let mut sub = rest;
    loop {
        sub = sub.wrapping_sub(1) & rest;
        let group = sub | low;
        if group != mask && zero(group) && zero(mask ^ group) {
            let groups = 1 + best(mask ^ group, sums, tolerance, memo);
            if groups > choice.groups {
                choice = Choice {
                    groups,
                    first: group,
                };
            }
        }
        if sub == 0 {
            break;
        }
    }

    memo[mask] = Some(choice);
    choice.groups
}
