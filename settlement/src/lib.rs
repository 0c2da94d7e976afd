//! Settlement Engine
//!
//! Computes the fewest point-to-point payments that square up a group's
//! shared expenses.
//!
//! # Architecture
//!
//! 1. **Aggregation**: fold expense records into net balances (`ledger_core`)
//! 2. **Netting**: match debtors with creditors into a [`SettlementPlan`]
//!
//! Both steps are pure functions of their inputs. Nothing is cached between
//! calls and no natural-language text is produced; rendering transfers for
//! people is left to the caller (see the `settle` binary).
//!
//! # Netting Algorithm
//!
//! - **Greedy** (default): largest debtor pays largest creditor, ties broken
//!   by member id; at most `N - 1` transfers for `N` non-zero members
//! - **Exact** (opt-in, small groups): partitions members into the most
//!   zero-sum subgroups, which yields the true minimum
//!
//! # Example
//!
//! ```
//! use ledger_core::NetBalance;
//! use rust_decimal::Decimal;
//!
//! let balances = vec![
//!     NetBalance::new("A", Decimal::new(60, 0)),
//!     NetBalance::new("B", Decimal::new(-30, 0)),
//!     NetBalance::new("C", Decimal::new(-30, 0)),
//! ];
//!
//! let plan = settlement::optimize(&balances)?;
//! assert_eq!(plan.len(), 2);
//! assert!(plan.settles(&balances, Decimal::ZERO));
//! # Ok::<(), settlement::Error>(())
//! ```

#![forbid(unsafe_code)]
#![warn(
    missing_docs,
    rust_2018_idioms,
    missing_debug_implementations,
    clippy::all
)]

pub mod types;
pub mod netting;
mod exact;
pub mod error;
pub mod config;
pub mod engine;

// Re-exports
pub use error::{Error, Result};
pub use types::*;
pub use config::{Config, NettingConfig, NettingStrategy};
pub use netting::{optimize, NettingEngine};
pub use engine::SettlementEngine;
