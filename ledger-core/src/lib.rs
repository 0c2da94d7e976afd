//! Splitledger Ledger Core
//!
//! Folds shared-expense records into per-member net balances.
//!
//! # Architecture
//!
//! - **Stateless**: every call receives the roster and expenses explicitly
//! - **All-or-nothing**: validation of every record precedes accumulation
//! - **Exact arithmetic**: amounts are `rust_decimal::Decimal`, never floats
//!
//! # Invariants
//!
//! - Money conservation: Σ(net balances) == 0 within tolerance
//! - Deterministic output: balances come back in roster order
//!
//! # Example
//!
//! ```
//! use chrono::NaiveDate;
//! use ledger_core::{aggregate, ExpenseRecord, MemberId};
//! use rust_decimal::Decimal;
//!
//! let members = vec![MemberId::new("A"), MemberId::new("B")];
//! let date = NaiveDate::from_ymd_opt(2024, 7, 20).unwrap();
//! let dinner = ExpenseRecord::split_equally("e1", "A", Decimal::new(2000, 2), &members, date, 2)?;
//!
//! let balances = aggregate(&members, &[dinner])?;
//! assert_eq!(balances[0].balance, Decimal::new(1000, 2));
//! assert_eq!(balances[1].balance, Decimal::new(-1000, 2));
//! # Ok::<(), ledger_core::Error>(())
//! ```

#![forbid(unsafe_code)]
#![warn(
    missing_docs,
    rust_2018_idioms,
    missing_debug_implementations,
    clippy::all
)]

pub mod types;
pub mod ledger;
pub mod split;
pub mod error;
pub mod config;

// Re-exports
pub use error::{Error, Result};
pub use types::{
    residual, total_spent, ExpenseId, ExpenseRecord, Group, GroupId, Member, MemberId,
    NetBalance, Share, Standing,
};
pub use ledger::{aggregate, aggregate_group, Ledger};
pub use split::split_equally;
pub use config::Config;
