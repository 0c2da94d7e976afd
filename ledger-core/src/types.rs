//! Core types for the ledger
//!
//! All types are designed for:
//! - Deterministic ordering (member ids compare lexicographically)
//! - Lossless serialization (amounts travel as decimal strings)
//! - Exact arithmetic (Decimal for money)

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Member identifier, unique within a group
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MemberId(String);

impl MemberId {
    /// Create new member ID
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get as string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MemberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for MemberId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Expense record identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExpenseId(String);

impl ExpenseId {
    /// Create new expense ID
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get as string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ExpenseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Group identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GroupId(String);

impl GroupId {
    /// Create new group ID
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get as string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Group member (reference data, never owned by the ledger)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    /// Member ID
    pub id: MemberId,

    /// Display name
    pub name: String,
}

impl Member {
    /// Create new member
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: MemberId::new(id),
            name: name.into(),
        }
    }
}

/// A set of members sharing expenses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Group {
    /// Group ID
    pub id: GroupId,

    /// Display name
    pub name: String,

    /// Members, in display order
    pub members: Vec<Member>,
}

impl Group {
    /// Member ids in roster order
    pub fn roster(&self) -> Vec<MemberId> {
        self.members.iter().map(|m| m.id.clone()).collect()
    }

    /// Look up a member by id
    pub fn member(&self, id: &MemberId) -> Option<&Member> {
        self.members.iter().find(|m| &m.id == id)
    }

    /// Expenses recorded against this group
    pub fn expenses<'a>(&self, expenses: &'a [ExpenseRecord]) -> Vec<&'a ExpenseRecord> {
        expenses
            .iter()
            .filter(|e| e.group_id.as_ref() == Some(&self.id))
            .collect()
    }
}

/// One participant's portion of an expense
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Share {
    /// Member owing this share
    pub member_id: MemberId,

    /// Share amount
    pub amount: Decimal,
}

impl Share {
    /// Create new share
    pub fn new(member_id: impl Into<String>, amount: Decimal) -> Self {
        Self {
            member_id: MemberId::new(member_id),
            amount,
        }
    }
}

/// Expense paid by one member and split among participants
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpenseRecord {
    /// Expense ID
    pub id: ExpenseId,

    /// Member who paid
    pub paid_by: MemberId,

    /// Total amount paid (strictly positive)
    pub amount: Decimal,

    /// Per-member allocation of `amount`
    pub split: Vec<Share>,

    /// Expense date (display ordering only)
    pub date: NaiveDate,

    /// Free-form description
    #[serde(default)]
    pub description: String,

    /// Owning group, if scoped
    #[serde(default)]
    pub group_id: Option<GroupId>,
}

impl ExpenseRecord {
    /// Create new expense record
    pub fn new(
        id: impl Into<String>,
        paid_by: impl Into<String>,
        amount: Decimal,
        split: Vec<Share>,
        date: NaiveDate,
    ) -> Self {
        Self {
            id: ExpenseId::new(id),
            paid_by: MemberId::new(paid_by),
            amount,
            split,
            date,
            description: String::new(),
            group_id: None,
        }
    }

    /// Attach a description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Scope the record to a group
    pub fn in_group(mut self, group_id: GroupId) -> Self {
        self.group_id = Some(group_id);
        self
    }

    /// Sum of all share amounts
    pub fn split_total(&self) -> Decimal {
        self.split.iter().map(|s| s.amount).sum()
    }

    /// `amount - split_total`
    pub fn discrepancy(&self) -> Decimal {
        self.amount - self.split_total()
    }
}

/// Net balance of one member (positive = is owed, negative = owes)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetBalance {
    /// Member ID
    pub member_id: MemberId,

    /// Total paid minus total share owed
    pub balance: Decimal,
}

impl NetBalance {
    /// Create new balance entry
    pub fn new(member_id: impl Into<String>, balance: Decimal) -> Self {
        Self {
            member_id: MemberId::new(member_id),
            balance,
        }
    }

    /// Classify the balance for display
    pub fn standing(&self, tolerance: Decimal) -> Standing {
        if self.balance.abs() <= tolerance {
            Standing::Settled
        } else if self.balance > Decimal::ZERO {
            Standing::Owed
        } else {
            Standing::Owes
        }
    }
}

/// Display classification of a net balance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Standing {
    /// Others owe this member
    Owed,
    /// This member owes others
    Owes,
    /// Balance is zero within tolerance
    Settled,
}

/// Sum of all balances; zero within tolerance for a closed group
pub fn residual(balances: &[NetBalance]) -> Decimal {
    balances.iter().map(|b| b.balance).sum()
}

/// Total amount spent across expenses
pub fn total_spent<'a>(expenses: impl IntoIterator<Item = &'a ExpenseRecord>) -> Decimal {
    expenses.into_iter().map(|e| e.amount).sum()
}
