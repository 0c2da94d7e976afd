//! Main settlement engine
//!
//! Chains balance aggregation into netting.

use crate::{
    config::Config,
    netting::NettingEngine,
    types::{Settlement, SettlementPlan},
    Result,
};
use ledger_core::{ExpenseRecord, Group, Ledger, MemberId, NetBalance};

/// Settlement engine
#[derive(Debug, Clone)]
pub struct SettlementEngine {
    /// Balance aggregator
    ledger: Ledger,

    /// Netting engine
    netting: NettingEngine,

    /// Configuration
    config: Config,
}

impl SettlementEngine {
    /// Create new settlement engine
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;

        let ledger = Ledger::new(config.ledger.clone());
        let netting = NettingEngine::new(config.netting.clone(), config.ledger.tolerance);

        Ok(Self {
            ledger,
            netting,
            config,
        })
    }

    /// Active configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Net balance per member, in roster order
    pub fn balances(
        &self,
        members: &[MemberId],
        expenses: &[ExpenseRecord],
    ) -> Result<Vec<NetBalance>> {
        Ok(self.ledger.aggregate(members, expenses)?)
    }

    /// Transfers that settle `balances`
    pub fn optimize(&self, balances: &[NetBalance]) -> Result<SettlementPlan> {
        self.netting.optimize(balances)
    }

    /// Aggregate `expenses` and settle the resulting balances
    pub fn settle(&self, members: &[MemberId], expenses: &[ExpenseRecord]) -> Result<Settlement> {
        let balances = self.balances(members, expenses)?;
        let plan = self.optimize(&balances)?;

        tracing::info!(
            "Settlement computed: {} members, {} expenses, {} transfers moving {}",
            members.len(),
            expenses.len(),
            plan.len(),
            plan.total_volume()
        );

        Ok(Settlement { balances, plan })
    }

    /// Settle the expenses scoped to `group`
    pub fn settle_group(&self, group: &Group, expenses: &[ExpenseRecord]) -> Result<Settlement> {
        let scoped: Vec<ExpenseRecord> = group.expenses(expenses).into_iter().cloned().collect();
        self.settle(&group.roster(), &scoped)
    }
}
