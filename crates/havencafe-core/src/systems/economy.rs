//! Economy - the gold ledger, transaction log, and upgrades

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionKind {
    Sale,
    Tip,
    Reward,
    Expense,
    Upgrade,
}

/// Record of a financial transaction. Negative amounts are money out.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub amount: i64,
    pub kind: TransactionKind,
    pub description: String,
    pub day: u32,
}

/// Purchasable cafe upgrades.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Upgrade {
    CarriedSlots,
    StorageSlots,
    FridgeSlots,
}

impl Upgrade {
    pub const ALL: [Upgrade; 3] = [Upgrade::CarriedSlots, Upgrade::StorageSlots, Upgrade::FridgeSlots];

    pub fn cost(&self) -> u32 {
        match self {
            Upgrade::CarriedSlots => 200,
            Upgrade::StorageSlots => 350,
            Upgrade::FridgeSlots => 300,
        }
    }

    /// Slots added per purchase.
    pub fn amount(&self) -> usize {
        match self {
            Upgrade::CarriedSlots => 5,
            Upgrade::StorageSlots => 20,
            Upgrade::FridgeSlots => 10,
        }
    }

    pub fn max_purchases(&self) -> u32 {
        match self {
            Upgrade::CarriedSlots => 4,
            Upgrade::StorageSlots => 3,
            Upgrade::FridgeSlots => 3,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Upgrade::CarriedSlots => "Bigger Backpack",
            Upgrade::StorageSlots => "Pantry Shelves",
            Upgrade::FridgeSlots => "Walk-in Fridge",
        }
    }
}

/// Errors from purchasing an upgrade.
#[derive(Debug, PartialEq, Eq)]
pub enum UpgradeError {
    MaxedOut,
    NotEnoughGold,
}

impl std::fmt::Display for UpgradeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UpgradeError::MaxedOut => write!(f, "upgrade already at maximum"),
            UpgradeError::NotEnoughGold => write!(f, "not enough gold"),
        }
    }
}

impl std::error::Error for UpgradeError {}

/// Per-upgrade purchase counters.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct UpgradeCounts {
    pub carried: u32,
    pub storage: u32,
    pub fridge: u32,
}

impl UpgradeCounts {
    pub fn get(&self, upgrade: Upgrade) -> u32 {
        match upgrade {
            Upgrade::CarriedSlots => self.carried,
            Upgrade::StorageSlots => self.storage,
            Upgrade::FridgeSlots => self.fridge,
        }
    }

    fn get_mut(&mut self, upgrade: Upgrade) -> &mut u32 {
        match upgrade {
            Upgrade::CarriedSlots => &mut self.carried,
            Upgrade::StorageSlots => &mut self.storage,
            Upgrade::FridgeSlots => &mut self.fridge,
        }
    }
}

/// How many transactions survive a save.
const TRANSACTION_HISTORY: usize = 50;

/// The cafe's finances.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Economy {
    gold: u32,
    pub transactions: Vec<Transaction>,
    daily_income: u32,
    daily_expenses: u32,
    total_earned: u64,
    total_spent: u64,
    pub upgrades: UpgradeCounts,
    current_day: u32,
}

impl Default for Economy {
    fn default() -> Self {
        Self::with_gold(0)
    }
}

impl Economy {
    pub fn with_gold(gold: u32) -> Self {
        Self {
            gold,
            transactions: Vec::new(),
            daily_income: 0,
            daily_expenses: 0,
            total_earned: 0,
            total_spent: 0,
            upgrades: UpgradeCounts::default(),
            current_day: 1,
        }
    }

    pub fn gold(&self) -> u32 {
        self.gold
    }

    pub fn can_afford(&self, amount: u32) -> bool {
        self.gold >= amount
    }

    /// Add gold and record the transaction.
    pub fn earn(&mut self, amount: u32, kind: TransactionKind, description: impl Into<String>) {
        if amount == 0 {
            return;
        }
        self.gold += amount;
        self.daily_income += amount;
        self.total_earned += amount as u64;
        self.push_transaction(Transaction {
            amount: amount as i64,
            kind,
            description: description.into(),
            day: self.current_day,
        });
    }

    /// Spend gold if available.
    pub fn spend(&mut self, amount: u32, kind: TransactionKind, description: impl Into<String>) -> bool {
        if amount == 0 {
            return true;
        }
        if self.gold < amount {
            return false;
        }
        self.gold -= amount;
        self.daily_expenses += amount;
        self.total_spent += amount as u64;
        self.push_transaction(Transaction {
            amount: -(amount as i64),
            kind,
            description: description.into(),
            day: self.current_day,
        });
        true
    }

    fn push_transaction(&mut self, transaction: Transaction) {
        self.transactions.push(transaction);
        if self.transactions.len() > TRANSACTION_HISTORY * 2 {
            let excess = self.transactions.len() - TRANSACTION_HISTORY;
            self.transactions.drain(..excess);
        }
    }

    /// Record an upgrade purchase. The caller applies the slot expansion.
    pub fn purchase_upgrade(&mut self, upgrade: Upgrade) -> Result<(), UpgradeError> {
        if self.upgrades.get(upgrade) >= upgrade.max_purchases() {
            return Err(UpgradeError::MaxedOut);
        }
        if !self.spend(
            upgrade.cost(),
            TransactionKind::Upgrade,
            format!("Purchased {}", upgrade.display_name()),
        ) {
            return Err(UpgradeError::NotEnoughGold);
        }
        *self.upgrades.get_mut(upgrade) += 1;
        Ok(())
    }

    pub fn upgrade_available(&self, upgrade: Upgrade) -> bool {
        self.upgrades.get(upgrade) < upgrade.max_purchases()
    }

    pub fn advance_day(&mut self) {
        self.current_day += 1;
        self.daily_income = 0;
        self.daily_expenses = 0;
    }

    pub fn daily_net(&self) -> i64 {
        self.daily_income as i64 - self.daily_expenses as i64
    }

    pub fn totals(&self) -> (u64, u64) {
        (self.total_earned, self.total_spent)
    }

    pub fn recent_transactions(&self, count: usize) -> impl Iterator<Item = &Transaction> {
        self.transactions.iter().rev().take(count)
    }

    /// Trim the transaction log to what a save keeps.
    pub fn trim_history(&mut self) {
        if self.transactions.len() > TRANSACTION_HISTORY {
            let excess = self.transactions.len() - TRANSACTION_HISTORY;
            self.transactions.drain(..excess);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_earn_and_spend() {
        let mut economy = Economy::with_gold(100);
        economy.earn(50, TransactionKind::Sale, "Sold Berry Tart");
        assert_eq!(economy.gold(), 150);

        assert!(economy.spend(120, TransactionKind::Expense, "Repairs"));
        assert_eq!(economy.gold(), 30);

        assert!(!economy.spend(100, TransactionKind::Expense, "Too pricey"));
        assert_eq!(economy.gold(), 30);
        assert_eq!(economy.daily_net(), 50 - 120);
    }

    #[test]
    fn test_upgrade_purchase_limits() {
        let mut economy = Economy::with_gold(10_000);
        for _ in 0..Upgrade::CarriedSlots.max_purchases() {
            economy.purchase_upgrade(Upgrade::CarriedSlots).unwrap();
        }
        assert_eq!(
            economy.purchase_upgrade(Upgrade::CarriedSlots),
            Err(UpgradeError::MaxedOut)
        );

        let mut poor = Economy::with_gold(10);
        assert_eq!(
            poor.purchase_upgrade(Upgrade::FridgeSlots),
            Err(UpgradeError::NotEnoughGold)
        );
    }

    #[test]
    fn test_transaction_history_trimmed() {
        let mut economy = Economy::with_gold(0);
        for i in 0..500 {
            economy.earn(1, TransactionKind::Tip, format!("tip {}", i));
        }
        economy.trim_history();
        assert_eq!(economy.transactions.len(), TRANSACTION_HISTORY);
        // Most recent survive
        assert_eq!(economy.transactions.last().unwrap().description, "tip 499");
    }

    #[test]
    fn test_daily_reset() {
        let mut economy = Economy::with_gold(0);
        economy.earn(10, TransactionKind::Sale, "sale");
        economy.advance_day();
        assert_eq!(economy.daily_net(), 0);
        assert_eq!(economy.totals().0, 10);
    }
}
