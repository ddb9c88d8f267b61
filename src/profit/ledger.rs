//! Profit ledger controller: owns the in-memory book and its store.

use chrono::{NaiveDate, Utc};
use uuid::Uuid;

use crate::config::{MAX_INVESTMENT, MAX_INVESTOR_NAME_LEN, MAX_PROFIT_AMOUNT, MIN_INVESTMENT};
use crate::error_handling::{LedgerError, StorageError};
use crate::profit::models::{
    distribute_profit, investor_stats, overall_stats, Investor, InvestorStats, MonthlyProfit,
    OverallStats, ProfitBook,
};
use crate::profit::store::ProfitStore;

/// Per-screen state for the profit calculator: the loaded book plus the
/// backing store. Every mutation persists the whole book before returning.
#[derive(Debug)]
pub struct ProfitLedger {
    book: ProfitBook,
    store: ProfitStore,
}

impl ProfitLedger {
    /// Opens the ledger, loading the existing book from the store.
    pub fn open(store: ProfitStore) -> Result<Self, StorageError> {
        let book = store.load()?;
        Ok(Self { book, store })
    }

    /// Adds an investor. Names must be non-empty, within the length limit, and
    /// unique; amounts must be finite and within the accepted range.
    pub fn add_investor(&mut self, name: &str, amount: f64) -> Result<Investor, LedgerOpError> {
        self.validate_investor_name(name, None)?;
        validate_investment(amount)?;

        let investor = Investor::new(name, amount);
        self.book.investors.push(investor.clone());
        self.persist()?;
        Ok(investor)
    }

    /// Updates an existing investor's name and stake. Past distributions are
    /// left untouched.
    pub fn update_investor(
        &mut self,
        id: Uuid,
        name: &str,
        amount: f64,
    ) -> Result<(), LedgerOpError> {
        self.validate_investor_name(name, Some(id))?;
        validate_investment(amount)?;

        let investor = self
            .book
            .investors
            .iter_mut()
            .find(|i| i.id == id)
            .ok_or(LedgerError::UnknownInvestor(id.to_string()))?;

        investor.name = name.to_string();
        investor.investment_amount = amount;
        self.persist()
    }

    /// Removes an investor. Historical profit records keep their frozen
    /// distributions for audit.
    pub fn remove_investor(&mut self, id: Uuid) -> Result<Investor, LedgerOpError> {
        let position = self
            .book
            .investors
            .iter()
            .position(|i| i.id == id)
            .ok_or(LedgerError::UnknownInvestor(id.to_string()))?;

        let removed = self.book.investors.remove(position);
        self.persist()?;
        Ok(removed)
    }

    /// Records one month's profit, splitting it across the current investors
    /// at this moment. The date must not be in the future and the amount must
    /// be within range; at least one investor must exist.
    pub fn record_profit(
        &mut self,
        date: NaiveDate,
        amount: f64,
    ) -> Result<MonthlyProfit, LedgerOpError> {
        if self.book.investors.is_empty() {
            return Err(LedgerError::NoInvestors.into());
        }
        if date > Utc::now().date_naive() {
            return Err(LedgerError::FutureDate.into());
        }
        if !amount.is_finite() || !(-MAX_PROFIT_AMOUNT..=MAX_PROFIT_AMOUNT).contains(&amount) {
            return Err(LedgerError::ProfitOutOfRange {
                min: -MAX_PROFIT_AMOUNT,
                max: MAX_PROFIT_AMOUNT,
            }
            .into());
        }

        let distributions = distribute_profit(amount, &self.book.investors);
        let record = MonthlyProfit::new(date, amount, distributions);
        self.book.monthly_profits.push(record.clone());
        self.persist()?;
        Ok(record)
    }

    /// Removes a profit record.
    pub fn remove_profit(&mut self, id: Uuid) -> Result<MonthlyProfit, LedgerOpError> {
        let position = self
            .book
            .monthly_profits
            .iter()
            .position(|p| p.id == id)
            .ok_or(LedgerError::UnknownRecord(id.to_string()))?;

        let removed = self.book.monthly_profits.remove(position);
        self.persist()?;
        Ok(removed)
    }

    /// The current investors.
    pub fn investors(&self) -> &[Investor] {
        &self.book.investors
    }

    /// The recorded profits, in recording order.
    pub fn profits(&self) -> &[MonthlyProfit] {
        &self.book.monthly_profits
    }

    /// One investor's aggregate view.
    pub fn investor_stats(&self, id: Uuid) -> InvestorStats {
        investor_stats(id, &self.book.investors, &self.book.monthly_profits)
    }

    /// Book-level totals.
    pub fn overall_stats(&self) -> OverallStats {
        overall_stats(&self.book)
    }

    fn validate_investor_name(&self, name: &str, except: Option<Uuid>) -> Result<(), LedgerError> {
        if name.is_empty() {
            return Err(LedgerError::EmptyName);
        }
        if name.chars().count() > MAX_INVESTOR_NAME_LEN {
            return Err(LedgerError::NameTooLong);
        }
        let duplicate = self
            .book
            .investors
            .iter()
            .any(|i| i.name == name && Some(i.id) != except);
        if duplicate {
            return Err(LedgerError::DuplicateName);
        }
        Ok(())
    }

    fn persist(&self) -> Result<(), LedgerOpError> {
        self.store.save(&self.book).map_err(LedgerOpError::Storage)
    }
}

fn validate_investment(amount: f64) -> Result<(), LedgerError> {
    if !amount.is_finite() || !(MIN_INVESTMENT..=MAX_INVESTMENT).contains(&amount) {
        return Err(LedgerError::InvestmentOutOfRange {
            min: MIN_INVESTMENT,
            max: MAX_INVESTMENT,
        });
    }
    Ok(())
}

/// Failure of a ledger operation: either the input was invalid or the store
/// rejected the write.
#[derive(Debug, thiserror::Error)]
pub enum LedgerOpError {
    #[error(transparent)]
    Invalid(#[from] LedgerError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ledger_in(dir: &std::path::Path) -> ProfitLedger {
        ProfitLedger::open(ProfitStore::open_in(dir)).expect("open ledger")
    }

    #[test]
    fn add_investor_validates_name_and_amount() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut ledger = ledger_in(dir.path());

        assert!(matches!(
            ledger.add_investor("", 100.0),
            Err(LedgerOpError::Invalid(LedgerError::EmptyName))
        ));
        assert!(matches!(
            ledger.add_investor(&"x".repeat(51), 100.0),
            Err(LedgerOpError::Invalid(LedgerError::NameTooLong))
        ));
        assert!(matches!(
            ledger.add_investor("alice", 0.0),
            Err(LedgerOpError::Invalid(
                LedgerError::InvestmentOutOfRange { .. }
            ))
        ));
        assert!(matches!(
            ledger.add_investor("alice", 20_000_000.0),
            Err(LedgerOpError::Invalid(
                LedgerError::InvestmentOutOfRange { .. }
            ))
        ));

        ledger.add_investor("alice", 100.0).expect("valid investor");
        assert!(matches!(
            ledger.add_investor("alice", 200.0),
            Err(LedgerOpError::Invalid(LedgerError::DuplicateName))
        ));
    }

    #[test]
    fn record_profit_requires_investors_and_valid_input() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut ledger = ledger_in(dir.path());
        let today = Utc::now().date_naive();

        assert!(matches!(
            ledger.record_profit(today, 100.0),
            Err(LedgerOpError::Invalid(LedgerError::NoInvestors))
        ));

        ledger.add_investor("alice", 1_000.0).expect("investor");

        let tomorrow = today.succ_opt().expect("valid date");
        assert!(matches!(
            ledger.record_profit(tomorrow, 100.0),
            Err(LedgerOpError::Invalid(LedgerError::FutureDate))
        ));
        assert!(matches!(
            ledger.record_profit(today, 20_000_000.0),
            Err(LedgerOpError::Invalid(LedgerError::ProfitOutOfRange { .. }))
        ));

        let record = ledger.record_profit(today, 100.0).expect("record");
        assert_eq!(record.distributions.len(), 1);
    }

    #[test]
    fn removing_an_investor_keeps_past_distributions() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut ledger = ledger_in(dir.path());
        let today = Utc::now().date_naive();

        ledger.add_investor("alice", 1_000.0).expect("investor");
        ledger.add_investor("bob", 3_000.0).expect("investor");
        ledger.record_profit(today, 400.0).expect("record");

        let alice_id = ledger.investors()[0].id;
        ledger.remove_investor(alice_id).expect("remove");

        assert_eq!(ledger.investors().len(), 1);
        // the frozen distribution still names the removed investor
        assert!(ledger.profits()[0].distributions.contains_key(&alice_id));

        // reload from disk: same picture
        let ledger = ledger_in(dir.path());
        assert_eq!(ledger.investors().len(), 1);
        assert!(ledger.profits()[0].distributions.contains_key(&alice_id));
    }

    #[test]
    fn update_investor_rewrites_name_and_stake() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut ledger = ledger_in(dir.path());

        ledger.add_investor("alice", 1_000.0).expect("investor");
        let id = ledger.investors()[0].id;

        ledger
            .update_investor(id, "alice2", 2_500.0)
            .expect("update");
        assert_eq!(ledger.investors()[0].name, "alice2");
        assert_eq!(ledger.investors()[0].investment_amount, 2_500.0);

        // keeping one's own name is not a duplicate
        ledger.update_investor(id, "alice2", 3_000.0).expect("same name ok");

        assert!(matches!(
            ledger.update_investor(Uuid::new_v4(), "carol", 100.0),
            Err(LedgerOpError::Invalid(LedgerError::UnknownInvestor(_)))
        ));
    }

    #[test]
    fn remove_profit_record() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut ledger = ledger_in(dir.path());
        let today = Utc::now().date_naive();

        ledger.add_investor("alice", 1_000.0).expect("investor");
        let id = ledger.record_profit(today, 100.0).expect("record").id;

        ledger.remove_profit(id).expect("remove");
        assert!(ledger.profits().is_empty());

        assert!(matches!(
            ledger.remove_profit(id),
            Err(LedgerOpError::Invalid(LedgerError::UnknownRecord(_)))
        ));
    }
}
