//! Profit sharing: investors, monthly profit records with frozen proportional
//! distributions, and aggregate statistics, persisted as one JSON document.

mod ledger;
mod models;
mod store;

pub use ledger::{LedgerOpError, ProfitLedger};
pub use models::{
    distribute_profit, investment_ratio, investor_stats, overall_stats, total_investment,
    Investor, InvestorStats, MonthlyProfit, OverallStats, ProfitBook,
};
pub use store::ProfitStore;
