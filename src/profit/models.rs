//! Profit-sharing data model: investors, monthly profit records, and the
//! proportional distribution math.

use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One investor and their stake.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Investor {
    pub id: Uuid,
    pub name: String,
    pub investment_amount: f64,
    pub created_at: DateTime<Utc>,
}

impl Investor {
    /// Creates an investor with a fresh id.
    pub fn new(name: impl Into<String>, investment_amount: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            investment_amount,
            created_at: Utc::now(),
        }
    }
}

/// One month's profit and how it was split at record time.
///
/// Distributions are frozen when the record is created; removing an investor
/// later does not rewrite them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyProfit {
    pub id: Uuid,
    pub date: NaiveDate,
    pub total_profit: f64,
    /// Investor id → distributed amount.
    pub distributions: HashMap<Uuid, f64>,
    pub created_at: DateTime<Utc>,
}

impl MonthlyProfit {
    /// Creates a profit record with a fresh id.
    pub fn new(date: NaiveDate, total_profit: f64, distributions: HashMap<Uuid, f64>) -> Self {
        Self {
            id: Uuid::new_v4(),
            date,
            total_profit,
            distributions,
            created_at: Utc::now(),
        }
    }
}

/// The whole profit book: everything the store persists.
///
/// Hand-edited files sometimes hold `null` where a collection belongs; both
/// missing and `null` collections read as empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfitBook {
    #[serde(default, deserialize_with = "nullable_vec")]
    pub investors: Vec<Investor>,
    #[serde(default, deserialize_with = "nullable_vec")]
    pub monthly_profits: Vec<MonthlyProfit>,
}

fn nullable_vec<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Sum of all investments.
pub fn total_investment(investors: &[Investor]) -> f64 {
    investors.iter().map(|i| i.investment_amount).sum()
}

/// One investor's share of the total, in `0..=1`. Zero when there is no
/// investment at all.
pub fn investment_ratio(investor: &Investor, total: f64) -> f64 {
    if total == 0.0 {
        return 0.0;
    }
    investor.investment_amount / total
}

/// Splits `total_profit` across the investors, proportional to their stakes.
///
/// Empty input or a zero total investment yields an empty map. The distributed
/// amounts sum to `total_profit` within floating-point tolerance.
pub fn distribute_profit(total_profit: f64, investors: &[Investor]) -> HashMap<Uuid, f64> {
    let mut distributions = HashMap::new();

    if investors.is_empty() {
        return distributions;
    }

    let total = total_investment(investors);
    if total == 0.0 {
        return distributions;
    }

    for investor in investors {
        let ratio = investment_ratio(investor, total);
        distributions.insert(investor.id, total_profit * ratio);
    }

    distributions
}

/// Per-investor aggregate view.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InvestorStats {
    pub investor_id: Option<Uuid>,
    pub investor_name: String,
    pub investment_amount: f64,
    /// Share of the current total investment, in `0..=1`.
    pub investment_ratio: f64,
    /// Sum of all distributions this investor received.
    pub total_profit: f64,
    /// Investment plus accumulated profit.
    pub final_amount: f64,
    /// How many profit records included this investor.
    pub profit_count: usize,
}

/// Computes one investor's statistics. An unknown id yields the default
/// (all-zero) stats.
pub fn investor_stats(
    investor_id: Uuid,
    investors: &[Investor],
    profits: &[MonthlyProfit],
) -> InvestorStats {
    let Some(investor) = investors.iter().find(|i| i.id == investor_id) else {
        return InvestorStats::default();
    };

    let total = total_investment(investors);
    let mut stats = InvestorStats {
        investor_id: Some(investor.id),
        investor_name: investor.name.clone(),
        investment_amount: investor.investment_amount,
        investment_ratio: investment_ratio(investor, total),
        ..InvestorStats::default()
    };

    for profit in profits {
        if let Some(amount) = profit.distributions.get(&investor_id) {
            stats.total_profit += amount;
            stats.profit_count += 1;
        }
    }

    stats.final_amount = stats.investment_amount + stats.total_profit;
    stats
}

/// Book-level aggregate view.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OverallStats {
    pub total_investment: f64,
    pub total_profit: f64,
    pub investor_count: usize,
    pub profit_record_count: usize,
}

/// Computes totals over the whole book.
pub fn overall_stats(book: &ProfitBook) -> OverallStats {
    OverallStats {
        total_investment: total_investment(&book.investors),
        total_profit: book.monthly_profits.iter().map(|p| p.total_profit).sum(),
        investor_count: book.investors.len(),
        profit_record_count: book.monthly_profits.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn investors(stakes: &[(&str, f64)]) -> Vec<Investor> {
        stakes
            .iter()
            .map(|(name, amount)| Investor::new(*name, *amount))
            .collect()
    }

    #[test]
    fn distribution_sums_to_total_profit() {
        let investors = investors(&[("a", 10_000.0), ("b", 25_000.0), ("c", 7_331.50)]);
        let total_profit = 4_217.89;

        let distributions = distribute_profit(total_profit, &investors);

        assert_eq!(distributions.len(), 3);
        let sum: f64 = distributions.values().sum();
        assert!((sum - total_profit).abs() < 1e-6);
    }

    #[test]
    fn distribution_is_proportional() {
        let investors = investors(&[("a", 3_000.0), ("b", 1_000.0)]);

        let distributions = distribute_profit(400.0, &investors);

        assert!((distributions[&investors[0].id] - 300.0).abs() < 1e-9);
        assert!((distributions[&investors[1].id] - 100.0).abs() < 1e-9);
    }

    #[test]
    fn zero_total_investment_yields_empty_map() {
        assert!(distribute_profit(100.0, &[]).is_empty());

        let zero_stakes = investors(&[("a", 0.0), ("b", 0.0)]);
        assert!(distribute_profit(100.0, &zero_stakes).is_empty());
    }

    #[test]
    fn negative_profit_distributes_as_loss() {
        let investors = investors(&[("a", 1_000.0), ("b", 1_000.0)]);

        let distributions = distribute_profit(-500.0, &investors);

        assert!((distributions[&investors[0].id] - (-250.0)).abs() < 1e-9);
        let sum: f64 = distributions.values().sum();
        assert!((sum - (-500.0)).abs() < 1e-9);
    }

    #[test]
    fn investor_stats_accumulate_across_records() {
        let roster = investors(&[("a", 1_000.0), ("b", 3_000.0)]);
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).expect("valid date");

        let profits = vec![
            MonthlyProfit::new(date, 400.0, distribute_profit(400.0, &roster)),
            MonthlyProfit::new(date, 800.0, distribute_profit(800.0, &roster)),
        ];

        let stats = investor_stats(roster[0].id, &roster, &profits);
        assert_eq!(stats.investor_name, "a");
        assert_eq!(stats.profit_count, 2);
        assert!((stats.investment_ratio - 0.25).abs() < 1e-9);
        assert!((stats.total_profit - 300.0).abs() < 1e-9);
        assert!((stats.final_amount - 1_300.0).abs() < 1e-9);
    }

    #[test]
    fn unknown_investor_stats_are_zero() {
        let roster = investors(&[("a", 1_000.0)]);
        let stats = investor_stats(Uuid::new_v4(), &roster, &[]);
        assert_eq!(stats, InvestorStats::default());
    }

    #[test]
    fn overall_stats_cover_the_whole_book() {
        let roster = investors(&[("a", 1_000.0), ("b", 2_000.0)]);
        let date = NaiveDate::from_ymd_opt(2024, 5, 31).expect("valid date");
        let book = ProfitBook {
            monthly_profits: vec![
                MonthlyProfit::new(date, 150.0, distribute_profit(150.0, &roster)),
                MonthlyProfit::new(date, -50.0, distribute_profit(-50.0, &roster)),
            ],
            investors: roster,
        };

        let stats = overall_stats(&book);
        assert_eq!(stats.investor_count, 2);
        assert_eq!(stats.profit_record_count, 2);
        assert!((stats.total_investment - 3_000.0).abs() < 1e-9);
        assert!((stats.total_profit - 100.0).abs() < 1e-9);
    }
}
