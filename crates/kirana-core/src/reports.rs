//! # Reports (Aggregation Engine)
//!
//! Pure rollups over store snapshots: cart math, day/month revenue,
//! expenses, net profit, outstanding udhaar and recent-history slicing.
//!
//! ## One "now" per pass
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  ReportSummary::compute(sales, expenses, udhaar, now)                  │
//! │                                                                         │
//! │      now ──┬──► Bucket::Day.contains(sale.date, now)   → today         │
//! │            ├──► Bucket::Month.contains(sale.date, now) → this month    │
//! │            └──► Bucket::Month.contains(exp.date, now)  → expenses      │
//! │                                                                         │
//! │  The caller reads the clock ONCE. Every comparison in the pass uses    │
//! │  the same instant, so "today" can never straddle midnight halfway      │
//! │  through a computation.                                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Calendar fields are read from the timestamps as stored (UTC).

use chrono::{DateTime, Datelike, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::types::{CartItem, Expense, Sale, UdhaarEntry};

// =============================================================================
// Cart Math
// =============================================================================

/// `round2(price × quantity × (1 − discount/100))`, half-up, once per line.
///
/// The discount is clamped to 0–100 here, so even a hand-built line with
/// `discount = 150` yields ₹0.00 rather than a negative subtotal.
///
/// ```rust
/// use kirana_core::money::Money;
/// use kirana_core::reports::line_subtotal;
/// use rust_decimal::Decimal;
///
/// let line = line_subtotal(Money::from_paise(10000), Decimal::from(2), Decimal::from(10));
/// assert_eq!(line.paise(), 18000);
/// ```
pub fn line_subtotal(price: Money, quantity: Decimal, discount: Decimal) -> Money {
    price.line_total(quantity, discount)
}

/// Sum of line subtotals. No second rounding.
pub fn cart_total(lines: &[CartItem]) -> Money {
    lines.iter().map(CartItem::subtotal).sum()
}

// =============================================================================
// Date Buckets
// =============================================================================

/// A time window for rollups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum Bucket {
    /// Same calendar date (year-month-day).
    Day,
    /// Same year and month.
    Month,
}

impl Bucket {
    /// Whether `timestamp` falls in the same bucket as `now`.
    pub fn contains(&self, timestamp: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        match self {
            Bucket::Day => timestamp.date_naive() == now.date_naive(),
            Bucket::Month => timestamp.year() == now.year() && timestamp.month() == now.month(),
        }
    }
}

/// Sales in a bucket, in stored order.
pub fn sales_in(sales: &[Sale], bucket: Bucket, now: DateTime<Utc>) -> Vec<&Sale> {
    sales
        .iter()
        .filter(|sale| bucket.contains(sale.date, now))
        .collect()
}

/// Sum of `total` over the sales in a bucket.
pub fn revenue(sales: &[Sale], bucket: Bucket, now: DateTime<Utc>) -> Money {
    sales
        .iter()
        .filter(|sale| bucket.contains(sale.date, now))
        .map(|sale| sale.total)
        .sum()
}

/// Sum of `amount` over the expenses in a bucket.
pub fn expense_total(expenses: &[Expense], bucket: Bucket, now: DateTime<Utc>) -> Money {
    expenses
        .iter()
        .filter(|expense| bucket.contains(expense.date, now))
        .map(|expense| expense.amount)
        .sum()
}

/// Monthly revenue minus monthly expenses. May be negative.
pub fn net_profit(sales: &[Sale], expenses: &[Expense], now: DateTime<Utc>) -> Money {
    revenue(sales, Bucket::Month, now) - expense_total(expenses, Bucket::Month, now)
}

/// Today's expenses, newest first.
pub fn todays_expenses(expenses: &[Expense], now: DateTime<Utc>) -> Vec<&Expense> {
    let mut today: Vec<&Expense> = expenses
        .iter()
        .filter(|expense| Bucket::Day.contains(expense.date, now))
        .collect();
    today.sort_by(|a, b| b.date.cmp(&a.date));
    today
}

// =============================================================================
// Udhaar
// =============================================================================

/// Sum of amounts still owed (entries not marked paid).
pub fn outstanding_udhaar(entries: &[UdhaarEntry]) -> Money {
    entries
        .iter()
        .filter(|entry| !entry.paid)
        .map(|entry| entry.amount)
        .sum()
}

/// Entries still owed, newest first.
pub fn unpaid_entries(entries: &[UdhaarEntry]) -> Vec<&UdhaarEntry> {
    newest_first(entries.iter().filter(|entry| !entry.paid))
}

/// Settled entries, newest first.
pub fn paid_entries(entries: &[UdhaarEntry]) -> Vec<&UdhaarEntry> {
    newest_first(entries.iter().filter(|entry| entry.paid))
}

fn newest_first<'a>(entries: impl Iterator<Item = &'a UdhaarEntry>) -> Vec<&'a UdhaarEntry> {
    let mut entries: Vec<&UdhaarEntry> = entries.collect();
    entries.sort_by(|a, b| b.date.cmp(&a.date));
    entries
}

// =============================================================================
// Recent History
// =============================================================================

/// The `limit` most recent sales, newest first.
///
/// The sort is stable: sales with identical timestamps keep their
/// insertion order.
pub fn recent_sales(sales: &[Sale], limit: usize) -> Vec<&Sale> {
    let mut sorted: Vec<&Sale> = sales.iter().collect();
    sorted.sort_by(|a, b| b.date.cmp(&a.date));
    sorted.truncate(limit);
    sorted
}

// =============================================================================
// Summary
// =============================================================================

/// Everything the reports screen shows, computed against a single `now`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ReportSummary {
    pub today_revenue: Money,
    pub today_bill_count: usize,
    pub today_expenses: Money,
    pub month_revenue: Money,
    pub month_expenses: Money,
    /// `month_revenue − month_expenses`; negative in a loss-making month.
    pub net_profit: Money,
    pub outstanding_udhaar: Money,
}

impl ReportSummary {
    pub fn compute(
        sales: &[Sale],
        expenses: &[Expense],
        udhaar: &[UdhaarEntry],
        now: DateTime<Utc>,
    ) -> Self {
        let month_revenue = revenue(sales, Bucket::Month, now);
        let month_expenses = expense_total(expenses, Bucket::Month, now);

        ReportSummary {
            today_revenue: revenue(sales, Bucket::Day, now),
            today_bill_count: sales_in(sales, Bucket::Day, now).len(),
            today_expenses: expense_total(expenses, Bucket::Day, now),
            month_revenue,
            month_expenses,
            net_profit: month_revenue - month_expenses,
            outstanding_udhaar: outstanding_udhaar(udhaar),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, s).unwrap()
    }

    fn sale(id: &str, date: DateTime<Utc>, total_paise: i64) -> Sale {
        Sale {
            id: id.to_string(),
            date,
            items: Vec::new(),
            total: Money::from_paise(total_paise),
            store_name: "My Kirana Store".to_string(),
        }
    }

    fn expense(date: DateTime<Utc>, amount_paise: i64) -> Expense {
        Expense {
            id: format!("e-{}", amount_paise),
            date,
            description: "Transport".to_string(),
            amount: Money::from_paise(amount_paise),
        }
    }

    fn udhaar(amount_paise: i64, paid: bool, date: DateTime<Utc>) -> UdhaarEntry {
        UdhaarEntry {
            id: format!("u-{}", amount_paise),
            customer_name: "Ramesh".to_string(),
            amount: Money::from_paise(amount_paise),
            date,
            note: None,
            paid,
        }
    }

    #[test]
    fn test_line_subtotal_examples() {
        let d = |n: i64| Decimal::from(n);
        assert_eq!(line_subtotal(Money::from_paise(10000), d(2), d(10)).paise(), 18000);
        assert_eq!(line_subtotal(Money::from_paise(3333), d(1), d(0)).paise(), 3333);
        assert_eq!(line_subtotal(Money::from_paise(1000), d(1), d(33)).paise(), 670);
    }

    #[test]
    fn test_bucket_day() {
        let now = at(2024, 3, 15, 10, 0, 0);
        assert!(Bucket::Day.contains(at(2024, 3, 15, 0, 0, 0), now));
        assert!(Bucket::Day.contains(at(2024, 3, 15, 23, 59, 59), now));
        assert!(!Bucket::Day.contains(at(2024, 3, 14, 23, 59, 59), now));
        assert!(!Bucket::Day.contains(at(2023, 3, 15, 10, 0, 0), now));
    }

    #[test]
    fn test_bucket_month_boundary() {
        let last_second = at(2024, 1, 31, 23, 59, 59);

        assert!(Bucket::Month.contains(last_second, at(2024, 1, 5, 9, 0, 0)));
        assert!(!Bucket::Month.contains(last_second, at(2024, 2, 1, 0, 0, 0)));
        // same month, different year
        assert!(!Bucket::Month.contains(last_second, at(2025, 1, 31, 23, 59, 59)));
    }

    #[test]
    fn test_revenue_rollups() {
        let now = at(2024, 3, 15, 18, 0, 0);
        let sales = vec![
            sale("a", at(2024, 3, 15, 9, 0, 0), 12000),
            sale("b", at(2024, 3, 15, 17, 30, 0), 4550),
            sale("c", at(2024, 3, 2, 11, 0, 0), 30000),
            sale("d", at(2024, 2, 29, 23, 59, 59), 99900),
        ];

        assert_eq!(revenue(&sales, Bucket::Day, now).paise(), 16550);
        assert_eq!(revenue(&sales, Bucket::Month, now).paise(), 46550);
        assert_eq!(sales_in(&sales, Bucket::Day, now).len(), 2);
    }

    #[test]
    fn test_net_profit_can_be_negative() {
        let now = at(2024, 3, 15, 18, 0, 0);
        let sales = vec![sale("a", at(2024, 3, 10, 9, 0, 0), 10000)];
        let expenses = vec![
            expense(at(2024, 3, 1, 8, 0, 0), 25000),
            expense(at(2024, 2, 28, 8, 0, 0), 5000),
        ];

        assert_eq!(expense_total(&expenses, Bucket::Month, now).paise(), 25000);
        assert_eq!(net_profit(&sales, &expenses, now).paise(), -15000);
    }

    #[test]
    fn test_outstanding_udhaar() {
        let now = at(2024, 3, 15, 18, 0, 0);
        let entries = vec![
            udhaar(10000, false, now),
            udhaar(5000, true, now),
            udhaar(3000, false, now),
        ];
        assert_eq!(outstanding_udhaar(&entries).paise(), 13000);
        assert_eq!(unpaid_entries(&entries).len(), 2);
        assert_eq!(paid_entries(&entries).len(), 1);
    }

    #[test]
    fn test_unpaid_entries_newest_first() {
        let entries = vec![
            udhaar(100, false, at(2024, 3, 1, 0, 0, 0)),
            udhaar(200, false, at(2024, 3, 9, 0, 0, 0)),
            udhaar(300, false, at(2024, 3, 5, 0, 0, 0)),
        ];
        let amounts: Vec<i64> = unpaid_entries(&entries)
            .iter()
            .map(|e| e.amount.paise())
            .collect();
        assert_eq!(amounts, vec![200, 300, 100]);
    }

    #[test]
    fn test_recent_sales_order_and_limit() {
        let same = at(2024, 3, 15, 12, 0, 0);
        let sales = vec![
            sale("old", at(2024, 3, 1, 12, 0, 0), 100),
            sale("tie-1", same, 100),
            sale("new", at(2024, 3, 20, 12, 0, 0), 100),
            sale("tie-2", same, 100),
        ];

        let ids: Vec<&str> = recent_sales(&sales, 10).iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["new", "tie-1", "tie-2", "old"]);

        let ids: Vec<&str> = recent_sales(&sales, 2).iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["new", "tie-1"]);

        assert!(recent_sales(&sales, 0).is_empty());
    }

    #[test]
    fn test_todays_expenses_newest_first() {
        let now = at(2024, 3, 15, 18, 0, 0);
        let expenses = vec![
            expense(at(2024, 3, 15, 8, 0, 0), 100),
            expense(at(2024, 3, 14, 8, 0, 0), 200),
            expense(at(2024, 3, 15, 12, 0, 0), 300),
        ];
        let amounts: Vec<i64> = todays_expenses(&expenses, now)
            .iter()
            .map(|e| e.amount.paise())
            .collect();
        assert_eq!(amounts, vec![300, 100]);
    }

    #[test]
    fn test_report_summary() {
        let now = at(2024, 3, 15, 18, 0, 0);
        let sales = vec![
            sale("a", at(2024, 3, 15, 9, 0, 0), 12000),
            sale("b", at(2024, 3, 3, 9, 0, 0), 8000),
        ];
        let expenses = vec![
            expense(at(2024, 3, 15, 7, 0, 0), 1500),
            expense(at(2024, 3, 1, 7, 0, 0), 2500),
        ];
        let entries = vec![udhaar(700, false, now)];

        let summary = ReportSummary::compute(&sales, &expenses, &entries, now);
        assert_eq!(summary.today_revenue.paise(), 12000);
        assert_eq!(summary.today_bill_count, 1);
        assert_eq!(summary.today_expenses.paise(), 1500);
        assert_eq!(summary.month_revenue.paise(), 20000);
        assert_eq!(summary.month_expenses.paise(), 4000);
        assert_eq!(summary.net_profit.paise(), 16000);
        assert_eq!(summary.outstanding_udhaar.paise(), 700);
    }
}
