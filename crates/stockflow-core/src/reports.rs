//! # Reports Module
//!
//! Pure aggregation over the entity collections: monthly balances, trend
//! series, best sellers, low-stock alerts, dashboard tiles.
//!
//! ## Design Principles
//!
//! Every function here is deterministic, side-effect-free, and re-derivable
//! at any time from the collections passed in. Nothing holds state, and the
//! "current" moment is always an explicit `reference` argument - sampling the
//! clock inside an aggregation would make the same ledger render differently
//! between two calls.
//!
//! ## Data Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Ledger (purchases, sales, products)                                   │
//! │       │                                                                 │
//! │       ├──► monthly_summary()  ──► Balance view (one month)             │
//! │       ├──► monthly_series()   ──► Reports trend charts (N months)      │
//! │       ├──► top_products()     ──► Reports best-sellers ranking         │
//! │       └──► dashboard_summary()──► Dashboard tiles + low-stock alert    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Datelike, Utc};
use serde::Serialize;
use ts_rs::TS;

use crate::money::Money;
use crate::types::{Product, Purchase, Sale};

const MONTH_ABBREV: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

// =============================================================================
// Month Arithmetic
// =============================================================================

/// Checks if a timestamp falls inside a calendar month.
#[inline]
fn in_month(date: &DateTime<Utc>, year: i32, month: u32) -> bool {
    date.year() == year && date.month() == month
}

/// Steps `back` calendar months before the reference month.
///
/// Returns `(year, month)` with month in 1..=12, handling year boundaries.
fn months_back(reference: DateTime<Utc>, back: u32) -> (i32, u32) {
    let total = reference.year() * 12 + reference.month0() as i32 - back as i32;
    (total.div_euclid(12), total.rem_euclid(12) as u32 + 1)
}

/// `Aug/25`-style label for a month, as the trend charts print it.
fn month_label(year: i32, month: u32) -> String {
    format!(
        "{}/{:02}",
        MONTH_ABBREV[(month as usize - 1) % 12],
        year.rem_euclid(100)
    )
}

// =============================================================================
// Monthly Summary
// =============================================================================

/// Financial summary of one calendar month (the Balance view).
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export)]
pub struct MonthlySummary {
    pub year: i32,
    pub month: u32,
    /// Money spent on purchases, in cents.
    pub purchases_cents: i64,
    /// Money earned from sales, in cents.
    pub sales_cents: i64,
    /// sales − purchases, in cents. Negative in a loss-making month.
    pub profit_cents: i64,
    /// profit / sales × 100. Exactly 0.0 when there were no sales.
    pub profit_margin: f64,
    /// Purchases plus sales recorded in the month.
    pub transaction_count: usize,
}

impl MonthlySummary {
    #[inline]
    pub fn purchases(&self) -> Money {
        Money::from_cents(self.purchases_cents)
    }

    #[inline]
    pub fn sales(&self) -> Money {
        Money::from_cents(self.sales_cents)
    }

    #[inline]
    pub fn profit(&self) -> Money {
        Money::from_cents(self.profit_cents)
    }

    /// Return on investment: profit / purchases × 100.
    ///
    /// Exactly 0.0 when nothing was purchased, never NaN or infinite.
    pub fn roi(&self) -> f64 {
        if self.purchases_cents == 0 {
            0.0
        } else {
            self.profit_cents as f64 / self.purchases_cents as f64 * 100.0
        }
    }
}

/// Aggregates one calendar month of purchases and sales.
pub fn monthly_summary(
    purchases: &[Purchase],
    sales: &[Sale],
    year: i32,
    month: u32,
) -> MonthlySummary {
    let month_purchases: Vec<&Purchase> = purchases
        .iter()
        .filter(|p| in_month(&p.date, year, month))
        .collect();
    let month_sales: Vec<&Sale> = sales
        .iter()
        .filter(|s| in_month(&s.date, year, month))
        .collect();

    let purchases_total: Money = month_purchases.iter().map(|p| p.total_price()).sum();
    let sales_total: Money = month_sales.iter().map(|s| s.total_price()).sum();
    let profit = sales_total - purchases_total;

    let profit_margin = if sales_total.is_zero() {
        0.0
    } else {
        profit.cents() as f64 / sales_total.cents() as f64 * 100.0
    };

    MonthlySummary {
        year,
        month,
        purchases_cents: purchases_total.cents(),
        sales_cents: sales_total.cents(),
        profit_cents: profit.cents(),
        profit_margin,
        transaction_count: month_purchases.len() + month_sales.len(),
    }
}

// =============================================================================
// Monthly Series
// =============================================================================

/// One month in a trend series.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export)]
pub struct MonthlyPoint {
    pub year: i32,
    pub month: u32,
    /// Chart axis label, `Aug/25` style.
    pub label: String,
    pub purchases_cents: i64,
    pub sales_cents: i64,
    pub profit_cents: i64,
}

impl MonthlyPoint {
    #[inline]
    pub fn profit(&self) -> Money {
        Money::from_cents(self.profit_cents)
    }
}

/// Aggregates the last `months` calendar months, oldest first, ending with
/// the (partial) month containing `reference`.
pub fn monthly_series(
    purchases: &[Purchase],
    sales: &[Sale],
    months: u32,
    reference: DateTime<Utc>,
) -> Vec<MonthlyPoint> {
    (0..months)
        .rev()
        .map(|back| {
            let (year, month) = months_back(reference, back);
            let summary = monthly_summary(purchases, sales, year, month);
            MonthlyPoint {
                year,
                month,
                label: month_label(year, month),
                purchases_cents: summary.purchases_cents,
                sales_cents: summary.sales_cents,
                profit_cents: summary.profit_cents,
            }
        })
        .collect()
}

/// Whole-period totals over a trend series (the Reports header cards).
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export)]
pub struct SeriesTotals {
    pub purchases_cents: i64,
    pub sales_cents: i64,
    pub profit_cents: i64,
    /// profit / sales × 100 over the whole period; 0.0 with no sales.
    pub profit_margin: f64,
}

/// Sums a trend series into period totals.
pub fn series_totals(points: &[MonthlyPoint]) -> SeriesTotals {
    let purchases_cents: i64 = points.iter().map(|p| p.purchases_cents).sum();
    let sales_cents: i64 = points.iter().map(|p| p.sales_cents).sum();
    let profit_cents = sales_cents - purchases_cents;

    SeriesTotals {
        purchases_cents,
        sales_cents,
        profit_cents,
        profit_margin: if sales_cents == 0 {
            0.0
        } else {
            profit_cents as f64 / sales_cents as f64 * 100.0
        },
    }
}

// =============================================================================
// Top Products
// =============================================================================

/// A product's ranking entry in the best-sellers report.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export)]
pub struct TopProduct {
    pub product_id: String,
    /// Name snapshot from the most recent sale of this product.
    pub name: String,
    /// Total units sold.
    pub quantity: i64,
    /// Total revenue in cents.
    pub revenue_cents: i64,
}

impl TopProduct {
    #[inline]
    pub fn revenue(&self) -> Money {
        Money::from_cents(self.revenue_cents)
    }
}

/// Groups sales by product and ranks by revenue, highest first.
///
/// Ties break by name so the ranking is stable across runs. Use
/// [`crate::TOP_PRODUCTS_LIMIT`] for the standard report.
pub fn top_products(sales: &[Sale], limit: usize) -> Vec<TopProduct> {
    let mut by_product: Vec<TopProduct> = Vec::new();

    for sale in sales {
        match by_product
            .iter_mut()
            .find(|t| t.product_id == sale.product_id)
        {
            Some(entry) => {
                entry.quantity += sale.quantity;
                entry.revenue_cents += sale.total_price_cents;
                entry.name = sale.product_name.clone();
            }
            None => by_product.push(TopProduct {
                product_id: sale.product_id.clone(),
                name: sale.product_name.clone(),
                quantity: sale.quantity,
                revenue_cents: sale.total_price_cents,
            }),
        }
    }

    by_product.sort_by(|a, b| {
        b.revenue_cents
            .cmp(&a.revenue_cents)
            .then_with(|| a.name.cmp(&b.name))
    });
    by_product.truncate(limit);
    by_product
}

// =============================================================================
// Low Stock
// =============================================================================

/// Products under the restock threshold.
pub fn low_stock(products: &[Product]) -> Vec<&Product> {
    products.iter().filter(|p| p.is_low_stock()).collect()
}

/// Count of products under the restock threshold.
pub fn low_stock_count(products: &[Product]) -> usize {
    products.iter().filter(|p| p.is_low_stock()).count()
}

// =============================================================================
// Dashboard
// =============================================================================

/// The dashboard tiles: catalog size, restock alert, current-month balance.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export)]
pub struct DashboardSummary {
    pub total_products: usize,
    /// Products with stock under [`crate::LOW_STOCK_THRESHOLD`].
    pub low_stock_products: usize,
    /// Balance of the month containing the reference date.
    pub month: MonthlySummary,
}

/// Builds the dashboard summary for the month containing `reference`.
pub fn dashboard_summary(
    products: &[Product],
    purchases: &[Purchase],
    sales: &[Sale],
    reference: DateTime<Utc>,
) -> DashboardSummary {
    DashboardSummary {
        total_products: products.len(),
        low_stock_products: low_stock_count(products),
        month: monthly_summary(purchases, sales, reference.year(), reference.month()),
    }
}

/// The latest purchases, newest first (dashboard recent-activity panel).
pub fn recent_purchases(purchases: &[Purchase], limit: usize) -> Vec<&Purchase> {
    purchases.iter().rev().take(limit).collect()
}

/// The latest sales, newest first (dashboard recent-activity panel).
pub fn recent_sales(sales: &[Sale], limit: usize) -> Vec<&Sale> {
    sales.iter().rev().take(limit).collect()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PurchaseKind;
    use crate::{LOW_STOCK_THRESHOLD, TOP_PRODUCTS_LIMIT};
    use chrono::TimeZone;

    fn day(year: i32, month: u32, day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(year, month, day, 12, 0, 0).unwrap()
    }

    fn purchase(date: DateTime<Utc>, quantity: i64, unit_price_cents: i64) -> Purchase {
        Purchase {
            id: format!("b-{date}-{unit_price_cents}"),
            product_id: "p1".to_string(),
            product_name: "Widget".to_string(),
            quantity,
            unit_price_cents,
            total_price_cents: unit_price_cents * quantity,
            date,
            kind: PurchaseKind::Existing,
            new_product: None,
        }
    }

    fn sale(
        product_id: &str,
        name: &str,
        date: DateTime<Utc>,
        quantity: i64,
        unit_price_cents: i64,
    ) -> Sale {
        Sale {
            id: format!("s-{product_id}-{date}"),
            product_id: product_id.to_string(),
            product_name: name.to_string(),
            quantity,
            unit_price_cents,
            total_price_cents: unit_price_cents * quantity,
            date,
        }
    }

    fn product(id: &str, stock: i64) -> Product {
        Product {
            id: id.to_string(),
            name: format!("Product {id}"),
            description: String::new(),
            category_id: "c1".to_string(),
            stock,
        }
    }

    #[test]
    fn test_monthly_summary_filters_by_month() {
        let purchases = vec![
            purchase(day(2025, 8, 1), 2, 500),  // $10.00, in month
            purchase(day(2025, 7, 30), 1, 999), // out of month
        ];
        let sales = vec![
            sale("p1", "Widget", day(2025, 8, 5), 3, 1000), // $30.00, in month
            sale("p1", "Widget", day(2024, 8, 5), 9, 1000), // same month, other year
        ];

        let summary = monthly_summary(&purchases, &sales, 2025, 8);
        assert_eq!(summary.purchases_cents, 1000);
        assert_eq!(summary.sales_cents, 3000);
        assert_eq!(summary.profit_cents, 2000);
        assert_eq!(summary.transaction_count, 2);
        assert!((summary.profit_margin - 66.666).abs() < 0.01);
    }

    #[test]
    fn test_monthly_summary_zero_sales_has_zero_margin() {
        let purchases = vec![purchase(day(2025, 8, 1), 1, 500)];
        let summary = monthly_summary(&purchases, &[], 2025, 8);

        assert_eq!(summary.profit_cents, -500);
        assert_eq!(summary.profit_margin, 0.0);
        assert!(summary.profit_margin.is_finite());
    }

    #[test]
    fn test_roi_guards_division_by_zero() {
        let sales = vec![sale("p1", "Widget", day(2025, 8, 5), 1, 1000)];
        let summary = monthly_summary(&[], &sales, 2025, 8);
        assert_eq!(summary.roi(), 0.0);

        let purchases = vec![purchase(day(2025, 8, 1), 1, 500)];
        let summary = monthly_summary(&purchases, &sales, 2025, 8);
        assert!((summary.roi() - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_monthly_series_crosses_year_boundary() {
        let purchases = vec![purchase(day(2024, 12, 15), 1, 500)];
        let sales = vec![sale("p1", "Widget", day(2025, 1, 10), 1, 800)];

        let series = monthly_series(&purchases, &sales, 3, day(2025, 1, 20));

        assert_eq!(series.len(), 3);
        assert_eq!(series[0].label, "Nov/24");
        assert_eq!(series[1].label, "Dec/24");
        assert_eq!(series[2].label, "Jan/25");

        assert_eq!(series[0].purchases_cents, 0);
        assert_eq!(series[1].purchases_cents, 500);
        assert_eq!(series[2].sales_cents, 800);
        assert_eq!(series[2].profit_cents, 800);
    }

    #[test]
    fn test_series_totals() {
        let purchases = vec![purchase(day(2025, 7, 1), 1, 1000)];
        let sales = vec![sale("p1", "Widget", day(2025, 8, 5), 1, 4000)];

        let series = monthly_series(&purchases, &sales, 2, day(2025, 8, 20));
        let totals = series_totals(&series);

        assert_eq!(totals.purchases_cents, 1000);
        assert_eq!(totals.sales_cents, 4000);
        assert_eq!(totals.profit_cents, 3000);
        assert!((totals.profit_margin - 75.0).abs() < f64::EPSILON);

        assert_eq!(series_totals(&[]).profit_margin, 0.0);
    }

    #[test]
    fn test_top_products_groups_and_ranks_by_revenue() {
        let sales = vec![
            sale("p1", "Widget", day(2025, 8, 1), 2, 1000), // $20
            sale("p2", "Gadget", day(2025, 8, 2), 1, 5000), // $50
            sale("p1", "Widget", day(2025, 8, 3), 1, 1500), // Widget total $35
        ];

        let top = top_products(&sales, TOP_PRODUCTS_LIMIT);

        assert_eq!(top.len(), 2);
        assert_eq!(top[0].product_id, "p2");
        assert_eq!(top[0].revenue_cents, 5000);
        assert_eq!(top[1].product_id, "p1");
        assert_eq!(top[1].quantity, 3);
        assert_eq!(top[1].revenue_cents, 3500);
    }

    #[test]
    fn test_top_products_truncates_to_limit() {
        let sales: Vec<Sale> = (0..8)
            .map(|i| {
                sale(
                    &format!("p{i}"),
                    &format!("Product {i}"),
                    day(2025, 8, 1),
                    1,
                    100 * (i + 1),
                )
            })
            .collect();

        let top = top_products(&sales, 5);
        assert_eq!(top.len(), 5);
        // Highest revenue first
        assert_eq!(top[0].revenue_cents, 800);
        assert_eq!(top[4].revenue_cents, 400);
    }

    #[test]
    fn test_low_stock_threshold_boundary() {
        let products = vec![product("p1", 0), product("p2", 9), product("p3", 10)];

        assert_eq!(low_stock_count(&products), 2);
        let flagged = low_stock(&products);
        assert_eq!(flagged.len(), 2);
        assert!(flagged.iter().all(|p| p.stock < LOW_STOCK_THRESHOLD));
    }

    #[test]
    fn test_dashboard_summary() {
        let products = vec![product("p1", 3), product("p2", 50)];
        let purchases = vec![purchase(day(2025, 8, 1), 2, 500)];
        let sales = vec![sale("p1", "Widget", day(2025, 8, 5), 1, 3000)];

        let dash = dashboard_summary(&products, &purchases, &sales, day(2025, 8, 20));

        assert_eq!(dash.total_products, 2);
        assert_eq!(dash.low_stock_products, 1);
        assert_eq!(dash.month.sales_cents, 3000);
        assert_eq!(dash.month.profit_cents, 2000);
    }

    #[test]
    fn test_recent_activity_is_newest_first() {
        let purchases: Vec<Purchase> = (1..=7)
            .map(|d| purchase(day(2025, 8, d), 1, d as i64 * 100))
            .collect();

        let recent = recent_purchases(&purchases, 5);
        assert_eq!(recent.len(), 5);
        assert_eq!(recent[0].unit_price_cents, 700);
        assert_eq!(recent[4].unit_price_cents, 300);
    }
}
