//! Pharmacy dashboard statistics
//!
//! The dashboard reads a fixed snapshot; the time range only narrows the
//! monthly series and recomputes the headline totals from it.

use rust_decimal::Decimal;
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PharmacyStats {
    pub monthly_sales: Vec<MonthlySales>,
    pub top_selling_products: Vec<TopSellingProduct>,
    pub customer_stats: CustomerStats,
    pub sales_by_category: Vec<CategorySales>,
    pub total_revenue: Decimal,
    pub total_orders: u32,
    pub growth_rate: Decimal,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MonthlySales { pub month: String, pub sales: Decimal, pub orders: u32 }

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TopSellingProduct { pub id: String, pub name: String, pub category: String, pub quantity: u32, pub revenue: Decimal }

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerStats {
    pub total_customers: u32,
    pub new_customers_this_month: u32,
    pub returning_customers_percentage: Decimal,
    pub average_order_value: Decimal,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CategorySales { pub category: String, pub sales: Decimal, pub percentage: Decimal }

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TimeRange { Month, Quarter, #[default] Year }

impl TimeRange {
    /// Unrecognised or missing values fall back to the full year.
    pub fn parse(value: Option<&str>) -> Self {
        match value {
            Some("month") => Self::Month,
            Some("quarter") => Self::Quarter,
            _ => Self::Year,
        }
    }

    fn months(self) -> Option<usize> {
        match self { Self::Month => Some(1), Self::Quarter => Some(3), Self::Year => None }
    }

    fn growth_rate(self) -> Option<Decimal> {
        match self { Self::Month => Some(Decimal::new(82, 1)), Self::Quarter => Some(Decimal::new(127, 1)), Self::Year => None }
    }
}

impl PharmacyStats {
    /// The snapshot narrowed to the trailing months of `range`.
    pub fn for_range(&self, range: TimeRange) -> PharmacyStats {
        let mut stats = self.clone();
        let (Some(months), Some(growth)) = (range.months(), range.growth_rate()) else { return stats };
        let start = stats.monthly_sales.len().saturating_sub(months);
        stats.monthly_sales.drain(..start);
        stats.total_revenue = stats.monthly_sales.iter().map(|m| m.sales).sum();
        stats.total_orders = stats.monthly_sales.iter().map(|m| m.orders).sum();
        stats.growth_rate = growth;
        stats
    }
}
