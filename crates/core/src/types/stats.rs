//! Dashboard statistics wire records.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One point of the revenue-over-time series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesPoint {
    pub date: String,
    #[serde(rename = "Revenue", with = "rust_decimal::serde::float")]
    pub revenue: Decimal,
}

/// Revenue contribution of one category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryRevenue {
    pub name: String,
    pub value: u64,
    #[serde(with = "rust_decimal::serde::float")]
    pub revenue: Decimal,
}

/// Order count per status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCount {
    pub name: String,
    pub value: u64,
}

/// A recent order/signup event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityEntry {
    #[serde(rename = "type")]
    pub kind: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
}

/// Product running low on stock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LowStockProduct {
    pub title: String,
    pub stock: u32,
}

/// The aggregate dashboard payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    #[serde(with = "rust_decimal::serde::float")]
    pub total_revenue: Decimal,
    pub total_orders: u64,
    pub total_customers: u64,
    pub total_products: u64,
    #[serde(default)]
    pub sales_over_time: Vec<SalesPoint>,
    #[serde(default)]
    pub revenue_by_category: Vec<CategoryRevenue>,
    #[serde(default)]
    pub orders_by_status: Vec<StatusCount>,
    #[serde(default)]
    pub recent_activity: Vec<ActivityEntry>,
    #[serde(default)]
    pub low_stock_products: Vec<LowStockProduct>,
    #[serde(with = "rust_decimal::serde::float")]
    pub average_order_value: Decimal,
}
