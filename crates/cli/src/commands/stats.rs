//! Dashboard statistics command.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use clap::Args;
use leafpress_admin::{ApiClient, ApiError};

#[derive(Args)]
pub struct StatsArgs {
    /// Start of the date range (YYYY-MM-DD or RFC 3339)
    #[arg(long, value_parser = parse_date)]
    from: Option<DateTime<Utc>>,
    /// End of the date range (YYYY-MM-DD or RFC 3339)
    #[arg(long, value_parser = parse_date)]
    to: Option<DateTime<Utc>>,
}

fn parse_date(raw: &str) -> Result<DateTime<Utc>, String> {
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(raw) {
        return Ok(timestamp.with_timezone(&Utc));
    }
    raw.parse::<NaiveDate>()
        .map(|date| date.and_time(NaiveTime::MIN).and_utc())
        .map_err(|e| format!("invalid date {raw:?}: {e}"))
}

/// Fetch and print dashboard statistics.
#[allow(clippy::print_stdout)]
pub async fn run(client: &ApiClient, args: StatsArgs) -> Result<(), ApiError> {
    let stats = client.get_dashboard_stats(args.from, args.to).await?;

    println!("Revenue:          {}", stats.total_revenue);
    println!("Orders:           {}", stats.total_orders);
    println!("Customers:        {}", stats.total_customers);
    println!("Products:         {}", stats.total_products);
    println!("Avg order value:  {}", stats.average_order_value);

    if !stats.orders_by_status.is_empty() {
        println!("Orders by status:");
        for entry in &stats.orders_by_status {
            println!("  {:<12} {}", entry.name, entry.value);
        }
    }

    if !stats.low_stock_products.is_empty() {
        println!("Low stock:");
        for product in &stats.low_stock_products {
            println!("  {:<30} {}", product.title, product.stock);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date_accepts_plain_dates() {
        let parsed = parse_date("2026-01-15").expect("valid date");
        assert_eq!(parsed.to_rfc3339(), "2026-01-15T00:00:00+00:00");
    }

    #[test]
    fn test_parse_date_accepts_rfc3339() {
        let parsed = parse_date("2026-01-15T08:30:00Z").expect("valid timestamp");
        assert_eq!(parsed.timestamp(), 1_768_465_800);
    }

    #[test]
    fn test_parse_date_rejects_garbage() {
        assert!(parse_date("yesterday").is_err());
    }
}
