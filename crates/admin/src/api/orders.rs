//! Order operations.

use std::fmt::Write as _;

use leafpress_core::{Order, OrderId, OrderStatus};
use tracing::instrument;

use super::types::{Ack, OrderListResponse, UpdateStatusBody};
use super::{ApiClient, ApiError};

/// Sort keys accepted by the order list endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrderSort {
    #[default]
    Newest,
    Oldest,
    PriceHigh,
    PriceLow,
}

impl OrderSort {
    /// The wire value for the `sort` query parameter.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Newest => "newest",
            Self::Oldest => "oldest",
            Self::PriceHigh => "price_high",
            Self::PriceLow => "price_low",
        }
    }
}

impl std::str::FromStr for OrderSort {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "newest" => Ok(Self::Newest),
            "oldest" => Ok(Self::Oldest),
            "price_high" => Ok(Self::PriceHigh),
            "price_low" => Ok(Self::PriceLow),
            _ => Err(format!("unknown sort key: {s}")),
        }
    }
}

/// Filters for the order list endpoint.
#[derive(Debug, Clone, Default)]
pub struct OrderFilter {
    pub sort: Option<OrderSort>,
    pub status: Option<OrderStatus>,
    pub search: Option<String>,
}

impl OrderFilter {
    fn to_query(&self) -> String {
        let mut query = String::new();
        let mut sep = '?';

        if let Some(sort) = self.sort {
            let _ = write!(query, "{sep}sort={}", sort.as_str());
            sep = '&';
        }
        if let Some(status) = self.status {
            let _ = write!(query, "{sep}status={status}");
            sep = '&';
        }
        if let Some(search) = &self.search {
            let _ = write!(
                query,
                "{sep}search={}",
                url::form_urlencoded::byte_serialize(search.as_bytes()).collect::<String>()
            );
        }

        query
    }
}

impl ApiClient {
    /// List orders, optionally filtered and sorted.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend rejects it.
    #[instrument(skip(self, filter))]
    pub async fn list_orders(&self, filter: &OrderFilter) -> Result<Vec<Order>, ApiError> {
        let path = format!("/order/list{}", filter.to_query());
        let response: OrderListResponse = self.get(&path).await?;
        Ok(response.orders)
    }

    /// Set an order's status.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend rejects it.
    #[instrument(skip(self), fields(order_id = %id, status = %status))]
    pub async fn update_order_status(
        &self,
        id: &OrderId,
        status: OrderStatus,
    ) -> Result<(), ApiError> {
        let body = UpdateStatusBody { status };
        let _: Ack = self
            .patch(&format!("/order/update-status/{id}"), &body)
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_filter_has_no_query() {
        assert_eq!(OrderFilter::default().to_query(), "");
    }

    #[test]
    fn test_full_filter_query() {
        let filter = OrderFilter {
            sort: Some(OrderSort::PriceHigh),
            status: Some(OrderStatus::Shipped),
            search: Some("LP-10".to_string()),
        };
        assert_eq!(
            filter.to_query(),
            "?sort=price_high&status=shipped&search=LP-10"
        );
    }

    #[test]
    fn test_search_is_url_encoded() {
        let filter = OrderFilter {
            sort: None,
            status: None,
            search: Some("asha rao".to_string()),
        };
        assert_eq!(filter.to_query(), "?search=asha+rao");
    }
}
