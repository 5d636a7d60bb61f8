//! Order commands.

use clap::Subcommand;
use leafpress_admin::{ApiClient, ApiError, OrderFilter, OrderSort};
use leafpress_core::{OrderId, OrderStatus};

#[derive(Subcommand)]
pub enum OrderAction {
    /// List orders
    List {
        /// Filter by status (pending, processing, confirmed, shipped,
        /// rejected, cancelled)
        #[arg(long)]
        status: Option<OrderStatus>,
        /// Search order number, customer name or email
        #[arg(long)]
        search: Option<String>,
        /// Sort key (newest, oldest, price_high, price_low)
        #[arg(long)]
        sort: Option<OrderSort>,
    },
    /// Set an order's status
    SetStatus { id: String, status: OrderStatus },
}

/// Dispatch an order action.
pub async fn run(client: &ApiClient, action: OrderAction) -> Result<(), ApiError> {
    match action {
        OrderAction::List {
            status,
            search,
            sort,
        } => list(client, OrderFilter { sort, status, search }).await,
        OrderAction::SetStatus { id, status } => set_status(client, &id, status).await,
    }
}

#[allow(clippy::print_stdout)]
async fn list(client: &ApiClient, filter: OrderFilter) -> Result<(), ApiError> {
    let orders = client.list_orders(&filter).await?;

    println!(
        "{:<26} {:<10} {:<22} {:>10}  {}",
        "ID", "NUMBER", "CUSTOMER", "TOTAL", "STATUS"
    );
    for order in orders {
        println!(
            "{:<26} {:<10} {:<22} {:>10}  {}",
            order.id, order.order_number, order.customer.fullname, order.total_amount, order.status,
        );
    }
    Ok(())
}

#[allow(clippy::print_stdout)]
async fn set_status(client: &ApiClient, id: &str, status: OrderStatus) -> Result<(), ApiError> {
    let order_id = OrderId::new(id);
    client.update_order_status(&order_id, status).await?;
    println!("Order {order_id} set to {status}");
    Ok(())
}
