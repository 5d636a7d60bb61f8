//! Customer commands.

use clap::Subcommand;
use leafpress_admin::{ApiClient, ApiError};
use leafpress_core::UserId;

#[derive(Subcommand)]
pub enum CustomerAction {
    /// List customers
    List {
        /// Sort key (newest, oldest, most_orders, highest_spent)
        #[arg(long, default_value = "newest")]
        sort: String,
    },
    /// Show one customer with order history
    Show { id: String },
    /// Send one email to a list of customers
    Email {
        #[arg(long)]
        subject: String,
        #[arg(long)]
        body: String,
        /// Recipient email addresses
        #[arg(required = true)]
        emails: Vec<String>,
    },
}

/// Dispatch a customer action.
pub async fn run(client: &ApiClient, action: CustomerAction) -> Result<(), ApiError> {
    match action {
        CustomerAction::List { sort } => list(client, &sort).await,
        CustomerAction::Show { id } => show(client, &id).await,
        CustomerAction::Email {
            subject,
            body,
            emails,
        } => email(client, &emails, &subject, &body).await,
    }
}

#[allow(clippy::print_stdout)]
async fn list(client: &ApiClient, sort: &str) -> Result<(), ApiError> {
    let customers = client.list_customers(sort).await?;

    println!(
        "{:<26} {:<24} {:<28} {:>7} {:>10}",
        "ID", "NAME", "EMAIL", "ORDERS", "SPENT"
    );
    for customer in customers {
        println!(
            "{:<26} {:<24} {:<28} {:>7} {:>10}",
            customer.id,
            customer.fullname,
            customer.email.as_deref().unwrap_or("-"),
            customer.total_orders,
            customer.total_spent,
        );
    }
    Ok(())
}

#[allow(clippy::print_stdout)]
async fn show(client: &ApiClient, id: &str) -> Result<(), ApiError> {
    let details = client.get_customer_details(&UserId::new(id)).await?;

    println!("{}: {}", details.customer.id, details.customer.fullname);
    println!("  email:     {}", details.customer.email.as_deref().unwrap_or("-"));
    println!("  phone:     {}", details.phone.as_deref().unwrap_or("-"));
    println!("  verified:  {}", details.is_verified);
    println!("  orders:    {}", details.customer.total_orders);
    println!("  spent:     {}", details.customer.total_spent);
    if let Some(last_login) = details.last_login_at {
        println!("  last seen: {last_login}");
    }
    for order in &details.orders {
        println!(
            "    {} {} {} ({})",
            order.order_number, order.created_at, order.total_amount, order.status
        );
    }
    Ok(())
}

#[allow(clippy::print_stdout)]
async fn email(
    client: &ApiClient,
    emails: &[String],
    subject: &str,
    body: &str,
) -> Result<(), ApiError> {
    client.send_mass_email(emails, subject, body).await?;
    println!("Sent \"{subject}\" to {} recipient(s)", emails.len());
    Ok(())
}
