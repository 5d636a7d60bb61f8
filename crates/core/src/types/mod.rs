//! Core types for the Leafpress admin toolkit.

mod category;
mod customer;
mod id;
mod image;
mod order;
mod product;
mod stats;

pub use category::Category;
pub use customer::{Customer, CustomerDetails, CustomerRole};
pub use id::{OrderId, ProductId, UserId};
pub use image::ImageRef;
pub use order::{Order, OrderCustomer, OrderLine, OrderLineProduct, OrderStatus, ShippingAddress};
pub use product::Product;
pub use stats::{
    ActivityEntry, CategoryRevenue, DashboardStats, LowStockProduct, SalesPoint, StatusCount,
};
