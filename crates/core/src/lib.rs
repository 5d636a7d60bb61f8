//! Leafpress Core - Shared types library.
//!
//! This crate provides common types used across the Leafpress admin toolkit:
//! - `admin` - Client library for the storefront REST backend
//! - `cli` - Command-line admin tool
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients. This keeps
//! it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, the product category enum, and the wire records
//!   the backend exchanges (products, orders, customers, dashboard stats)

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
