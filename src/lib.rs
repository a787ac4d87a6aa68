//! Walkin.it Storefront Core
//!
//! Headless storefront for the Walkin.it sneaker shop.
//!
//! ## Features
//! - Product catalog with category/price-ceiling filtering
//! - Shopping cart with merge-by-identity-key lines
//! - Pricing derivation (subtotal, flat-rate shipping, total)
//! - Browsing → Checkout → Complete flow persisting orders to a hosted store
//! - Admin product entry with generated marketing descriptions
//! - "SoleBot" shopping-assistant chat
//!
//! All state is in-process and per-session; the only durable side effect is
//! the order row handed to the hosted order store at checkout.

pub mod checkout;
pub mod config;
pub mod domain;
pub mod pricing;
pub mod seed;
pub mod services;
pub mod shop;

pub use checkout::{CheckoutError, CheckoutFlow, CheckoutStage, OrderForm};
pub use config::ShopConfig;
pub use domain::aggregates::{Cart, CartLine, Catalog, CategoryFilter, OrderRecord, Product};
pub use domain::value_objects::{Money, ProductId, Quantity};
pub use services::{OrderStoreClient, StylistClient};
pub use shop::ShopState;
