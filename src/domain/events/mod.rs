//! Shop events
//!
//! Raised synchronously by the state container on every mutation and
//! drained by the adapter before control returns to the caller.

use rust_decimal::Decimal;

use crate::domain::value_objects::ProductId;

#[derive(Clone, Debug)]
pub enum ShopEvent {
    Cart(CartEvent),
    Catalog(CatalogEvent),
}

#[derive(Clone, Debug)]
pub enum CartEvent {
    LineAdded { product_id: ProductId, size: Decimal, color: String },
    LineMerged { product_id: ProductId, size: Decimal, color: String, quantity: u32 },
    ProductRemoved { product_id: ProductId, lines_removed: usize },
    Cleared,
}

#[derive(Clone, Debug)]
pub enum CatalogEvent {
    ProductAdded { product_id: ProductId },
}
