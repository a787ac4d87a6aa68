//! Cart aggregate: selected lines keyed by (product, size, color).

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::aggregates::catalog::Product;
use crate::domain::value_objects::{Money, ProductId, Quantity};

/// Identity key deciding whether two additions merge into one line.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct LineKey {
    pub product_id: ProductId,
    pub size: Decimal,
    pub color: String,
}

/// One distinct (product, size, color) selection with its quantity.
///
/// Carries the full product so order snapshots are self-contained; on the
/// wire the product fields are flattened next to the selection fields,
/// matching the persisted line-item shape.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    #[serde(flatten)]
    pub product: Product,
    pub selected_size: Decimal,
    pub selected_color: String,
    pub quantity: Quantity,
}

impl CartLine {
    fn new(product: Product, size: Decimal, color: String) -> Self {
        Self {
            product,
            selected_size: size,
            selected_color: color,
            quantity: Quantity::ONE,
        }
    }

    pub fn key(&self) -> LineKey {
        LineKey {
            product_id: self.product.id.clone(),
            size: self.selected_size,
            color: self.selected_color.clone(),
        }
    }

    pub fn line_total(&self) -> Money {
        self.product.price * self.quantity.value()
    }
}

/// The shopping cart.
///
/// At most one line per identity key, enforced structurally: lines live in a
/// map keyed by [`LineKey`], and `order` keeps insertion order for display.
/// Empty at session start; cleared atomically on successful submission.
#[derive(Clone, Debug, Default)]
pub struct Cart {
    lines: HashMap<LineKey, CartLine>,
    order: Vec<LineKey>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Lines in insertion order.
    pub fn lines(&self) -> impl Iterator<Item = &CartLine> {
        self.order.iter().filter_map(|key| self.lines.get(key))
    }

    pub fn get(&self, key: &LineKey) -> Option<&CartLine> {
        self.lines.get(key)
    }

    /// Owned copy of the lines, insertion order preserved. Order submission
    /// snapshots the cart through this.
    pub fn snapshot(&self) -> Vec<CartLine> {
        self.lines().cloned().collect()
    }

    /// Adds one unit of (product, size, color). Merges into the existing
    /// line when the identity key is already present, otherwise appends a
    /// new line with quantity 1. Returns `true` on a merge.
    ///
    /// Size/color membership in the product's offering is validated at the
    /// boundary before this is called; it is not re-checked here.
    pub fn add(&mut self, product: Product, size: Decimal, color: String) -> bool {
        let key = LineKey {
            product_id: product.id.clone(),
            size,
            color: color.clone(),
        };
        if let Some(line) = self.lines.get_mut(&key) {
            line.quantity.increment();
            true
        } else {
            self.order.push(key.clone());
            self.lines.insert(key, CartLine::new(product, size, color));
            false
        }
    }

    /// Removes every line for the product id, regardless of size/color.
    /// Returns the number of lines removed (0 for a no-op).
    pub fn remove_product(&mut self, product_id: &ProductId) -> usize {
        let before = self.order.len();
        self.order.retain(|key| key.product_id != *product_id);
        self.lines.retain(|key, _| key.product_id != *product_id);
        before - self.order.len()
    }

    /// Empties the cart. Idempotent.
    pub fn clear(&mut self) {
        self.lines.clear();
        self.order.clear();
    }
}
