//! Catalog aggregate: the set of purchasable products.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{Money, ProductId};

/// A purchasable product. Immutable once created; products are never deleted
/// in this storefront, only appended by seed data or the admin operation.
///
/// Wire format is camelCase (`isFeatured`) to match the persisted line-item
/// snapshots.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: Money,
    /// Open enumeration, e.g. "Running", "Lifestyle", "Basketball".
    pub category: String,
    pub sizes: Vec<Decimal>,
    pub colors: Vec<String>,
    pub image: String,
    pub description: String,
    #[serde(default)]
    pub is_featured: bool,
}

impl Product {
    pub fn offers_size(&self, size: Decimal) -> bool {
        self.sizes.contains(&size)
    }

    pub fn offers_color(&self, color: &str) -> bool {
        self.colors.iter().any(|c| c == color)
    }
}

/// Category selector for [`Catalog::filter`]: a specific category, or the
/// "show all" option.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    #[default]
    All,
    Category(String),
}

impl CategoryFilter {
    /// Display label: `"All"` for the show-all option, else the category name.
    pub fn label(&self) -> &str {
        match self {
            Self::All => "All",
            Self::Category(name) => name,
        }
    }

    fn matches(&self, product: &Product) -> bool {
        match self {
            Self::All => true,
            Self::Category(name) => product.category == *name,
        }
    }
}

impl From<Option<String>> for CategoryFilter {
    fn from(value: Option<String>) -> Self {
        match value {
            None => Self::All,
            Some(name) if name == "All" => Self::All,
            Some(name) => Self::Category(name),
        }
    }
}

/// Catalog of products, newest first.
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_products(products: Vec<Product>) -> Self {
        Self { products }
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn get(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id == *id)
    }

    /// Prepends a fully-formed product. Id uniqueness is the caller's
    /// responsibility; no well-formedness checks happen here.
    pub fn add(&mut self, product: Product) {
        self.products.insert(0, product);
    }

    /// The selectable category set: "show all" first, then the distinct
    /// categories present, in catalog order.
    pub fn category_options(&self) -> Vec<CategoryFilter> {
        let mut options = vec![CategoryFilter::All];
        for product in &self.products {
            let candidate = CategoryFilter::Category(product.category.clone());
            if !options.contains(&candidate) {
                options.push(candidate);
            }
        }
        options
    }

    /// Pure narrowing by category and price ceiling (`price <= ceiling`),
    /// catalog order preserved.
    pub fn filter(&self, category: &CategoryFilter, max_price: Money) -> Vec<&Product> {
        self.products
            .iter()
            .filter(|p| category.matches(p) && p.price <= max_price)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: &str, category: &str, price: i64) -> Product {
        Product {
            id: ProductId::from(id),
            name: format!("Shoe {id}"),
            price: Money::from_dollars(price),
            category: category.to_string(),
            sizes: vec![Decimal::from(9), Decimal::from(10)],
            colors: vec!["Black".to_string()],
            image: "https://picsum.photos/600/600".to_string(),
            description: String::new(),
            is_featured: false,
        }
    }

    #[test]
    fn add_prepends() {
        let mut catalog = Catalog::with_products(vec![product("p1", "Running", 60)]);
        catalog.add(product("p2", "Lifestyle", 90));
        assert_eq!(catalog.products()[0].id, ProductId::from("p2"));
    }

    #[test]
    fn show_all_with_max_ceiling_returns_everything_in_order() {
        let catalog = Catalog::with_products(vec![
            product("p1", "Running", 60),
            product("p2", "Lifestyle", 90),
            product("p3", "Basketball", 120),
        ]);
        let filtered = catalog.filter(&CategoryFilter::All, Money::from_dollars(300));
        let ids: Vec<&str> = filtered.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["p1", "p2", "p3"]);
    }

    #[test]
    fn zero_ceiling_filters_out_all_priced_products() {
        let catalog = Catalog::with_products(vec![
            product("p1", "Running", 60),
            product("p2", "Lifestyle", 90),
        ]);
        assert!(catalog.filter(&CategoryFilter::All, Money::ZERO).is_empty());
    }

    #[test]
    fn category_filter_narrows() {
        let catalog = Catalog::with_products(vec![
            product("p1", "Running", 60),
            product("p2", "Lifestyle", 90),
        ]);
        let running = CategoryFilter::Category("Running".to_string());
        let filtered = catalog.filter(&running, Money::from_dollars(300));
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].id, ProductId::from("p1"));
    }

    #[test]
    fn ceiling_is_inclusive() {
        let catalog = Catalog::with_products(vec![product("p1", "Running", 60)]);
        assert_eq!(catalog.filter(&CategoryFilter::All, Money::from_dollars(60)).len(), 1);
    }

    #[test]
    fn category_options_are_distinct_and_prefixed_with_all() {
        let catalog = Catalog::with_products(vec![
            product("p1", "Running", 60),
            product("p2", "Lifestyle", 90),
            product("p3", "Running", 70),
        ]);
        assert_eq!(
            catalog.category_options(),
            vec![
                CategoryFilter::All,
                CategoryFilter::Category("Running".to_string()),
                CategoryFilter::Category("Lifestyle".to_string()),
            ]
        );
    }
}
