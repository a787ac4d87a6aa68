//! Shop state container: the single source of truth for catalog, cart and
//! current-user identity.
//!
//! Constructed once at process start and passed by reference to whatever
//! needs it — there is no ambient singleton. Mutations are synchronous and
//! raise a [`ShopEvent`] before returning, so a caller draining
//! [`ShopState::take_events`] observes every change in order.

use rust_decimal::Decimal;

use crate::domain::aggregates::cart::LineKey;
use crate::domain::aggregates::{Cart, Catalog, Product};
use crate::domain::events::{CartEvent, CatalogEvent, ShopEvent};
use crate::domain::user::User;
use crate::domain::value_objects::ProductId;

#[derive(Debug, Default)]
pub struct ShopState {
    catalog: Catalog,
    cart: Cart,
    user: Option<User>,
    events: Vec<ShopEvent>,
}

impl ShopState {
    pub fn new(catalog: Catalog, user: Option<User>) -> Self {
        Self {
            catalog,
            cart: Cart::new(),
            user,
            events: Vec::new(),
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    /// Adds one unit of (product, size, color) to the cart, merging into an
    /// existing line when the identity key matches. Size/color membership is
    /// the caller's responsibility; it is not re-validated here.
    pub fn add_to_cart(&mut self, product: Product, size: Decimal, color: String) {
        let product_id = product.id.clone();
        let merged = self.cart.add(product, size, color.clone());
        let event = if merged {
            let key = LineKey {
                product_id: product_id.clone(),
                size,
                color: color.clone(),
            };
            let quantity = self.cart.get(&key).map_or(0, |line| line.quantity.value());
            CartEvent::LineMerged {
                product_id,
                size,
                color,
                quantity,
            }
        } else {
            CartEvent::LineAdded {
                product_id,
                size,
                color,
            }
        };
        self.raise(ShopEvent::Cart(event));
    }

    /// Removes every cart line for the product id, regardless of size and
    /// color. No-op when nothing matches.
    pub fn remove_from_cart(&mut self, product_id: &ProductId) {
        let lines_removed = self.cart.remove_product(product_id);
        self.raise(ShopEvent::Cart(CartEvent::ProductRemoved {
            product_id: product_id.clone(),
            lines_removed,
        }));
    }

    /// Empties the cart unconditionally.
    pub fn clear_cart(&mut self) {
        self.cart.clear();
        self.raise(ShopEvent::Cart(CartEvent::Cleared));
    }

    /// Prepends a fully-formed product to the catalog. The caller supplies a
    /// unique id ([`ProductId::generate`] for admin submissions) and no
    /// well-formedness checks happen here.
    pub fn add_product(&mut self, product: Product) {
        let product_id = product.id.clone();
        self.catalog.add(product);
        self.raise(ShopEvent::Catalog(CatalogEvent::ProductAdded { product_id }));
    }

    /// Drains the events raised since the last call, oldest first.
    pub fn take_events(&mut self) -> Vec<ShopEvent> {
        std::mem::take(&mut self.events)
    }

    fn raise(&mut self, event: ShopEvent) {
        self.events.push(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::user::{User, UserRole};
    use crate::domain::value_objects::Money;

    fn sneaker(id: &str, price: i64) -> Product {
        Product {
            id: ProductId::from(id),
            name: "Court Classic".to_string(),
            price: Money::from_dollars(price),
            category: "Basketball".to_string(),
            sizes: vec![Decimal::from(9), Decimal::from(10)],
            colors: vec!["Black".to_string()],
            image: "https://picsum.photos/600/600".to_string(),
            description: String::new(),
            is_featured: false,
        }
    }

    fn shop() -> ShopState {
        let user = User {
            id: "u1".to_string(),
            name: "Jordan Lee".to_string(),
            email: "jordan@walkin.it".to_string(),
            role: UserRole::Admin,
        };
        ShopState::new(Catalog::with_products(vec![sneaker("p1", 60)]), Some(user))
    }

    #[test]
    fn add_then_merge_raises_matching_events() {
        let mut shop = shop();
        let product = shop.catalog().get(&ProductId::from("p1")).unwrap().clone();
        shop.add_to_cart(product.clone(), Decimal::from(9), "Black".to_string());
        shop.add_to_cart(product, Decimal::from(9), "Black".to_string());

        let events = shop.take_events();
        assert_eq!(events.len(), 2);
        assert!(matches!(
            &events[0],
            ShopEvent::Cart(CartEvent::LineAdded { product_id, .. }) if product_id.as_str() == "p1"
        ));
        assert!(matches!(
            &events[1],
            ShopEvent::Cart(CartEvent::LineMerged { quantity: 2, .. })
        ));
        // drained
        assert!(shop.take_events().is_empty());
    }

    #[test]
    fn remove_and_clear_raise_events() {
        let mut shop = shop();
        let product = shop.catalog().get(&ProductId::from("p1")).unwrap().clone();
        shop.add_to_cart(product, Decimal::from(9), "Black".to_string());
        shop.remove_from_cart(&ProductId::from("p1"));
        shop.clear_cart();

        let events = shop.take_events();
        assert!(matches!(
            &events[1],
            ShopEvent::Cart(CartEvent::ProductRemoved { lines_removed: 1, .. })
        ));
        assert!(matches!(&events[2], ShopEvent::Cart(CartEvent::Cleared)));
        assert!(shop.cart().is_empty());
    }

    #[test]
    fn add_product_prepends_to_catalog() {
        let mut shop = shop();
        shop.add_product(sneaker("p2", 90));
        assert_eq!(shop.catalog().products()[0].id, ProductId::from("p2"));
        assert!(matches!(
            &shop.take_events()[0],
            ShopEvent::Catalog(CatalogEvent::ProductAdded { product_id }) if product_id.as_str() == "p2"
        ));
    }
}
