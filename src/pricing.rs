//! Pricing derivation: pure functions recomputed from the cart on demand.
//!
//! Amounts keep full decimal precision; two-decimal rounding is a display
//! concern only.

use crate::domain::aggregates::Cart;
use crate::domain::value_objects::Money;

/// Subtotals strictly above this ship free.
pub const FREE_SHIPPING_THRESHOLD: i64 = 100;
/// Flat rate charged at or below the threshold.
pub const FLAT_SHIPPING_RATE: i64 = 15;

/// Sum of `price × quantity` over all lines; zero for an empty cart.
pub fn subtotal(cart: &Cart) -> Money {
    cart.lines().map(|line| line.line_total()).sum()
}

pub fn shipping(subtotal: Money) -> Money {
    if subtotal > Money::from_dollars(FREE_SHIPPING_THRESHOLD) {
        Money::ZERO
    } else {
        Money::from_dollars(FLAT_SHIPPING_RATE)
    }
}

pub fn total(cart: &Cart) -> Money {
    let subtotal = subtotal(cart);
    subtotal + shipping(subtotal)
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;
    use crate::domain::aggregates::Product;
    use crate::domain::value_objects::ProductId;

    fn sneaker(id: &str, price: i64) -> Product {
        Product {
            id: ProductId::from(id),
            name: "Aero Glide".to_string(),
            price: Money::from_dollars(price),
            category: "Running".to_string(),
            sizes: vec![Decimal::from(9)],
            colors: vec!["Black".to_string()],
            image: "https://picsum.photos/600/600".to_string(),
            description: String::new(),
            is_featured: false,
        }
    }

    #[test]
    fn empty_cart_subtotals_to_zero() {
        let cart = Cart::new();
        assert_eq!(subtotal(&cart), Money::ZERO);
        // an empty cart still pays the flat rate if it could be submitted
        assert_eq!(shipping(Money::ZERO), Money::from_dollars(15));
    }

    #[test]
    fn subtotal_sums_price_times_quantity() {
        let mut cart = Cart::new();
        cart.add(sneaker("p1", 60), Decimal::from(9), "Black".to_string());
        cart.add(sneaker("p1", 60), Decimal::from(9), "Black".to_string());
        cart.add(sneaker("p2", 25), Decimal::from(9), "Black".to_string());
        assert_eq!(subtotal(&cart), Money::from_dollars(145));
    }

    #[test]
    fn shipping_threshold_is_strictly_greater_than() {
        assert_eq!(shipping(Money::from_dollars(100)), Money::from_dollars(15));
        assert_eq!(shipping(Money::new(Decimal::new(10001, 2))), Money::ZERO);
        assert_eq!(shipping(Money::from_dollars(101)), Money::ZERO);
    }

    #[test]
    fn sixty_dollar_cart_totals_seventy_five() {
        let mut cart = Cart::new();
        cart.add(sneaker("p1", 60), Decimal::from(9), "Black".to_string());
        assert_eq!(subtotal(&cart), Money::from_dollars(60));
        assert_eq!(total(&cart), Money::from_dollars(75));
    }

    #[test]
    fn second_unit_crosses_the_free_shipping_threshold() {
        let mut cart = Cart::new();
        cart.add(sneaker("p1", 60), Decimal::from(9), "Black".to_string());
        cart.add(sneaker("p1", 60), Decimal::from(9), "Black".to_string());
        assert_eq!(subtotal(&cart), Money::from_dollars(120));
        assert_eq!(total(&cart), Money::from_dollars(120));
    }
}
