//! Demo seed data: the launch catalog and the demo user the storefront
//! starts with. Nothing here survives a restart.

use rust_decimal::Decimal;

use crate::domain::aggregates::Product;
use crate::domain::user::{User, UserRole};
use crate::domain::value_objects::{Money, ProductId};

fn sizes(range: std::ops::RangeInclusive<i64>) -> Vec<Decimal> {
    range.map(Decimal::from).collect()
}

pub fn initial_catalog() -> Vec<Product> {
    vec![
        Product {
            id: ProductId::from("p1"),
            name: "Velocity Runner".to_string(),
            price: Money::from_dollars(60),
            category: "Running".to_string(),
            sizes: sizes(7..=12),
            colors: vec!["Black".to_string(), "Volt".to_string()],
            image: "https://images.unsplash.com/photo-1542291026-7eec264c27ff".to_string(),
            description: "Feather-light daily trainer with a responsive foam midsole."
                .to_string(),
            is_featured: true,
        },
        Product {
            id: ProductId::from("p2"),
            name: "Court Classic 88".to_string(),
            price: Money::from_dollars(95),
            category: "Lifestyle".to_string(),
            sizes: sizes(7..=11),
            colors: vec!["White".to_string(), "Sail".to_string()],
            image: "https://images.unsplash.com/photo-1549298916-b41d501d3772".to_string(),
            description: "Clean low-top silhouette that goes with everything.".to_string(),
            is_featured: false,
        },
        Product {
            id: ProductId::from("p3"),
            name: "Skybound Elite".to_string(),
            price: Money::from_dollars(145),
            category: "Basketball".to_string(),
            sizes: sizes(8..=13),
            colors: vec!["Black".to_string(), "Red".to_string(), "White".to_string()],
            image: "https://images.unsplash.com/photo-1552346154-21d32810aba3".to_string(),
            description: "High-cut support with a grippy herringbone outsole.".to_string(),
            is_featured: true,
        },
        Product {
            id: ProductId::from("p4"),
            name: "Marathon Pro Carbon".to_string(),
            price: Money::from_dollars(210),
            category: "Running".to_string(),
            sizes: sizes(7..=12),
            colors: vec!["Orange".to_string(), "Blue".to_string()],
            image: "https://images.unsplash.com/photo-1595950653106-6c9ebd614d3a".to_string(),
            description: "Carbon-plated race-day shoe built for personal bests.".to_string(),
            is_featured: false,
        },
        Product {
            id: ProductId::from("p5"),
            name: "Boardwalk Canvas".to_string(),
            price: Money::from_dollars(55),
            category: "Lifestyle".to_string(),
            sizes: sizes(6..=11),
            colors: vec!["Navy".to_string(), "Cream".to_string()],
            image: "https://images.unsplash.com/photo-1525966222134-fcfa99b8ae77".to_string(),
            description: "Broken-in canvas comfort from the first wear.".to_string(),
            is_featured: false,
        },
    ]
}

pub fn demo_user() -> User {
    User {
        id: "u1".to_string(),
        name: "Jordan Lee".to_string(),
        email: "jordan@walkin.it".to_string(),
        role: UserRole::Admin,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_ids_are_unique() {
        let catalog = initial_catalog();
        for (i, product) in catalog.iter().enumerate() {
            assert!(!catalog[i + 1..].iter().any(|p| p.id == product.id));
        }
    }

    #[test]
    fn seed_products_are_well_formed() {
        for product in initial_catalog() {
            assert!(product.price > Money::ZERO);
            assert!(!product.sizes.is_empty());
            assert!(!product.colors.is_empty());
        }
    }

    #[test]
    fn demo_user_is_an_admin() {
        assert!(demo_user().is_admin());
    }
}
