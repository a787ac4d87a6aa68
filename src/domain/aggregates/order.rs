//! Order aggregate: the write-only record handed to the order store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::aggregates::cart::CartLine;
use crate::domain::value_objects::Money;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderStatus {
    /// Mock payment succeeds instantly, so records are inserted as `Paid`.
    #[default]
    Paid,
    Processing,
    Shipped,
    Delivered,
}

/// One row of the hosted `orders` collection.
///
/// Built at submission time from the checkout form and a snapshot of the
/// cart; ownership transfers to the order store on insert and nothing is
/// retained locally. Raw payment-card fields are excluded from the record.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct OrderRecord {
    pub customer_name: String,
    pub customer_email: String,
    pub shipping_address: String,
    pub city: String,
    pub zip: String,
    pub total_amount: Money,
    pub items: Vec<CartLine>,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
}

impl OrderRecord {
    /// Builds the record for an order whose mock payment just succeeded.
    pub fn paid(
        customer_name: impl Into<String>,
        customer_email: impl Into<String>,
        shipping_address: impl Into<String>,
        city: impl Into<String>,
        zip: impl Into<String>,
        items: Vec<CartLine>,
        total_amount: Money,
    ) -> Self {
        Self {
            customer_name: customer_name.into(),
            customer_email: customer_email.into(),
            shipping_address: shipping_address.into(),
            city: city.into(),
            zip: zip.into(),
            total_amount,
            items,
            status: OrderStatus::Paid,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_serializes_as_a_paid_row() {
        let record = OrderRecord::paid(
            "Ada Lovelace",
            "ada@example.com",
            "12 Analytical Way",
            "London",
            "N1 9GU",
            vec![],
            Money::from_dollars(75),
        );
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["status"], "Paid");
        assert_eq!(json["total_amount"], 75.0);
        assert_eq!(json["customer_name"], "Ada Lovelace");
        // created_at goes over the wire as an ISO-8601 string
        let raw = json["created_at"].as_str().unwrap();
        assert!(DateTime::parse_from_rfc3339(raw).is_ok());
    }

    #[test]
    fn record_never_carries_card_fields() {
        let record = OrderRecord::paid(
            "Ada Lovelace",
            "ada@example.com",
            "12 Analytical Way",
            "London",
            "N1 9GU",
            vec![],
            Money::ZERO,
        );
        let json = serde_json::to_value(&record).unwrap();
        let keys: Vec<&String> = json.as_object().unwrap().keys().collect();
        for forbidden in ["card", "expiry", "cvv"] {
            assert!(!keys.iter().any(|k| k.as_str() == forbidden));
        }
    }
}
