//! Checkout flow: Browsing → Checkout → Complete, with an explicit
//! in-flight flag guarding double submission.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use validator::Validate;

use crate::domain::aggregates::OrderRecord;
use crate::pricing;
use crate::services::orders::{OrderStoreClient, OrderStoreError};
use crate::shop::ShopState;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub enum CheckoutStage {
    /// Cart visible and editable.
    #[default]
    Browsing,
    /// Contact/shipping/payment form active; cart treated as read-only.
    Checkout,
    /// Order persisted, cart guaranteed empty, confirmation shown.
    Complete,
}

#[derive(Debug, Error)]
pub enum CheckoutError {
    #[error("cart is empty")]
    EmptyCart,

    #[error("no checkout in progress")]
    NotInCheckout,

    #[error("an order submission is already in flight")]
    SubmissionInFlight,

    #[error("invalid order form: {0}")]
    InvalidForm(#[from] validator::ValidationErrors),

    #[error("order could not be saved: {0}")]
    Submission(#[from] OrderStoreError),
}

/// The contact/shipping/payment form filled in during checkout.
///
/// Card fields are collected for the mock payment step only; they are never
/// serialized and never reach the order store.
#[derive(Clone, Debug, Deserialize, Validate)]
pub struct OrderForm {
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    #[validate(email(message = "a valid email is required"))]
    pub email: String,
    #[validate(length(min = 1, message = "address is required"))]
    pub address: String,
    #[validate(length(min = 1, message = "city is required"))]
    pub city: String,
    #[validate(length(min = 1, message = "postal code is required"))]
    pub zip: String,
    #[validate(length(min = 1, message = "card number is required"))]
    pub card: String,
    #[validate(length(min = 1, message = "expiry is required"))]
    pub expiry: String,
    #[validate(length(min = 1, message = "cvv is required"))]
    pub cvv: String,
}

/// Per-session checkout state machine.
#[derive(Debug, Default)]
pub struct CheckoutFlow {
    stage: CheckoutStage,
    in_flight: bool,
}

impl CheckoutFlow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stage(&self) -> CheckoutStage {
        self.stage
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    /// Enters the Checkout stage. Blocked while the cart is empty — the
    /// empty-cart terminal display never offers this transition.
    pub fn proceed(&mut self, shop: &ShopState) -> Result<(), CheckoutError> {
        if shop.cart().is_empty() {
            return Err(CheckoutError::EmptyCart);
        }
        self.stage = CheckoutStage::Checkout;
        Ok(())
    }

    /// Returns to Browsing without losing cart state ("back to cart", or
    /// "continue shopping" after completion). Refused mid-submission.
    pub fn back(&mut self) -> Result<(), CheckoutError> {
        if self.in_flight {
            return Err(CheckoutError::SubmissionInFlight);
        }
        self.stage = CheckoutStage::Browsing;
        Ok(())
    }

    /// Submits the order: validates the form, builds the persisted record
    /// from a snapshot of the cart plus the derived total, and performs one
    /// atomic insert. On success the cart is cleared and the flow lands in
    /// Complete; on failure stage and cart are left untouched so the user
    /// can re-trigger manually. No automatic retry.
    pub async fn submit(
        &mut self,
        shop: &mut ShopState,
        form: &OrderForm,
        store: &OrderStoreClient,
    ) -> Result<(), CheckoutError> {
        if self.stage != CheckoutStage::Checkout {
            return Err(CheckoutError::NotInCheckout);
        }
        if self.in_flight {
            return Err(CheckoutError::SubmissionInFlight);
        }
        form.validate()?;

        let record = OrderRecord::paid(
            form.name.clone(),
            form.email.clone(),
            form.address.clone(),
            form.city.clone(),
            form.zip.clone(),
            shop.cart().snapshot(),
            pricing::total(shop.cart()),
        );

        self.in_flight = true;
        let result = store.insert_order(&record).await;
        self.in_flight = false;
        result?;

        shop.clear_cart();
        self.stage = CheckoutStage::Complete;
        Ok(())
    }
}
