//! Clients for the two network collaborators: the hosted order store and
//! the generative-language service.

pub mod assistant;
pub mod orders;

pub use assistant::{ChatRole, ChatTurn, StylistClient};
pub use orders::{OrderStoreClient, OrderStoreError};
