//! The portal core: registration and dashboard flows written against
//! injected capability traits, so the same logic runs over in-memory fakes
//! in tests and over the real identity/storage subsystems in production.

use async_trait::async_trait;
use rust_decimal::Decimal;
use thiserror::Error;
use uuid::Uuid;

use crate::models::Product;

pub mod dashboard;
pub mod gateways;
pub mod registration;

pub use dashboard::{Dashboard, DashboardError, EditDraft};
pub use gateways::{SessionIdentity, VendorProductStore};
pub use registration::{RegistrationForm, RegistrationStatus};

/// Failure reported by an external boundary. The message is the provider's
/// own wording and is surfaced verbatim where the contract asks for it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct GatewayError(pub String);

#[derive(Debug, Clone)]
pub struct SignUpOutcome {
    pub user_id: Uuid,
    pub confirmation_required: bool,
}

/// The identity/session provider boundary.
#[async_trait]
pub trait IdentityGateway: Send + Sync {
    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        role: &str,
    ) -> Result<SignUpOutcome, GatewayError>;

    /// Resolve the currently signed-in user, if any.
    async fn current_user(&self) -> Result<Option<Uuid>, GatewayError>;
}

/// Fields a save writes back to a single product record.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductChanges {
    pub name: String,
    pub price: Decimal,
    pub stock: i32,
}

/// The product storage boundary.
#[async_trait]
pub trait ProductGateway: Send + Sync {
    async fn products_owned_by(&self, vendor_id: Uuid) -> Result<Vec<Product>, GatewayError>;

    async fn update_product(
        &self,
        product_id: Uuid,
        changes: ProductChanges,
    ) -> Result<(), GatewayError>;

    async fn delete_product(&self, product_id: Uuid) -> Result<(), GatewayError>;
}
