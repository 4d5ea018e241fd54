//! Production implementations of the portal capability traits, backed by the
//! same subsystems the HTTP routes use.

use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    db::DbPool,
    dto::{auth::RegisterRequest, products::UpdateProductRequest},
    error::AppError,
    middleware::auth::{AuthUser, verify_token},
    models::Product,
    portal::{
        GatewayError, IdentityGateway, ProductChanges, ProductGateway, SignUpOutcome,
        registration::VENDOR_ROLE,
    },
    services::{auth_service, product_service},
    state::AppState,
};

/// The provider's own wording, without the HTTP-status prefix the error
/// envelope adds.
fn provider_message(err: AppError) -> GatewayError {
    match err {
        AppError::BadRequest(msg) => GatewayError(msg),
        other => GatewayError(other.to_string()),
    }
}

/// Identity boundary backed by the portal's auth subsystem: sign-up writes
/// the users table, session resolution validates the bearer token the signed
/// in client holds.
pub struct SessionIdentity {
    pool: DbPool,
    token: Option<String>,
}

impl SessionIdentity {
    pub fn new(pool: DbPool) -> Self {
        Self { pool, token: None }
    }

    pub fn with_token(pool: DbPool, token: impl Into<String>) -> Self {
        Self {
            pool,
            token: Some(token.into()),
        }
    }

    pub fn set_token(&mut self, token: impl Into<String>) {
        self.token = Some(token.into());
    }
}

#[async_trait]
impl IdentityGateway for SessionIdentity {
    async fn sign_up(
        &self,
        email: &str,
        password: &str,
        role: &str,
    ) -> Result<SignUpOutcome, GatewayError> {
        let payload = RegisterRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        let resp = auth_service::register_user(&self.pool, payload, role)
            .await
            .map_err(provider_message)?;
        let user = resp
            .data
            .ok_or_else(|| GatewayError("Sign-up returned no account".into()))?;
        Ok(SignUpOutcome {
            user_id: user.id,
            confirmation_required: user.confirmed_at.is_none(),
        })
    }

    async fn current_user(&self) -> Result<Option<Uuid>, GatewayError> {
        let Some(token) = self.token.as_deref() else {
            return Ok(None);
        };
        let token = token.strip_prefix("Bearer ").unwrap_or(token).trim();
        let user = verify_token(token).map_err(provider_message)?;
        Ok(Some(user.user_id))
    }
}

/// Product storage boundary bound to one acting vendor; every write goes
/// through the owner-scoped product service.
pub struct VendorProductStore {
    state: AppState,
    acting_as: AuthUser,
}

impl VendorProductStore {
    pub fn new(state: AppState, vendor_id: Uuid) -> Self {
        Self {
            state,
            acting_as: AuthUser {
                user_id: vendor_id,
                role: VENDOR_ROLE.to_string(),
            },
        }
    }
}

#[async_trait]
impl ProductGateway for VendorProductStore {
    async fn products_owned_by(&self, vendor_id: Uuid) -> Result<Vec<Product>, GatewayError> {
        product_service::list_owned(&self.state.orm, vendor_id)
            .await
            .map_err(provider_message)
    }

    async fn update_product(
        &self,
        product_id: Uuid,
        changes: ProductChanges,
    ) -> Result<(), GatewayError> {
        let payload = UpdateProductRequest {
            name: Some(changes.name),
            description: None,
            price: Some(changes.price),
            stock: Some(changes.stock),
        };
        product_service::update_product(&self.state, &self.acting_as, product_id, payload)
            .await
            .map(|_| ())
            .map_err(provider_message)
    }

    async fn delete_product(&self, product_id: Uuid) -> Result<(), GatewayError> {
        product_service::delete_product(&self.state, &self.acting_as, product_id)
            .await
            .map(|_| ())
            .map_err(provider_message)
    }
}
