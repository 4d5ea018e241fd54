use rust_decimal::Decimal;
use thiserror::Error;
use uuid::Uuid;

use crate::models::Product;
use crate::portal::{GatewayError, IdentityGateway, ProductChanges, ProductGateway};

pub const EMPTY_MESSAGE: &str = "No products found.";
pub const LOADING_MESSAGE: &str = "Loading products...";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DashboardError {
    #[error("no product is being edited")]
    NoEditTarget,

    #[error("price must be a non-negative number, got {0:?}")]
    InvalidPrice(String),

    #[error("stock must be a non-negative whole number, got {0:?}")]
    InvalidStock(String),

    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

/// Text shadowing the persisted record while a row is being edited. Values
/// stay strings until save, when they are parsed and validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditDraft {
    pub product_id: Uuid,
    pub name: String,
    pub price: String,
    pub stock: String,
}

/// The vendor dashboard: a product list, at most one edit target, and one
/// awaited round trip per user action. Every write is followed by a full
/// refetch; there is no local merge.
pub struct Dashboard<I, P> {
    identity: I,
    products: P,
    vendor: Option<Uuid>,
    rows: Vec<Product>,
    edit: Option<EditDraft>,
    loaded: bool,
}

impl<I, P> Dashboard<I, P>
where
    I: IdentityGateway,
    P: ProductGateway,
{
    pub fn new(identity: I, products: P) -> Self {
        Self {
            identity,
            products,
            vendor: None,
            rows: Vec::new(),
            edit: None,
            loaded: false,
        }
    }

    /// Initial mount: resolve the signed-in user, then fetch their products.
    /// Identity and fetch failures are logged and leave the list empty.
    pub async fn load(&mut self) {
        match self.identity.current_user().await {
            Ok(Some(vendor_id)) => {
                self.vendor = Some(vendor_id);
                self.refetch().await;
            }
            Ok(None) => {
                self.rows.clear();
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to resolve current user");
                self.rows.clear();
            }
        }
        self.loaded = true;
    }

    async fn refetch(&mut self) {
        let Some(vendor_id) = self.vendor else {
            self.rows.clear();
            return;
        };
        match self.products.products_owned_by(vendor_id).await {
            Ok(items) => self.rows = items,
            Err(err) => {
                tracing::error!(error = %err, "failed to fetch products");
                self.rows.clear();
            }
        }
    }

    /// Switch a row into edit mode, copying its fields into a text draft.
    /// Retargeting while another row is mid-edit silently discards the prior
    /// unsaved draft, keeping the at-most-one-target invariant.
    pub fn begin_edit(&mut self, product_id: Uuid) {
        if let Some(product) = self.rows.iter().find(|p| p.id == product_id) {
            self.edit = Some(EditDraft {
                product_id,
                name: product.name.clone(),
                price: product.price.to_string(),
                stock: product.stock.to_string(),
            });
        }
    }

    pub fn edit_target(&self) -> Option<Uuid> {
        self.edit.as_ref().map(|d| d.product_id)
    }

    pub fn draft(&self) -> Option<&EditDraft> {
        self.edit.as_ref()
    }

    pub fn draft_mut(&mut self) -> Option<&mut EditDraft> {
        self.edit.as_mut()
    }

    /// Validate the draft, write it back, leave edit mode, refetch. A draft
    /// that does not parse to a non-negative number is rejected before any
    /// update is issued, and kept so the user can correct it.
    pub async fn save(&mut self) -> Result<(), DashboardError> {
        let draft = self.edit.as_ref().ok_or(DashboardError::NoEditTarget)?;

        let price: Decimal = draft
            .price
            .trim()
            .parse()
            .map_err(|_| DashboardError::InvalidPrice(draft.price.clone()))?;
        if price < Decimal::ZERO {
            return Err(DashboardError::InvalidPrice(draft.price.clone()));
        }

        let stock: i32 = draft
            .stock
            .trim()
            .parse()
            .map_err(|_| DashboardError::InvalidStock(draft.stock.clone()))?;
        if stock < 0 {
            return Err(DashboardError::InvalidStock(draft.stock.clone()));
        }

        let changes = ProductChanges {
            name: draft.name.clone(),
            price,
            stock,
        };
        self.products
            .update_product(draft.product_id, changes)
            .await?;

        self.edit = None;
        self.refetch().await;
        Ok(())
    }

    /// Remove a product without confirmation, then refetch.
    pub async fn delete(&mut self, product_id: Uuid) -> Result<(), DashboardError> {
        self.products.delete_product(product_id).await?;
        self.refetch().await;
        Ok(())
    }

    pub fn is_loading(&self) -> bool {
        !self.loaded
    }

    pub fn rows(&self) -> &[Product] {
        &self.rows
    }

    /// The list as the vendor sees it, one line per product.
    pub fn render(&self) -> String {
        if !self.loaded {
            return LOADING_MESSAGE.to_string();
        }
        if self.rows.is_empty() {
            return EMPTY_MESSAGE.to_string();
        }
        self.rows
            .iter()
            .map(format_row)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// `Widget - $9.99 (Stock: 5)`; trailing fractional zeros are trimmed, so a
/// price saved as `12.50` renders as `$12.5`.
pub fn format_row(product: &Product) -> String {
    format!(
        "{} - ${} (Stock: {})",
        product.name,
        product.price.normalize(),
        product.stock
    )
}
