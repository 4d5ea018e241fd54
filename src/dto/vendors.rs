use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Deserialize, ToSchema)]
pub struct ProvisionVendorRequest {
    pub user_id: Uuid,
    pub business_name: String,
    pub contact_number: String,
}
