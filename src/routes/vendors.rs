use axum::{
    Json, Router,
    extract::State,
    routing::{get, post},
};

use crate::{
    dto::vendors::ProvisionVendorRequest,
    error::AppResult,
    middleware::auth::AuthUser,
    models::VendorProfile,
    response::ApiResponse,
    services::vendor_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(provision_vendor))
        .route("/me", get(my_profile))
}

#[utoipa::path(
    post,
    path = "/api/vendors",
    request_body = ProvisionVendorRequest,
    responses(
        (status = 200, description = "Vendor profile created", body = ApiResponse<VendorProfile>),
        (status = 400, description = "Profile already exists"),
        (status = 403, description = "Admin only"),
    ),
    security(("bearer_auth" = [])),
    tag = "Vendors"
)]
pub async fn provision_vendor(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<ProvisionVendorRequest>,
) -> AppResult<Json<ApiResponse<VendorProfile>>> {
    let resp = vendor_service::provision_profile(&state, &user, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/vendors/me",
    responses(
        (status = 200, description = "The signed-in vendor's profile", body = ApiResponse<VendorProfile>),
        (status = 404, description = "No profile provisioned yet"),
    ),
    security(("bearer_auth" = [])),
    tag = "Vendors"
)]
pub async fn my_profile(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<VendorProfile>>> {
    let resp = vendor_service::my_profile(&state, &user).await?;
    Ok(Json(resp))
}
