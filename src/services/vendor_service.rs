use chrono::Utc;
use sea_orm::ActiveValue::NotSet;
use sea_orm::{ActiveModelTrait, EntityTrait, Set};

use crate::{
    audit::log_audit,
    dto::vendors::ProvisionVendorRequest,
    entity::vendor_profiles::{ActiveModel, Entity as VendorProfiles, Model as ProfileModel},
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_admin},
    models::VendorProfile,
    response::{ApiResponse, Meta},
    state::AppState,
};

/// Vendor profiles are provisioned by an admin after registration; the
/// registration flow itself never creates one.
pub async fn provision_profile(
    state: &AppState,
    user: &AuthUser,
    payload: ProvisionVendorRequest,
) -> AppResult<ApiResponse<VendorProfile>> {
    ensure_admin(user)?;

    if VendorProfiles::find_by_id(payload.user_id)
        .one(&state.orm)
        .await?
        .is_some()
    {
        return Err(AppError::BadRequest(
            "Vendor profile already exists".to_string(),
        ));
    }

    let active = ActiveModel {
        user_id: Set(payload.user_id),
        business_name: Set(payload.business_name),
        contact_number: Set(payload.contact_number),
        created_at: NotSet,
    };
    let profile = active.insert(&state.orm).await?;

    if let Err(err) = log_audit(
        &state.pool,
        Some(user.user_id),
        "vendor_profile_provision",
        Some("vendor_profiles"),
        Some(serde_json::json!({ "vendor_id": profile.user_id })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::success(
        "Vendor profile created",
        profile_from_entity(profile),
        Some(Meta::empty()),
    ))
}

pub async fn my_profile(state: &AppState, user: &AuthUser) -> AppResult<ApiResponse<VendorProfile>> {
    let profile = VendorProfiles::find_by_id(user.user_id)
        .one(&state.orm)
        .await?;
    let profile = match profile {
        Some(p) => p,
        None => return Err(AppError::NotFound),
    };
    Ok(ApiResponse::success(
        "Vendor profile",
        profile_from_entity(profile),
        None,
    ))
}

fn profile_from_entity(model: ProfileModel) -> VendorProfile {
    VendorProfile {
        user_id: model.user_id,
        business_name: model.business_name,
        contact_number: model.contact_number,
        created_at: model.created_at.with_timezone(&Utc),
    }
}
