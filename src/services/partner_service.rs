use crate::{
    dto::partners::{
        AssignRegionRequest, PartnerList, PartnerProfile, RemovePartnerRequest,
        UpdateProfileRequest,
    },
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_admin},
    models::Role,
    response::{ApiResponse, Meta},
    services::auth_service,
    state::AppState,
};

pub async fn me(state: &AppState, user: &AuthUser) -> AppResult<ApiResponse<PartnerProfile>> {
    let data = state.snapshot().await;
    let account = match data.user_by_name(&user.name) {
        Some(u) => u,
        None => return Err(AppError::NotFound),
    };
    Ok(ApiResponse::success(
        "Profile",
        PartnerProfile::from(account),
        None,
    ))
}

pub async fn update_me(
    state: &AppState,
    user: &AuthUser,
    payload: UpdateProfileRequest,
) -> AppResult<ApiResponse<PartnerProfile>> {
    let profile = state
        .update(|data| {
            let account = data.user_by_name_mut(&user.name).ok_or(AppError::NotFound)?;
            if let Some(email) = payload.email {
                account.email = normalize(email);
            }
            if let Some(phone) = payload.phone {
                account.phone = normalize(phone);
            }
            if let Some(address) = payload.address {
                account.address = normalize(address);
            }
            Ok(PartnerProfile::from(&*account))
        })
        .await?;

    Ok(ApiResponse::success(
        "Profile updated",
        profile,
        Some(Meta::empty()),
    ))
}

pub async fn roster(state: &AppState, user: &AuthUser) -> AppResult<ApiResponse<PartnerList>> {
    ensure_admin(user)?;
    let data = state.snapshot().await;
    let items: Vec<PartnerProfile> = data
        .users
        .iter()
        .filter(|u| u.role == Role::Customer)
        .map(PartnerProfile::from)
        .collect();

    let total = items.len() as i64;
    let meta = Meta::new(1, total, total);
    Ok(ApiResponse::success(
        "Partners",
        PartnerList { items },
        Some(meta),
    ))
}

/// Deletes a partner account. The admin confirms their own password first.
/// The partner's order history stays; only the account (and any open
/// session cart) goes away.
pub async fn remove_partner(
    state: &AppState,
    user: &AuthUser,
    name: String,
    payload: RemovePartnerRequest,
) -> AppResult<ApiResponse<serde_json::Value>> {
    ensure_admin(user)?;

    state
        .update(|data| {
            let admin = data.user_by_name(&user.name).ok_or(AppError::NotFound)?;
            if !auth_service::verify_password(&admin.password_hash, &payload.password) {
                return Err(AppError::BadRequest("Invalid password".to_string()));
            }

            let target = data.user_by_name(&name).ok_or(AppError::NotFound)?;
            if target.role == Role::Admin {
                return Err(AppError::BadRequest(
                    "Cannot remove an admin account".to_string(),
                ));
            }

            data.users.retain(|u| u.name != name);
            Ok(())
        })
        .await?;

    state.clear_cart(&name).await;
    tracing::info!(partner = %name, "partner removed");

    Ok(ApiResponse::success(
        "Partner removed",
        serde_json::json!({}),
        Some(Meta::empty()),
    ))
}

pub async fn assign_region(
    state: &AppState,
    user: &AuthUser,
    name: String,
    payload: AssignRegionRequest,
) -> AppResult<ApiResponse<PartnerProfile>> {
    ensure_admin(user)?;

    let profile = state
        .update(|data| {
            let account = data.user_by_name_mut(&name).ok_or(AppError::NotFound)?;
            account.region = payload.region;
            Ok(PartnerProfile::from(&*account))
        })
        .await?;

    Ok(ApiResponse::success(
        "Region assigned",
        profile,
        Some(Meta::empty()),
    ))
}

fn normalize(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
