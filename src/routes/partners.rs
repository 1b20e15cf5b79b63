use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{delete, get, patch},
};

use crate::{
    dto::partners::{
        AssignRegionRequest, PartnerList, PartnerProfile, RemovePartnerRequest,
        UpdateProfileRequest,
    },
    error::AppResult,
    middleware::auth::AuthUser,
    response::ApiResponse,
    services::partner_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(roster))
        .route("/me", get(me).patch(update_me))
        .route("/{name}", delete(remove_partner))
        .route("/{name}/region", patch(assign_region))
}

#[utoipa::path(
    get,
    path = "/api/partners/me",
    responses(
        (status = 200, description = "Own profile", body = ApiResponse<PartnerProfile>),
    ),
    security(("bearer_auth" = [])),
    tag = "Partners"
)]
pub async fn me(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<PartnerProfile>>> {
    let resp = partner_service::me(&state, &user).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    patch,
    path = "/api/partners/me",
    request_body = UpdateProfileRequest,
    responses(
        (status = 200, description = "Updated profile", body = ApiResponse<PartnerProfile>),
    ),
    security(("bearer_auth" = [])),
    tag = "Partners"
)]
pub async fn update_me(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<UpdateProfileRequest>,
) -> AppResult<Json<ApiResponse<PartnerProfile>>> {
    let resp = partner_service::update_me(&state, &user, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/partners",
    responses(
        (status = 200, description = "All partner accounts (admin only)", body = ApiResponse<PartnerList>),
        (status = 403, description = "Forbidden"),
    ),
    security(("bearer_auth" = [])),
    tag = "Partners"
)]
pub async fn roster(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<PartnerList>>> {
    let resp = partner_service::roster(&state, &user).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/partners/{name}",
    params(
        ("name" = String, Path, description = "Partner name")
    ),
    request_body = RemovePartnerRequest,
    responses(
        (status = 200, description = "Partner removed", body = ApiResponse<serde_json::Value>),
        (status = 400, description = "Password confirmation failed"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Not Found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Partners"
)]
pub async fn remove_partner(
    State(state): State<AppState>,
    user: AuthUser,
    Path(name): Path<String>,
    Json(payload): Json<RemovePartnerRequest>,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let resp = partner_service::remove_partner(&state, &user, name, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    patch,
    path = "/api/partners/{name}/region",
    params(
        ("name" = String, Path, description = "Partner name")
    ),
    request_body = AssignRegionRequest,
    responses(
        (status = 200, description = "Region assigned", body = ApiResponse<PartnerProfile>),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Not Found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Partners"
)]
pub async fn assign_region(
    State(state): State<AppState>,
    user: AuthUser,
    Path(name): Path<String>,
    Json(payload): Json<AssignRegionRequest>,
) -> AppResult<Json<ApiResponse<PartnerProfile>>> {
    let resp = partner_service::assign_region(&state, &user, name, payload).await?;
    Ok(Json(resp))
}
