use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::{get, patch, post},
};
use uuid::Uuid;

use crate::{
    dto::admin::{
        AdminWindowResponse, DeliveryDatesResponse, HarvestSummaryResponse, HarvestToggleRequest,
        HarvestToggleResponse, RoutePlanResponse,
    },
    dto::orders::OrderList,
    error::AppResult,
    middleware::auth::AuthUser,
    models::Order,
    response::ApiResponse,
    routes::params::{AdminOrdersQuery, DateQuery, RouteQuery},
    services::admin_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/window", get(current_window))
        .route("/delivery-dates", get(delivery_dates))
        .route("/summary", get(harvest_summary))
        .route("/harvest/toggle", post(toggle_harvest))
        .route("/route", get(route_plan))
        .route("/orders", get(list_all_orders))
        .route("/orders/{id}/delivered", patch(toggle_delivered))
}

#[utoipa::path(
    get,
    path = "/api/admin/window",
    responses(
        (status = 200, description = "Region and date currently being packed", body = ApiResponse<AdminWindowResponse>),
        (status = 403, description = "Forbidden"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn current_window(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<AdminWindowResponse>>> {
    let resp = admin_service::current_window(&state, &user).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/admin/delivery-dates",
    responses(
        (status = 200, description = "Order dates plus the upcoming schedule", body = ApiResponse<DeliveryDatesResponse>),
        (status = 403, description = "Forbidden"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn delivery_dates(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<DeliveryDatesResponse>>> {
    let resp = admin_service::delivery_dates(&state, &user).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/admin/summary",
    params(
        ("date" = Option<String>, Query, description = "Delivery date d.m.yyyy, default current window"),
    ),
    responses(
        (status = 200, description = "Cutting list for a delivery date", body = ApiResponse<HarvestSummaryResponse>),
        (status = 400, description = "Invalid date"),
        (status = 403, description = "Forbidden"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn harvest_summary(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<DateQuery>,
) -> AppResult<Json<ApiResponse<HarvestSummaryResponse>>> {
    let resp = admin_service::harvest_summary(&state, &user, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/admin/harvest/toggle",
    request_body = HarvestToggleRequest,
    responses(
        (status = 200, description = "Flip one harvest flag", body = ApiResponse<HarvestToggleResponse>),
        (status = 400, description = "Invalid date"),
        (status = 403, description = "Forbidden"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn toggle_harvest(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<HarvestToggleRequest>,
) -> AppResult<Json<ApiResponse<HarvestToggleResponse>>> {
    let resp = admin_service::toggle_harvest(&state, &user, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/admin/route",
    params(
        ("date" = Option<String>, Query, description = "Delivery date d.m.yyyy, default current window"),
        ("region" = Option<String>, Query, description = "Region name, default the date's route region"),
    ),
    responses(
        (status = 200, description = "Stops in driving order", body = ApiResponse<RoutePlanResponse>),
        (status = 400, description = "Invalid date"),
        (status = 403, description = "Forbidden"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn route_plan(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<RouteQuery>,
) -> AppResult<Json<ApiResponse<RoutePlanResponse>>> {
    let resp = admin_service::route_plan(&state, &user, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/admin/orders",
    params(
        ("date" = Option<String>, Query, description = "Filter by delivery date d.m.yyyy"),
        ("page" = Option<i64>, Query, description = "Page number, default 1"),
        ("per_page" = Option<i64>, Query, description = "Items per page, default 20"),
    ),
    responses(
        (status = 200, description = "All orders (admin only)", body = ApiResponse<OrderList>),
        (status = 403, description = "Forbidden"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn list_all_orders(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<AdminOrdersQuery>,
) -> AppResult<Json<ApiResponse<OrderList>>> {
    let resp = admin_service::list_all_orders(&state, &user, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    patch,
    path = "/api/admin/orders/{id}/delivered",
    params(
        ("id" = Uuid, Path, description = "Order ID")
    ),
    responses(
        (status = 200, description = "Toggle the delivered flag", body = ApiResponse<Order>),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Not Found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn toggle_delivered(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<Order>>> {
    let resp = admin_service::toggle_delivered(&state, &user, id).await?;
    Ok(Json(resp))
}
