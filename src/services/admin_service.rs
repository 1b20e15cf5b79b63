use chrono::{Local, NaiveDate};
use uuid::Uuid;

use crate::{
    calendar, demand, dispatch,
    dto::admin::{
        AdminWindowResponse, DeliveryDatesResponse, HarvestSummaryResponse, HarvestToggleRequest,
        HarvestToggleResponse, RoutePlanResponse, SummaryLine, SummaryRow,
    },
    dto::orders::OrderList,
    error::{AppError, AppResult},
    harvest::HarvestKey,
    middleware::auth::{AuthUser, ensure_admin},
    models::{Order, Region},
    response::{ApiResponse, Meta},
    routes::params::{AdminOrdersQuery, DateQuery, RouteQuery},
    state::AppState,
};

pub async fn current_window(
    _state: &AppState,
    user: &AuthUser,
) -> AppResult<ApiResponse<AdminWindowResponse>> {
    ensure_admin(user)?;

    let (region, date) = calendar::current_admin_window(Local::now().date_naive());
    let resp = AdminWindowResponse {
        region,
        date: calendar::format_date(date),
    };
    Ok(ApiResponse::success("Current window", resp, None))
}

/// Dates the admin can pick from: every date with an order plus the
/// upcoming schedule.
pub async fn delivery_dates(
    state: &AppState,
    user: &AuthUser,
) -> AppResult<ApiResponse<DeliveryDatesResponse>> {
    ensure_admin(user)?;

    let data = state.snapshot().await;
    let today = Local::now().date_naive();
    let dates = calendar::selectable_dates(data.orders.iter().map(|o| o.delivery_date), today)
        .into_iter()
        .map(calendar::format_date)
        .collect();

    Ok(ApiResponse::success(
        "Delivery dates",
        DeliveryDatesResponse { dates },
        None,
    ))
}

/// The cutting list for one delivery date: per-crop totals, the per-size
/// split, and which lines are already checked off.
pub async fn harvest_summary(
    state: &AppState,
    user: &AuthUser,
    query: DateQuery,
) -> AppResult<ApiResponse<HarvestSummaryResponse>> {
    ensure_admin(user)?;

    let data = state.snapshot().await;
    let (region, date) = resolve_window(query.date.as_deref())?;

    let rows = demand::aggregate(&data.orders, date, &data.greens)
        .into_iter()
        .map(|row| {
            let lines = row
                .breakdown
                .iter()
                .map(|(&weight, &quantity)| SummaryLine {
                    weight,
                    quantity,
                    harvested: data.harvest.is_harvested(&HarvestKey {
                        date,
                        product_id: row.product_id,
                        weight,
                    }),
                })
                .collect();
            SummaryRow {
                product_id: row.product_id,
                name: row.name,
                unit: row.unit,
                total: row.total,
                lines,
            }
        })
        .collect();

    let resp = HarvestSummaryResponse {
        date: calendar::format_date(date),
        region,
        rows,
    };
    Ok(ApiResponse::success("Harvest summary", resp, None))
}

pub async fn toggle_harvest(
    state: &AppState,
    user: &AuthUser,
    payload: HarvestToggleRequest,
) -> AppResult<ApiResponse<HarvestToggleResponse>> {
    ensure_admin(user)?;

    let key = HarvestKey {
        date: parse_date_param(&payload.date)?,
        product_id: payload.product_id,
        weight: payload.weight,
    };

    let harvested = state.update(|data| Ok(data.harvest.toggle(key))).await?;

    Ok(ApiResponse::success(
        "Harvest updated",
        HarvestToggleResponse {
            key: key.to_string(),
            harvested,
        },
        Some(Meta::empty()),
    ))
}

pub async fn route_plan(
    state: &AppState,
    user: &AuthUser,
    query: RouteQuery,
) -> AppResult<ApiResponse<RoutePlanResponse>> {
    ensure_admin(user)?;

    let data = state.snapshot().await;
    let (window_region, date) = resolve_window(query.date.as_deref())?;
    let region = query.region.unwrap_or(window_region);

    let stops = dispatch::plan_route(&data.orders, &data.users, date, region);
    let resp = RoutePlanResponse {
        date: calendar::format_date(date),
        region,
        stops,
    };
    Ok(ApiResponse::success("Route plan", resp, None))
}

pub async fn list_all_orders(
    state: &AppState,
    user: &AuthUser,
    query: AdminOrdersQuery,
) -> AppResult<ApiResponse<OrderList>> {
    ensure_admin(user)?;
    let (page, per_page, offset) = query.pagination().normalize();

    let date = query.date.as_deref().map(parse_date_param).transpose()?;

    let data = state.snapshot().await;
    let mut orders: Vec<Order> = data
        .orders
        .iter()
        .filter(|o| date.is_none_or(|d| o.delivery_date == d))
        .cloned()
        .collect();
    orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));

    let total = orders.len() as i64;
    let items: Vec<Order> = orders
        .into_iter()
        .skip(offset as usize)
        .take(per_page as usize)
        .collect();

    let meta = Meta::new(page, per_page, total);
    Ok(ApiResponse::success(
        "Orders",
        OrderList { items },
        Some(meta),
    ))
}

pub async fn toggle_delivered(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<Order>> {
    ensure_admin(user)?;

    let order = state
        .update(|data| {
            let order = data.order_mut(id).ok_or(AppError::NotFound)?;
            order.delivered = !order.delivered;
            Ok(order.clone())
        })
        .await?;

    Ok(ApiResponse::success(
        "Order updated",
        order,
        Some(Meta::empty()),
    ))
}

/// An explicit date pins the window to that date's route region; no date
/// means the current packing window.
fn resolve_window(date: Option<&str>) -> AppResult<(Region, NaiveDate)> {
    match date {
        Some(text) => {
            let date = parse_date_param(text)?;
            Ok((calendar::region_for_date(date), date))
        }
        None => Ok(calendar::current_admin_window(Local::now().date_naive())),
    }
}

fn parse_date_param(text: &str) -> AppResult<NaiveDate> {
    calendar::parse_date(text)
        .ok_or_else(|| AppError::BadRequest(format!("Invalid date: {text}")))
}
