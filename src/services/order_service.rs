use chrono::{Local, Utc};
use uuid::Uuid;

use crate::{
    calendar,
    dto::orders::{NextDeliveryResponse, OrderList},
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models::Order,
    response::{ApiResponse, Meta},
    state::AppState,
};

pub async fn list_orders(state: &AppState, user: &AuthUser) -> AppResult<ApiResponse<OrderList>> {
    let data = state.snapshot().await;
    let mut orders: Vec<Order> = data
        .orders
        .iter()
        .filter(|o| o.partner == user.name)
        .cloned()
        .collect();
    orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));

    let total = orders.len() as i64;
    let meta = Meta::new(1, total, total);
    Ok(ApiResponse::success(
        "Ok",
        OrderList { items: orders },
        Some(meta),
    ))
}

/// Turns the session cart into an order. The delivery date is computed
/// from the partner's region once, here, and never changes afterwards.
pub async fn checkout(state: &AppState, user: &AuthUser) -> AppResult<ApiResponse<Order>> {
    let cart = state.cart_snapshot(&user.name).await;
    if cart.is_empty() {
        return Err(AppError::BadRequest("Cart is empty".into()));
    }

    let order = state
        .update(|data| {
            let partner = data.user_by_name(&user.name).ok_or(AppError::NotFound)?;
            let today = Local::now().date_naive();
            let order = Order {
                id: Uuid::new_v4(),
                partner: partner.name.clone(),
                items: cart.items().to_vec(),
                created_at: Utc::now(),
                delivery_date: calendar::next_delivery_date(today, partner.region),
                delivered: false,
            };
            data.orders.push(order.clone());
            Ok(order)
        })
        .await?;

    state.clear_cart(&user.name).await;
    tracing::info!(
        partner = %order.partner,
        order_id = %order.id,
        delivery_date = %calendar::format_date(order.delivery_date),
        "order placed"
    );

    Ok(ApiResponse::success(
        "Order placed",
        order,
        Some(Meta::empty()),
    ))
}

pub async fn get_order(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<Order>> {
    let data = state.snapshot().await;
    let order = data
        .orders
        .iter()
        .find(|o| o.id == id && o.partner == user.name)
        .cloned();
    let order = match order {
        Some(o) => o,
        None => return Err(AppError::NotFound),
    };

    Ok(ApiResponse::success("OK", order, Some(Meta::empty())))
}

/// When the partner's next box would arrive if they ordered right now.
pub async fn next_delivery(
    state: &AppState,
    user: &AuthUser,
) -> AppResult<ApiResponse<NextDeliveryResponse>> {
    let data = state.snapshot().await;
    let partner = data.user_by_name(&user.name).ok_or(AppError::NotFound)?;

    let today = Local::now().date_naive();
    let date = calendar::next_delivery_date(today, partner.region);
    let resp = NextDeliveryResponse {
        region: partner.region,
        delivery_day: calendar::delivery_day_name(partner.region).to_string(),
        delivery_date: calendar::format_date(date),
    };
    Ok(ApiResponse::success("Next delivery", resp, None))
}
