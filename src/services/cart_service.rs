use uuid::Uuid;

use crate::{
    dto::cart::{AddToCartRequest, CartLineView, CartView},
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    response::{ApiResponse, Meta},
    state::AppState,
};

pub async fn view_cart(state: &AppState, user: &AuthUser) -> AppResult<ApiResponse<CartView>> {
    let view = build_view(state, user).await;
    Ok(ApiResponse::success("OK", view, None))
}

pub async fn add_item(
    state: &AppState,
    user: &AuthUser,
    payload: AddToCartRequest,
) -> AppResult<ApiResponse<CartView>> {
    let quantity = payload.quantity.unwrap_or(1);
    if quantity == 0 {
        return Err(AppError::BadRequest(
            "quantity must be greater than 0".to_string(),
        ));
    }

    let data = state.snapshot().await;
    let green = match data.green(payload.product_id) {
        Some(g) => g,
        None => return Err(AppError::BadRequest("product not found".to_string())),
    };
    if !green.available {
        return Err(AppError::BadRequest(
            "Product is currently unavailable".to_string(),
        ));
    }
    if !green.available_weights.contains(&payload.weight) {
        return Err(AppError::BadRequest(
            "Package size is not offered for this product".to_string(),
        ));
    }

    state
        .with_cart(&user.name, |cart| {
            cart.add(payload.product_id, payload.weight, quantity)
        })
        .await;

    let view = build_view(state, user).await;
    Ok(ApiResponse::success("Added to cart", view, None))
}

pub async fn remove_item(
    state: &AppState,
    user: &AuthUser,
    product_id: Uuid,
    weight: u32,
) -> AppResult<ApiResponse<CartView>> {
    let removed = state
        .with_cart(&user.name, |cart| cart.remove_one(product_id, weight))
        .await;
    if !removed {
        return Err(AppError::NotFound);
    }

    let view = build_view(state, user).await;
    Ok(ApiResponse::success(
        "Removed from cart",
        view,
        Some(Meta::empty()),
    ))
}

async fn build_view(state: &AppState, user: &AuthUser) -> CartView {
    let cart = state.cart_snapshot(&user.name).await;
    let data = state.snapshot().await;
    let items = cart
        .items()
        .iter()
        .map(|line| {
            let green = data.green(line.product_id);
            CartLineView {
                product_id: line.product_id,
                name: green.map(|g| g.name.clone()),
                unit: green.map(|g| g.unit),
                weight: line.weight,
                quantity: line.quantity,
            }
        })
        .collect();

    CartView {
        items,
        total_quantity: cart.total_quantity(),
    }
}
