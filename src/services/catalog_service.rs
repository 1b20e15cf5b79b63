use std::collections::BTreeSet;

use uuid::Uuid;

use crate::{
    dto::products::{CreateProductRequest, ProductList, UpdateProductRequest},
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_admin},
    models::{Microgreen, Role},
    response::{ApiResponse, Meta},
    state::AppState,
};

/// Partners see only what is currently offered; the admin sees everything,
/// paused crops included.
pub async fn list_products(
    state: &AppState,
    user: &AuthUser,
) -> AppResult<ApiResponse<ProductList>> {
    let data = state.snapshot().await;
    let items: Vec<Microgreen> = data
        .greens
        .iter()
        .filter(|g| user.role == Role::Admin || g.available)
        .cloned()
        .collect();

    let total = items.len() as i64;
    let meta = Meta::new(1, total, total);
    Ok(ApiResponse::success(
        "Products",
        ProductList { items },
        Some(meta),
    ))
}

pub async fn get_product(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<Microgreen>> {
    let data = state.snapshot().await;
    let green = data
        .green(id)
        .filter(|g| user.role == Role::Admin || g.available)
        .cloned();
    match green {
        Some(g) => Ok(ApiResponse::success("Product", g, None)),
        None => Err(AppError::NotFound),
    }
}

pub async fn create_product(
    state: &AppState,
    user: &AuthUser,
    payload: CreateProductRequest,
) -> AppResult<ApiResponse<Microgreen>> {
    ensure_admin(user)?;

    let name = payload.name.trim().to_string();
    if name.is_empty() {
        return Err(AppError::BadRequest("Name must not be empty".to_string()));
    }
    let available_weights = weight_set(payload.available_weights)?;

    let green = Microgreen {
        id: Uuid::new_v4(),
        name,
        description: payload.description,
        image: payload.image,
        available_weights,
        unit: payload.unit,
        available: true,
    };

    let created = state
        .update(|data| {
            data.greens.push(green.clone());
            Ok(green)
        })
        .await?;

    tracing::info!(product = %created.name, "product created");
    Ok(ApiResponse::success(
        "Product created",
        created,
        Some(Meta::empty()),
    ))
}

pub async fn update_product(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    payload: UpdateProductRequest,
) -> AppResult<ApiResponse<Microgreen>> {
    ensure_admin(user)?;

    let available_weights = payload.available_weights.map(weight_set).transpose()?;

    let updated = state
        .update(|data| {
            let green = data.green_mut(id).ok_or(AppError::NotFound)?;
            if let Some(name) = payload.name {
                let name = name.trim().to_string();
                if name.is_empty() {
                    return Err(AppError::BadRequest("Name must not be empty".to_string()));
                }
                green.name = name;
            }
            if let Some(description) = payload.description {
                green.description = description;
            }
            if let Some(image) = payload.image {
                green.image = image;
            }
            if let Some(weights) = available_weights {
                green.available_weights = weights;
            }
            if let Some(unit) = payload.unit {
                green.unit = unit;
            }
            Ok(green.clone())
        })
        .await?;

    Ok(ApiResponse::success(
        "Updated",
        updated,
        Some(Meta::empty()),
    ))
}

/// Removing a crop keeps past orders that reference it; their lines simply
/// stop counting toward future harvest summaries.
pub async fn delete_product(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<serde_json::Value>> {
    ensure_admin(user)?;

    state
        .update(|data| {
            if data.green(id).is_none() {
                return Err(AppError::NotFound);
            }
            data.greens.retain(|g| g.id != id);
            Ok(())
        })
        .await?;

    Ok(ApiResponse::success(
        "Deleted",
        serde_json::json!({}),
        Some(Meta::empty()),
    ))
}

pub async fn toggle_availability(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<Microgreen>> {
    ensure_admin(user)?;

    let updated = state
        .update(|data| {
            let green = data.green_mut(id).ok_or(AppError::NotFound)?;
            green.available = !green.available;
            Ok(green.clone())
        })
        .await?;

    Ok(ApiResponse::success(
        "Availability updated",
        updated,
        Some(Meta::empty()),
    ))
}

fn weight_set(weights: Vec<u32>) -> AppResult<BTreeSet<u32>> {
    if weights.is_empty() {
        return Err(AppError::BadRequest(
            "At least one package size is required".to_string(),
        ));
    }
    if weights.iter().any(|w| *w == 0) {
        return Err(AppError::BadRequest(
            "Package sizes must be positive".to_string(),
        ));
    }
    Ok(weights.into_iter().collect())
}
