use argon2::{
    Argon2, PasswordHasher,
    password_hash::{PasswordHash, PasswordVerifier, SaltString},
};
use chrono::{Duration, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};
use password_hash::rand_core::OsRng;

use crate::{
    dto::auth::{Claims, LoginRequest, LoginResponse, RegisterRequest},
    dto::partners::PartnerProfile,
    error::{AppError, AppResult},
    models::{Role, User},
    response::{ApiResponse, Meta},
    state::AppState,
};

pub fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AppError::Internal(anyhow::anyhow!(e.to_string())))?
        .to_string();
    Ok(hash)
}

/// Checks a password against a stored hash; an unparseable hash counts as
/// a mismatch.
pub fn verify_password(hash: &str, password: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(hash) else {
        return false;
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

pub async fn register_user(
    state: &AppState,
    payload: RegisterRequest,
) -> AppResult<ApiResponse<PartnerProfile>> {
    let RegisterRequest {
        name,
        password,
        email,
        phone,
        address,
        region,
    } = payload;

    let name = name.trim().to_string();
    if name.is_empty() {
        return Err(AppError::BadRequest("Name must not be empty".to_string()));
    }
    if password.is_empty() {
        return Err(AppError::BadRequest(
            "Password must not be empty".to_string(),
        ));
    }

    let password_hash = hash_password(&password)?;

    let profile = state
        .update(|data| {
            if data.user_by_name_ci(&name).is_some() {
                return Err(AppError::BadRequest("Name is already taken".to_string()));
            }
            let user = User {
                name: name.clone(),
                role: Role::Customer,
                password_hash,
                email: email.filter(|v| !v.trim().is_empty()),
                phone: phone.filter(|v| !v.trim().is_empty()),
                address: address.filter(|v| !v.trim().is_empty()),
                region,
            };
            let profile = PartnerProfile::from(&user);
            data.users.push(user);
            Ok(profile)
        })
        .await?;

    tracing::info!(partner = %profile.name, "partner registered");
    Ok(ApiResponse::success("Partner registered", profile, None))
}

pub async fn login_user(
    state: &AppState,
    payload: LoginRequest,
) -> AppResult<ApiResponse<LoginResponse>> {
    let LoginRequest { name, password } = payload;

    let data = state.snapshot().await;
    let user = match data.user_by_name_ci(name.trim()) {
        Some(u) => u,
        None => return Err(AppError::BadRequest("Invalid name or password".into())),
    };

    let parsed_hash = PasswordHash::new(&user.password_hash)
        .map_err(|_| AppError::Internal(anyhow::anyhow!("Invalid password hash")))?;

    let argon2 = Argon2::default();
    if argon2
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_err()
    {
        return Err(AppError::BadRequest("Invalid name or password".into()));
    }

    let secret = std::env::var("JWT_SECRET")
        .map_err(|_| AppError::Internal(anyhow::anyhow!("JWT_SECRET is not set")))?;

    let expiration = Utc::now()
        .checked_add_signed(Duration::hours(24))
        .ok_or_else(|| AppError::Internal(anyhow::anyhow!("Failed to set expiration")))?;

    let claims = Claims {
        sub: user.name.clone(),
        role: user.role,
        exp: expiration.timestamp() as usize,
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal(anyhow::anyhow!(e.to_string())))?;

    let resp = LoginResponse {
        token: format!("Bearer {}", token),
    };

    tracing::info!(partner = %user.name, "partner logged in");
    Ok(ApiResponse::success("Logged in", resp, Some(Meta::empty())))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_and_verify_round_trip() {
        let hash = hash_password("marekmnf").unwrap();
        assert!(verify_password(&hash, "marekmnf"));
        assert!(!verify_password(&hash, "marekmnF"));
        assert!(!verify_password("not-a-phc-string", "marekmnf"));
    }
}
