//! Auth backend calls.

use contracts::system::auth::{
    ChangePasswordRequest, LoginRequest, LoginResponse, PasswordResetConfirmRequest,
    PasswordResetRequest, RefreshRequest, RefreshResponse, RegisterRequest, UpdateProfileRequest,
    UserInfo,
};
use gloo_net::http::Request;

use crate::shared::api_utils::api_url;

pub async fn login(username: String, password: String) -> Result<LoginResponse, String> {
    let request = LoginRequest { username, password };

    let response = Request::post(&api_url("/auth/login"))
        .json(&request)
        .map_err(|e| format!("Failed to serialize request: {}", e))?
        .send()
        .await
        .map_err(|e| format!("Failed to send request: {}", e))?;

    if !response.ok() {
        return Err(format!("Login failed: {}", response.status()));
    }

    response
        .json::<LoginResponse>()
        .await
        .map_err(|e| format!("Failed to parse response: {}", e))
}

/// Register a new account. The backend logs the user straight in.
pub async fn register(request: RegisterRequest) -> Result<LoginResponse, String> {
    let response = Request::post(&api_url("/auth/register"))
        .json(&request)
        .map_err(|e| format!("Failed to serialize request: {}", e))?
        .send()
        .await
        .map_err(|e| format!("Failed to send request: {}", e))?;

    if !response.ok() {
        return Err(format!("Registration failed: {}", response.status()));
    }

    response
        .json::<LoginResponse>()
        .await
        .map_err(|e| format!("Failed to parse response: {}", e))
}

pub async fn refresh_token(refresh_token: String) -> Result<RefreshResponse, String> {
    let request = RefreshRequest { refresh_token };

    let response = Request::post(&api_url("/auth/refresh"))
        .json(&request)
        .map_err(|e| format!("Failed to serialize request: {}", e))?
        .send()
        .await
        .map_err(|e| format!("Failed to send request: {}", e))?;

    if !response.ok() {
        return Err(format!("Refresh failed: {}", response.status()));
    }

    response
        .json::<RefreshResponse>()
        .await
        .map_err(|e| format!("Failed to parse response: {}", e))
}

pub async fn get_current_user(access_token: &str) -> Result<UserInfo, String> {
    let response = Request::get(&api_url("/auth/me"))
        .header("Authorization", &format!("Bearer {}", access_token))
        .send()
        .await
        .map_err(|e| format!("Failed to send request: {}", e))?;

    if !response.ok() {
        return Err(format!("Get current user failed: {}", response.status()));
    }

    response
        .json::<UserInfo>()
        .await
        .map_err(|e| format!("Failed to parse response: {}", e))
}

pub async fn request_password_reset(email: String) -> Result<(), String> {
    let request = PasswordResetRequest { email };

    let response = Request::post(&api_url("/auth/password-reset"))
        .json(&request)
        .map_err(|e| format!("Failed to serialize request: {}", e))?
        .send()
        .await
        .map_err(|e| format!("Failed to send request: {}", e))?;

    if !response.ok() {
        return Err(format!("Password reset failed: {}", response.status()));
    }
    Ok(())
}

pub async fn confirm_password_reset(token: String, new_password: String) -> Result<(), String> {
    let request = PasswordResetConfirmRequest {
        token,
        new_password,
    };

    let response = Request::post(&api_url("/auth/password-reset/confirm"))
        .json(&request)
        .map_err(|e| format!("Failed to serialize request: {}", e))?
        .send()
        .await
        .map_err(|e| format!("Failed to send request: {}", e))?;

    if !response.ok() {
        return Err(format!("Password reset failed: {}", response.status()));
    }
    Ok(())
}

pub async fn change_password(
    access_token: &str,
    current_password: String,
    new_password: String,
) -> Result<(), String> {
    let request = ChangePasswordRequest {
        current_password,
        new_password,
    };

    let response = Request::post(&api_url("/auth/change-password"))
        .header("Authorization", &format!("Bearer {}", access_token))
        .json(&request)
        .map_err(|e| format!("Failed to serialize request: {}", e))?
        .send()
        .await
        .map_err(|e| format!("Failed to send request: {}", e))?;

    if !response.ok() {
        return Err(format!("Password change failed: {}", response.status()));
    }
    Ok(())
}

pub async fn update_profile(
    access_token: &str,
    request: UpdateProfileRequest,
) -> Result<UserInfo, String> {
    let response = Request::put(&api_url("/auth/profile"))
        .header("Authorization", &format!("Bearer {}", access_token))
        .json(&request)
        .map_err(|e| format!("Failed to serialize request: {}", e))?
        .send()
        .await
        .map_err(|e| format!("Failed to send request: {}", e))?;

    if !response.ok() {
        return Err(format!("Profile update failed: {}", response.status()));
    }

    response
        .json::<UserInfo>()
        .await
        .map_err(|e| format!("Failed to parse response: {}", e))
}
