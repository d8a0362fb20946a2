use contracts::system::auth::{LoginRequest, LoginResponse, UserInfo};
use gloo_net::http::Request;

use crate::shared::api_utils::join_url;

/// Login with username and password
pub async fn login(
    api_base: &str,
    username: String,
    password: String,
) -> Result<LoginResponse, String> {
    let request = LoginRequest { username, password };

    let response = Request::post(&join_url(api_base, "/api/auth/login", ""))
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

/// Get current user info
pub async fn get_current_user(api_base: &str, access_token: &str) -> Result<UserInfo, String> {
    let response = Request::get(&join_url(api_base, "/api/auth/me", ""))
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
