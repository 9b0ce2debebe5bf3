//! Account and session handlers.

use std::time::Duration;

use actix_web::{HttpResponse, web};

use quill_core::domain::{Account, Principal};
use quill_core::ports::{AuthError, TokenKind, TokenService};
use quill_core::service::NewAccount;
use quill_shared::dto::{
    AccessTokenResponse, AccountResponse, AuthResponse, LoginRequest, RefreshRequest,
    RegisterRequest, RegisterResponse,
};

use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

fn revocation_key(jti: &str) -> String {
    format!("revoked:{jti}")
}

fn account_response(account: &Account) -> AccountResponse {
    AccountResponse {
        id: account.id,
        username: account.username.clone(),
        first_name: account.first_name.clone(),
        last_name: account.last_name.clone(),
        display_name: account.display_name(),
        created_at: account.created_at,
    }
}

fn issue_tokens(tokens: &dyn TokenService, account: &Account) -> AppResult<AuthResponse> {
    let access_token = tokens.generate_token(account.id, &account.username, TokenKind::Access)?;
    let refresh_token = tokens.generate_token(account.id, &account.username, TokenKind::Refresh)?;

    Ok(AuthResponse {
        access_token,
        refresh_token,
        token_type: "Bearer".to_string(),
        expires_in: tokens.lifetime_seconds(TokenKind::Access).max(0) as u64,
    })
}

/// POST /api/auth/register
pub async fn register(
    state: web::Data<AppState>,
    body: web::Json<RegisterRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    let account = state
        .accounts
        .register(NewAccount {
            username: req.username,
            password: req.password,
            first_name: req.first_name,
            last_name: req.last_name,
        })
        .await?;

    let tokens = issue_tokens(state.tokens.as_ref(), &account)?;

    Ok(HttpResponse::Created().json(RegisterResponse {
        account: account_response(&account),
        tokens,
    }))
}

/// POST /api/auth/login
pub async fn login(
    state: web::Data<AppState>,
    body: web::Json<LoginRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    let account = state
        .accounts
        .authenticate(&req.username, &req.password)
        .await?;

    tracing::info!(account_id = %account.id, "Login succeeded");
    Ok(HttpResponse::Ok().json(issue_tokens(state.tokens.as_ref(), &account)?))
}

/// POST /api/auth/token/refresh
pub async fn refresh(
    state: web::Data<AppState>,
    body: web::Json<RefreshRequest>,
) -> AppResult<HttpResponse> {
    let claims = state
        .tokens
        .validate_token(&body.refresh, TokenKind::Refresh)?;

    if state
        .revoked_tokens
        .exists(&revocation_key(&claims.jti))
        .await
    {
        return Err(AuthError::TokenRevoked.into());
    }

    // Deleted accounts keep no sessions.
    let account = state
        .accounts
        .profile(&Principal::account(claims.account_id, claims.username))
        .await?;

    let access_token =
        state
            .tokens
            .generate_token(account.id, &account.username, TokenKind::Access)?;

    Ok(HttpResponse::Ok().json(AccessTokenResponse {
        access_token,
        token_type: "Bearer".to_string(),
        expires_in: state.tokens.lifetime_seconds(TokenKind::Access).max(0) as u64,
    }))
}

/// POST /api/auth/logout - revokes the supplied refresh token.
pub async fn logout(
    identity: Identity,
    state: web::Data<AppState>,
    body: web::Json<RefreshRequest>,
) -> AppResult<HttpResponse> {
    let claims = state
        .tokens
        .validate_token(&body.refresh, TokenKind::Refresh)?;

    if claims.account_id != identity.account_id {
        return Err(AppError::Unauthorized);
    }

    let remaining = (claims.exp - chrono::Utc::now().timestamp()).max(1) as u64;
    state
        .revoked_tokens
        .set(
            &revocation_key(&claims.jti),
            Some(Duration::from_secs(remaining)),
        )
        .await;

    tracing::info!(account_id = %identity.account_id, "Refresh token revoked");
    Ok(HttpResponse::ResetContent().finish())
}

/// GET /api/auth/profile
pub async fn profile(identity: Identity, state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let account = state.accounts.profile(&identity.principal()).await?;
    Ok(HttpResponse::Ok().json(account_response(&account)))
}

/// DELETE /api/auth/profile - removes the account and all of its posts.
pub async fn delete_profile(
    identity: Identity,
    state: web::Data<AppState>,
) -> AppResult<HttpResponse> {
    state.accounts.delete(&identity.principal()).await?;
    Ok(HttpResponse::NoContent().finish())
}
