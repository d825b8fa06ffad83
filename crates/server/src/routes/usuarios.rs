use axum::{extract::{Path, State}, http::StatusCode, Json};
use axum_extra::extract::WithRejection;
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use service::auth::domain::{AuthUser, LoginInput, RegisterInput};

use crate::errors::ApiError;
use crate::state::ServerState;

/// Signup payload
#[derive(Debug, Deserialize)]
pub struct UsuarioInput {
    pub nome: String,
    pub email: String,
    pub senha: String,
}

#[derive(Debug, Deserialize)]
pub struct CredenciaisInput {
    pub email: String,
    pub senha: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UsuarioOutput {
    pub id: Uuid,
    pub nome: String,
    pub email: String,
}

impl From<AuthUser> for UsuarioOutput {
    fn from(u: AuthUser) -> Self { Self { id: u.id, nome: u.name, email: u.email } }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SessaoOutput {
    pub id: Uuid,
    pub nome: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SaldoOutput {
    pub usuario: Uuid,
    pub saldo: Decimal,
}

#[utoipa::path(post, path = "/api/usuarios", tag = "usuarios", request_body = crate::openapi::UsuarioDoc, responses((status = 201, description = "Created"), (status = 400, description = "Business rule violated")))]
pub async fn register(State(state): State<ServerState>, WithRejection(Json(input), _): WithRejection<Json<UsuarioInput>, ApiError>) -> Result<(StatusCode, Json<UsuarioOutput>), ApiError> {
    let user = state
        .auth
        .register(RegisterInput { name: input.nome, email: input.email, password: input.senha })
        .await?;
    Ok((StatusCode::CREATED, Json(user.into())))
}

/// Sets an `auth_token` cookie when a token was issued.
#[utoipa::path(post, path = "/api/usuarios/autenticar", tag = "usuarios", request_body = crate::openapi::CredenciaisDoc, responses((status = 200, description = "Authenticated"), (status = 400, description = "Unknown user or wrong password")))]
pub async fn authenticate(State(state): State<ServerState>, jar: CookieJar, WithRejection(Json(input), _): WithRejection<Json<CredenciaisInput>, ApiError>) -> Result<(CookieJar, Json<SessaoOutput>), ApiError> {
    let session = state
        .auth
        .authenticate(LoginInput { email: input.email, password: input.senha })
        .await?;
    let user = session.user;
    let jar = match &session.token {
        Some(token) => {
            let mut cookie = Cookie::new("auth_token", token.clone());
            cookie.set_path("/");
            cookie.set_http_only(true);
            cookie.set_same_site(SameSite::Lax);
            jar.add(cookie)
        }
        None => jar,
    };
    Ok((jar, Json(SessaoOutput { id: user.id, nome: user.name, email: user.email, token: session.token })))
}

#[utoipa::path(get, path = "/api/usuarios/{id}/saldo", tag = "usuarios", params(("id" = Uuid, Path, description = "User id")), responses((status = 200, description = "Balance", body = crate::openapi::SaldoDoc), (status = 404, description = "Unknown user")))]
pub async fn balance(State(state): State<ServerState>, Path(id): Path<Uuid>) -> Result<Json<SaldoOutput>, ApiError> {
    if state.auth.find_by_id(id).await?.is_none() {
        return Err(ApiError::NotFound("Usuario não encontrado".into()));
    }
    let saldo = state.entries.balance(id).await?;
    info!(user_id = %id, %saldo, "balance computed");
    Ok(Json(SaldoOutput { usuario: id, saldo }))
}
