use axum::{extract::{Path, Query, State}, http::StatusCode, Json};
use axum_extra::extract::WithRejection;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use service::entry::{Entry, EntryFilter, EntryStatus, EntryType};

use super::usuarios::SaldoOutput;
use crate::errors::ApiError;
use crate::state::ServerState;

pub const MSG_NOT_FOUND: &str = "Lancamento não encontrado na base de Dados";
pub const MSG_STATUS_NOT_FOUND: &str = "Lançamento não encontrado na base de dados";
pub const MSG_INVALID_STATUS: &str = "Não foi possível atualiza o status do lancamento, envie um status válido";
pub const MSG_UNKNOWN_USER: &str = "Usuario não encontrado para o Id informado";

/// Entry as it travels over the wire.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LancamentoDto {
    #[serde(default)]
    pub id: Option<Uuid>,
    #[serde(default)]
    pub descricao: Option<String>,
    #[serde(default)]
    pub mes: Option<i32>,
    #[serde(default)]
    pub ano: Option<i32>,
    #[serde(default)]
    pub valor: Option<Decimal>,
    #[serde(default)]
    pub usuario: Option<Uuid>,
    #[serde(default)]
    pub tipo: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default, rename = "dataCadastro", skip_serializing_if = "Option::is_none")]
    pub data_cadastro: Option<NaiveDate>,
}

impl LancamentoDto {
    fn into_entry(self) -> Result<Entry, ApiError> {
        let entry_type = self.tipo.as_deref().map(str::parse::<EntryType>).transpose()?;
        let status = self.status.as_deref().map(str::parse::<EntryStatus>).transpose()?;
        Ok(Entry {
            id: self.id,
            description: self.descricao,
            month: self.mes,
            year: self.ano,
            user_id: self.usuario,
            amount: self.valor,
            entry_type,
            status,
            registered_on: None,
        })
    }
}

impl From<Entry> for LancamentoDto {
    fn from(e: Entry) -> Self {
        Self {
            id: e.id,
            descricao: e.description,
            mes: e.month,
            ano: e.year,
            valor: e.amount,
            usuario: e.user_id,
            tipo: e.entry_type.map(|t| t.as_str().to_string()),
            status: e.status.map(|s| s.as_str().to_string()),
            data_cadastro: e.registered_on,
        }
    }
}

#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
pub struct SearchQuery {
    pub descricao: Option<String>,
    pub mes: Option<i32>,
    pub ano: Option<i32>,
    pub tipo: Option<String>,
    pub status: Option<String>,
    /// Owner id; required
    pub usuario: Option<Uuid>,
}

#[derive(Debug, Deserialize)]
pub struct StatusInput {
    #[serde(default)]
    pub status: Option<String>,
}

async fn existing(state: &ServerState, id: Uuid, missing: &str) -> Result<Entry, ApiError> {
    state
        .entries
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::bad_request(missing))
}

#[utoipa::path(get, path = "/api/lancamentos", tag = "lancamentos", params(SearchQuery), responses((status = 200, description = "Matching entries", body = [crate::openapi::LancamentoDoc]), (status = 400, description = "Unknown user or filter value")))]
pub async fn search(State(state): State<ServerState>, Query(q): Query<SearchQuery>) -> Result<Json<Vec<LancamentoDto>>, ApiError> {
    let owner = match q.usuario {
        Some(id) => state.auth.find_by_id(id).await?,
        None => None,
    };
    let Some(owner) = owner else {
        return Err(ApiError::bad_request(MSG_UNKNOWN_USER));
    };
    let filter = EntryFilter {
        description: q.descricao,
        month: q.mes,
        year: q.ano,
        user_id: Some(owner.id),
        entry_type: q.tipo.as_deref().map(str::parse::<EntryType>).transpose()?,
        status: q.status.as_deref().map(str::parse::<EntryStatus>).transpose()?,
    };
    let found = state.entries.search(&filter).await?;
    info!(user_id = %owner.id, count = found.len(), "entries listed");
    Ok(Json(found.into_iter().map(LancamentoDto::from).collect()))
}

#[utoipa::path(get, path = "/api/lancamentos/{id}", tag = "lancamentos", params(("id" = Uuid, Path, description = "Entry id")), responses((status = 200, description = "Entry", body = crate::openapi::LancamentoDoc), (status = 404, description = "Not found")))]
pub async fn get(State(state): State<ServerState>, Path(id): Path<Uuid>) -> Result<Json<LancamentoDto>, ApiError> {
    match state.entries.find_by_id(id).await? {
        Some(entry) => Ok(Json(entry.into())),
        None => Err(ApiError::NotFound(MSG_NOT_FOUND.into())),
    }
}

/// Balance of the user whose id is in the path; unknown ids yield zero.
#[utoipa::path(get, path = "/api/lancamentos/{id}/saldo", tag = "lancamentos", params(("id" = Uuid, Path, description = "User id")), responses((status = 200, description = "Balance", body = crate::openapi::SaldoDoc)))]
pub async fn balance(State(state): State<ServerState>, Path(user_id): Path<Uuid>) -> Result<Json<SaldoOutput>, ApiError> {
    let saldo = state.entries.balance(user_id).await?;
    Ok(Json(SaldoOutput { usuario: user_id, saldo }))
}

#[utoipa::path(post, path = "/api/lancamentos", tag = "lancamentos", request_body = crate::openapi::LancamentoDoc, responses((status = 201, description = "Created", body = crate::openapi::LancamentoDoc), (status = 400, description = "Business rule violated")))]
pub async fn create(State(state): State<ServerState>, WithRejection(Json(dto), _): WithRejection<Json<LancamentoDto>, ApiError>) -> Result<(StatusCode, Json<LancamentoDto>), ApiError> {
    let saved = state.entries.create(dto.into_entry()?).await?;
    Ok((StatusCode::CREATED, Json(saved.into())))
}

#[utoipa::path(put, path = "/api/lancamentos/{id}", tag = "lancamentos", params(("id" = Uuid, Path, description = "Entry id")), request_body = crate::openapi::LancamentoDoc, responses((status = 200, description = "Updated", body = crate::openapi::LancamentoDoc), (status = 400, description = "Not found or business rule violated")))]
pub async fn update(State(state): State<ServerState>, Path(id): Path<Uuid>, WithRejection(Json(dto), _): WithRejection<Json<LancamentoDto>, ApiError>) -> Result<Json<LancamentoDto>, ApiError> {
    let stored = existing(&state, id, MSG_NOT_FOUND).await?;
    let mut entry = dto.into_entry()?;
    entry.id = stored.id;
    let updated = state.entries.update(entry).await?;
    Ok(Json(updated.into()))
}

#[utoipa::path(put, path = "/api/lancamentos/{id}/atualiza-status", tag = "lancamentos", params(("id" = Uuid, Path, description = "Entry id")), request_body = crate::openapi::StatusDoc, responses((status = 200, description = "Updated", body = crate::openapi::LancamentoDoc), (status = 400, description = "Not found or invalid status")))]
pub async fn update_status(State(state): State<ServerState>, Path(id): Path<Uuid>, WithRejection(Json(input), _): WithRejection<Json<StatusInput>, ApiError>) -> Result<Json<LancamentoDto>, ApiError> {
    let stored = existing(&state, id, MSG_STATUS_NOT_FOUND).await?;
    let status = input
        .status
        .as_deref()
        .and_then(|s| s.parse::<EntryStatus>().ok())
        .ok_or_else(|| ApiError::bad_request(MSG_INVALID_STATUS))?;
    let updated = state.entries.update_status(stored, status).await?;
    Ok(Json(updated.into()))
}

#[utoipa::path(delete, path = "/api/lancamentos/{id}", tag = "lancamentos", params(("id" = Uuid, Path, description = "Entry id")), responses((status = 204, description = "Deleted"), (status = 400, description = "Not found")))]
pub async fn delete(State(state): State<ServerState>, Path(id): Path<Uuid>) -> Result<StatusCode, ApiError> {
    let stored = existing(&state, id, MSG_NOT_FOUND).await?;
    state.entries.delete(&stored).await?;
    Ok(StatusCode::NO_CONTENT)
}
