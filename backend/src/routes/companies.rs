use crate::{errors::AppError, models::Company, services::price_service, state::AppState};
use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct AddCompanyRequest {
    pub ticker: String,
    pub name: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SeedResponse {
    pub seeded: usize,
}

pub async fn list_companies(State(state): State<AppState>) -> Json<Vec<Company>> {
    Json(state.list_companies().await)
}

pub async fn add_company(
    State(state): State<AppState>,
    req: Result<Json<AddCompanyRequest>, JsonRejection>,
) -> Result<Json<Company>, AppError> {
    let Json(req) = req?;
    let company = price_service::add_company(&state, &req.ticker, req.name).await?;
    Ok(Json(company))
}

pub async fn seed(State(state): State<AppState>) -> Json<SeedResponse> {
    let seeded = price_service::seed_companies(&state).await;
    Json(SeedResponse { seeded })
}
