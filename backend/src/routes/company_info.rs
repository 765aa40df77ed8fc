use crate::{
    errors::AppError,
    models::{normalize_ticker, CompanyStats},
    services::{chart_service, price_service},
    state::AppState,
};
use axum::{
    extract::{Path, State},
    Json,
};

pub async fn get_company_info(
    State(state): State<AppState>,
    Path(ticker): Path<String>,
) -> Result<Json<CompanyStats>, AppError> {
    let ticker = normalize_ticker(&ticker);
    let bars = price_service::load_series(&state, &ticker, None, None).await?;
    Ok(Json(chart_service::trailing_year_stats(&bars)))
}
