use crate::{
    errors::AppError,
    models::{normalize_ticker, PriceBar, Ticker},
    routes::DateRangeQuery,
    services::price_service,
    state::AppState,
};
use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    Json,
};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct HistoricalResponse {
    pub ticker: Ticker,
    pub source: &'static str,
    pub data: Vec<PriceBar>,
}

#[derive(Debug, Serialize)]
pub struct IngestResponse {
    pub ticker: Ticker,
    pub inserted: usize,
    pub updated: usize,
    pub total: usize,
}

pub async fn get_historical(
    State(state): State<AppState>,
    Path(ticker): Path<String>,
    range: Result<Query<DateRangeQuery>, QueryRejection>,
) -> Result<Json<HistoricalResponse>, AppError> {
    let Query(range) = range?;
    let ticker = normalize_ticker(&ticker);
    let data = price_service::load_series(&state, &ticker, range.start, range.end).await?;

    Ok(Json(HistoricalResponse {
        ticker,
        source: "cache",
        data,
    }))
}

pub async fn put_historical(
    State(state): State<AppState>,
    Path(ticker): Path<String>,
    bars: Result<Json<Vec<PriceBar>>, JsonRejection>,
) -> Result<Json<IngestResponse>, AppError> {
    let Json(bars) = bars?;
    let ticker = normalize_ticker(&ticker);
    let outcome = price_service::ingest_bars(&state, &ticker, bars).await?;

    Ok(Json(IngestResponse {
        ticker,
        inserted: outcome.inserted,
        updated: outcome.updated,
        total: outcome.total,
    }))
}
