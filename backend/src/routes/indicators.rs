use crate::{
    errors::AppError,
    indicators::{IndicatorSeries, IndicatorKind},
    models::{normalize_ticker, Ticker},
    services::{chart_service, price_service},
    state::AppState,
};
use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    Json,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

const DEFAULT_INDICATORS: &str = "sma_20,sma_50,rsi_14";

#[derive(Debug, Deserialize)]
pub struct IndicatorQuery {
    /// comma-separated: "sma_20,sma_50,rsi_14"
    pub indicators: Option<String>,
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

#[derive(Debug, Serialize)]
pub struct TickerIndicatorResponse {
    pub ticker: Ticker,
    pub dates: Vec<NaiveDate>,
    pub closes: Vec<f64>,
    pub indicators: BTreeMap<String, IndicatorSeries>,
}

#[derive(Debug, Deserialize)]
pub struct IndicatorRequest {
    pub values: Vec<f64>,
    pub indicators: Vec<IndicatorKind>,
}

#[derive(Debug, Serialize)]
pub struct IndicatorResponse {
    pub indicators: BTreeMap<String, IndicatorSeries>,
}

/// Indicators over a cached ticker's closing prices.
pub async fn get_ticker_indicators(
    State(state): State<AppState>,
    Path(ticker): Path<String>,
    query: Result<Query<IndicatorQuery>, QueryRejection>,
) -> Result<Json<TickerIndicatorResponse>, AppError> {
    let Query(query) = query?;
    let ticker = normalize_ticker(&ticker);
    let kinds = IndicatorKind::parse_list(
        query.indicators.as_deref().unwrap_or(DEFAULT_INDICATORS),
    )?;

    let bars = price_service::load_series(&state, &ticker, query.start, query.end).await?;
    let closes = price_service::closes(&bars);
    let indicators = chart_service::compute_indicators(&closes, &kinds)?;

    Ok(Json(TickerIndicatorResponse {
        ticker,
        dates: bars.iter().map(|bar| bar.date).collect(),
        closes,
        indicators,
    }))
}

/// Indicators over a caller-supplied series; touches no state.
pub async fn post_indicators(
    req: Result<Json<IndicatorRequest>, JsonRejection>,
) -> Result<Json<IndicatorResponse>, AppError> {
    let Json(req) = req?;
    let indicators = chart_service::compute_indicators(&req.values, &req.indicators)?;
    Ok(Json(IndicatorResponse { indicators }))
}
