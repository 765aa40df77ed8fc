use crate::{
    errors::AppError,
    models::normalize_ticker,
    routes::DateRangeQuery,
    services::{chart_service, price_service},
    state::AppState,
};
use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    Json,
};

pub async fn get_chart(
    State(state): State<AppState>,
    Path(ticker): Path<String>,
    range: Result<Query<DateRangeQuery>, QueryRejection>,
) -> Result<Json<chart_service::ChartDataset>, AppError> {
    let Query(range) = range?;
    let ticker = normalize_ticker(&ticker);
    let bars = price_service::load_series(&state, &ticker, range.start, range.end).await?;
    Ok(Json(chart_service::build_chart(&bars)?))
}
