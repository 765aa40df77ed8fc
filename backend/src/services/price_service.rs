use crate::{
    errors::AppError,
    models::{normalize_ticker, Company, PriceBar},
    state::{AppState, MergeOutcome},
};
use chrono::NaiveDate;
use std::collections::HashSet;
use tracing::{debug, info};

const SEED_COMPANIES: [(&str, &str); 3] = [
    ("AAPL", "Apple Inc."),
    ("MSFT", "Microsoft Corporation"),
    ("GOOGL", "Alphabet Inc."),
];

/// Register the default set of companies.
pub async fn seed_companies(state: &AppState) -> usize {
    for (ticker, name) in SEED_COMPANIES {
        state
            .upsert_company(Company {
                ticker: ticker.to_string(),
                name: name.to_string(),
            })
            .await;
    }
    info!("Seeded {} companies", SEED_COMPANIES.len());
    SEED_COMPANIES.len()
}

pub async fn add_company(
    state: &AppState,
    ticker: &str,
    name: Option<String>,
) -> Result<Company, AppError> {
    let ticker = normalize_ticker(ticker);
    if ticker.is_empty() {
        return Err(AppError::Validation("Ticker is required".to_string()));
    }

    let name = name
        .map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty())
        .unwrap_or_else(|| ticker.clone());

    let company = Company { ticker, name };
    state.upsert_company(company.clone()).await;
    info!("Registered company {} ({})", company.ticker, company.name);
    Ok(company)
}

/// Check a batch of bars before it touches the cache.
/// Every bar must be valid and no date may appear twice.
pub fn validate_bars(bars: &[PriceBar]) -> Result<(), AppError> {
    let mut seen = HashSet::with_capacity(bars.len());
    for bar in bars {
        bar.validate().map_err(AppError::Validation)?;
        if !seen.insert(bar.date) {
            return Err(AppError::Validation(format!(
                "duplicate date in payload: {}",
                bar.date
            )));
        }
    }
    Ok(())
}

/// Validate and merge an uploaded series. Missing adjusted close defaults to close.
pub async fn ingest_bars(
    state: &AppState,
    ticker: &str,
    mut bars: Vec<PriceBar>,
) -> Result<MergeOutcome, AppError> {
    let ticker = normalize_ticker(ticker);
    if ticker.is_empty() {
        return Err(AppError::Validation("Ticker is required".to_string()));
    }

    if bars.is_empty() {
        return Err(AppError::Validation(format!("No bars supplied for {}", ticker)));
    }
    validate_bars(&bars)?;

    for bar in &mut bars {
        bar.adjusted_close.get_or_insert(bar.close);
    }

    let outcome = state.merge_bars(&ticker, bars).await;
    info!(
        "Ingested {} bars for {} ({} new, {} replaced, {} cached)",
        outcome.inserted + outcome.updated,
        ticker,
        outcome.inserted,
        outcome.updated,
        outcome.total
    );
    Ok(outcome)
}

/// Date-ordered bars for a ticker, optionally limited to `[start, end]`.
pub async fn load_series(
    state: &AppState,
    ticker: &str,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> Result<Vec<PriceBar>, AppError> {
    if let (Some(s), Some(e)) = (start, end) {
        if s > e {
            return Err(AppError::Validation(format!(
                "start {} is after end {}",
                s, e
            )));
        }
    }

    let bars = state
        .bars_in_range(ticker, start, end)
        .await
        .ok_or_else(|| AppError::NotFound(format!("No historical data found for {}", ticker)))?;

    debug!("Loaded {} cached bars for {}", bars.len(), ticker);
    Ok(bars)
}

pub fn closes(bars: &[PriceBar]) -> Vec<f64> {
    bars.iter().map(|bar| bar.close).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bar(day: u32, close: f64) -> PriceBar {
        PriceBar {
            date: NaiveDate::from_ymd_opt(2024, 2, day).unwrap(),
            open: close,
            high: close + 1.0,
            low: close - 1.0,
            close,
            adjusted_close: None,
            volume: 500,
        }
    }

    #[tokio::test]
    async fn test_seed_companies() {
        let state = AppState::new();
        assert_eq!(seed_companies(&state).await, 3);

        let tickers: Vec<String> = state
            .list_companies()
            .await
            .into_iter()
            .map(|c| c.ticker)
            .collect();
        assert_eq!(tickers, vec!["AAPL", "GOOGL", "MSFT"]);
    }

    #[tokio::test]
    async fn test_add_company_defaults_name() {
        let state = AppState::new();
        let company = add_company(&state, "tsla", None).await.unwrap();
        assert_eq!(company, Company { ticker: "TSLA".into(), name: "TSLA".into() });

        assert!(matches!(
            add_company(&state, "  ", None).await,
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_validate_bars_rejects_duplicates() {
        let err = validate_bars(&[bar(1, 10.0), bar(1, 11.0)]).unwrap_err();
        assert!(err.to_string().contains("duplicate date"));
    }

    #[test]
    fn test_validate_bars_rejects_negative() {
        let mut bad = bar(1, 10.0);
        bad.open = -5.0;
        assert!(validate_bars(&[bad]).is_err());
    }

    #[tokio::test]
    async fn test_ingest_normalizes_ticker_and_adjclose() {
        let state = AppState::new();
        let outcome = ingest_bars(&state, "aapl", vec![bar(2, 11.0), bar(1, 10.0)])
            .await
            .unwrap();
        assert_eq!(outcome.total, 2);

        let bars = load_series(&state, "AAPL", None, None).await.unwrap();
        assert_eq!(bars[0].date, NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());
        assert_eq!(bars[0].adjusted_close, Some(10.0));
        assert_eq!(closes(&bars), vec![10.0, 11.0]);
    }

    #[tokio::test]
    async fn test_ingest_rejects_without_partial_write() {
        let state = AppState::new();
        let mut bad = bar(2, 11.0);
        bad.close = f64::NAN;

        assert!(ingest_bars(&state, "AAPL", vec![bar(1, 10.0), bad]).await.is_err());
        assert!(matches!(
            load_series(&state, "AAPL", None, None).await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_ingest_rejects_empty_batch() {
        let state = AppState::new();

        assert!(matches!(
            ingest_bars(&state, "AAPL", Vec::new()).await,
            Err(AppError::Validation(_))
        ));
        assert!(state.list_companies().await.is_empty());
        assert!(matches!(
            load_series(&state, "AAPL", None, None).await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_load_series_rejects_inverted_range() {
        let state = AppState::new();
        ingest_bars(&state, "AAPL", vec![bar(1, 10.0)]).await.unwrap();

        let start = NaiveDate::from_ymd_opt(2024, 3, 1);
        let end = NaiveDate::from_ymd_opt(2024, 2, 1);
        assert!(matches!(
            load_series(&state, "AAPL", start, end).await,
            Err(AppError::Validation(_))
        ));
    }
}
