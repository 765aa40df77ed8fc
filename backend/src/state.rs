use crate::models::*;
use chrono::NaiveDate;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tokio::sync::RwLock;

/// Result of merging a batch of bars into the cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MergeOutcome {
    pub inserted: usize,
    pub updated: usize,
    pub total: usize,
}

#[derive(Clone, Default)]
pub struct AppState {
    pub inner: Arc<RwLock<AppStateInner>>,
}

#[derive(Default)]
pub struct AppStateInner {
    pub companies: BTreeMap<Ticker, Company>,
    /// Keyed by date so each series stays unique and ascending.
    pub prices: HashMap<Ticker, BTreeMap<NaiveDate, PriceBar>>,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn upsert_company(&self, company: Company) {
        let mut state = self.inner.write().await;
        state.companies.insert(company.ticker.clone(), company);
    }

    pub async fn list_companies(&self) -> Vec<Company> {
        let state = self.inner.read().await;
        state.companies.values().cloned().collect()
    }

    /// Merge bars into a ticker's series, registering the company if unknown.
    /// The whole batch is applied under one write lock.
    pub async fn merge_bars(&self, ticker: &str, bars: Vec<PriceBar>) -> MergeOutcome {
        let mut state = self.inner.write().await;

        state
            .companies
            .entry(ticker.to_string())
            .or_insert_with(|| Company {
                ticker: ticker.to_string(),
                name: ticker.to_string(),
            });

        let series = state.prices.entry(ticker.to_string()).or_default();
        let mut inserted = 0;
        let mut updated = 0;

        for bar in bars {
            match series.insert(bar.date, bar) {
                Some(_) => updated += 1,
                None => inserted += 1,
            }
        }

        MergeOutcome {
            inserted,
            updated,
            total: series.len(),
        }
    }

    /// Bars for a ticker between `start` and `end` inclusive, ascending by date.
    /// Returns `None` when nothing has been cached for the ticker.
    pub async fn bars_in_range(
        &self,
        ticker: &str,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Option<Vec<PriceBar>> {
        let state = self.inner.read().await;
        let series = state.prices.get(ticker)?;

        let bars = series
            .values()
            .filter(|bar| start.map_or(true, |s| bar.date >= s))
            .filter(|bar| end.map_or(true, |e| bar.date <= e))
            .cloned()
            .collect();

        Some(bars)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bar(day: u32, close: f64) -> PriceBar {
        PriceBar {
            date: NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
            open: close,
            high: close,
            low: close,
            close,
            adjusted_close: Some(close),
            volume: 100,
        }
    }

    #[tokio::test]
    async fn test_merge_orders_and_dedups() {
        let state = AppState::new();

        let outcome = state
            .merge_bars("AAPL", vec![bar(3, 3.0), bar(1, 1.0), bar(2, 2.0)])
            .await;
        assert_eq!(outcome, MergeOutcome { inserted: 3, updated: 0, total: 3 });

        let outcome = state.merge_bars("AAPL", vec![bar(2, 20.0), bar(4, 4.0)]).await;
        assert_eq!(outcome, MergeOutcome { inserted: 1, updated: 1, total: 4 });

        let bars = state.bars_in_range("AAPL", None, None).await.unwrap();
        let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
        assert_eq!(closes, vec![1.0, 20.0, 3.0, 4.0]);
    }

    #[tokio::test]
    async fn test_merge_registers_company() {
        let state = AppState::new();
        state.merge_bars("MSFT", vec![bar(1, 1.0)]).await;

        let companies = state.list_companies().await;
        assert_eq!(
            companies,
            vec![Company { ticker: "MSFT".into(), name: "MSFT".into() }]
        );
    }

    #[tokio::test]
    async fn test_merge_keeps_existing_company_name() {
        let state = AppState::new();
        state
            .upsert_company(Company { ticker: "MSFT".into(), name: "Microsoft Corporation".into() })
            .await;
        state.merge_bars("MSFT", vec![bar(1, 1.0)]).await;

        assert_eq!(state.list_companies().await[0].name, "Microsoft Corporation");
    }

    #[tokio::test]
    async fn test_bars_in_range_inclusive() {
        let state = AppState::new();
        state
            .merge_bars("AAPL", (1..=5).map(|d| bar(d, d as f64)).collect())
            .await;

        let start = NaiveDate::from_ymd_opt(2024, 1, 2);
        let end = NaiveDate::from_ymd_opt(2024, 1, 4);
        let bars = state.bars_in_range("AAPL", start, end).await.unwrap();
        assert_eq!(bars.len(), 3);
        assert_eq!(bars[0].close, 2.0);
        assert_eq!(bars[2].close, 4.0);

        assert!(state.bars_in_range("GOOGL", None, None).await.is_none());
    }
}
