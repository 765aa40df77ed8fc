use crate::{
    indicators::{IndicatorError, IndicatorSeries, IndicatorKind, DEFAULT_RSI_PERIOD, RSI, SMA},
    models::{CompanyStats, PriceBar},
    services::price_service::closes,
};
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;

/// Bars per trading year, used for the 52-week statistics.
pub const TRADING_DAYS_PER_YEAR: usize = 252;

const SHORT_SMA_WINDOW: usize = 20;
const LONG_SMA_WINDOW: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum VolumeDirection {
    Up,
    Down,
}

/// Everything a price chart needs, index-aligned with the bars.
#[derive(Debug, Clone, Serialize)]
pub struct ChartDataset {
    pub dates: Vec<NaiveDate>,
    pub closes: Vec<f64>,
    pub volumes: Vec<u64>,
    pub volume_direction: Vec<VolumeDirection>,
    pub sma_20: IndicatorSeries,
    pub sma_50: IndicatorSeries,
    pub rsi_14: IndicatorSeries,
    pub stats: CompanyStats,
}

/// Compute each requested indicator over `closes`, keyed by `IndicatorKind::key`.
pub fn compute_indicators(
    closes: &[f64],
    kinds: &[IndicatorKind],
) -> Result<BTreeMap<String, IndicatorSeries>, IndicatorError> {
    kinds
        .iter()
        .map(|kind| Ok((kind.key(), kind.compute(closes)?)))
        .collect()
}

pub fn build_chart(bars: &[PriceBar]) -> Result<ChartDataset, IndicatorError> {
    let closes = closes(bars);

    // A bar is "up" when it closed at or above the previous close
    let volume_direction = closes
        .iter()
        .enumerate()
        .map(|(i, close)| {
            let prev = if i == 0 { *close } else { closes[i - 1] };
            if *close >= prev {
                VolumeDirection::Up
            } else {
                VolumeDirection::Down
            }
        })
        .collect();

    Ok(ChartDataset {
        dates: bars.iter().map(|bar| bar.date).collect(),
        volumes: bars.iter().map(|bar| bar.volume).collect(),
        volume_direction,
        sma_20: SMA::new(SHORT_SMA_WINDOW)?.calculate(&closes)?,
        sma_50: SMA::new(LONG_SMA_WINDOW)?.calculate(&closes)?,
        rsi_14: RSI::new(DEFAULT_RSI_PERIOD)?.calculate(&closes)?,
        stats: trailing_year_stats(bars),
        closes,
    })
}

/// 52-week high/low and average volume over the last year of bars.
pub fn trailing_year_stats(bars: &[PriceBar]) -> CompanyStats {
    let start = bars.len().saturating_sub(TRADING_DAYS_PER_YEAR);
    let last_year = &bars[start..];

    if last_year.is_empty() {
        return CompanyStats::default();
    }

    let high = last_year
        .iter()
        .map(PriceBar::effective_high)
        .fold(f64::NEG_INFINITY, f64::max);
    let low = last_year
        .iter()
        .map(PriceBar::effective_low)
        .fold(f64::INFINITY, f64::min);
    let total_volume: u128 = last_year.iter().map(|bar| bar.volume as u128).sum();
    let avg_volume = (total_volume as f64 / last_year.len() as f64).round() as u64;

    CompanyStats {
        high_52week: Some(high),
        low_52week: Some(low),
        avg_volume: Some(avg_volume),
    }
}
