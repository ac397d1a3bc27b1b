use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use crate::error::{FxError, Result};

/// Which price of a candle is used as the exchange rate
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriceField {
    Open,
    High,
    Low,
    #[default]
    Close,
}

impl PriceField {
    pub fn as_str(&self) -> &'static str {
        match self {
            PriceField::Open => "open",
            PriceField::High => "high",
            PriceField::Low => "low",
            PriceField::Close => "close",
        }
    }
}

impl std::fmt::Display for PriceField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single OHLC row of the price sequence
///
/// Column names follow the usual data-frame export (`Open`, `High`, `Low`,
/// `Close`), with an optional `Date` label. Extra columns are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    #[serde(rename = "Date", default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(rename = "Open")]
    pub open: f64,
    #[serde(rename = "High")]
    pub high: f64,
    #[serde(rename = "Low")]
    pub low: f64,
    #[serde(rename = "Close")]
    pub close: f64,
}

impl Candle {
    pub fn new(open: f64, high: f64, low: f64, close: f64) -> Self {
        Self {
            date: None,
            open,
            high,
            low,
            close,
        }
    }

    /// Get the selected price
    pub fn price(&self, field: PriceField) -> f64 {
        match field {
            PriceField::Open => self.open,
            PriceField::High => self.high,
            PriceField::Low => self.low,
            PriceField::Close => self.close,
        }
    }

    fn validate(&self, row: usize) -> Result<()> {
        for (name, value) in [
            ("Open", self.open),
            ("High", self.high),
            ("Low", self.low),
            ("Close", self.close),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(FxError::InvalidMarketData(format!(
                    "row {row}: {name} must be finite and positive, got {value}"
                )));
            }
        }
        Ok(())
    }
}

/// Ordered, non-empty sequence of candles
#[derive(Debug, Clone)]
pub struct PriceSeries {
    candles: Vec<Candle>,
}

impl PriceSeries {
    /// Build a series, rejecting empty input and unusable prices
    pub fn new(candles: Vec<Candle>) -> Result<Self> {
        if candles.is_empty() {
            return Err(FxError::InvalidMarketData(
                "price series is empty".to_string(),
            ));
        }
        for (row, candle) in candles.iter().enumerate() {
            candle.validate(row)?;
        }
        Ok(Self { candles })
    }

    /// Load a series from a CSV file with `Open`/`High`/`Low`/`Close` headers
    pub fn from_csv<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut csv_reader = csv::Reader::from_reader(reader);

        let mut candles = Vec::new();
        for result in csv_reader.deserialize() {
            let candle: Candle = result?;
            candles.push(candle);
        }

        Self::new(candles)
    }

    pub fn len(&self) -> usize {
        self.candles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candles.is_empty()
    }

    pub fn candles(&self) -> &[Candle] {
        &self.candles
    }

    pub fn get(&self, index: usize) -> Option<&Candle> {
        self.candles.get(index)
    }

    /// Exchange rate at a row
    pub fn rate_at(&self, index: usize, field: PriceField) -> Option<f64> {
        self.candles.get(index).map(|c| c.price(field))
    }

    /// Candles in `[end - len, end)`, or None if the range falls outside the series
    pub fn window(&self, end: usize, len: usize) -> Option<&[Candle]> {
        if len > end || end > self.candles.len() {
            return None;
        }
        Some(&self.candles[end - len..end])
    }
}
