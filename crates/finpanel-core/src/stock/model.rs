//! Stock domain models.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};

/// One weekly price bar as returned by the history endpoint.
///
/// Prices arrive as strings; some backends send bare numbers, which are
/// accepted and kept in their textual form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockBar {
    #[serde(rename = "Date")]
    pub date: String,
    #[serde(rename = "Open", deserialize_with = "string_or_number")]
    pub open: String,
    #[serde(rename = "High", deserialize_with = "string_or_number")]
    pub high: String,
    #[serde(rename = "Low", deserialize_with = "string_or_number")]
    pub low: String,
    #[serde(rename = "Close", deserialize_with = "string_or_number")]
    pub close: String,
    #[serde(
        rename = "Volume",
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "optional_string_or_number"
    )]
    pub volume: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StringOrNumber {
    Text(String),
    Number(serde_json::Number),
}

impl From<StringOrNumber> for String {
    fn from(value: StringOrNumber) -> Self {
        match value {
            StringOrNumber::Text(text) => text,
            StringOrNumber::Number(number) => number.to_string(),
        }
    }
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    StringOrNumber::deserialize(deserializer).map(String::from)
}

fn optional_string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<StringOrNumber>::deserialize(deserializer).map(|value| value.map(String::from))
}

impl StockBar {
    pub fn close_value(&self) -> f64 {
        parse_float_prefix(&self.close)
    }

    /// Date as `M/D/YYYY`; unparseable dates are shown verbatim.
    pub fn display_date(&self) -> String {
        parse_bar_date(&self.date)
            .map(|date| date.format("%-m/%-d/%Y").to_string())
            .unwrap_or_else(|| self.date.clone())
    }

    /// Date, open, high, low, close as rendered in the history table.
    pub fn table_row(&self) -> [String; 5] {
        [
            self.display_date(),
            format_price(&self.open),
            format_price(&self.high),
            format_price(&self.low),
            format_price(&self.close),
        ]
    }
}

fn parse_bar_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S")
                .ok()
                .map(|dt| dt.date())
        })
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
}

/// Parses the longest leading decimal number in `raw`, `NaN` when there is none.
pub fn parse_float_prefix(raw: &str) -> f64 {
    let trimmed = raw.trim_start();
    let bytes = trimmed.as_bytes();
    let mut end = 0;
    let mut seen_digit = false;
    let mut seen_dot = false;
    let mut seen_exp = false;

    while end < bytes.len() {
        let b = bytes[end];
        match b {
            b'0'..=b'9' => seen_digit = true,
            b'+' | b'-' if end == 0 => {}
            b'+' | b'-' if seen_exp && matches!(bytes[end - 1], b'e' | b'E') => {}
            b'.' if !seen_dot && !seen_exp => seen_dot = true,
            b'e' | b'E' if seen_digit && !seen_exp => seen_exp = true,
            _ => break,
        }
        end += 1;
    }

    // Back off a dangling exponent marker or sign ("1e", "1e-").
    let mut candidate = &trimmed[..end];
    while let Some(last) = candidate.chars().last() {
        if matches!(last, 'e' | 'E' | '+' | '-') {
            candidate = &candidate[..candidate.len() - 1];
        } else {
            break;
        }
    }

    if !seen_digit {
        return f64::NAN;
    }
    candidate.parse::<f64>().unwrap_or(f64::NAN)
}

/// Two-decimal rendering of a textual price.
pub fn format_price(raw: &str) -> String {
    let value = parse_float_prefix(raw);
    if value.is_nan() {
        "NaN".to_string()
    } else {
        format!("{:.2}", value)
    }
}

/// One point of the closing-price trend line.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartPoint {
    pub label: String,
    pub price: f64,
}

/// The price bars currently displayed for one company.
///
/// Replaced wholesale on every successful fetch; never merged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StockSeries {
    pub company: String,
    pub bars: Vec<StockBar>,
}

impl StockSeries {
    pub fn new(company: impl Into<String>, bars: Vec<StockBar>) -> Self {
        Self {
            company: company.into(),
            bars,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// Closing prices oldest-first. The backend lists bars newest-first.
    pub fn chart_points(&self) -> Vec<ChartPoint> {
        self.bars
            .iter()
            .rev()
            .map(|bar| ChartPoint {
                label: bar.display_date(),
                price: bar.close_value(),
            })
            .collect()
    }

    pub fn table_rows(&self) -> Vec<[String; 5]> {
        self.bars.iter().map(StockBar::table_row).collect()
    }

    pub fn trend_title(&self) -> String {
        if self.company.is_empty() {
            "Stock Price Trend".to_string()
        } else {
            format!("{} Stock Price Trend", self.company)
        }
    }

    pub fn table_title(&self) -> String {
        if self.company.is_empty() {
            "Recent Stock Data".to_string()
        } else {
            format!("{} Recent Stock Data", self.company)
        }
    }
}

/// Response of the symbol-resolution endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolLookup {
    pub company_name: String,
    pub stock_symbol: String,
}

/// Response of the stock-analysis endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockAnalysis {
    pub company_name: String,
    pub stock_symbol: String,
    pub analysis: String,
}
