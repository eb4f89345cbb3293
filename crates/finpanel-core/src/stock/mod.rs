//! Stock history and analysis types.

pub mod model;

pub use model::{ChartPoint, StockAnalysis, StockBar, StockSeries, SymbolLookup, format_price, parse_float_prefix};
