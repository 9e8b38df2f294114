use chrono::{DateTime, Duration, Months, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Calendar window of daily history, ending now.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "unit", content = "count")]
pub enum Lookback {
    Days(u32),
    Months(u32),
    Years(u32),
}

impl Lookback {
    /// First instant covered by this window when it ends at `end`.
    pub fn start_from(&self, end: DateTime<Utc>) -> DateTime<Utc> {
        match *self {
            Lookback::Days(n) => end - Duration::days(i64::from(n)),
            Lookback::Months(n) => end
                .checked_sub_months(Months::new(n))
                .unwrap_or(DateTime::<Utc>::MIN_UTC),
            Lookback::Years(n) => end
                .checked_sub_months(Months::new(n.saturating_mul(12)))
                .unwrap_or(DateTime::<Utc>::MIN_UTC),
        }
    }

    /// Short label in the provider's notation (e.g. "300d", "6mo", "1y").
    pub fn label(&self) -> String {
        match self {
            Lookback::Days(n) => format!("{}d", n),
            Lookback::Months(n) => format!("{}mo", n),
            Lookback::Years(n) => format!("{}y", n),
        }
    }
}

/// One daily OHLC bar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceBar {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

impl PriceBar {
    /// Bar whose open/high/low all equal the close.
    pub fn flat(date: NaiveDate, close: f64) -> Self {
        Self {
            date,
            open: close,
            high: close,
            low: close,
            close,
        }
    }
}

/// Close prices of a bar series, in order.
pub fn closes(bars: &[PriceBar]) -> Vec<f64> {
    bars.iter().map(|b| b.close).collect()
}

/// Join two bar series on matching dates and return their paired closes.
///
/// Both inputs must be chronological. Dates present in only one series are
/// dropped.
pub fn aligned_closes(left: &[PriceBar], right: &[PriceBar]) -> (Vec<f64>, Vec<f64>) {
    let mut a = Vec::with_capacity(left.len().min(right.len()));
    let mut b = Vec::with_capacity(left.len().min(right.len()));
    let (mut i, mut j) = (0, 0);

    while i < left.len() && j < right.len() {
        match left[i].date.cmp(&right[j].date) {
            std::cmp::Ordering::Less => i += 1,
            std::cmp::Ordering::Greater => j += 1,
            std::cmp::Ordering::Equal => {
                a.push(left[i].close);
                b.push(right[j].close);
                i += 1;
                j += 1;
            }
        }
    }

    (a, b)
}
