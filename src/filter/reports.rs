use chrono::NaiveDate;

use super::Filters;

/// Optional inclusive date range of the reports page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRange {
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
}

impl DateRange {
    /// Fails when both ends are given and `from` is after `to`.
    pub fn new(from: Option<NaiveDate>, to: Option<NaiveDate>) -> Result<Self, String> {
        if let (Some(f), Some(t)) = (from, to) {
            if f > t {
                return Err(format!("start date {} is after end date {}", f, t));
            }
        }
        Ok(Self { from, to })
    }

    /// Parse `YYYY-MM-DD` strings; empty strings mean "open".
    pub fn parse(from: Option<&str>, to: Option<&str>) -> Result<Self, String> {
        Self::new(parse_day(from)?, parse_day(to)?)
    }

    pub fn start(&self) -> Option<NaiveDate> {
        self.from
    }

    pub fn end(&self) -> Option<NaiveDate> {
        self.to
    }
}

fn parse_day(value: Option<&str>) -> Result<Option<NaiveDate>, String> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(Some)
            .map_err(|e| format!("invalid date '{}': {}", s, e)),
    }
}

impl Filters for DateRange {
    fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(from) = self.from {
            pairs.push(("from", from.format("%Y-%m-%d").to_string()));
        }
        if let Some(to) = self.to {
            pairs.push(("to", to.format("%Y-%m-%d").to_string()));
        }
        pairs
    }
}
