//! The report model consumed by the gap filler and the collator.
//!
//! This is the flat form of a report: dates as `YYYY-MM-DD` strings and rows as plain arrays of
//! cell values. Reports returned by the v2 API are converted with `Report::try_from`.

use crate::adsense_v2;
use crate::*;

use anyhow::Context;
use std::convert::TryFrom;
use std::path::Path;

/// Type tag of a report column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HeaderType {
    #[serde(rename = "DIMENSION")]
    Dimension,
    #[serde(
        rename = "METRIC",
        alias = "METRIC_TALLY",
        alias = "METRIC_RATIO",
        alias = "METRIC_CURRENCY",
        alias = "METRIC_MILLISECONDS",
        alias = "METRIC_DECIMAL"
    )]
    Metric,
    #[serde(rename = "OTHER", other)]
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportHeader {
    pub name: String,
    #[serde(rename = "type")]
    pub header_type: HeaderType,
    #[serde(rename = "currencyCode", skip_serializing_if = "Option::is_none", default)]
    pub currency_code: Option<String>,
}

impl ReportHeader {
    pub fn new(name: &str, header_type: HeaderType) -> ReportHeader {
        ReportHeader {
            name: name.into(),
            header_type,
            currency_code: None,
        }
    }

    pub fn is_dimension(&self) -> bool {
        self.header_type == HeaderType::Dimension
    }
}

/// One cell value per header, in header order.
pub type ReportRow = Vec<String>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    #[serde(rename = "startDate")]
    pub start_date: NaiveDate,
    #[serde(rename = "endDate")]
    pub end_date: NaiveDate,
    #[serde(default)]
    pub headers: Vec<ReportHeader>,
    #[serde(default)]
    pub rows: Vec<ReportRow>,
}

impl Report {
    /// Load a report stored as JSON, in the same shape it is serialized to.
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Report> {
        let path = path.as_ref();
        let contents = tokio::fs::read(path)
            .await
            .with_context(|| format!("reading report from {}", path.display()))?;
        serde_json::from_slice(&contents)
            .with_context(|| format!("decoding report from {}", path.display()))
    }

    pub fn has_rows(&self) -> bool {
        !self.rows.is_empty()
    }
}

fn to_naive_date(d: Option<&adsense_v2::Date>, which: &str) -> Result<NaiveDate> {
    let d = d.ok_or_else(|| ApiError::InputDataError(format!("report has no {}", which)))?;
    d.to_naive_date()
        .ok_or_else(|| ApiError::InputDataError(format!("invalid {}: {:?}", which, d)).into())
}

impl TryFrom<adsense_v2::ReportResult> for Report {
    type Error = Error;

    fn try_from(result: adsense_v2::ReportResult) -> Result<Report> {
        let start_date = to_naive_date(result.start_date.as_ref(), "startDate")?;
        let end_date = to_naive_date(result.end_date.as_ref(), "endDate")?;
        let headers = result
            .headers
            .unwrap_or_default()
            .into_iter()
            .map(|h| ReportHeader {
                name: h.name.unwrap_or_default(),
                header_type: h.header_type.unwrap_or(HeaderType::Other),
                currency_code: h.currency_code,
            })
            .collect();
        let rows = result
            .rows
            .unwrap_or_default()
            .into_iter()
            .map(|r| {
                r.cells
                    .unwrap_or_default()
                    .into_iter()
                    .map(|c| c.value.unwrap_or_default())
                    .collect()
            })
            .collect();
        Ok(Report {
            start_date,
            end_date,
            headers,
            rows,
        })
    }
}
