//! Compare two reports category by category.
//!
//! Both reports are expected to have two dimension columns, a category code and its display name
//! (e.g. `PLATFORM_TYPE_CODE`, `PLATFORM_TYPE_NAME`), followed by any number of metric columns. A
//! category that is present in only one of the reports is counted as zero in the other.

use crate::*;

use std::cmp::Ordering;
use std::collections::BTreeMap;

/// Number of leading dimension columns (code and name).
const DIMENSIONS: usize = 2;

#[derive(Debug, Clone, PartialEq)]
pub struct MetricDelta {
    pub metric: String,
    pub current: String,
    pub previous: String,
    pub delta: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CollatedCategory {
    pub code: String,
    pub name: String,
    pub metrics: Vec<MetricDelta>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Collation {
    pub categories: Vec<CollatedCategory>,
}

impl Collation {
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

/// Compare strings such that runs of digits are ordered by their numeric value ("a2" < "a10").
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let (mut a, mut b) = (a.chars().peekable(), b.chars().peekable());
    loop {
        match (a.peek().copied(), b.peek().copied()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(x), Some(y)) if x.is_ascii_digit() && y.is_ascii_digit() => {
                let mut na = String::new();
                while let Some(c) = a.peek().copied().filter(char::is_ascii_digit) {
                    na.push(c);
                    a.next();
                }
                let mut nb = String::new();
                while let Some(c) = b.peek().copied().filter(char::is_ascii_digit) {
                    nb.push(c);
                    b.next();
                }
                let (ta, tb) = (na.trim_start_matches('0'), nb.trim_start_matches('0'));
                let ord = ta.len().cmp(&tb.len()).then_with(|| ta.cmp(tb));
                if ord != Ordering::Equal {
                    return ord;
                }
            }
            (Some(x), Some(y)) => {
                if x != y {
                    return x.cmp(&y);
                }
                a.next();
                b.next();
            }
        }
    }
}

fn metric_count(current: &Report, previous: &Report) -> usize {
    current
        .rows
        .first()
        .or_else(|| previous.rows.first())
        .map(|r| r.len().saturating_sub(DIMENSIONS))
        .unwrap_or(0)
}

fn metric_name(current: &Report, previous: &Report, column: usize) -> String {
    current
        .headers
        .get(column)
        .or_else(|| previous.headers.get(column))
        .map(|h| h.name.clone())
        .unwrap_or_default()
}

fn as_number(cell: &str) -> f64 {
    cell.trim().parse().unwrap_or(0.0)
}

/// Index rows by category code, adding zero-valued rows for categories not in `report`.
fn complete(
    report: &Report,
    categories: &BTreeMap<String, String>,
    n_metrics: usize,
) -> BTreeMap<String, ReportRow> {
    let mut by_code: BTreeMap<String, ReportRow> = report
        .rows
        .iter()
        .filter_map(|r| r.first().map(|code| (code.clone(), r.clone())))
        .collect();
    for (code, name) in categories.iter() {
        by_code.entry(code.clone()).or_insert_with(|| {
            let mut row = vec![code.clone(), name.clone()];
            row.extend(std::iter::repeat("0".to_string()).take(n_metrics));
            row
        });
    }
    by_code
}

/// Collate `current` against `previous`: one entry per category present in either report, ordered
/// naturally by category code, with the difference of every metric.
pub fn collate(current: &Report, previous: &Report) -> Collation {
    let mut names = BTreeMap::new();
    for report in [current, previous].iter() {
        for row in report.rows.iter() {
            if let Some(code) = row.first() {
                names.insert(code.clone(), row.get(1).cloned().unwrap_or_default());
            }
        }
    }

    let n_metrics = metric_count(current, previous);
    let current_rows = complete(current, &names, n_metrics);
    let previous_rows = complete(previous, &names, n_metrics);

    let mut codes: Vec<&String> = names.keys().collect();
    codes.sort_by(|a, b| natural_cmp(a, b));

    let empty = ReportRow::new();
    let categories = codes
        .into_iter()
        .map(|code| {
            let cur = current_rows.get(code).unwrap_or(&empty);
            let prev = previous_rows.get(code).unwrap_or(&empty);
            let metrics = (DIMENSIONS..DIMENSIONS + n_metrics)
                .map(|col| {
                    let c = cur.get(col).cloned().unwrap_or_else(|| "0".into());
                    let p = prev.get(col).cloned().unwrap_or_else(|| "0".into());
                    MetricDelta {
                        metric: metric_name(current, previous, col),
                        delta: as_number(&c) - as_number(&p),
                        current: c,
                        previous: p,
                    }
                })
                .collect();
            CollatedCategory {
                code: code.clone(),
                name: names[code].clone(),
                metrics,
            }
        })
        .collect();

    Collation {
        categories,
    }
}
