//! Plain-text output shared by all samples.

use adsense_common::collate::Collation;
use adsense_common::{ListResponse, Report, ReportHeader, ReportRow, Result, StreamExt};

use futures::stream::Stream;

const COLUMN_WIDTH: usize = 25;

pub fn separator() -> String {
    "=".repeat(80)
}

pub fn print_title(title: &str) {
    println!("{}", separator());
    println!("{}", title);
    println!("{}", separator());
}

pub fn format_headers(headers: &[ReportHeader]) -> String {
    headers
        .iter()
        .map(|h| format!("{:>width$}", h.name, width = COLUMN_WIDTH))
        .collect()
}

pub fn format_row(row: &ReportRow) -> String {
    row.iter()
        .map(|c| format!("{:>width$}", c, width = COLUMN_WIDTH))
        .collect()
}

pub fn print_rows(headers: &[ReportHeader], rows: &[ReportRow]) {
    println!("{}", format_headers(headers));
    for row in rows {
        println!("{}", format_row(row));
    }
}

/// Print a report, or a notice if it has no rows.
pub fn print_report(report: &Report) {
    if report.has_rows() {
        print_rows(&report.headers, &report.rows);
        println!("Report from {} to {}.", report.start_date, report.end_date);
    } else {
        println!("No rows returned.");
    }
}

/// Print every item of every page with `print_item`, or `empty` for a page without items.
/// Returns all items.
pub async fn print_pages<S, R, F>(pages: S, empty: &str, mut print_item: F) -> Result<Vec<R::Item>>
where
    S: Stream<Item = Result<R>>,
    R: ListResponse,
    F: FnMut(&R::Item),
{
    tokio::pin!(pages);
    let mut all = vec![];
    while let Some(page) = pages.next().await {
        let items = page?.into_items();
        if items.is_empty() {
            println!("{}", empty);
        }
        items.iter().for_each(&mut print_item);
        all.extend(items);
    }
    println!();
    Ok(all)
}

pub fn format_collation(c: &Collation) -> Vec<String> {
    let mut lines = vec![];
    for category in c.categories.iter() {
        lines.push(format!("{}:", category.name));
        for m in category.metrics.iter() {
            lines.push(format!(
                "  * {:.6} delta ({} last week vs {} in the previous week) on {}",
                m.delta, m.current, m.previous, m.metric
            ));
        }
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use adsense_common::collate::{CollatedCategory, MetricDelta};
    use adsense_common::HeaderType;

    #[test]
    fn right_aligned_columns() {
        let headers = vec![
            ReportHeader::new("DATE", HeaderType::Dimension),
            ReportHeader::new("CLICKS", HeaderType::Metric),
        ];
        let h = format_headers(&headers);
        assert_eq!(h.len(), 50);
        assert!(h.ends_with("                   CLICKS"));

        let r = format_row(&vec!["2021-03-01".to_string(), "no data".to_string()]);
        assert_eq!(r, format!("{:>25}{:>25}", "2021-03-01", "no data"));
    }

    #[test]
    fn collation_lines() {
        let c = Collation {
            categories: vec![CollatedCategory {
                code: "Desktop".into(),
                name: "Desktop".into(),
                metrics: vec![MetricDelta {
                    metric: "CLICKS".into(),
                    current: "10".into(),
                    previous: "4".into(),
                    delta: 6.0,
                }],
            }],
        };
        assert_eq!(
            format_collation(&c),
            vec![
                "Desktop:".to_string(),
                "  * 6.000000 delta (10 last week vs 4 in the previous week) on CLICKS".to_string()
            ]
        );
    }
}
