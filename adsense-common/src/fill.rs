//! Fill in missing periods of a time-series report.
//!
//! The API omits rows for days (or months) without any impression data instead of returning zero
//! values. `fill_missing_dates` walks the calendar from the report's start date up to, but not
//! including, its end date and inserts a placeholder row for every period without a row.
//!
//! Only reports with a single dimension, `DATE` or `MONTH`, are supported. The number of metrics
//! doesn't matter.

use crate::*;

use chrono::Datelike;
use log::warn;

/// Cell value of generated rows.
pub const NO_DATA: &str = "no data";

const DATE_FORMAT: &str = "%Y-%m-%d";
const MONTH_FORMAT: &str = "%Y-%m";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Granularity {
    Day,
    Month,
}

impl Granularity {
    fn from_dimension(name: &str) -> Option<Granularity> {
        match name {
            "DATE" => Some(Granularity::Day),
            "MONTH" => Some(Granularity::Month),
            _ => None,
        }
    }

    fn format(&self, d: NaiveDate) -> String {
        match self {
            Granularity::Day => d.format(DATE_FORMAT).to_string(),
            Granularity::Month => d.format(MONTH_FORMAT).to_string(),
        }
    }

    fn parse(&self, s: &str) -> Option<NaiveDate> {
        match self {
            Granularity::Day => NaiveDate::parse_from_str(s, DATE_FORMAT).ok(),
            // chrono can't parse a date without a day.
            Granularity::Month => NaiveDate::parse_from_str(&format!("{}-01", s), DATE_FORMAT).ok(),
        }
    }

    fn normalize(&self, d: NaiveDate) -> NaiveDate {
        match self {
            Granularity::Day => d,
            Granularity::Month => first_of_month(d),
        }
    }

    fn next(&self, d: NaiveDate) -> Option<NaiveDate> {
        match self {
            Granularity::Day => d.succ_opt(),
            Granularity::Month => {
                let (y, m) = if d.month() == 12 {
                    (d.year() + 1, 1)
                } else {
                    (d.year(), d.month() + 1)
                };
                NaiveDate::from_ymd_opt(y, m, 1)
            }
        }
    }
}

fn first_of_month(d: NaiveDate) -> NaiveDate {
    d.with_day(1).unwrap_or(d)
}

/// Check that `report` is shaped as required for filling, and determine the period unit.
fn granularity(report: &Report) -> std::result::Result<Granularity, ReportError> {
    let headers = &report.headers;
    if headers.is_empty() {
        return Err(ReportError::MissingHeaders);
    }
    if headers.len() < 2 || !headers[0].is_dimension() {
        return Err(ReportError::InsufficientDimensions);
    }
    if headers[1].is_dimension() {
        return Err(ReportError::MultipleDimensionsUnsupported);
    }
    Granularity::from_dimension(&headers[0].name)
        .ok_or_else(|| ReportError::UnsupportedDimension(headers[0].name.clone()))
}

/// The normalized period of a row's first cell. Unparseable cells are logged.
fn row_date(granularity: Granularity, row: &ReportRow) -> Option<NaiveDate> {
    let cell = row.first().map(String::as_str).unwrap_or("");
    let parsed = granularity.parse(cell);
    if parsed.is_none() {
        warn!("fill_missing_dates: can't parse date {:?} of report row", cell);
    }
    parsed.map(|d| granularity.normalize(d))
}

/// Returns the rows of `report` with a placeholder row inserted for every period between
/// `start_date` (inclusive) and `end_date` (exclusive) that has no row of its own. Placeholder
/// rows carry the formatted period in the first cell and `NO_DATA` in all others.
///
/// Rows are matched in order: a row whose date isn't the current period (out of order, duplicate
/// or unparseable) stops matching and all following periods get placeholders.
pub fn fill_missing_dates(report: &Report) -> std::result::Result<Vec<ReportRow>, ReportError> {
    let granularity = granularity(report)?;
    let n_metrics = report.headers.len() - 1;

    let mut filled = Vec::new();
    let mut rows = report.rows.iter();
    let mut head = rows.next();
    let mut head_date = head.and_then(|row| row_date(granularity, row));
    let mut cursor = Some(granularity.normalize(report.start_date));

    while let Some(date) = cursor.filter(|d| *d < report.end_date) {
        match head {
            Some(row) if head_date == Some(date) => {
                filled.push(row.clone());
                head = rows.next();
                head_date = head.and_then(|row| row_date(granularity, row));
            }
            _ => {
                let mut row = Vec::with_capacity(n_metrics + 1);
                row.push(granularity.format(date));
                row.extend(std::iter::repeat(NO_DATA.to_string()).take(n_metrics));
                filled.push(row);
            }
        }

        cursor = granularity.next(date);
    }
    Ok(filled)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn report(dimension: &str, start: NaiveDate, end: NaiveDate, rows: &[&[&str]]) -> Report {
        Report {
            start_date: start,
            end_date: end,
            headers: vec![
                ReportHeader::new(dimension, HeaderType::Dimension),
                ReportHeader::new("CLICKS", HeaderType::Metric),
            ],
            rows: rows
                .iter()
                .map(|r| r.iter().map(|c| c.to_string()).collect())
                .collect(),
        }
    }

    fn rows(rows: &[&[&str]]) -> Vec<ReportRow> {
        rows.iter()
            .map(|r| r.iter().map(|c| c.to_string()).collect())
            .collect()
    }

    #[test]
    fn fills_gap_between_days() {
        let r = report(
            "DATE",
            date(2021, 3, 1),
            date(2021, 3, 4),
            &[&["2021-03-01", "5"], &["2021-03-03", "7"]],
        );
        assert_eq!(
            fill_missing_dates(&r).unwrap(),
            rows(&[
                &["2021-03-01", "5"],
                &["2021-03-02", "no data"],
                &["2021-03-03", "7"]
            ])
        );
    }

    #[test]
    fn empty_report_is_all_placeholders() {
        let r = report("DATE", date(2021, 1, 1), date(2021, 1, 3), &[]);
        assert_eq!(
            fill_missing_dates(&r).unwrap(),
            rows(&[&["2021-01-01", "no data"], &["2021-01-02", "no data"]])
        );
    }

    #[test]
    fn dense_report_is_unchanged() {
        let r = report(
            "DATE",
            date(2020, 2, 27),
            date(2020, 3, 2),
            &[
                &["2020-02-27", "1"],
                &["2020-02-28", "2"],
                &["2020-02-29", "3"],
                &["2020-03-01", "4"],
            ],
        );
        assert_eq!(fill_missing_dates(&r).unwrap(), r.rows);
    }

    #[test]
    fn row_count_matches_period_count() {
        let r = report("DATE", date(2021, 12, 20), date(2022, 1, 10), &[&["2021-12-31", "9"]]);
        let filled = fill_missing_dates(&r).unwrap();
        assert_eq!(filled.len(), 21);
        assert_eq!(filled[11], vec!["2021-12-31", "9"]);
        for row in filled.iter().filter(|r| r[0] != "2021-12-31") {
            assert_eq!(row[1], NO_DATA);
        }
    }

    #[test]
    fn start_equal_to_end_is_empty() {
        let r = report("DATE", date(2021, 1, 1), date(2021, 1, 1), &[&["2021-01-01", "3"]]);
        assert!(fill_missing_dates(&r).unwrap().is_empty());
    }

    #[test]
    fn month_start_is_normalized() {
        let r = report(
            "MONTH",
            date(2021, 1, 15),
            date(2021, 4, 10),
            &[&["2021-01", "10"], &["2021-03", "30"]],
        );
        assert_eq!(
            fill_missing_dates(&r).unwrap(),
            rows(&[
                &["2021-01", "10"],
                &["2021-02", "no data"],
                &["2021-03", "30"],
                &["2021-04", "no data"]
            ])
        );
    }

    #[test]
    fn months_cross_year_boundary() {
        let r = report("MONTH", date(2020, 11, 30), date(2021, 2, 1), &[&["2021-01", "4"]]);
        assert_eq!(
            fill_missing_dates(&r).unwrap(),
            rows(&[
                &["2020-11", "no data"],
                &["2020-12", "no data"],
                &["2021-01", "4"]
            ])
        );
    }

    #[test]
    fn every_metric_gets_a_placeholder() {
        let mut r = report("DATE", date(2021, 5, 1), date(2021, 5, 2), &[]);
        r.headers.push(ReportHeader::new("EARNINGS", HeaderType::Metric));
        r.headers.push(ReportHeader::new("PAGE_VIEWS", HeaderType::Metric));
        assert_eq!(
            fill_missing_dates(&r).unwrap(),
            rows(&[&["2021-05-01", "no data", "no data", "no data"]])
        );
    }

    #[test]
    fn out_of_order_row_is_never_consumed() {
        let r = report(
            "DATE",
            date(2021, 3, 1),
            date(2021, 3, 4),
            &[&["2021-03-02", "5"], &["2021-03-01", "7"]],
        );
        assert_eq!(
            fill_missing_dates(&r).unwrap(),
            rows(&[
                &["2021-03-01", "no data"],
                &["2021-03-02", "5"],
                &["2021-03-03", "no data"]
            ])
        );
    }

    #[test]
    fn duplicate_row_blocks_later_rows() {
        let r = report(
            "DATE",
            date(2021, 3, 1),
            date(2021, 3, 4),
            &[&["2021-03-01", "5"], &["2021-03-01", "6"], &["2021-03-03", "7"]],
        );
        assert_eq!(
            fill_missing_dates(&r).unwrap(),
            rows(&[
                &["2021-03-01", "5"],
                &["2021-03-02", "no data"],
                &["2021-03-03", "no data"]
            ])
        );
    }

    #[test]
    fn unparseable_row_date_is_a_mismatch() {
        let r = report("DATE", date(2021, 3, 1), date(2021, 3, 3), &[&["yesterday", "5"]]);
        assert_eq!(
            fill_missing_dates(&r).unwrap(),
            rows(&[&["2021-03-01", "no data"], &["2021-03-02", "no data"]])
        );
    }

    struct WarningLog;

    static WARNINGS: std::sync::Mutex<Vec<String>> = std::sync::Mutex::new(Vec::new());

    impl log::Log for WarningLog {
        fn enabled(&self, metadata: &log::Metadata) -> bool {
            metadata.level() <= log::Level::Warn
        }
        fn log(&self, record: &log::Record) {
            if self.enabled(record.metadata()) {
                WARNINGS.lock().unwrap().push(record.args().to_string());
            }
        }
        fn flush(&self) {}
    }

    #[test]
    fn unparseable_row_is_logged_once() {
        static LOGGER: WarningLog = WarningLog;
        let _ = log::set_logger(&LOGGER);
        log::set_max_level(log::LevelFilter::Warn);

        let r = report(
            "DATE",
            date(2021, 1, 1),
            date(2022, 1, 1),
            &[&["not-a-date-once", "5"]],
        );
        assert_eq!(fill_missing_dates(&r).unwrap().len(), 365);
        let n = WARNINGS
            .lock()
            .unwrap()
            .iter()
            .filter(|w| w.contains("not-a-date-once"))
            .count();
        assert_eq!(n, 1);
    }

    #[test]
    fn rejects_missing_headers() {
        let mut r = report("DATE", date(2021, 1, 1), date(2021, 1, 3), &[]);
        r.headers.clear();
        assert_eq!(fill_missing_dates(&r), Err(ReportError::MissingHeaders));
    }

    #[test]
    fn rejects_single_header() {
        let mut r = report("DATE", date(2021, 1, 1), date(2021, 1, 3), &[]);
        r.headers.truncate(1);
        assert_eq!(fill_missing_dates(&r), Err(ReportError::InsufficientDimensions));
    }

    #[test]
    fn rejects_metric_first() {
        let mut r = report("DATE", date(2021, 1, 1), date(2021, 1, 3), &[]);
        r.headers.reverse();
        assert_eq!(fill_missing_dates(&r), Err(ReportError::InsufficientDimensions));
    }

    #[test]
    fn rejects_two_dimensions() {
        let mut r = report("DATE", date(2021, 1, 1), date(2021, 1, 3), &[]);
        r.headers[1] = ReportHeader::new("PLATFORM_TYPE_NAME", HeaderType::Dimension);
        assert_eq!(fill_missing_dates(&r), Err(ReportError::MultipleDimensionsUnsupported));
    }

    #[test]
    fn rejects_week_dimension() {
        let r = report("WEEK", date(2021, 1, 1), date(2021, 1, 3), &[]);
        assert_eq!(
            fill_missing_dates(&r),
            Err(ReportError::UnsupportedDimension("WEEK".into()))
        );
    }
}
