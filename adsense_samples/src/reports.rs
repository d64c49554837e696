//! Reports: ad-hoc and saved reports, filling missing dates and collating two weeks.

use crate::output::{format_collation, print_pages, print_report, print_rows, print_title};
use crate::services::{reporting_id, Services};

use adsense_common as common;
use common::adsense_v2::{self as adsense, escape_filter_parameter, SavedReport};
use common::{collate, fill_missing_dates, NaiveDate, Report, ReportRow, Result};

use chrono::Duration;
use log::info;
use std::convert::TryFrom;
use std::path::Path;

/// The week ending yesterday, as (first day, last day).
fn last_week(today: NaiveDate) -> (NaiveDate, NaiveDate) {
    (today - Duration::days(7), today - Duration::days(1))
}

/// The week before `last_week()`.
fn previous_week(today: NaiveDate) -> (NaiveDate, NaiveDate) {
    (today - Duration::days(14), today - Duration::days(8))
}

fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

fn ad_client_filter(ad_client: &str) -> String {
    format!("AD_CLIENT_ID=={}", escape_filter_parameter(reporting_id(ad_client)))
}

pub async fn generate_report(
    s: &Services,
    account: &str,
    ad_client: &str,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> Result<()> {
    print_title(&format!("Running report for ad client {}", ad_client));
    let (default_start, default_end) = last_week(today());
    let params = adsense::ReportsGenerateParams {
        account: account.to_string(),
        start_date: Some(start.unwrap_or(default_start)),
        end_date: Some(end.unwrap_or(default_end)),
        metrics: [
            "PAGE_VIEWS",
            "AD_REQUESTS",
            "AD_REQUESTS_COVERAGE",
            "CLICKS",
            "AD_REQUESTS_CTR",
            "COST_PER_CLICK",
            "AD_REQUESTS_RPM",
            "ESTIMATED_EARNINGS",
        ]
        .iter()
        .map(|m| m.to_string())
        .collect(),
        dimensions: vec!["DATE".into()],
        filters: vec![ad_client_filter(ad_client)],
        order_by: vec!["+DATE".into()],
        ..Default::default()
    };
    let report = Report::try_from(s.reports.generate(&params).await?)?;
    print_report(&report);
    println!();
    Ok(())
}

pub async fn get_all_saved_reports(s: &Services, account: &str) -> Result<Vec<SavedReport>> {
    print_title("Listing all saved reports");
    let params = s.list_params(account);
    print_pages(s.saved_reports.list_pages(&params), "No saved reports found.", |r: &SavedReport| {
        println!(
            "Saved report with ID \"{}\" and title \"{}\" was found.",
            r.name.as_deref().unwrap_or("(unknown)"),
            r.title.as_deref().unwrap_or("(unknown)")
        )
    })
    .await
}

pub async fn generate_saved_report(s: &Services, saved_report: &str) -> Result<()> {
    print_title(&format!("Running saved report {}", saved_report));
    let params = adsense::SavedReportsGenerateParams {
        name: saved_report.to_string(),
        date_range: Some("LAST_7_DAYS".into()),
        ..Default::default()
    };
    let report = Report::try_from(s.reports.generate_saved(&params).await?)?;
    print_report(&report);
    println!();
    Ok(())
}

/// Number of `filled` rows that aren't rows of `report`. Rows of `report` outside its date range
/// are dropped by the filler, so `filled` may be shorter than `report.rows`.
fn placeholder_count(report: &Report, filled: &[ReportRow]) -> usize {
    filled.iter().filter(|r| !report.rows.contains(r)).count()
}

fn print_filled(report: &Report) -> Result<()> {
    if !report.has_rows() {
        println!("No rows returned.");
        return Ok(());
    }
    let rows = fill_missing_dates(report)?;
    info!(
        "filled {} missing periods of {}",
        placeholder_count(report, &rows),
        rows.len()
    );
    print_rows(&report.headers, &rows);
    Ok(())
}

/// Run a daily report for last week and fill in the days without data.
pub async fn fill_missing_dates_for_ad_client(
    s: &Services,
    account: &str,
    ad_client: &str,
) -> Result<()> {
    print_title(&format!(
        "Running report for ad client {}, and filling missing dates",
        ad_client
    ));
    let (start, end) = last_week(today());
    let params = adsense::ReportsGenerateParams {
        account: account.to_string(),
        start_date: Some(start),
        end_date: Some(end),
        metrics: vec!["CLICKS".into(), "ESTIMATED_EARNINGS".into()],
        dimensions: vec!["DATE".into()],
        filters: vec![ad_client_filter(ad_client)],
        order_by: vec!["+DATE".into()],
        ..Default::default()
    };
    let report = Report::try_from(s.reports.generate(&params).await?)?;
    print_filled(&report)?;
    println!();
    Ok(())
}

pub async fn fill_missing_dates_from_file(path: &Path) -> Result<()> {
    print_title(&format!("Filling missing dates of report {}", path.display()));
    let report = Report::from_file(path).await?;
    print_filled(&report)?;
    println!();
    Ok(())
}

/// Compare last week with the week before, by platform.
pub async fn collate_reports(s: &Services, account: &str, ad_client: &str) -> Result<()> {
    print_title(&format!(
        "Running reports for ad client {}, and collating data",
        ad_client
    ));
    let params = |(start, end): (NaiveDate, NaiveDate)| adsense::ReportsGenerateParams {
        account: account.to_string(),
        start_date: Some(start),
        end_date: Some(end),
        metrics: vec!["CLICKS".into(), "ESTIMATED_EARNINGS".into()],
        dimensions: vec!["PLATFORM_TYPE_CODE".into(), "PLATFORM_TYPE_NAME".into()],
        filters: vec![ad_client_filter(ad_client)],
        order_by: vec!["+PLATFORM_TYPE_CODE".into()],
        ..Default::default()
    };
    let today = today();
    let last = Report::try_from(s.reports.generate(&params(last_week(today))).await?)?;
    let prev = Report::try_from(s.reports.generate(&params(previous_week(today))).await?)?;

    println!(
        "Results for last week ({} to {}) vs previous week ({} to {}).",
        last.start_date, last.end_date, prev.start_date, prev.end_date
    );
    let collation = collate(&last, &prev);
    if collation.is_empty() {
        println!("No rows returned.");
    }
    for line in format_collation(&collation) {
        println!("{}", line);
    }
    println!();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn week_ranges() {
        let today = NaiveDate::from_ymd_opt(2021, 3, 15).unwrap();
        assert_eq!(
            last_week(today),
            (
                NaiveDate::from_ymd_opt(2021, 3, 8).unwrap(),
                NaiveDate::from_ymd_opt(2021, 3, 14).unwrap()
            )
        );
        assert_eq!(
            previous_week(today),
            (
                NaiveDate::from_ymd_opt(2021, 3, 1).unwrap(),
                NaiveDate::from_ymd_opt(2021, 3, 7).unwrap()
            )
        );
    }

    #[test]
    fn filter_uses_escaped_reporting_id() {
        assert_eq!(
            ad_client_filter("accounts/pub-1/adclients/ca-pub-1"),
            "AD_CLIENT_ID==ca-pub-1"
        );
        assert_eq!(ad_client_filter("a,b"), "AD_CLIENT_ID==a\\,b");
    }

    fn daily_report(end_day: u32, rows: &[&str]) -> Report {
        Report {
            start_date: NaiveDate::from_ymd_opt(2021, 3, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2021, 3, end_day).unwrap(),
            headers: vec![
                common::ReportHeader::new("DATE", common::HeaderType::Dimension),
                common::ReportHeader::new("CLICKS", common::HeaderType::Metric),
            ],
            rows: rows.iter().map(|d| vec![d.to_string(), "1".to_string()]).collect(),
        }
    }

    #[test]
    fn counts_placeholders() {
        let report = daily_report(5, &["2021-03-01", "2021-03-04"]);
        let filled = fill_missing_dates(&report).unwrap();
        assert_eq!(placeholder_count(&report, &filled), 2);
    }

    #[test]
    fn row_on_end_date_is_not_counted() {
        log::set_max_level(log::LevelFilter::Info);
        // The API includes the end date, the filler doesn't.
        let report = daily_report(2, &["2021-03-01", "2021-03-02"]);
        let filled = fill_missing_dates(&report).unwrap();
        assert_eq!(filled.len(), 1);
        assert_eq!(placeholder_count(&report, &filled), 0);
        print_filled(&report).unwrap();
    }

    #[tokio::test]
    async fn fills_report_from_file() {
        let path = std::env::temp_dir().join("adsense_samples_fill_test.json");
        tokio::fs::write(
            &path,
            r#"{"startDate": "2021-03-01", "endDate": "2021-03-04",
                "headers": [{"name": "DATE", "type": "DIMENSION"}, {"name": "CLICKS", "type": "METRIC_TALLY"}],
                "rows": [["2021-03-01", "5"], ["2021-03-03", "7"]]}"#,
        )
        .await
        .unwrap();
        fill_missing_dates_from_file(&path).await.unwrap();
        tokio::fs::remove_file(&path).await.unwrap();
    }

    #[tokio::test]
    async fn fill_rejects_report_with_two_dimensions() {
        let path = std::env::temp_dir().join("adsense_samples_fill_invalid_test.json");
        tokio::fs::write(
            &path,
            r#"{"startDate": "2021-03-01", "endDate": "2021-03-04",
                "headers": [{"name": "DATE", "type": "DIMENSION"}, {"name": "PLATFORM_TYPE_NAME", "type": "DIMENSION"}],
                "rows": [["2021-03-01", "Desktop"]]}"#,
        )
        .await
        .unwrap();
        let err = fill_missing_dates_from_file(&path).await.unwrap_err();
        tokio::fs::remove_file(&path).await.unwrap();
        assert_eq!(
            err.downcast_ref::<common::ReportError>(),
            Some(&common::ReportError::MultipleDimensionsUnsupported)
        );
    }
}
