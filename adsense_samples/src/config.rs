use adsense_common::NaiveDate;
use anyhow::{Context, Result};
use clap::{App, AppSettings, Arg, ArgMatches, SubCommand};

use std::path::PathBuf;

pub const DEFAULT_PAGE_SIZE: i32 = 50;

/// What to run.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// A sample talking to the API.
    Api(ApiCommand),
    /// Fill missing dates of a report read from a JSON file; no API access needed.
    FillMissingDatesFromFile(PathBuf),
}

#[derive(Debug, Clone, PartialEq)]
pub enum ApiCommand {
    Accounts,
    AccountTree,
    AdClients,
    AdUnits { ad_client: String },
    CustomChannels { ad_client: String },
    AdUnitsForChannel { custom_channel: String },
    ChannelsForAdUnit { ad_unit: String },
    UrlChannels { ad_client: String },
    SavedReports,
    GenerateReport {
        ad_client: String,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    },
    GenerateSavedReport { report: String },
    FillMissingDates { ad_client: String },
    CollateReports { ad_client: String },
    Alerts,
    Payments,
    RunAll,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    pub client_secret: PathBuf,
    /// Where OAuth tokens are kept between runs. `None` runs the authorization flow every time.
    pub token_cache: Option<PathBuf>,
    /// Skips the account selection prompt.
    pub account: Option<String>,
    pub page_size: i32,
    pub command: Command,
}

fn app() -> App<'static, 'static> {
    let ad_client = || {
        Arg::with_name("ad_client")
            .long("ad-client")
            .value_name("AD-CLIENT")
            .help("Ad client name, e.g. accounts/pub-123/adclients/ca-pub-123")
            .takes_value(true)
    };
    let date = |name: &'static str, help: &'static str| {
        Arg::with_name(name)
            .long(name)
            .value_name("YYYY-MM-DD")
            .help(help)
            .takes_value(true)
    };

    App::new("adsense_samples")
        .about("Samples for the AdSense Management API v2")
        .setting(AppSettings::SubcommandRequiredElseHelp)
        .arg(
            Arg::with_name("client_secret")
                .long("client-secret")
                .value_name("FILE")
                .help("OAuth2 client secret of an installed application")
                .default_value("client_secret.json"),
        )
        .arg(
            Arg::with_name("token_cache")
                .long("token-cache")
                .value_name("FILE")
                .help("File to persist OAuth2 tokens in")
                .default_value("tokencache.json"),
        )
        .arg(
            Arg::with_name("no_token_cache")
                .long("no-token-cache")
                .help("Run the authorization flow every time instead of storing tokens"),
        )
        .arg(
            Arg::with_name("account")
                .long("account")
                .value_name("ACCOUNT")
                .help("Account name, e.g. accounts/pub-123. Prompts if several exist and none is given")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("page_size")
                .long("page-size")
                .value_name("N")
                .help("Maximum number of items per page of list results")
                .takes_value(true),
        )
        .subcommand(SubCommand::with_name("accounts").about("List all accounts"))
        .subcommand(SubCommand::with_name("account-tree").about("Display an account and its sub-accounts"))
        .subcommand(SubCommand::with_name("ad-clients").about("List all ad clients"))
        .subcommand(
            SubCommand::with_name("ad-units")
                .about("List all ad units of an ad client")
                .arg(ad_client().required(true)),
        )
        .subcommand(
            SubCommand::with_name("custom-channels")
                .about("List all custom channels of an ad client")
                .arg(ad_client().required(true)),
        )
        .subcommand(
            SubCommand::with_name("ad-units-for-channel")
                .about("List all ad units in a custom channel")
                .arg(
                    Arg::with_name("custom_channel")
                        .long("custom-channel")
                        .value_name("CUSTOM-CHANNEL")
                        .required(true)
                        .takes_value(true),
                ),
        )
        .subcommand(
            SubCommand::with_name("channels-for-ad-unit")
                .about("List all custom channels an ad unit is in")
                .arg(
                    Arg::with_name("ad_unit")
                        .long("ad-unit")
                        .value_name("AD-UNIT")
                        .required(true)
                        .takes_value(true),
                ),
        )
        .subcommand(
            SubCommand::with_name("url-channels")
                .about("List all URL channels of an ad client")
                .arg(ad_client().required(true)),
        )
        .subcommand(SubCommand::with_name("saved-reports").about("List all saved reports"))
        .subcommand(
            SubCommand::with_name("generate-report")
                .about("Run a report for an ad client")
                .arg(ad_client().required(true))
                .arg(date("start", "First day of the report, default: a week ago"))
                .arg(date("end", "Last day of the report, default: yesterday")),
        )
        .subcommand(
            SubCommand::with_name("generate-saved-report")
                .about("Run a saved report for the last 7 days")
                .arg(
                    Arg::with_name("report")
                        .long("report")
                        .value_name("SAVED-REPORT")
                        .required(true)
                        .takes_value(true),
                ),
        )
        .subcommand(
            SubCommand::with_name("fill-missing-dates")
                .about("Run a daily report and fill in the days without data")
                .arg(ad_client().required_unless("input").conflicts_with("input"))
                .arg(
                    Arg::with_name("input")
                        .long("input")
                        .value_name("FILE")
                        .help("Read the report from a JSON file instead of running it")
                        .takes_value(true),
                ),
        )
        .subcommand(
            SubCommand::with_name("collate-reports")
                .about("Compare last week with the week before, by platform")
                .arg(ad_client().required(true)),
        )
        .subcommand(SubCommand::with_name("alerts").about("List all alerts"))
        .subcommand(SubCommand::with_name("payments").about("List all payments"))
        .subcommand(SubCommand::with_name("run-all").about("Run all samples, one after another"))
}

fn parse_date(m: &ArgMatches, name: &str) -> Result<Option<NaiveDate>> {
    m.value_of(name)
        .map(|s| {
            NaiveDate::parse_from_str(s, "%Y-%m-%d").with_context(|| format!("--{} {}", name, s))
        })
        .transpose()
}

fn required(m: &ArgMatches, name: &str) -> String {
    // clap has already checked required arguments.
    m.value_of(name).unwrap_or_default().to_string()
}

fn command(matches: &ArgMatches) -> Result<Command> {
    let cmd = match matches.subcommand() {
        ("accounts", _) => ApiCommand::Accounts,
        ("account-tree", _) => ApiCommand::AccountTree,
        ("ad-clients", _) => ApiCommand::AdClients,
        ("ad-units", Some(m)) => ApiCommand::AdUnits {
            ad_client: required(m, "ad_client"),
        },
        ("custom-channels", Some(m)) => ApiCommand::CustomChannels {
            ad_client: required(m, "ad_client"),
        },
        ("ad-units-for-channel", Some(m)) => ApiCommand::AdUnitsForChannel {
            custom_channel: required(m, "custom_channel"),
        },
        ("channels-for-ad-unit", Some(m)) => ApiCommand::ChannelsForAdUnit {
            ad_unit: required(m, "ad_unit"),
        },
        ("url-channels", Some(m)) => ApiCommand::UrlChannels {
            ad_client: required(m, "ad_client"),
        },
        ("saved-reports", _) => ApiCommand::SavedReports,
        ("generate-report", Some(m)) => ApiCommand::GenerateReport {
            ad_client: required(m, "ad_client"),
            start: parse_date(m, "start")?,
            end: parse_date(m, "end")?,
        },
        ("generate-saved-report", Some(m)) => ApiCommand::GenerateSavedReport {
            report: required(m, "report"),
        },
        ("fill-missing-dates", Some(m)) => match m.value_of("input") {
            Some(path) => return Ok(Command::FillMissingDatesFromFile(path.into())),
            None => ApiCommand::FillMissingDates {
                ad_client: required(m, "ad_client"),
            },
        },
        ("collate-reports", Some(m)) => ApiCommand::CollateReports {
            ad_client: required(m, "ad_client"),
        },
        ("alerts", _) => ApiCommand::Alerts,
        ("payments", _) => ApiCommand::Payments,
        ("run-all", _) => ApiCommand::RunAll,
        (other, _) => return Err(anyhow::anyhow!("Unknown command: {}", other)),
    };
    Ok(Command::Api(cmd))
}

fn from_matches(matches: &ArgMatches) -> Result<RunConfig> {
    let page_size = match matches.value_of("page_size") {
        Some(n) => n
            .parse::<i32>()
            .with_context(|| format!("--page-size {}", n))?,
        None => DEFAULT_PAGE_SIZE,
    };
    let token_cache = if matches.is_present("no_token_cache") {
        None
    } else {
        matches.value_of("token_cache").map(PathBuf::from)
    };
    Ok(RunConfig {
        client_secret: matches
            .value_of("client_secret")
            .unwrap_or("client_secret.json")
            .into(),
        token_cache,
        account: matches.value_of("account").map(String::from),
        page_size,
        command: command(matches)?,
    })
}

/// Parse the process' command line. Exits on `--help` or usage errors.
pub fn argparse() -> Result<RunConfig> {
    from_matches(&app().get_matches())
}

/// Parse `args`, whose first element is the program name.
pub fn argparse_from<I, T>(args: I) -> Result<RunConfig>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let matches = app()
        .get_matches_from_safe(args)
        .map_err(|e| anyhow::anyhow!("{}", e.message))?;
    from_matches(&matches)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cfg = argparse_from(&["adsense_samples", "accounts"]).unwrap();
        assert_eq!(cfg.client_secret, PathBuf::from("client_secret.json"));
        assert_eq!(cfg.token_cache, Some(PathBuf::from("tokencache.json")));
        assert_eq!(cfg.page_size, DEFAULT_PAGE_SIZE);
        assert_eq!(cfg.account, None);
        assert_eq!(cfg.command, Command::Api(ApiCommand::Accounts));
    }

    #[test]
    fn global_flags() {
        let cfg = argparse_from(&[
            "adsense_samples",
            "--no-token-cache",
            "--account",
            "accounts/pub-1",
            "--page-size",
            "10",
            "alerts",
        ])
        .unwrap();
        assert_eq!(cfg.token_cache, None);
        assert_eq!(cfg.account.as_deref(), Some("accounts/pub-1"));
        assert_eq!(cfg.page_size, 10);
    }

    #[test]
    fn report_dates() {
        let cfg = argparse_from(&[
            "adsense_samples",
            "generate-report",
            "--ad-client",
            "accounts/pub-1/adclients/ca-pub-1",
            "--start",
            "2021-03-01",
        ])
        .unwrap();
        assert_eq!(
            cfg.command,
            Command::Api(ApiCommand::GenerateReport {
                ad_client: "accounts/pub-1/adclients/ca-pub-1".into(),
                start: NaiveDate::from_ymd_opt(2021, 3, 1),
                end: None,
            })
        );
    }

    #[test]
    fn bad_date_is_rejected() {
        let err = argparse_from(&[
            "adsense_samples",
            "generate-report",
            "--ad-client",
            "c",
            "--end",
            "yesterday",
        ])
        .unwrap_err();
        assert!(format!("{}", err).contains("--end yesterday"));
    }

    #[test]
    fn fill_missing_dates_source() {
        let cfg =
            argparse_from(&["adsense_samples", "fill-missing-dates", "--input", "r.json"]).unwrap();
        assert_eq!(cfg.command, Command::FillMissingDatesFromFile("r.json".into()));

        let cfg = argparse_from(&["adsense_samples", "fill-missing-dates", "--ad-client", "c"]).unwrap();
        assert_eq!(
            cfg.command,
            Command::Api(ApiCommand::FillMissingDates {
                ad_client: "c".into()
            })
        );
    }

    #[test]
    fn fill_needs_a_source() {
        assert!(argparse_from(&["adsense_samples", "fill-missing-dates"]).is_err());
    }

    #[test]
    fn missing_required_argument() {
        assert!(argparse_from(&["adsense_samples", "ad-units"]).is_err());
    }
}
