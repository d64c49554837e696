//! Samples for the AdSense Management API v2.
//!
//! Put the client secret of an installed application into `client_secret.json` (or point
//! `--client-secret` at it) and run e.g. `adsense_samples run-all`. Set `RUST_LOG=debug` to see
//! the HTTP traffic.

mod accounts;
mod alerts;
mod auth;
mod config;
mod inventory;
mod output;
mod payments;
mod reports;
mod services;

use config::{ApiCommand, Command, RunConfig};
use services::{account_of, Services};

use adsense_common as common;
use common::Result;

use log::info;
use std::sync::Arc;

/// Resolve the account to work with. `resource` is a name below an account, if the command got
/// one. `None` means the user has no account.
async fn account_for(s: &Services, cfg: &RunConfig, resource: Option<&str>) -> Result<Option<String>> {
    if cfg.account.is_none() {
        if let Some(account) = resource.and_then(account_of) {
            return Ok(Some(account));
        }
    }
    accounts::choose_account(s, &cfg.account).await
}

/// Run every sample against the chosen account, feeding the first item of each list to the next
/// sample.
async fn run_all(s: &Services, account: &str) -> Result<()> {
    accounts::get_all_accounts(s).await?;
    accounts::display_account_tree(s, account).await?;

    let ad_clients = inventory::get_all_ad_clients(s, account).await?;
    if let Some(ad_client) = ad_clients.first().and_then(|c| c.name.as_deref()) {
        let ad_units = inventory::get_all_ad_units(s, ad_client).await?;
        let channels = inventory::get_all_custom_channels(s, ad_client).await?;
        if let Some(channel) = channels.first().and_then(|c| c.name.as_deref()) {
            inventory::get_all_ad_units_for_custom_channel(s, channel).await?;
        }
        if let Some(ad_unit) = ad_units.first().and_then(|u| u.name.as_deref()) {
            inventory::get_all_custom_channels_for_ad_unit(s, ad_unit).await?;
        }
        inventory::get_all_url_channels(s, ad_client).await?;

        let saved = reports::get_all_saved_reports(s, account).await?;
        if let Some(report) = saved.first().and_then(|r| r.name.as_deref()) {
            reports::generate_saved_report(s, report).await?;
        }
        reports::generate_report(s, account, ad_client, None, None).await?;
        reports::fill_missing_dates_for_ad_client(s, account, ad_client).await?;
        reports::collate_reports(s, account, ad_client).await?;
    } else {
        info!("account {} has no ad clients, skipping inventory and reports", account);
    }

    alerts::get_all_alerts(s, account).await?;
    payments::get_all_payments(s, account).await?;
    Ok(())
}

async fn run(cfg: &RunConfig) -> Result<()> {
    match cfg.command {
        Command::FillMissingDatesFromFile(ref path) => reports::fill_missing_dates_from_file(path).await,
        Command::Api(ref command) => run_api(cfg, command).await,
    }
}

async fn run_api(cfg: &RunConfig, command: &ApiCommand) -> Result<()> {
    let https = common::https_client();
    let auth = auth::authenticator(cfg, https.clone()).await?;
    let s = Services::new(https, Arc::new(auth), cfg.page_size);

    let resource = match *command {
        ApiCommand::AdUnits { ref ad_client }
        | ApiCommand::CustomChannels { ref ad_client }
        | ApiCommand::UrlChannels { ref ad_client }
        | ApiCommand::GenerateReport { ref ad_client, .. }
        | ApiCommand::FillMissingDates { ref ad_client }
        | ApiCommand::CollateReports { ref ad_client } => Some(ad_client.as_str()),
        ApiCommand::AdUnitsForChannel { ref custom_channel } => Some(custom_channel.as_str()),
        ApiCommand::ChannelsForAdUnit { ref ad_unit } => Some(ad_unit.as_str()),
        ApiCommand::GenerateSavedReport { ref report } => Some(report.as_str()),
        _ => None,
    };
    let account = match *command {
        ApiCommand::Accounts => String::new(),
        _ => match account_for(&s, cfg, resource).await? {
            Some(account) => account,
            None => {
                println!("No AdSense accounts found.");
                return Ok(());
            }
        },
    };
    info!("using account {:?}", account);

    match *command {
        ApiCommand::Accounts => {
            accounts::get_all_accounts(&s).await?;
        }
        ApiCommand::AccountTree => accounts::display_account_tree(&s, &account).await?,
        ApiCommand::AdClients => {
            inventory::get_all_ad_clients(&s, &account).await?;
        }
        ApiCommand::AdUnits { ref ad_client } => {
            inventory::get_all_ad_units(&s, ad_client).await?;
        }
        ApiCommand::CustomChannels { ref ad_client } => {
            inventory::get_all_custom_channels(&s, ad_client).await?;
        }
        ApiCommand::AdUnitsForChannel { ref custom_channel } => {
            inventory::get_all_ad_units_for_custom_channel(&s, custom_channel).await?;
        }
        ApiCommand::ChannelsForAdUnit { ref ad_unit } => {
            inventory::get_all_custom_channels_for_ad_unit(&s, ad_unit).await?;
        }
        ApiCommand::UrlChannels { ref ad_client } => {
            inventory::get_all_url_channels(&s, ad_client).await?;
        }
        ApiCommand::SavedReports => {
            reports::get_all_saved_reports(&s, &account).await?;
        }
        ApiCommand::GenerateReport {
            ref ad_client,
            start,
            end,
        } => reports::generate_report(&s, &account, ad_client, start, end).await?,
        ApiCommand::GenerateSavedReport { ref report } => {
            reports::generate_saved_report(&s, report).await?
        }
        ApiCommand::FillMissingDates { ref ad_client } => {
            reports::fill_missing_dates_for_ad_client(&s, &account, ad_client).await?
        }
        ApiCommand::CollateReports { ref ad_client } => {
            reports::collate_reports(&s, &account, ad_client).await?
        }
        ApiCommand::Alerts => {
            alerts::get_all_alerts(&s, &account).await?;
        }
        ApiCommand::Payments => {
            payments::get_all_payments(&s, &account).await?;
        }
        ApiCommand::RunAll => run_all(&s, &account).await?,
    }
    Ok(())
}

fn report_error(cfg: &RunConfig, err: &common::Error) {
    eprintln!("Error: {:#}", err);
    if err.downcast_ref::<common::yup_oauth2::Error>().is_some() {
        if let Some(ref cache) = cfg.token_cache {
            eprintln!(
                "The credentials have been revoked or expired, please delete the \"{}\" file and re-run the application to re-authorize.",
                cache.display()
            );
        }
    }
}

#[tokio::main]
async fn main() {
    env_logger::init();

    let cfg = match config::argparse() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("{:#}", e);
            std::process::exit(2);
        }
    };
    if let Err(e) = run(&cfg).await {
        report_error(&cfg, &e);
        std::process::exit(1);
    }
}
