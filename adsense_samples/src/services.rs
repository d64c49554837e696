use adsense_common as common;
use common::adsense_v2 as adsense;

use std::sync::Arc;

/// All services used by the samples, sharing one client and authenticator.
pub struct Services {
    pub accounts: adsense::AccountsService,
    pub adclients: adsense::AdclientsService,
    pub adunits: adsense::AdunitsService,
    pub customchannels: adsense::CustomchannelsService,
    pub urlchannels: adsense::UrlchannelsService,
    pub reports: adsense::ReportsService,
    pub saved_reports: adsense::SavedReportsService,
    pub alerts: adsense::AlertsService,
    pub payments: adsense::PaymentsService,
    page_size: i32,
}

impl Services {
    pub fn new(https: common::TlsClient, auth: Arc<common::Authenticator>, page_size: i32) -> Services {
        Services {
            accounts: adsense::AccountsService::new(https.clone(), auth.clone()),
            adclients: adsense::AdclientsService::new(https.clone(), auth.clone()),
            adunits: adsense::AdunitsService::new(https.clone(), auth.clone()),
            customchannels: adsense::CustomchannelsService::new(https.clone(), auth.clone()),
            urlchannels: adsense::UrlchannelsService::new(https.clone(), auth.clone()),
            reports: adsense::ReportsService::new(https.clone(), auth.clone()),
            saved_reports: adsense::SavedReportsService::new(https.clone(), auth.clone()),
            alerts: adsense::AlertsService::new(https.clone(), auth.clone()),
            payments: adsense::PaymentsService::new(https, auth),
            page_size,
        }
    }

    pub fn accounts_params(&self) -> adsense::AccountsListParams {
        adsense::AccountsListParams {
            page_size: Some(self.page_size),
            ..Default::default()
        }
    }

    pub fn list_params(&self, parent: &str) -> adsense::ListParams {
        adsense::ListParams {
            parent: parent.to_string(),
            page_size: Some(self.page_size),
            ..Default::default()
        }
    }
}

/// The account a resource belongs to: `accounts/pub-1/adclients/ca-pub-1` → `accounts/pub-1`.
pub fn account_of(name: &str) -> Option<String> {
    let mut parts = name.split('/');
    match (parts.next(), parts.next()) {
        (Some("accounts"), Some(id)) if !id.is_empty() => Some(format!("accounts/{}", id)),
        _ => None,
    }
}

/// The ID used in report filters: `accounts/pub-1/adclients/ca-pub-1` → `ca-pub-1`.
pub fn reporting_id(name: &str) -> &str {
    name.rsplit('/').next().unwrap_or(name)
}
