//! Types and services for the AdSense Management API v2.
//!
//! Every resource has a service, constructed from an HTTPS client and an authenticator, with one
//! method per API call. List methods have a `*_pages` counterpart returning a stream of all pages
//! (see `crate::pages`).

use crate::*;

use futures::stream::Stream;
use std::sync::Arc;

pub const BASE_URL: &str = "https://adsense.googleapis.com/";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdsenseScopes {
    /// View and manage your AdSense data.
    Adsense,
    /// View your AdSense data.
    AdsenseReadonly,
}

impl AdsenseScopes {
    pub fn as_str(&self) -> &'static str {
        match self {
            AdsenseScopes::Adsense => "https://www.googleapis.com/auth/adsense",
            AdsenseScopes::AdsenseReadonly => "https://www.googleapis.com/auth/adsense.readonly",
        }
    }
}

impl std::convert::AsRef<str> for AdsenseScopes {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

/// Escape a value for use in a report filter like `AD_CLIENT_ID==<value>`.
pub fn escape_filter_parameter(value: &str) -> String {
    value.replace('\\', "\\\\").replace(',', "\\,")
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Date {
    pub year: Option<i32>,
    pub month: Option<i32>,
    pub day: Option<i32>,
}

impl Date {
    pub fn to_naive_date(&self) -> Option<NaiveDate> {
        match (self.year, self.month, self.day) {
            (Some(y), Some(m), Some(d)) if m > 0 && d > 0 => {
                NaiveDate::from_ymd_opt(y, m as u32, d as u32)
            }
            _ => None,
        }
    }
}

impl From<NaiveDate> for Date {
    fn from(d: NaiveDate) -> Date {
        use chrono::Datelike;
        Date {
            year: Some(d.year()),
            month: Some(d.month() as i32),
            day: Some(d.day() as i32),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    /// Resource name, e.g. `accounts/pub-1234567890123456`.
    pub name: Option<String>,
    pub display_name: Option<String>,
    pub premium: Option<bool>,
    pub pending_tasks: Option<Vec<String>>,
    pub create_time: Option<String>,
    pub state: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AdClient {
    pub name: Option<String>,
    pub reporting_dimension_id: Option<String>,
    pub product_code: Option<String>,
    pub state: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ContentAdsSettings {
    pub size: Option<String>,
    #[serde(rename = "type")]
    pub type_: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AdUnit {
    pub name: Option<String>,
    pub reporting_dimension_id: Option<String>,
    pub display_name: Option<String>,
    pub state: Option<String>,
    pub content_ads_settings: Option<ContentAdsSettings>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CustomChannel {
    pub name: Option<String>,
    pub reporting_dimension_id: Option<String>,
    pub display_name: Option<String>,
    pub active: Option<bool>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UrlChannel {
    pub name: Option<String>,
    pub reporting_dimension_id: Option<String>,
    pub uri_pattern: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SavedReport {
    pub name: Option<String>,
    pub title: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Alert {
    pub name: Option<String>,
    pub message: Option<String>,
    pub severity: Option<String>,
    #[serde(rename = "type")]
    pub type_: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub name: Option<String>,
    /// Formatted amount including currency, e.g. `"$123.45"`.
    pub amount: Option<String>,
    /// Absent for unpaid earnings.
    pub date: Option<Date>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Header {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub header_type: Option<HeaderType>,
    pub currency_code: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Cell {
    pub value: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Row {
    pub cells: Option<Vec<Cell>>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReportResult {
    // i64
    pub total_matched_rows: Option<String>,
    pub headers: Option<Vec<Header>>,
    pub rows: Option<Vec<Row>>,
    pub totals: Option<Row>,
    pub averages: Option<Row>,
    pub warnings: Option<Vec<String>>,
    pub start_date: Option<Date>,
    pub end_date: Option<Date>,
}

macro_rules! list_response {
    ($name:ident, $field:ident, $item:ty) => {
        #[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
        #[serde(rename_all = "camelCase")]
        pub struct $name {
            pub $field: Option<Vec<$item>>,
            pub next_page_token: Option<String>,
        }

        impl ListResponse for $name {
            type Item = $item;
            fn into_items(self) -> Vec<$item> {
                self.$field.unwrap_or_default()
            }
            fn next_page_token(&self) -> Option<&str> {
                self.next_page_token.as_deref()
            }
        }
    };
}

list_response!(ListAccountsResponse, accounts, Account);
list_response!(ListChildAccountsResponse, accounts, Account);
list_response!(ListAdClientsResponse, ad_clients, AdClient);
list_response!(ListAdUnitsResponse, ad_units, AdUnit);
list_response!(ListLinkedAdUnitsResponse, ad_units, AdUnit);
list_response!(ListCustomChannelsResponse, custom_channels, CustomChannel);
list_response!(ListLinkedCustomChannelsResponse, custom_channels, CustomChannel);
list_response!(ListUrlChannelsResponse, url_channels, UrlChannel);
list_response!(ListSavedReportsResponse, saved_reports, SavedReport);

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct ListAlertsResponse {
    pub alerts: Option<Vec<Alert>>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct ListPaymentsResponse {
    pub payments: Option<Vec<Payment>>,
}

/// Parameters of `accounts.list`.
#[derive(Debug, Clone, Default)]
pub struct AccountsListParams {
    pub page_size: Option<i32>,
    pub page_token: Option<String>,
}

/// Parameters of list methods below a parent resource.
#[derive(Debug, Clone, Default)]
pub struct ListParams {
    /// Resource name of the parent, e.g. `accounts/pub-123/adclients/ca-pub-123`.
    pub parent: String,
    pub page_size: Option<i32>,
    pub page_token: Option<String>,
}

fn paging_query(page_size: Option<i32>, page_token: &Option<String>) -> Vec<(&'static str, String)> {
    let mut q = vec![];
    if let Some(size) = page_size {
        q.push(("pageSize", size.to_string()));
    }
    if let Some(ref token) = page_token {
        q.push(("pageToken", token.clone()));
    }
    q
}

const START_DATE_KEYS: [&str; 3] = ["startDate.year", "startDate.month", "startDate.day"];
const END_DATE_KEYS: [&str; 3] = ["endDate.year", "endDate.month", "endDate.day"];

/// Append `d` as the year, month and day parameters named by `keys`.
fn date_query(q: &mut Vec<(&'static str, String)>, keys: [&'static str; 3], d: &NaiveDate) {
    use chrono::Datelike;
    q.push((keys[0], d.year().to_string()));
    q.push((keys[1], d.month().to_string()));
    q.push((keys[2], d.day().to_string()));
}

/// Parameters of `accounts.reports.generate`.
#[derive(Debug, Clone, Default)]
pub struct ReportsGenerateParams {
    /// Account to run the report for, e.g. `accounts/pub-123`.
    pub account: String,
    /// E.g. `LAST_7_DAYS`. Defaults to `CUSTOM` if `start_date` and `end_date` are set.
    pub date_range: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub metrics: Vec<String>,
    pub dimensions: Vec<String>,
    /// E.g. `AD_CLIENT_ID==ca-pub-123`; see `escape_filter_parameter()`.
    pub filters: Vec<String>,
    /// E.g. `+DATE`.
    pub order_by: Vec<String>,
    pub currency_code: Option<String>,
    pub limit: Option<i32>,
}

impl ReportsGenerateParams {
    fn query(&self) -> Vec<(&'static str, String)> {
        let mut q = vec![];
        match (&self.date_range, &self.start_date, &self.end_date) {
            (Some(range), _, _) => q.push(("dateRange", range.clone())),
            (None, Some(_), Some(_)) => q.push(("dateRange", "CUSTOM".to_string())),
            _ => {}
        }
        if let Some(ref d) = self.start_date {
            date_query(&mut q, START_DATE_KEYS, d);
        }
        if let Some(ref d) = self.end_date {
            date_query(&mut q, END_DATE_KEYS, d);
        }
        q.extend(self.metrics.iter().map(|m| ("metrics", m.clone())));
        q.extend(self.dimensions.iter().map(|d| ("dimensions", d.clone())));
        q.extend(self.filters.iter().map(|f| ("filters", f.clone())));
        q.extend(self.order_by.iter().map(|o| ("orderBy", o.clone())));
        if let Some(ref c) = self.currency_code {
            q.push(("currencyCode", c.clone()));
        }
        if let Some(l) = self.limit {
            q.push(("limit", l.to_string()));
        }
        q
    }
}

/// Parameters of `accounts.reports.saved.generate`.
#[derive(Debug, Clone, Default)]
pub struct SavedReportsGenerateParams {
    /// Saved report name, e.g. `accounts/pub-123/reports/abc`.
    pub name: String,
    pub date_range: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl SavedReportsGenerateParams {
    fn query(&self) -> Vec<(&'static str, String)> {
        let mut q = vec![];
        if let Some(ref range) = self.date_range {
            q.push(("dateRange", range.clone()));
        }
        if let Some(ref d) = self.start_date {
            date_query(&mut q, START_DATE_KEYS, d);
        }
        if let Some(ref d) = self.end_date {
            date_query(&mut q, END_DATE_KEYS, d);
        }
        q
    }
}

fn encode_query(query: &[(&str, String)]) -> String {
    query
        .iter()
        .map(|(k, v)| format!("{}={}", k, utf8_percent_encode(v, NON_ALPHANUMERIC)))
        .collect::<Vec<_>>()
        .join("&")
}

/// Shared state of all services.
#[derive(Clone)]
struct ApiClient {
    client: TlsClient,
    authenticator: Option<Arc<Authenticator>>,
    scopes: Vec<String>,
    base_url: String,
}

impl ApiClient {
    fn new(client: TlsClient, authenticator: Option<Arc<Authenticator>>) -> ApiClient {
        ApiClient {
            client,
            authenticator,
            scopes: vec![AdsenseScopes::AdsenseReadonly.as_str().to_string()],
            base_url: BASE_URL.to_string(),
        }
    }

    fn url(&self, path: &str, query: &[(&str, String)]) -> String {
        let mut url = format!("{}/v2/{}", self.base_url.trim_end_matches('/'), path);
        if !query.is_empty() {
            url.push('?');
            url.push_str(&encode_query(query));
        }
        url
    }

    async fn get<Resp: DeserializeOwned + Default>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<Resp> {
        let mut headers = vec![];
        if let Some(ref auth) = self.authenticator {
            let tok = auth.token(self.scopes.as_slice()).await?;
            let tok = tok
                .token()
                .ok_or_else(|| ApiError::InputDataError("no access token received".into()))?;
            headers.push((hyper::header::AUTHORIZATION, format!("Bearer {}", tok)));
        }
        let url = self.url(path, query);
        do_request::<EmptyRequest, Resp>(&self.client, &url, &headers, "GET", None).await
    }
}

macro_rules! service {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Clone)]
        pub struct $name {
            api: ApiClient,
        }

        impl $name {
            /// Create a service authorizing its requests with `auth`.
            pub fn new(client: TlsClient, auth: Arc<Authenticator>) -> $name {
                $name {
                    api: ApiClient::new(client, Some(auth)),
                }
            }

            /// Create a service sending requests without an `Authorization` header.
            pub fn new_unauthenticated(client: TlsClient) -> $name {
                $name {
                    api: ApiClient::new(client, None),
                }
            }

            /// Scopes requested for access tokens; `AdsenseReadonly` by default.
            pub fn set_scopes<S: AsRef<str>>(&mut self, scopes: &[S]) {
                self.api.scopes = scopes.iter().map(|s| s.as_ref().to_string()).collect();
            }

            pub fn set_base_url<S: AsRef<str>>(&mut self, url: S) {
                self.api.base_url = url.as_ref().to_string();
            }
        }
    };
}

service!(
    /// `accounts.list`, `accounts.get`, `accounts.listChildAccounts`.
    AccountsService
);
service!(
    /// `accounts.adclients.list`.
    AdclientsService
);
service!(
    /// `accounts.adclients.adunits.list`, `accounts.adclients.adunits.listLinkedCustomChannels`.
    AdunitsService
);
service!(
    /// `accounts.adclients.customchannels.list`,
    /// `accounts.adclients.customchannels.listLinkedAdUnits`.
    CustomchannelsService
);
service!(
    /// `accounts.adclients.urlchannels.list`.
    UrlchannelsService
);
service!(
    /// `accounts.reports.generate`, `accounts.reports.saved.generate`.
    ReportsService
);
service!(
    /// `accounts.reports.saved.list`.
    SavedReportsService
);
service!(
    /// `accounts.alerts.list`.
    AlertsService
);
service!(
    /// `accounts.payments.list`.
    PaymentsService
);

impl AccountsService {
    pub async fn list(&self, params: &AccountsListParams) -> Result<ListAccountsResponse> {
        self.api
            .get("accounts", &paging_query(params.page_size, &params.page_token))
            .await
    }

    pub fn list_pages<'a>(
        &'a self,
        params: &'a AccountsListParams,
    ) -> impl Stream<Item = Result<ListAccountsResponse>> + 'a {
        pages(move |token| {
            let mut params = params.clone();
            params.page_token = token;
            async move { self.list(&params).await }
        })
    }

    pub async fn get(&self, name: &str) -> Result<Account> {
        self.api.get(name, &[]).await
    }

    pub async fn list_child_accounts(&self, params: &ListParams) -> Result<ListChildAccountsResponse> {
        self.api
            .get(
                &format!("{}:listChildAccounts", params.parent),
                &paging_query(params.page_size, &params.page_token),
            )
            .await
    }

    pub fn list_child_accounts_pages<'a>(
        &'a self,
        params: &'a ListParams,
    ) -> impl Stream<Item = Result<ListChildAccountsResponse>> + 'a {
        pages(move |token| {
            let mut params = params.clone();
            params.page_token = token;
            async move { self.list_child_accounts(&params).await }
        })
    }
}

/// Implements `list` and `list_pages` for a collection below `ListParams::parent`.
macro_rules! collection {
    ($service:ident, $collection:expr, $response:ty) => {
        impl $service {
            pub async fn list(&self, params: &ListParams) -> Result<$response> {
                self.api
                    .get(
                        &format!("{}/{}", params.parent, $collection),
                        &paging_query(params.page_size, &params.page_token),
                    )
                    .await
            }

            pub fn list_pages<'a>(
                &'a self,
                params: &'a ListParams,
            ) -> impl Stream<Item = Result<$response>> + 'a {
                pages(move |token| {
                    let mut params = params.clone();
                    params.page_token = token;
                    async move { self.list(&params).await }
                })
            }
        }
    };
}

collection!(AdclientsService, "adclients", ListAdClientsResponse);
collection!(AdunitsService, "adunits", ListAdUnitsResponse);
collection!(CustomchannelsService, "customchannels", ListCustomChannelsResponse);
collection!(UrlchannelsService, "urlchannels", ListUrlChannelsResponse);
collection!(SavedReportsService, "reports/saved", ListSavedReportsResponse);

impl AdunitsService {
    /// Custom channels an ad unit (`params.parent`) belongs to.
    pub async fn list_linked_custom_channels(
        &self,
        params: &ListParams,
    ) -> Result<ListLinkedCustomChannelsResponse> {
        self.api
            .get(
                &format!("{}:listLinkedCustomChannels", params.parent),
                &paging_query(params.page_size, &params.page_token),
            )
            .await
    }

    pub fn list_linked_custom_channels_pages<'a>(
        &'a self,
        params: &'a ListParams,
    ) -> impl Stream<Item = Result<ListLinkedCustomChannelsResponse>> + 'a {
        pages(move |token| {
            let mut params = params.clone();
            params.page_token = token;
            async move { self.list_linked_custom_channels(&params).await }
        })
    }
}

impl CustomchannelsService {
    /// Ad units belonging to a custom channel (`params.parent`).
    pub async fn list_linked_ad_units(&self, params: &ListParams) -> Result<ListLinkedAdUnitsResponse> {
        self.api
            .get(
                &format!("{}:listLinkedAdUnits", params.parent),
                &paging_query(params.page_size, &params.page_token),
            )
            .await
    }

    pub fn list_linked_ad_units_pages<'a>(
        &'a self,
        params: &'a ListParams,
    ) -> impl Stream<Item = Result<ListLinkedAdUnitsResponse>> + 'a {
        pages(move |token| {
            let mut params = params.clone();
            params.page_token = token;
            async move { self.list_linked_ad_units(&params).await }
        })
    }
}

impl ReportsService {
    pub async fn generate(&self, params: &ReportsGenerateParams) -> Result<ReportResult> {
        self.api
            .get(&format!("{}/reports:generate", params.account), &params.query())
            .await
    }

    pub async fn generate_saved(&self, params: &SavedReportsGenerateParams) -> Result<ReportResult> {
        self.api
            .get(&format!("{}/saved:generate", params.name), &params.query())
            .await
    }
}

impl AlertsService {
    /// Alerts of the account `parent`.
    pub async fn list(&self, parent: &str) -> Result<ListAlertsResponse> {
        self.api.get(&format!("{}/alerts", parent), &[]).await
    }
}

impl PaymentsService {
    /// Payments of the account `parent`.
    pub async fn list(&self, parent: &str) -> Result<ListPaymentsResponse> {
        self.api.get(&format!("{}/payments", parent), &[]).await
    }
}
