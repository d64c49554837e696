//! Common types and functions used by the AdSense Management API samples: the report model, gap
//! filling and collation of report rows, page streams, REST services, HTTP requests and error
//! types.

pub use hyper;
pub use serde;
pub use serde_json;
pub use yup_oauth2;

pub use anyhow::{Error, Result};
pub use chrono::NaiveDate;
pub use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
pub use serde::{de::DeserializeOwned, Deserialize, Serialize};
pub use tokio_stream::StreamExt;

pub type Authenticator = yup_oauth2::authenticator::Authenticator<TlsConnr>;
pub type TlsClient = hyper::Client<TlsConnr, hyper::Body>;
pub type TlsConnr = hyper_rustls::HttpsConnector<hyper::client::HttpConnector>;

/// Create a new HTTPS client. Plain HTTP is accepted too, which is only useful for tests.
pub fn https_client() -> TlsClient {
    let conn = hyper_rustls::HttpsConnectorBuilder::new()
        .with_native_roots()
        .https_or_http()
        .enable_http1()
        .build();
    hyper::Client::builder().build(conn)
}

pub mod adsense_v2;
pub mod collate;
mod error;
pub mod fill;
mod http;
pub mod pages;
pub mod report;

pub use collate::{collate, Collation};
pub use error::*;
pub use fill::fill_missing_dates;
pub use http::*;
pub use pages::{items, pages, ListResponse};
pub use report::{HeaderType, Report, ReportHeader, ReportRow};
