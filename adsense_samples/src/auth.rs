use crate::config::RunConfig;

use adsense_common as common;
use common::yup_oauth2;

use anyhow::Context;

/// Build the installed-application authenticator, caching tokens on disk unless disabled.
pub async fn authenticator(cfg: &RunConfig, https: common::TlsClient) -> common::Result<common::Authenticator> {
    let secret = yup_oauth2::read_application_secret(&cfg.client_secret)
        .await
        .with_context(|| format!("couldn't read client secret from {}", cfg.client_secret.display()))?;
    let builder = yup_oauth2::InstalledFlowAuthenticator::builder(
        secret,
        yup_oauth2::InstalledFlowReturnMethod::HTTPRedirect,
    )
    .hyper_client(https);
    let auth = match cfg.token_cache {
        Some(ref path) => builder.persist_tokens_to_disk(path).build().await,
        None => builder.build().await,
    };
    auth.context("InstalledFlowAuthenticator failed to build")
}
