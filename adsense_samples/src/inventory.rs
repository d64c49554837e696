//! Ad clients, ad units, custom channels and URL channels.

use crate::output::{print_pages, print_title};
use crate::services::Services;

use adsense_common::adsense_v2::{AdClient, AdUnit, CustomChannel, UrlChannel};
use adsense_common::Result;

fn unknown(s: &Option<String>) -> &str {
    s.as_deref().unwrap_or("(unknown)")
}

fn print_ad_unit(u: &AdUnit) {
    println!(
        "Ad unit with ID \"{}\", name \"{}\" and state \"{}\" was found.",
        unknown(&u.name),
        unknown(&u.display_name),
        unknown(&u.state)
    );
}

fn print_custom_channel(c: &CustomChannel) {
    println!(
        "Custom channel with ID \"{}\" and name \"{}\" was found.",
        unknown(&c.name),
        unknown(&c.display_name)
    );
}

pub async fn get_all_ad_clients(s: &Services, account: &str) -> Result<Vec<AdClient>> {
    print_title(&format!("Listing all ad clients for account {}", account));
    let params = s.list_params(account);
    print_pages(s.adclients.list_pages(&params), "No ad clients found.", |c: &AdClient| {
        println!(
            "Ad client for product \"{}\" with ID \"{}\" was found.",
            unknown(&c.product_code),
            unknown(&c.name)
        );
        println!(
            "\tSupports reporting: {}",
            if c.reporting_dimension_id.is_some() { "Yes" } else { "No" }
        );
    })
    .await
}

pub async fn get_all_ad_units(s: &Services, ad_client: &str) -> Result<Vec<AdUnit>> {
    print_title(&format!("Listing all ad units for ad client {}", ad_client));
    let params = s.list_params(ad_client);
    print_pages(s.adunits.list_pages(&params), "No ad units found.", print_ad_unit).await
}

pub async fn get_all_custom_channels(s: &Services, ad_client: &str) -> Result<Vec<CustomChannel>> {
    print_title(&format!("Listing all custom channels for ad client {}", ad_client));
    let params = s.list_params(ad_client);
    print_pages(
        s.customchannels.list_pages(&params),
        "No custom channels found.",
        print_custom_channel,
    )
    .await
}

pub async fn get_all_ad_units_for_custom_channel(
    s: &Services,
    custom_channel: &str,
) -> Result<Vec<AdUnit>> {
    print_title(&format!("Listing all ad units for custom channel {}", custom_channel));
    let params = s.list_params(custom_channel);
    print_pages(
        s.customchannels.list_linked_ad_units_pages(&params),
        "No ad units found.",
        print_ad_unit,
    )
    .await
}

pub async fn get_all_custom_channels_for_ad_unit(
    s: &Services,
    ad_unit: &str,
) -> Result<Vec<CustomChannel>> {
    print_title(&format!("Listing all custom channels for ad unit {}", ad_unit));
    let params = s.list_params(ad_unit);
    print_pages(
        s.adunits.list_linked_custom_channels_pages(&params),
        "No custom channels found.",
        print_custom_channel,
    )
    .await
}

pub async fn get_all_url_channels(s: &Services, ad_client: &str) -> Result<Vec<UrlChannel>> {
    print_title(&format!("Listing all URL channels for ad client {}", ad_client));
    let params = s.list_params(ad_client);
    print_pages(s.urlchannels.list_pages(&params), "No URL channels found.", |c: &UrlChannel| {
        println!(
            "URL channel with URI pattern \"{}\" was found.",
            unknown(&c.uri_pattern)
        )
    })
    .await
}
