use crate::output::print_title;
use crate::services::Services;

use adsense_common::adsense_v2::Alert;
use adsense_common::Result;

fn describe(a: &Alert) -> String {
    format!(
        "Alert with ID \"{}\" type \"{}\" and severity \"{}\" was found.",
        a.name.as_deref().unwrap_or("(unknown)"),
        a.type_.as_deref().unwrap_or("(unknown)"),
        a.severity.as_deref().unwrap_or("(unknown)")
    )
}

pub async fn get_all_alerts(s: &Services, account: &str) -> Result<Vec<Alert>> {
    print_title(&format!("Listing all alerts for account {}", account));
    let alerts = s.alerts.list(account).await?.alerts.unwrap_or_default();
    if alerts.is_empty() {
        println!("No alerts found.");
    }
    for a in alerts.iter() {
        println!("{}", describe(a));
    }
    println!();
    Ok(alerts)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alert_line() {
        let a = Alert {
            name: Some("accounts/pub-1/alerts/a1".into()),
            message: Some("Check your payment settings".into()),
            severity: Some("WARNING".into()),
            type_: Some("PAYMENT".into()),
        };
        assert_eq!(
            describe(&a),
            "Alert with ID \"accounts/pub-1/alerts/a1\" type \"PAYMENT\" and severity \"WARNING\" was found."
        );
    }
}
