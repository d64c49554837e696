use crate::output::print_title;
use crate::services::Services;

use adsense_common::adsense_v2::Payment;
use adsense_common::Result;

fn describe(p: &Payment) -> String {
    let date = p
        .date
        .as_ref()
        .and_then(|d| d.to_naive_date())
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "unknown".to_string());
    format!(
        "Payment with ID \"{}\" of {} and date {} was found.",
        p.name.as_deref().unwrap_or("(unknown)"),
        p.amount.as_deref().unwrap_or("(unknown)"),
        date
    )
}

pub async fn get_all_payments(s: &Services, account: &str) -> Result<Vec<Payment>> {
    print_title(&format!("Listing all payments for account {}", account));
    let payments = s.payments.list(account).await?.payments.unwrap_or_default();
    if payments.is_empty() {
        println!("No payments found.");
    }
    for p in payments.iter() {
        println!("{}", describe(p));
    }
    println!();
    Ok(payments)
}

#[cfg(test)]
mod tests {
    use super::*;
    use adsense_common::adsense_v2::Date;

    #[test]
    fn paid_and_unpaid() {
        let paid = Payment {
            name: Some("accounts/pub-1/payments/2021-03-21".into()),
            amount: Some("$123.45".into()),
            date: Some(Date {
                year: Some(2021),
                month: Some(3),
                day: Some(21),
            }),
        };
        assert_eq!(
            describe(&paid),
            "Payment with ID \"accounts/pub-1/payments/2021-03-21\" of $123.45 and date 2021-03-21 was found."
        );
        let unpaid = Payment {
            name: Some("accounts/pub-1/payments/unpaid".into()),
            amount: Some("$1.00".into()),
            date: None,
        };
        assert!(describe(&unpaid).ends_with("and date unknown was found."));
    }
}
