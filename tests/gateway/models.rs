use prairiepay::service::gateway::models::{CardExpiration, CardType, TransactionStatus};

#[test]
fn transaction_status_round_trips_the_host_vocabulary() {
    for s in [
        "approved",
        "declined",
        "void",
        "pending",
        "reconciled",
        "refunded",
        "returned",
    ] {
        let status = TransactionStatus::from(s).expect("known status did not parse");
        assert_eq!(status.as_str(), s);
    }
    assert!(TransactionStatus::from("charged").is_none());
}

#[test]
fn card_expiration_renders_the_processor_wire_form() {
    let exp = CardExpiration {
        year: 2027,
        month: 3,
    };
    assert_eq!(exp.mmyy(), "0327");
}

#[test]
fn card_expiration_is_checked_by_month_not_day() {
    let exp = CardExpiration {
        year: 2025,
        month: 6,
    };
    let last_valid_day = chrono::NaiveDate::from_ymd_opt(2025, 6, 30).unwrap();
    let first_expired_day = chrono::NaiveDate::from_ymd_opt(2025, 7, 1).unwrap();
    assert!(!exp.is_expired(last_valid_day));
    assert!(exp.is_expired(first_expired_day));
}

#[test]
fn card_types_parse_from_host_codes() {
    assert_eq!(CardType::from("mc"), Some(CardType::Mastercard));
    assert_eq!(CardType::from("amex"), Some(CardType::Amex));
    assert_eq!(CardType::from("Visa"), Some(CardType::Visa));
    assert!(CardType::from("maestro").is_none());
}
