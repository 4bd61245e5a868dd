use prairiepay::service::gateway::common_error::{lookup, CommonError};

#[test]
fn every_known_identifier_maps_to_a_deterministic_pair() {
    let expected = [
        ("card_number_invalid", Some("card_number")),
        ("card_expired", Some("card_exp")),
        ("routing_number_invalid", Some("routing_number")),
        ("account_number_invalid", Some("account_number")),
        ("duplicate_transaction", Some("amount")),
        ("card_not_accepted", Some("type")),
        ("invalid_security_code", Some("card_security_code")),
        ("address_verification_failed", Some("zip")),
        ("transaction_not_found", Some("transaction_id")),
        ("unsupported", None),
        ("general", None),
    ];
    for (code, field) in expected {
        let (got_field, message) = lookup(code).expect("known identifier has no mapping");
        assert_eq!(got_field, field, "field binding for {}", code);
        assert!(!message.is_empty());
        // Deterministic: a second lookup yields the same pair.
        assert_eq!(lookup(code), Some((got_field, message)));
    }
}

#[test]
fn unknown_identifiers_have_no_mapping() {
    assert_eq!(lookup("card_on_fire"), None);
    assert_eq!(lookup(""), None);
}

#[test]
fn identifiers_round_trip_through_the_enum() {
    for code in [
        "card_number_invalid",
        "card_expired",
        "routing_number_invalid",
        "account_number_invalid",
        "duplicate_transaction",
        "card_not_accepted",
        "invalid_security_code",
        "address_verification_failed",
        "transaction_not_found",
        "unsupported",
        "general",
    ] {
        let err = CommonError::from(code).expect("known identifier did not parse");
        assert_eq!(err.code(), code);
    }
}
