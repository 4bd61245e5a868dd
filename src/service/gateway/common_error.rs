pub const ERROR_CARD_NUMBER_INVALID: &str = "card_number_invalid";
pub const ERROR_CARD_EXPIRED: &str = "card_expired";
pub const ERROR_ROUTING_NUMBER_INVALID: &str = "routing_number_invalid";
pub const ERROR_ACCOUNT_NUMBER_INVALID: &str = "account_number_invalid";
pub const ERROR_DUPLICATE_TRANSACTION: &str = "duplicate_transaction";
pub const ERROR_CARD_NOT_ACCEPTED: &str = "card_not_accepted";
pub const ERROR_INVALID_SECURITY_CODE: &str = "invalid_security_code";
pub const ERROR_ADDRESS_VERIFICATION_FAILED: &str = "address_verification_failed";
pub const ERROR_TRANSACTION_NOT_FOUND: &str = "transaction_not_found";
pub const ERROR_UNSUPPORTED: &str = "unsupported";
pub const ERROR_GENERAL: &str = "general";

/// The fixed set of rejection kinds every processor decline is classified
/// into, each bound to the input field the caller should correct.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CommonError {
    CardNumberInvalid,
    CardExpired,
    RoutingNumberInvalid,
    AccountNumberInvalid,
    DuplicateTransaction,
    CardNotAccepted,
    InvalidSecurityCode,
    AddressVerificationFailed,
    TransactionNotFound,
    Unsupported,
    General,
}

impl CommonError {
    pub fn from(s: &str) -> Option<Self> {
        match s {
            ERROR_CARD_NUMBER_INVALID => Some(CommonError::CardNumberInvalid),
            ERROR_CARD_EXPIRED => Some(CommonError::CardExpired),
            ERROR_ROUTING_NUMBER_INVALID => Some(CommonError::RoutingNumberInvalid),
            ERROR_ACCOUNT_NUMBER_INVALID => Some(CommonError::AccountNumberInvalid),
            ERROR_DUPLICATE_TRANSACTION => Some(CommonError::DuplicateTransaction),
            ERROR_CARD_NOT_ACCEPTED => Some(CommonError::CardNotAccepted),
            ERROR_INVALID_SECURITY_CODE => Some(CommonError::InvalidSecurityCode),
            ERROR_ADDRESS_VERIFICATION_FAILED => Some(CommonError::AddressVerificationFailed),
            ERROR_TRANSACTION_NOT_FOUND => Some(CommonError::TransactionNotFound),
            ERROR_UNSUPPORTED => Some(CommonError::Unsupported),
            ERROR_GENERAL => Some(CommonError::General),
            _ => None,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            CommonError::CardNumberInvalid => ERROR_CARD_NUMBER_INVALID,
            CommonError::CardExpired => ERROR_CARD_EXPIRED,
            CommonError::RoutingNumberInvalid => ERROR_ROUTING_NUMBER_INVALID,
            CommonError::AccountNumberInvalid => ERROR_ACCOUNT_NUMBER_INVALID,
            CommonError::DuplicateTransaction => ERROR_DUPLICATE_TRANSACTION,
            CommonError::CardNotAccepted => ERROR_CARD_NOT_ACCEPTED,
            CommonError::InvalidSecurityCode => ERROR_INVALID_SECURITY_CODE,
            CommonError::AddressVerificationFailed => ERROR_ADDRESS_VERIFICATION_FAILED,
            CommonError::TransactionNotFound => ERROR_TRANSACTION_NOT_FOUND,
            CommonError::Unsupported => ERROR_UNSUPPORTED,
            CommonError::General => ERROR_GENERAL,
        }
    }

    /// The form field this rejection is bound to. `Unsupported` and `General`
    /// are not tied to any single input.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            CommonError::CardNumberInvalid => Some("card_number"),
            CommonError::CardExpired => Some("card_exp"),
            CommonError::RoutingNumberInvalid => Some("routing_number"),
            CommonError::AccountNumberInvalid => Some("account_number"),
            CommonError::DuplicateTransaction => Some("amount"),
            CommonError::CardNotAccepted => Some("type"),
            CommonError::InvalidSecurityCode => Some("card_security_code"),
            CommonError::AddressVerificationFailed => Some("zip"),
            CommonError::TransactionNotFound => Some("transaction_id"),
            CommonError::Unsupported => None,
            CommonError::General => None,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            CommonError::CardNumberInvalid => "The credit card number is invalid.",
            CommonError::CardExpired => "The credit card has expired.",
            CommonError::RoutingNumberInvalid => "The routing number is invalid.",
            CommonError::AccountNumberInvalid => "The account number is invalid.",
            CommonError::DuplicateTransaction => {
                "The transaction appears to be a duplicate and was not processed."
            }
            CommonError::CardNotAccepted => "That card type is not accepted.",
            CommonError::InvalidSecurityCode => "The security code is invalid.",
            CommonError::AddressVerificationFailed => "Address verification failed.",
            CommonError::TransactionNotFound => {
                "The transaction was not found on the remote gateway."
            }
            CommonError::Unsupported => "The requested action is not supported by the gateway.",
            CommonError::General => "An error occurred when processing the request.",
        }
    }
}

/// Look up the `(field, message)` pair for a common-error identifier.
/// Unknown identifiers have no mapping.
pub fn lookup(code: &str) -> Option<(Option<&'static str>, &'static str)> {
    CommonError::from(code).map(|e| (e.field(), e.message()))
}
