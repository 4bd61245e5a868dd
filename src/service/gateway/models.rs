use std::fmt::Display;

use chrono::Datelike;
use serde::{Deserialize, Serialize};

pub const TRANSACTION_STATUS_APPROVED: &str = "approved";
pub const TRANSACTION_STATUS_DECLINED: &str = "declined";
pub const TRANSACTION_STATUS_VOID: &str = "void";
pub const TRANSACTION_STATUS_PENDING: &str = "pending";
pub const TRANSACTION_STATUS_RECONCILED: &str = "reconciled";
pub const TRANSACTION_STATUS_REFUNDED: &str = "refunded";
pub const TRANSACTION_STATUS_RETURNED: &str = "returned";

/// Status vocabulary the host understands for any money-movement result.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    Approved,
    Declined,
    Void,
    Pending,
    Reconciled,
    Refunded,
    Returned,
}

impl TransactionStatus {
    pub fn from(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            TRANSACTION_STATUS_APPROVED => Some(TransactionStatus::Approved),
            TRANSACTION_STATUS_DECLINED => Some(TransactionStatus::Declined),
            TRANSACTION_STATUS_VOID => Some(TransactionStatus::Void),
            TRANSACTION_STATUS_PENDING => Some(TransactionStatus::Pending),
            TRANSACTION_STATUS_RECONCILED => Some(TransactionStatus::Reconciled),
            TRANSACTION_STATUS_REFUNDED => Some(TransactionStatus::Refunded),
            TRANSACTION_STATUS_RETURNED => Some(TransactionStatus::Returned),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionStatus::Approved => TRANSACTION_STATUS_APPROVED,
            TransactionStatus::Declined => TRANSACTION_STATUS_DECLINED,
            TransactionStatus::Void => TRANSACTION_STATUS_VOID,
            TransactionStatus::Pending => TRANSACTION_STATUS_PENDING,
            TransactionStatus::Reconciled => TRANSACTION_STATUS_RECONCILED,
            TransactionStatus::Refunded => TRANSACTION_STATUS_REFUNDED,
            TransactionStatus::Returned => TRANSACTION_STATUS_RETURNED,
        }
    }
}

impl Display for TransactionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardType {
    Visa,
    Mastercard,
    Amex,
    Discover,
    Jcb,
    Diners,
}

impl CardType {
    pub fn from(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "visa" => Some(CardType::Visa),
            "mc" | "mastercard" => Some(CardType::Mastercard),
            "amex" | "american express" => Some(CardType::Amex),
            "disc" | "discover" => Some(CardType::Discover),
            "jcb" => Some(CardType::Jcb),
            "dc-int" | "diners club" => Some(CardType::Diners),
            _ => None,
        }
    }

    /// The spelling the processor expects in the `type` field of a card payload.
    pub fn as_processor_str(&self) -> &'static str {
        match self {
            CardType::Visa => "Visa",
            CardType::Mastercard => "Mastercard",
            CardType::Amex => "American Express",
            CardType::Discover => "Discover",
            CardType::Jcb => "JCB",
            CardType::Diners => "Diners Club",
        }
    }
}

impl Display for CardType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_processor_str())
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Address {
    pub address1: String,
    pub address2: Option<String>,
    pub city: String,
    /// 2 or 3-character state/province code.
    pub state: String,
    /// 2-character country code.
    pub country: String,
    pub zip: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardExpiration {
    pub year: u16,
    pub month: u8,
}

impl CardExpiration {
    /// Wire form used by the processor, e.g. 2027-03 becomes "0327".
    pub fn mmyy(&self) -> String {
        format!("{:02}{:02}", self.month, self.year % 100)
    }

    pub fn is_expired(&self, today: chrono::NaiveDate) -> bool {
        (i32::from(self.year), u32::from(self.month)) < (today.year(), today.month())
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CardInfo {
    pub first_name: String,
    pub last_name: String,
    pub card_number: String,
    pub expiration: CardExpiration,
    pub security_code: Option<String>,
    pub card_type: CardType,
    pub billing_address: Address,
}

impl CardInfo {
    pub fn cardholder_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Billing contact a stored account is set up under on the remote processor.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ContactInfo {
    pub first_name: String,
    pub last_name: String,
    pub company: Option<String>,
    pub email: String,
    pub address: Address,
}

/// Portion of a payment attributed to one invoice, passed through to the
/// processor as reconciliation metadata. The sum is never checked against the
/// transaction amount here.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct InvoiceAllocation {
    pub invoice_id: String,
    pub amount: f64,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TransactionResult {
    pub status: TransactionStatus,
    /// Gateway-local reference for this transaction, minted per submission.
    pub reference_id: Option<String>,
    /// The id the remote processor assigned to the transaction.
    pub transaction_id: String,
    pub message: Option<String>,
}

/// Opaque handle pair for a payment method tokenized on the remote processor.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredAccountRef {
    pub client_reference_id: String,
    pub account_reference_id: String,
}
