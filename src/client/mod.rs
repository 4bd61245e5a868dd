pub mod payeezy;

use async_trait::async_trait;
use snafu::Snafu;

use crate::service::gateway::models::{
    CardInfo, ContactInfo, InvoiceAllocation, StoredAccountRef,
};

/// What a transaction is paid with: raw card data sent along with the
/// request, or a payment method previously tokenized on the processor.
#[derive(Clone, Debug)]
pub enum PaymentSource {
    Card(CardInfo),
    Stored(StoredAccountRef),
}

#[derive(Clone, Debug)]
pub struct ChargeParams {
    pub source: PaymentSource,
    pub amount: f64,
    pub currency: String,
    /// Gateway-local reference submitted as the merchant reference.
    pub merchant_ref: String,
    pub invoices: Vec<InvoiceAllocation>,
}

/// Parameters for operations that follow up on an earlier transaction
/// (capture, void, refund).
#[derive(Clone, Debug)]
pub struct FollowUpParams {
    pub merchant_ref: String,
    pub transaction_id: String,
    /// None for void, which always applies to the full amount.
    pub amount: Option<f64>,
    pub currency: String,
    pub invoices: Vec<InvoiceAllocation>,
}

#[derive(Clone, Debug)]
pub struct StoreAccountParams {
    pub card: CardInfo,
    pub contact: ContactInfo,
    /// Existing customer on the processor to attach the account to, if any.
    pub client_reference_id: Option<String>,
}

#[derive(Clone, Debug)]
pub struct UpdateAccountParams {
    pub card: CardInfo,
    pub contact: ContactInfo,
    pub account: StoredAccountRef,
}

/// Normalized outcome of a transaction the processor accepted for
/// processing. A decline is a valid outcome here, not an error.
#[derive(Clone, Debug)]
pub struct ProcessorTransaction {
    pub transaction_id: String,
    pub approved: bool,
    /// Common-error identifier the processor's response code normalized to,
    /// present when the transaction was declined.
    pub error_kind: Option<String>,
    pub message: Option<String>,
}

#[derive(Debug, Snafu)]
pub enum ProcessorError {
    #[snafu(display("cannot reach the processor: {source}"))]
    Transport { source: reqwest::Error },
    #[snafu(display("the processor rejected the api key"))]
    Authentication,
    #[snafu(display("{resource} not found on the processor"))]
    NotFound { resource: String },
    #[snafu(display("amount not accepted by the processor: {message}"))]
    InvalidAmount { message: String },
    #[snafu(display("processor error {code}: {message}"))]
    Api { code: String, message: String },
    #[snafu(display("cannot decode processor response: {source}"))]
    UnexpectedPayload { source: reqwest::Error },
    #[snafu(display("invalid processor base url: {source}"))]
    InvalidBaseUrl { source: url::ParseError },
}

/// The remote card processor, reduced to the calls the gateway needs.
#[async_trait]
pub trait ProcessorClient: Send + Sync {
    async fn charge(&self, params: ChargeParams) -> Result<ProcessorTransaction, ProcessorError>;
    async fn authorize(&self, params: ChargeParams)
        -> Result<ProcessorTransaction, ProcessorError>;
    async fn capture(&self, params: FollowUpParams)
        -> Result<ProcessorTransaction, ProcessorError>;
    async fn void(&self, params: FollowUpParams) -> Result<ProcessorTransaction, ProcessorError>;
    async fn refund(&self, params: FollowUpParams) -> Result<ProcessorTransaction, ProcessorError>;
    async fn store_account(
        &self,
        params: StoreAccountParams,
    ) -> Result<StoredAccountRef, ProcessorError>;
    async fn update_account(
        &self,
        params: UpdateAccountParams,
    ) -> Result<StoredAccountRef, ProcessorError>;
    async fn remove_account(&self, account: &StoredAccountRef) -> Result<(), ProcessorError>;
}
