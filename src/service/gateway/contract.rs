use async_trait::async_trait;

use super::error::GatewayError;
use super::models::{
    CardInfo, ContactInfo, InvoiceAllocation, StoredAccountRef, TransactionResult,
};

/// Direct-card processing capability: the caller passes raw card data with
/// every money-movement request.
#[async_trait]
pub trait CcPayments {
    /// Charge a credit card in a single step.
    async fn process_cc(
        &self,
        card: &CardInfo,
        amount: f64,
        invoices: &[InvoiceAllocation],
    ) -> Result<TransactionResult, GatewayError>;

    /// Authorize an amount on a credit card without charging it.
    async fn authorize_cc(
        &self,
        card: &CardInfo,
        amount: f64,
        invoices: &[InvoiceAllocation],
    ) -> Result<TransactionResult, GatewayError>;

    /// Charge a previously authorized transaction.
    async fn capture_cc(
        &self,
        reference_id: &str,
        transaction_id: &str,
        amount: f64,
        invoices: &[InvoiceAllocation],
    ) -> Result<TransactionResult, GatewayError>;

    /// Void a previously authorized or captured transaction.
    async fn void_cc(
        &self,
        reference_id: &str,
        transaction_id: &str,
    ) -> Result<TransactionResult, GatewayError>;

    /// Refund all or part of a captured transaction.
    async fn refund_cc(
        &self,
        reference_id: &str,
        transaction_id: &str,
        amount: f64,
    ) -> Result<TransactionResult, GatewayError>;
}

/// Offsite-stored-card capability: payment methods are tokenized on the
/// remote processor and referenced by an opaque id pair afterwards.
#[async_trait]
pub trait CcOffsitePayments {
    /// Whether the caller should route card payments through the stored path
    /// instead of the direct one.
    fn requires_cc_storage(&self) -> bool;

    /// Tokenize a card on the remote processor under the given billing
    /// contact. Pass an existing `client_reference_id` to attach the account
    /// to a customer already known to the processor.
    async fn store_cc(
        &self,
        card: &CardInfo,
        contact: &ContactInfo,
        client_reference_id: Option<&str>,
    ) -> Result<StoredAccountRef, GatewayError>;

    /// Replace the card data behind an existing stored account.
    async fn update_cc(
        &self,
        card: &CardInfo,
        contact: &ContactInfo,
        account: &StoredAccountRef,
    ) -> Result<StoredAccountRef, GatewayError>;

    /// Remove a stored account from the remote processor. Returns the id
    /// pair that was removed.
    async fn remove_cc(
        &self,
        account: &StoredAccountRef,
    ) -> Result<StoredAccountRef, GatewayError>;

    async fn process_stored_cc(
        &self,
        account: &StoredAccountRef,
        amount: f64,
        invoices: &[InvoiceAllocation],
    ) -> Result<TransactionResult, GatewayError>;

    async fn authorize_stored_cc(
        &self,
        account: &StoredAccountRef,
        amount: f64,
        invoices: &[InvoiceAllocation],
    ) -> Result<TransactionResult, GatewayError>;

    async fn capture_stored_cc(
        &self,
        account: &StoredAccountRef,
        reference_id: &str,
        transaction_id: &str,
        amount: f64,
        invoices: &[InvoiceAllocation],
    ) -> Result<TransactionResult, GatewayError>;

    async fn void_stored_cc(
        &self,
        account: &StoredAccountRef,
        reference_id: &str,
        transaction_id: &str,
    ) -> Result<TransactionResult, GatewayError>;

    async fn refund_stored_cc(
        &self,
        account: &StoredAccountRef,
        reference_id: &str,
        transaction_id: &str,
        amount: f64,
    ) -> Result<TransactionResult, GatewayError>;
}
