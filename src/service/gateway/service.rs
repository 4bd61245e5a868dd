use std::sync::Arc;

use async_trait::async_trait;
use tracing::error;
use uuid::Uuid;

use crate::client::{
    ChargeParams, FollowUpParams, PaymentSource, ProcessorClient, ProcessorError,
    ProcessorTransaction, StoreAccountParams, UpdateAccountParams,
};
use crate::config::{GatewayMeta, Settings};

use super::common_error::CommonError;
use super::contract::{CcOffsitePayments, CcPayments};
use super::error::GatewayError;
use super::models::{
    CardInfo, ContactInfo, InvoiceAllocation, StoredAccountRef, TransactionResult,
    TransactionStatus,
};

pub const DEFAULT_CURRENCY: &str = "USD";

/// The transaction adapter. Direct-card and stored-card operations share one
/// submit path, differing only in the payment source they hand the
/// processor client.
pub struct Service {
    client: Arc<dyn ProcessorClient>,
    meta: GatewayMeta,
    currency: String,
}

enum FollowUpOp {
    Capture,
    Void,
    Refund,
}

impl FollowUpOp {
    fn success_status(&self) -> TransactionStatus {
        match self {
            FollowUpOp::Capture => TransactionStatus::Approved,
            FollowUpOp::Void => TransactionStatus::Void,
            FollowUpOp::Refund => TransactionStatus::Refunded,
        }
    }

    fn name(&self) -> &'static str {
        match self {
            FollowUpOp::Capture => "capture",
            FollowUpOp::Void => "void",
            FollowUpOp::Refund => "refund",
        }
    }
}

impl Service {
    pub fn new(client: Arc<dyn ProcessorClient>, meta: GatewayMeta) -> Self {
        Service {
            client,
            meta,
            currency: DEFAULT_CURRENCY.to_string(),
        }
    }

    /// Builds the service from loaded settings: validates the gateway meta
    /// and applies the configured currency when one is set.
    pub fn from_settings(
        client: Arc<dyn ProcessorClient>,
        settings: &Settings,
    ) -> Result<Self, GatewayError> {
        let meta = settings.gateway.meta()?;
        let mut service = Service::new(client, meta);
        if let Some(currency) = &settings.gateway.currency {
            service.set_currency(currency);
        }
        Ok(service)
    }

    /// Sets the ISO 4217 currency code used for all subsequent payments.
    pub fn set_currency(&mut self, currency: &str) {
        self.currency = currency.to_string();
    }

    async fn submit(
        &self,
        authorize_only: bool,
        source: PaymentSource,
        amount: f64,
        invoices: &[InvoiceAllocation],
    ) -> Result<TransactionResult, GatewayError> {
        let reference_id = Uuid::new_v4().to_string();
        let params = ChargeParams {
            source,
            amount,
            currency: self.currency.clone(),
            merchant_ref: reference_id.clone(),
            invoices: invoices.to_vec(),
        };
        let result = if authorize_only {
            self.client.authorize(params).await
        } else {
            self.client.charge(params).await
        };
        let txn = match result {
            Ok(txn) => txn,
            Err(e) => {
                error!("cannot submit transaction {} due to err: {}", reference_id, e);
                return Err(map_processor_error(e));
            }
        };
        // An authorization that went through is money on hold, not money
        // moved, so it surfaces as pending until captured.
        let success_status = if authorize_only {
            TransactionStatus::Pending
        } else {
            TransactionStatus::Approved
        };
        Ok(transaction_result(txn, reference_id, success_status))
    }

    async fn follow_up(
        &self,
        op: FollowUpOp,
        reference_id: &str,
        transaction_id: &str,
        amount: Option<f64>,
        invoices: &[InvoiceAllocation],
    ) -> Result<TransactionResult, GatewayError> {
        let params = FollowUpParams {
            merchant_ref: reference_id.to_string(),
            transaction_id: transaction_id.to_string(),
            amount,
            currency: self.currency.clone(),
            invoices: invoices.to_vec(),
        };
        let result = match op {
            FollowUpOp::Capture => self.client.capture(params).await,
            FollowUpOp::Void => self.client.void(params).await,
            FollowUpOp::Refund => self.client.refund(params).await,
        };
        let txn = match result {
            Ok(txn) => txn,
            Err(e) => {
                error!(
                    "cannot {} transaction {} due to err: {}",
                    op.name(),
                    transaction_id,
                    e
                );
                return Err(map_processor_error(e));
            }
        };
        Ok(transaction_result(
            txn,
            reference_id.to_string(),
            op.success_status(),
        ))
    }

    fn check_not_expired(&self, card: &CardInfo) -> Result<(), GatewayError> {
        if card.expiration.is_expired(chrono::Utc::now().date_naive()) {
            return Err(GatewayError::Validation {
                field: "card_exp".to_string(),
                message: CommonError::CardExpired.message().to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl CcPayments for Service {
    async fn process_cc(
        &self,
        card: &CardInfo,
        amount: f64,
        invoices: &[InvoiceAllocation],
    ) -> Result<TransactionResult, GatewayError> {
        self.submit(false, PaymentSource::Card(card.clone()), amount, invoices)
            .await
    }

    async fn authorize_cc(
        &self,
        card: &CardInfo,
        amount: f64,
        invoices: &[InvoiceAllocation],
    ) -> Result<TransactionResult, GatewayError> {
        self.submit(true, PaymentSource::Card(card.clone()), amount, invoices)
            .await
    }

    async fn capture_cc(
        &self,
        reference_id: &str,
        transaction_id: &str,
        amount: f64,
        invoices: &[InvoiceAllocation],
    ) -> Result<TransactionResult, GatewayError> {
        self.follow_up(
            FollowUpOp::Capture,
            reference_id,
            transaction_id,
            Some(amount),
            invoices,
        )
        .await
    }

    async fn void_cc(
        &self,
        reference_id: &str,
        transaction_id: &str,
    ) -> Result<TransactionResult, GatewayError> {
        self.follow_up(FollowUpOp::Void, reference_id, transaction_id, None, &[])
            .await
    }

    async fn refund_cc(
        &self,
        reference_id: &str,
        transaction_id: &str,
        amount: f64,
    ) -> Result<TransactionResult, GatewayError> {
        self.follow_up(
            FollowUpOp::Refund,
            reference_id,
            transaction_id,
            Some(amount),
            &[],
        )
        .await
    }
}

#[async_trait]
impl CcOffsitePayments for Service {
    fn requires_cc_storage(&self) -> bool {
        self.meta.stored
    }

    async fn store_cc(
        &self,
        card: &CardInfo,
        contact: &ContactInfo,
        client_reference_id: Option<&str>,
    ) -> Result<StoredAccountRef, GatewayError> {
        self.check_not_expired(card)?;
        let params = StoreAccountParams {
            card: card.clone(),
            contact: contact.clone(),
            client_reference_id: client_reference_id.map(str::to_string),
        };
        match self.client.store_account(params).await {
            Ok(account) => Ok(account),
            Err(e) => {
                error!("cannot store account due to err: {}", e);
                Err(map_processor_error(e))
            }
        }
    }

    async fn update_cc(
        &self,
        card: &CardInfo,
        contact: &ContactInfo,
        account: &StoredAccountRef,
    ) -> Result<StoredAccountRef, GatewayError> {
        self.check_not_expired(card)?;
        let params = UpdateAccountParams {
            card: card.clone(),
            contact: contact.clone(),
            account: account.clone(),
        };
        match self.client.update_account(params).await {
            Ok(account) => Ok(account),
            Err(e) => {
                error!(
                    "cannot update account {} due to err: {}",
                    account.account_reference_id, e
                );
                Err(map_processor_error(e))
            }
        }
    }

    async fn remove_cc(
        &self,
        account: &StoredAccountRef,
    ) -> Result<StoredAccountRef, GatewayError> {
        match self.client.remove_account(account).await {
            Ok(()) => Ok(account.clone()),
            Err(e) => {
                error!(
                    "cannot remove account {} due to err: {}",
                    account.account_reference_id, e
                );
                Err(map_processor_error(e))
            }
        }
    }

    async fn process_stored_cc(
        &self,
        account: &StoredAccountRef,
        amount: f64,
        invoices: &[InvoiceAllocation],
    ) -> Result<TransactionResult, GatewayError> {
        self.submit(
            false,
            PaymentSource::Stored(account.clone()),
            amount,
            invoices,
        )
        .await
    }

    async fn authorize_stored_cc(
        &self,
        account: &StoredAccountRef,
        amount: f64,
        invoices: &[InvoiceAllocation],
    ) -> Result<TransactionResult, GatewayError> {
        self.submit(
            true,
            PaymentSource::Stored(account.clone()),
            amount,
            invoices,
        )
        .await
    }

    async fn capture_stored_cc(
        &self,
        _account: &StoredAccountRef,
        reference_id: &str,
        transaction_id: &str,
        amount: f64,
        invoices: &[InvoiceAllocation],
    ) -> Result<TransactionResult, GatewayError> {
        // Follow-ups are keyed by transaction id on the processor side; the
        // stored account only scopes the original authorization.
        self.follow_up(
            FollowUpOp::Capture,
            reference_id,
            transaction_id,
            Some(amount),
            invoices,
        )
        .await
    }

    async fn void_stored_cc(
        &self,
        _account: &StoredAccountRef,
        reference_id: &str,
        transaction_id: &str,
    ) -> Result<TransactionResult, GatewayError> {
        self.follow_up(FollowUpOp::Void, reference_id, transaction_id, None, &[])
            .await
    }

    async fn refund_stored_cc(
        &self,
        _account: &StoredAccountRef,
        reference_id: &str,
        transaction_id: &str,
        amount: f64,
    ) -> Result<TransactionResult, GatewayError> {
        self.follow_up(
            FollowUpOp::Refund,
            reference_id,
            transaction_id,
            Some(amount),
            &[],
        )
        .await
    }
}

/// Map an accepted-but-possibly-declined processor outcome onto the host's
/// result shape. Declines keep the transaction id and pick up the common
/// table's message when the response code maps to one.
fn transaction_result(
    txn: ProcessorTransaction,
    reference_id: String,
    success_status: TransactionStatus,
) -> TransactionResult {
    if txn.approved {
        return TransactionResult {
            status: success_status,
            reference_id: Some(reference_id),
            transaction_id: txn.transaction_id,
            message: txn.message,
        };
    }
    let message = txn
        .error_kind
        .as_deref()
        .and_then(CommonError::from)
        .map(|e| e.message().to_string())
        .or(txn.message);
    TransactionResult {
        status: TransactionStatus::Declined,
        reference_id: Some(reference_id),
        transaction_id: txn.transaction_id,
        message,
    }
}

fn map_processor_error(e: ProcessorError) -> GatewayError {
    match e {
        ProcessorError::Authentication => GatewayError::Authentication,
        ProcessorError::NotFound { resource } => GatewayError::NotFound {
            reference: resource,
        },
        ProcessorError::InvalidAmount { message } => GatewayError::InvalidAmount { message },
        ProcessorError::Api { code, message } => GatewayError::Rejected {
            message: format!("{} ({})", message, code),
        },
        other => GatewayError::Unexpected {
            message: "cannot reach the payment processor".to_string(),
            source: Box::new(other) as Box<dyn std::error::Error + Send + Sync>,
        },
    }
}
