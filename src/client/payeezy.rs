use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

use crate::config::ProcessorConfig;
use crate::service::gateway::common_error;
use crate::service::gateway::models::{Address, CardInfo, StoredAccountRef};

use super::{
    ChargeParams, FollowUpParams, PaymentSource, ProcessorClient, ProcessorError,
    ProcessorTransaction, StoreAccountParams, UpdateAccountParams,
};

pub const TRANSACTION_TYPE_PURCHASE: &str = "purchase";
pub const TRANSACTION_TYPE_AUTHORIZE: &str = "authorize";
pub const TRANSACTION_TYPE_CAPTURE: &str = "capture";
pub const TRANSACTION_TYPE_VOID: &str = "void";
pub const TRANSACTION_TYPE_REFUND: &str = "refund";

const TOKEN_TYPE: &str = "FDToken";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// HTTP client for the processor's transactions and customer-vault
/// endpoints. Amounts travel as integer cents.
#[derive(Clone)]
pub struct PayeezyClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl PayeezyClient {
    pub fn new(cfg: &ProcessorConfig, api_key: &str) -> Result<Self, ProcessorError> {
        let base_url = url::Url::parse(&cfg.url)
            .map_err(|e| ProcessorError::InvalidBaseUrl { source: e })?;
        let timeout = Duration::from_secs(cfg.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS));
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ProcessorError::Transport { source: e })?;
        Ok(PayeezyClient {
            http,
            base_url: base_url.as_str().trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        })
    }

    fn transactions_url(&self) -> String {
        format!("{}/v1/transactions", self.base_url)
    }

    fn transaction_url(&self, transaction_id: &str) -> String {
        format!("{}/v1/transactions/{}", self.base_url, transaction_id)
    }

    fn customers_url(&self) -> String {
        format!("{}/v1/customers", self.base_url)
    }

    fn account_url(&self, account: &StoredAccountRef) -> String {
        format!(
            "{}/v1/customers/{}/accounts/{}",
            self.base_url, account.client_reference_id, account.account_reference_id
        )
    }

    async fn submit_charge(
        &self,
        transaction_type: &'static str,
        params: &ChargeParams,
    ) -> Result<ProcessorTransaction, ProcessorError> {
        let (credit_card, token) = match &params.source {
            PaymentSource::Card(card) => (Some(card_payload(card)), None),
            PaymentSource::Stored(account) => (
                None,
                Some(TokenPayload {
                    token_type: TOKEN_TYPE,
                    customer_ref: &account.client_reference_id,
                    value: &account.account_reference_id,
                }),
            ),
        };
        let body = TransactionRequest {
            transaction_type,
            merchant_ref: &params.merchant_ref,
            currency_code: &params.currency,
            amount: Some(to_cents(params.amount)),
            credit_card,
            token,
            invoices: params
                .invoices
                .iter()
                .map(|i| InvoicePayload {
                    id: &i.invoice_id,
                    amount: to_cents(i.amount),
                })
                .collect(),
        };
        let resource = match &params.source {
            PaymentSource::Card(_) => "transaction",
            PaymentSource::Stored(account) => account.account_reference_id.as_str(),
        };
        self.post_transaction(self.transactions_url(), &body, resource)
            .await
    }

    async fn submit_follow_up(
        &self,
        transaction_type: &'static str,
        params: &FollowUpParams,
    ) -> Result<ProcessorTransaction, ProcessorError> {
        let body = TransactionRequest {
            transaction_type,
            merchant_ref: &params.merchant_ref,
            currency_code: &params.currency,
            amount: params.amount.map(to_cents),
            credit_card: None,
            token: None,
            invoices: params
                .invoices
                .iter()
                .map(|i| InvoicePayload {
                    id: &i.invoice_id,
                    amount: to_cents(i.amount),
                })
                .collect(),
        };
        self.post_transaction(
            self.transaction_url(&params.transaction_id),
            &body,
            &params.transaction_id,
        )
        .await
    }

    async fn post_transaction(
        &self,
        url: String,
        body: &TransactionRequest<'_>,
        resource: &str,
    ) -> Result<ProcessorTransaction, ProcessorError> {
        let response = self
            .http
            .post(&url)
            .header("apikey", &self.api_key)
            .json(body)
            .send()
            .await
            .map_err(|e| ProcessorError::Transport { source: e })?;
        let status = response.status();
        if !status.is_success() {
            return Err(api_error(status, response, resource).await);
        }
        let payload: TransactionResponse = response
            .json()
            .await
            .map_err(|e| ProcessorError::UnexpectedPayload { source: e })?;
        let approved = payload.transaction_status.eq_ignore_ascii_case("approved");
        let error_kind = if approved {
            None
        } else {
            Some(classify_response_code(payload.gateway_resp_code.as_deref()).to_string())
        };
        Ok(ProcessorTransaction {
            transaction_id: payload.transaction_id,
            approved,
            error_kind,
            message: payload.bank_message,
        })
    }

    async fn read_customer(
        &self,
        response: reqwest::Response,
        resource: &str,
    ) -> Result<StoredAccountRef, ProcessorError> {
        let status = response.status();
        if !status.is_success() {
            return Err(api_error(status, response, resource).await);
        }
        let payload: CustomerResponse = response
            .json()
            .await
            .map_err(|e| ProcessorError::UnexpectedPayload { source: e })?;
        Ok(StoredAccountRef {
            client_reference_id: payload.customer_ref,
            account_reference_id: payload.account_ref,
        })
    }
}

#[async_trait]
impl ProcessorClient for PayeezyClient {
    async fn charge(&self, params: ChargeParams) -> Result<ProcessorTransaction, ProcessorError> {
        self.submit_charge(TRANSACTION_TYPE_PURCHASE, &params).await
    }

    async fn authorize(
        &self,
        params: ChargeParams,
    ) -> Result<ProcessorTransaction, ProcessorError> {
        self.submit_charge(TRANSACTION_TYPE_AUTHORIZE, &params)
            .await
    }

    async fn capture(
        &self,
        params: FollowUpParams,
    ) -> Result<ProcessorTransaction, ProcessorError> {
        self.submit_follow_up(TRANSACTION_TYPE_CAPTURE, &params)
            .await
    }

    async fn void(&self, params: FollowUpParams) -> Result<ProcessorTransaction, ProcessorError> {
        self.submit_follow_up(TRANSACTION_TYPE_VOID, &params).await
    }

    async fn refund(
        &self,
        params: FollowUpParams,
    ) -> Result<ProcessorTransaction, ProcessorError> {
        self.submit_follow_up(TRANSACTION_TYPE_REFUND, &params)
            .await
    }

    async fn store_account(
        &self,
        params: StoreAccountParams,
    ) -> Result<StoredAccountRef, ProcessorError> {
        let body = CustomerRequest {
            customer_ref: params.client_reference_id.as_deref(),
            first_name: &params.contact.first_name,
            last_name: &params.contact.last_name,
            company: params.contact.company.as_deref(),
            email: &params.contact.email,
            billing_address: &params.contact.address,
            credit_card: card_payload(&params.card),
        };
        let response = self
            .http
            .post(self.customers_url())
            .header("apikey", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| ProcessorError::Transport { source: e })?;
        self.read_customer(response, "customer").await
    }

    async fn update_account(
        &self,
        params: UpdateAccountParams,
    ) -> Result<StoredAccountRef, ProcessorError> {
        let body = CustomerRequest {
            customer_ref: Some(&params.account.client_reference_id),
            first_name: &params.contact.first_name,
            last_name: &params.contact.last_name,
            company: params.contact.company.as_deref(),
            email: &params.contact.email,
            billing_address: &params.contact.address,
            credit_card: card_payload(&params.card),
        };
        let response = self
            .http
            .put(self.account_url(&params.account))
            .header("apikey", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| ProcessorError::Transport { source: e })?;
        self.read_customer(response, &params.account.account_reference_id)
            .await
    }

    async fn remove_account(&self, account: &StoredAccountRef) -> Result<(), ProcessorError> {
        let response = self
            .http
            .delete(self.account_url(account))
            .header("apikey", &self.api_key)
            .send()
            .await
            .map_err(|e| ProcessorError::Transport { source: e })?;
        let status = response.status();
        if !status.is_success() {
            return Err(api_error(status, response, &account.account_reference_id).await);
        }
        Ok(())
    }
}

async fn api_error(
    status: StatusCode,
    response: reqwest::Response,
    resource: &str,
) -> ProcessorError {
    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        return ProcessorError::Authentication;
    }
    if status == StatusCode::NOT_FOUND {
        return ProcessorError::NotFound {
            resource: resource.to_string(),
        };
    }
    match response.json::<ErrorResponse>().await {
        Ok(body) if body.error.code == "invalid_amount" => ProcessorError::InvalidAmount {
            message: body.error.message,
        },
        Ok(body) => ProcessorError::Api {
            code: body.error.code,
            message: body.error.message,
        },
        Err(_) => ProcessorError::Api {
            code: status.as_u16().to_string(),
            message: "unrecognized processor error".to_string(),
        },
    }
}

/// Normalize the processor's gateway response code onto the common-error
/// vocabulary. Codes follow the First Data exact response code scheme.
fn classify_response_code(code: Option<&str>) -> &'static str {
    match code.unwrap_or_default() {
        "08" | "31" => common_error::ERROR_INVALID_SECURITY_CODE,
        "22" => common_error::ERROR_CARD_NUMBER_INVALID,
        "25" => common_error::ERROR_CARD_EXPIRED,
        "27" => common_error::ERROR_CARD_NOT_ACCEPTED,
        "44" => common_error::ERROR_ADDRESS_VERIFICATION_FAILED,
        "63" => common_error::ERROR_DUPLICATE_TRANSACTION,
        "70" => common_error::ERROR_ROUTING_NUMBER_INVALID,
        "71" => common_error::ERROR_ACCOUNT_NUMBER_INVALID,
        "81" => common_error::ERROR_TRANSACTION_NOT_FOUND,
        "90" => common_error::ERROR_UNSUPPORTED,
        _ => common_error::ERROR_GENERAL,
    }
}

fn to_cents(amount: f64) -> i64 {
    (amount * 100.0).round() as i64
}

fn card_payload(card: &CardInfo) -> CreditCardPayload<'_> {
    CreditCardPayload {
        card_type: card.card_type.as_processor_str(),
        cardholder_name: card.cardholder_name(),
        card_number: &card.card_number,
        exp_date: card.expiration.mmyy(),
        cvv: card.security_code.as_deref(),
    }
}

#[derive(Debug, Serialize)]
struct TransactionRequest<'a> {
    transaction_type: &'a str,
    merchant_ref: &'a str,
    currency_code: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    amount: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    credit_card: Option<CreditCardPayload<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    token: Option<TokenPayload<'a>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    invoices: Vec<InvoicePayload<'a>>,
}

#[derive(Debug, Serialize)]
struct CreditCardPayload<'a> {
    #[serde(rename = "type")]
    card_type: &'static str,
    cardholder_name: String,
    card_number: &'a str,
    exp_date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    cvv: Option<&'a str>,
}

#[derive(Debug, Serialize)]
struct TokenPayload<'a> {
    token_type: &'a str,
    customer_ref: &'a str,
    value: &'a str,
}

#[derive(Debug, Serialize)]
struct InvoicePayload<'a> {
    id: &'a str,
    amount: i64,
}

#[derive(Debug, Serialize)]
struct CustomerRequest<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    customer_ref: Option<&'a str>,
    first_name: &'a str,
    last_name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    company: Option<&'a str>,
    email: &'a str,
    billing_address: &'a Address,
    credit_card: CreditCardPayload<'a>,
}

#[derive(Debug, Deserialize)]
struct TransactionResponse {
    transaction_id: String,
    transaction_status: String,
    #[serde(default)]
    gateway_resp_code: Option<String>,
    #[serde(default)]
    bank_message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CustomerResponse {
    customer_ref: String,
    account_ref: String,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    code: String,
    message: String,
}
