use snafu::Snafu;

#[derive(Debug, Snafu)]
pub enum GatewayError {
    #[snafu(display("the processor rejected the api key"))]
    Authentication,
    #[snafu(display("invalid {field}: {message}"))]
    Validation { field: String, message: String },
    #[snafu(display("{reference} was not found on the remote gateway"))]
    NotFound { reference: String },
    #[snafu(display("invalid amount: {message}"))]
    InvalidAmount { message: String },
    #[snafu(display("the processor rejected the request: {message}"))]
    Rejected { message: String },
    #[snafu(display("{message}"))]
    Unexpected {
        message: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}
