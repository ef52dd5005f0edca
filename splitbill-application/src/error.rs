use splitbill_domain::{AllocationError, DisplayRoundingError, ReceiptBuildError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReceiptAnalysisError {
    #[error("receipt image is empty")]
    EmptyImage,
    #[error("receipt analysis service is unavailable")]
    Unavailable,
    #[error("receipt analysis failed: {source}")]
    Service {
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReceiptParseError {
    #[error("receipt payload is not valid JSON: {detail}")]
    Malformed { detail: String },
    #[error("receipt payload must be an object of item names to prices")]
    NotAnObject,
    #[error("price of '{item}' is not a number: {value}")]
    InvalidPrice { item: String, value: String },
    #[error(transparent)]
    Receipt(#[from] ReceiptBuildError),
}

#[derive(Debug, Error)]
pub enum ReceiptIngestError {
    #[error(transparent)]
    Analysis(#[from] ReceiptAnalysisError),
    #[error(transparent)]
    Parse(#[from] ReceiptParseError),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("item '{name}' is not on the receipt")]
    UnknownItem { name: String },
    #[error("'{name}' is neither the payer nor a payee")]
    UnknownMember { name: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BillError {
    #[error(transparent)]
    Allocation(#[from] AllocationError),
    #[error(transparent)]
    Rounding(#[from] DisplayRoundingError),
}
