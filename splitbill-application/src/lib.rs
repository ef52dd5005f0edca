#![warn(clippy::uninlined_format_args)]

pub mod bill_processor;
pub mod error;
pub mod model;
pub mod ports;
pub mod receipt;
pub mod session;

pub use bill_processor::{BillConfig, BillProcessor};
pub use error::{
    BillError, ReceiptAnalysisError, ReceiptIngestError, ReceiptParseError, SessionError,
};
pub use model::{BillSummary, PersonOwed, ReceiptTotal, SplitMode};
pub use ports::ReceiptAnalyzer;
pub use receipt::{
    ReceiptImage, ReceiptLines, ReceiptPayload, ingest_receipt, parse_receipt_payload,
};
pub use session::SplitSession;
