#![warn(clippy::uninlined_format_args)]

pub mod bill_presenter;
pub mod error_presenter;
pub mod receipt_presenter;
pub mod text_table;

pub use bill_presenter::{BillPresenter, BillView};
pub use error_presenter::{
    format_bill_error, format_ingest_error, format_roster_error, format_session_error,
};
pub use receipt_presenter::{ReceiptPresenter, format_amount};
