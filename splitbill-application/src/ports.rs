use crate::{
    error::ReceiptAnalysisError,
    receipt::{ReceiptImage, ReceiptPayload},
};

/// Remote service that turns a receipt photo into priced line items.
pub trait ReceiptAnalyzer: Send + Sync {
    fn analyze(&self, image: &ReceiptImage<'_>) -> Result<ReceiptPayload, ReceiptAnalysisError>;
}
