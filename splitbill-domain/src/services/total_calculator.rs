use crate::model::{Money, Receipt, SurchargeFlags, SurchargeRates};

/// Grand total of a receipt, surcharges included.
///
/// Every item counts, whether or not anyone has been assigned to it.
#[derive(Clone, Copy, Debug, Default)]
pub struct TotalCalculator {
    rates: SurchargeRates,
}

impl TotalCalculator {
    pub fn new(rates: SurchargeRates) -> Self {
        Self { rates }
    }

    pub fn compute_total(&self, receipt: &Receipt, flags: SurchargeFlags) -> Money {
        let subtotal = receipt.subtotal();
        let total = self.rates.apply(subtotal, flags);

        tracing::trace!(
            item_count = receipt.len(),
            subtotal = %subtotal,
            gst = flags.gst,
            service_charge = flags.service_charge,
            total = %total,
            "Computed receipt total"
        );

        total
    }
}
