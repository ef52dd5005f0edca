use splitbill_domain::{
    AllocationCalculator, DisplayContext, Money, Receipt, SplitInput, SurchargeFlags,
    SurchargeRates, TotalCalculator,
    services::{quantize_owed, round_amount},
};

use crate::{
    error::BillError,
    model::{BillSummary, PersonOwed, ReceiptTotal, SplitMode},
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BillConfig {
    pub rates: SurchargeRates,
    pub display: DisplayContext,
}

/// Turns a split snapshot into the amounts shown to the group.
pub struct BillProcessor {
    rates: SurchargeRates,
    totals: TotalCalculator,
    allocation: AllocationCalculator,
    display: DisplayContext,
}

impl BillProcessor {
    pub fn new(config: BillConfig) -> Self {
        Self {
            rates: config.rates,
            totals: TotalCalculator::new(config.rates),
            allocation: AllocationCalculator::new(config.rates),
            display: config.display,
        }
    }

    pub fn receipt_total(&self, receipt: &Receipt, flags: SurchargeFlags) -> ReceiptTotal {
        let exact_subtotal = receipt.subtotal();
        let exact = self.totals.compute_total(receipt, flags);
        let subtotal = round_amount(exact_subtotal, self.display);
        let display = round_amount(exact, self.display);

        let mut gst = if flags.gst {
            let with_gst = self
                .rates
                .apply(exact_subtotal, SurchargeFlags::new(true, false));
            round_amount(with_gst - exact_subtotal, self.display)
        } else {
            Money::ZERO
        };
        let residue = display - subtotal - gst;
        let service_charge = if flags.service_charge {
            residue
        } else {
            gst += residue;
            Money::ZERO
        };

        ReceiptTotal {
            subtotal,
            gst,
            service_charge,
            exact,
            display,
            context: self.display,
        }
    }

    pub fn process<'a>(
        &self,
        input: SplitInput<'a>,
        mode: SplitMode,
    ) -> Result<BillSummary<'a>, BillError> {
        self.build_summary(input, mode).inspect_err(|err| {
            tracing::warn!(
                error = %err,
                payer = input.roster.payer(),
                mode = ?mode,
                "Bill processing failed"
            );
        })
    }

    fn build_summary<'a>(
        &self,
        input: SplitInput<'a>,
        mode: SplitMode,
    ) -> Result<BillSummary<'a>, BillError> {
        let exact_owed = match mode {
            SplitMode::ByItem => self.allocation.compute_owed(input)?,
            SplitMode::Evenly => {
                self.allocation
                    .compute_even_split(input.receipt, input.flags, input.roster)
            }
        };
        let rounded_owed = quantize_owed(&exact_owed, self.display)?;

        let owed: Vec<PersonOwed<'a>> = exact_owed
            .iter()
            .map(|(member, exact_amount)| PersonOwed {
                member: *member,
                amount: rounded_owed.get(member).copied().unwrap_or(*exact_amount),
                exact_amount: *exact_amount,
            })
            .collect();

        let unassigned_items: Vec<&'a str> = match mode {
            SplitMode::ByItem => input
                .receipt
                .iter()
                .map(|(name, _)| name)
                .filter(|name| {
                    input
                        .assignment
                        .members_of(name)
                        .is_none_or(|members| members.is_empty())
                })
                .collect(),
            SplitMode::Evenly => Vec::new(),
        };

        let summary = BillSummary {
            payer: input.roster.payer(),
            mode,
            flags: input.flags,
            total: self.receipt_total(input.receipt, input.flags),
            owed,
            unassigned_items,
        };

        tracing::debug!(
            payer = summary.payer,
            mode = ?mode,
            total = %summary.total.display,
            total_owed = %summary.total_owed(),
            payees_owing = summary.payees_owing().count(),
            unassigned_items = summary.unassigned_items.len(),
            "Bill computed"
        );

        Ok(summary)
    }
}
