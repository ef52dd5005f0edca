use thiserror::Error;

use crate::{
    model::{Money, OwedAmounts, Receipt, Roster, SplitInput, SurchargeFlags, SurchargeRates},
    services::TotalCalculator,
};

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum AllocationError {
    /// An item with assigned members has no price on the receipt.
    #[error("item '{name}' is assigned but not on the receipt")]
    UnknownItem { name: String },
}

/// Computes how much each payee owes the payer.
#[derive(Clone, Copy, Debug, Default)]
pub struct AllocationCalculator {
    rates: SurchargeRates,
}

impl AllocationCalculator {
    pub fn new(rates: SurchargeRates) -> Self {
        Self { rates }
    }

    /// Splits each assigned item evenly across its members and charges every
    /// non-payer member their surcharged share.
    ///
    /// Every payee appears in the result, with zero when nothing was assigned
    /// to them. Items with no members contribute nothing. The payer counts
    /// toward an item's split but never owes anything.
    pub fn compute_owed<'a>(
        &self,
        input: SplitInput<'a>,
    ) -> Result<OwedAmounts<'a>, AllocationError> {
        let roster = input.roster;
        let mut owed: OwedAmounts<'a> = roster
            .payees()
            .iter()
            .map(|payee| (payee.as_str(), Money::ZERO))
            .collect();

        for (item, members) in input.assignment.iter() {
            if members.is_empty() {
                continue;
            }

            let price = input
                .receipt
                .price_of(item)
                .ok_or_else(|| AllocationError::UnknownItem {
                    name: item.to_owned(),
                })?;
            let Some(share) = price.split(members.len()) else {
                continue;
            };
            let share = self.rates.apply(share, input.flags);

            for member in members.iter() {
                if roster.is_payer(member) {
                    continue;
                }
                match owed.get_mut(member) {
                    Some(total) => *total += share,
                    None => {
                        tracing::warn!(
                            item,
                            member,
                            share = %share,
                            "Assigned member is not on the roster; share is not charged"
                        );
                    }
                }
            }
        }

        tracing::debug!(
            payer = roster.payer(),
            payee_count = owed.len(),
            item_count = input.receipt.len(),
            gst = input.flags.gst,
            service_charge = input.flags.service_charge,
            "Computed owed amounts"
        );

        Ok(owed)
    }

    /// Divides the surcharged receipt total evenly across payer and payees,
    /// ignoring any item assignment.
    pub fn compute_even_split<'a>(
        &self,
        receipt: &Receipt,
        flags: SurchargeFlags,
        roster: &'a Roster,
    ) -> OwedAmounts<'a> {
        let total = TotalCalculator::new(self.rates).compute_total(receipt, flags);
        let share = total.split(roster.member_count()).unwrap_or(Money::ZERO);

        roster
            .payees()
            .iter()
            .map(|payee| (payee.as_str(), share))
            .collect()
    }
}
