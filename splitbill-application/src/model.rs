use splitbill_domain::{DisplayContext, Money, SurchargeFlags};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SplitMode {
    /// Each item is shared by the members assigned to it.
    #[default]
    ByItem,
    /// The whole bill is shared by payer and payees alike.
    Evenly,
}

/// Receipt total with the breakdown shown under the item lines.
///
/// `subtotal`, `gst` and `service_charge` are display amounts and always add
/// up to `display`; the last enabled surcharge absorbs rounding residue.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReceiptTotal {
    pub subtotal: Money,
    pub gst: Money,
    pub service_charge: Money,
    pub exact: Money,
    pub display: Money,
    /// Rounding the display amounts were produced with.
    pub context: DisplayContext,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PersonOwed<'a> {
    pub member: &'a str,
    /// Rounded to the display unit.
    pub amount: Money,
    pub exact_amount: Money,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BillSummary<'a> {
    pub payer: &'a str,
    pub mode: SplitMode,
    pub flags: SurchargeFlags,
    pub total: ReceiptTotal,
    /// Every payee in roster order, including those who owe nothing.
    pub owed: Vec<PersonOwed<'a>>,
    /// Items nobody was assigned to. Always empty for [`SplitMode::Evenly`].
    pub unassigned_items: Vec<&'a str>,
}

impl<'a> BillSummary<'a> {
    pub fn total_owed(&self) -> Money {
        self.owed.iter().map(|person| person.amount).sum()
    }

    pub fn payees_owing(&self) -> impl Iterator<Item = &PersonOwed<'a>> + '_ {
        self.owed.iter().filter(|person| !person.amount.is_zero())
    }
}
