use crate::text_table::{Alignment, TextTableBuilder};
use splitbill_application::ReceiptTotal;
use splitbill_domain::{DisplayContext, Money, Receipt, SurchargeFlags, services::round_amount};
use splitbill_i18n as i18n;
use std::borrow::Cow;

const PRICE_ALIGNMENTS: [Alignment; 2] = [Alignment::Left, Alignment::Right];

/// Formats an amount at the display scale, rounding it with the context's mode.
pub fn format_amount(amount: Money, context: DisplayContext) -> String {
    let value = round_amount(amount, context).as_decimal();
    format!("{value:.scale$}", scale = context.scale as usize)
}

pub struct ReceiptPresenter;

impl ReceiptPresenter {
    /// Item table followed by subtotal, enabled surcharges and the total.
    pub fn render(receipt: &Receipt, flags: SurchargeFlags, total: &ReceiptTotal) -> String {
        let headers = [Cow::Borrowed(i18n::ITEM), Cow::Borrowed(i18n::PRICE)];
        TextTableBuilder::new()
            .alignments(&PRICE_ALIGNMENTS)
            .headers(&headers)
            .rows(
                receipt
                    .iter()
                    .map(|(name, price)| {
                        [Cow::Borrowed(name), Cow::Owned(format_amount(price, total.context))]
                    }),
            )
            .rows(total_rows(total, flags))
            .build()
    }

    /// Subtotal, surcharges and total without the item lines.
    pub fn render_totals(flags: SurchargeFlags, total: &ReceiptTotal) -> String {
        let headers = [Cow::Borrowed(""), Cow::Borrowed(i18n::PRICE)];
        TextTableBuilder::new()
            .alignments(&PRICE_ALIGNMENTS)
            .headers(&headers)
            .rows(total_rows(total, flags))
            .build()
    }
}

fn total_rows<'a>(
    total: &ReceiptTotal,
    flags: SurchargeFlags,
) -> impl Iterator<Item = [Cow<'a, str>; 2]> + use<'a> {
    let context = total.context;
    let gst = flags.gst.then_some((i18n::GST, total.gst));
    let service_charge = flags
        .service_charge
        .then_some((i18n::SERVICE_CHARGE, total.service_charge));

    [Some((i18n::SUBTOTAL, total.subtotal))]
        .into_iter()
        .chain([gst, service_charge])
        .chain([Some((i18n::TOTAL, total.display))])
        .flatten()
        .map(move |(label, amount)| {
            [Cow::Borrowed(label), Cow::Owned(format_amount(amount, context))]
        })
}
