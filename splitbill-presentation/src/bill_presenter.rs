use crate::receipt_presenter::{ReceiptPresenter, format_amount};
use splitbill_application::BillSummary;
use splitbill_i18n as i18n;

pub struct BillPresenter;

pub struct BillView {
    pub receipt_table: String,
    /// One line per payee who owes a non-zero amount, in roster order.
    pub owed_lines: Vec<String>,
    pub unassigned_line: Option<String>,
}

impl BillView {
    pub fn owed_text(&self) -> String {
        if self.owed_lines.is_empty() {
            i18n::NOBODY_OWES.to_owned()
        } else {
            self.owed_lines.join("\n")
        }
    }
}

impl BillPresenter {
    pub fn render(summary: &BillSummary<'_>) -> BillView {
        let receipt_table = ReceiptPresenter::render_totals(summary.flags, &summary.total);

        let owed_lines = summary
            .payees_owing()
            .map(|person| {
                let amount = format_amount(person.amount, summary.total.context);
                i18n::owes(person.member, summary.payer, &amount)
            })
            .collect();

        let unassigned_line = (!summary.unassigned_items.is_empty()).then(|| {
            format!(
                "{}: {}",
                i18n::UNASSIGNED,
                summary.unassigned_items.join(", ")
            )
        });

        BillView {
            receipt_table,
            owed_lines,
            unassigned_line,
        }
    }
}
