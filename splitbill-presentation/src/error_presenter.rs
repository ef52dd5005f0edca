use splitbill_application::{BillError, ReceiptIngestError, SessionError};
use splitbill_domain::{AllocationError, RosterError};
use splitbill_i18n as i18n;

pub fn format_bill_error(error: &BillError) -> String {
    match error {
        BillError::Allocation(AllocationError::UnknownItem { name }) => {
            format!(
                "{}: {}",
                i18n::BILL_CALCULATION_FAILED,
                i18n::unknown_item(name)
            )
        }
        BillError::Rounding(err) => format!("{}: {err}", i18n::BILL_CALCULATION_FAILED),
    }
}

pub fn format_roster_error(error: &RosterError) -> String {
    match error {
        RosterError::EmptyName => i18n::NAME_CANNOT_BE_EMPTY.to_owned(),
        RosterError::NoPayees => i18n::ADD_AT_LEAST_ONE_PAYEE.to_owned(),
        RosterError::DuplicatePayee { name } => i18n::name_already_exists(name),
        RosterError::PayerIsPayee { name } => i18n::payee_is_payer(name),
    }
}

pub fn format_session_error(error: &SessionError) -> String {
    match error {
        SessionError::UnknownItem { name } => i18n::unknown_item(name),
        SessionError::UnknownMember { name } => i18n::unknown_member(name),
    }
}

/// Any failure to read a receipt asks the user for a new photo; the cause is
/// only logged.
pub fn format_ingest_error(error: &ReceiptIngestError) -> String {
    tracing::debug!(error = %error, "Receipt ingestion error shown as retake prompt");
    i18n::RETAKE_PHOTO.to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use splitbill_application::{ReceiptAnalysisError, ReceiptParseError};
    use splitbill_domain::{DisplayRoundingError, Money};

    #[rstest]
    #[case::unknown_item(
        BillError::Allocation(AllocationError::UnknownItem { name: "Laksa".to_string() }),
        "Bill calculation failed: Item 'Laksa' is not on the receipt"
    )]
    #[case::rounding(
        BillError::Rounding(DisplayRoundingError::NegativeAmount {
            member: "B".to_string(),
            amount: Money::from_cents(-1),
        }),
        "Bill calculation failed: owed amount for 'B' is negative (-0.01)"
    )]
    fn test_format_bill_error(#[case] error: BillError, #[case] expected: &str) {
        assert_eq!(format_bill_error(&error), expected);
    }

    #[rstest]
    #[case::empty_name(RosterError::EmptyName, "Name cannot be empty")]
    #[case::no_payees(RosterError::NoPayees, "Please add at least one payee")]
    #[case::duplicate(
        RosterError::DuplicatePayee { name: "B".to_string() },
        "Name 'B' already exists"
    )]
    #[case::payer_is_payee(
        RosterError::PayerIsPayee { name: "A".to_string() },
        "Payee 'A' cannot be the same as payer"
    )]
    fn test_format_roster_error(#[case] error: RosterError, #[case] expected: &str) {
        assert_eq!(format_roster_error(&error), expected);
    }

    #[rstest]
    #[case::unknown_item(
        SessionError::UnknownItem { name: "Laksa".to_string() },
        "Item 'Laksa' is not on the receipt"
    )]
    #[case::unknown_member(
        SessionError::UnknownMember { name: "Z".to_string() },
        "'Z' is not a member of this bill"
    )]
    fn test_format_session_error(#[case] error: SessionError, #[case] expected: &str) {
        assert_eq!(format_session_error(&error), expected);
    }

    #[rstest]
    #[case::analysis(ReceiptIngestError::Analysis(ReceiptAnalysisError::Unavailable))]
    #[case::parse(ReceiptIngestError::Parse(ReceiptParseError::NotAnObject))]
    fn test_format_ingest_error_asks_for_retake(#[case] error: ReceiptIngestError) {
        assert_eq!(format_ingest_error(&error), i18n::RETAKE_PHOTO);
    }
}
