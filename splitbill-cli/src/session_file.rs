use indexmap::IndexMap;
use serde::Deserialize;
use splitbill_application::{
    ReceiptLines, ReceiptParseError, SessionError, SplitMode, SplitSession,
};
use splitbill_domain::{Roster, RosterError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SessionFileError {
    #[error("invalid session file: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Roster(#[from] RosterError),
    #[error(transparent)]
    Receipt(#[from] ReceiptParseError),
    #[error(transparent)]
    Session(#[from] SessionError),
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModeSetting {
    #[default]
    ByItem,
    Evenly,
}

impl From<ModeSetting> for SplitMode {
    fn from(mode: ModeSetting) -> Self {
        match mode {
            ModeSetting::ByItem => SplitMode::ByItem,
            ModeSetting::Evenly => SplitMode::Evenly,
        }
    }
}

/// A bill split saved as JSON.
///
/// `items` uses the same object format as a receipt payload, so prices may be
/// numbers or strings like `"$5.60"`, and a name listed twice is rejected.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SessionFile {
    pub payer: String,
    pub payees: Vec<String>,
    pub items: ReceiptLines,
    #[serde(default)]
    pub assignment: IndexMap<String, Vec<String>>,
    #[serde(default)]
    pub gst: bool,
    #[serde(default)]
    pub service_charge: bool,
    #[serde(default)]
    pub mode: ModeSetting,
    /// Items dropped from the receipt after assignment.
    #[serde(default)]
    pub deleted_items: Vec<String>,
}

impl SessionFile {
    pub fn from_json(source: &str) -> Result<Self, SessionFileError> {
        Ok(serde_json::from_str(source)?)
    }

    pub fn into_session(self) -> Result<SplitSession, SessionFileError> {
        let roster = Roster::try_new(&self.payer, &self.payees)?;
        let receipt = self.items.into_receipt()?;

        let mut session = SplitSession::new(roster, receipt);
        for (item, members) in &self.assignment {
            for member in members {
                session.assign(item, member)?;
            }
        }
        session.set_gst(self.gst);
        session.set_service_charge(self.service_charge);
        session.set_mode(self.mode.into());

        for item in &self.deleted_items {
            session.delete_item(item)?;
        }

        tracing::debug!(
            payer = session.roster().payer(),
            payees = session.roster().payees().len(),
            items = session.receipt().len(),
            mode = ?session.mode(),
            "Session loaded"
        );

        Ok(session)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use splitbill_domain::{Money, ReceiptBuildError, SurchargeFlags};

    const LUNCH: &str = r#"{
        "payer": "A",
        "payees": ["B", "C"],
        "items": {"Rice": 5.60, "Prata": "$4.30", "Teh": 1.80},
        "assignment": {"Rice": ["B", "C"], "Prata": ["B"]},
        "gst": true,
        "mode": "by_item",
        "deleted_items": ["Teh"]
    }"#;

    #[rstest]
    fn test_loads_session() {
        let session = SessionFile::from_json(LUNCH)
            .and_then(SessionFile::into_session)
            .expect("valid session file");

        assert_eq!(session.roster().payer(), "A");
        assert_eq!(
            session.receipt().iter().collect::<Vec<_>>(),
            vec![
                ("Rice", Money::from_cents(560)),
                ("Prata", Money::from_cents(430)),
            ]
        );
        assert_eq!(
            session
                .members_of("Rice")
                .map(|members| members.iter().collect::<Vec<_>>()),
            Some(vec!["B", "C"])
        );
        assert_eq!(session.flags(), SurchargeFlags::new(true, false));
        assert_eq!(session.mode(), SplitMode::ByItem);
    }

    #[rstest]
    fn test_optional_fields_default() {
        let session = SessionFile::from_json(
            r#"{"payer": "A", "payees": ["B"], "items": {"Rice": 5.6}}"#,
        )
        .and_then(SessionFile::into_session)
        .expect("valid session file");

        assert!(session.assignment().is_empty());
        assert_eq!(session.flags(), SurchargeFlags::none());
        assert_eq!(session.mode(), SplitMode::ByItem);
    }

    #[rstest]
    #[case::evenly(r#""evenly""#, Some(ModeSetting::Evenly))]
    #[case::by_item(r#""by_item""#, Some(ModeSetting::ByItem))]
    #[case::unknown(r#""randomly""#, None)]
    fn test_mode_setting(#[case] json: &str, #[case] expected: Option<ModeSetting>) {
        assert_eq!(serde_json::from_str::<ModeSetting>(json).ok(), expected);
    }

    #[rstest]
    #[case::payer_is_payee(
        r#"{"payer": "A", "payees": ["A"], "items": {}}"#,
        |err: &SessionFileError| matches!(err, SessionFileError::Roster(RosterError::PayerIsPayee { .. }))
    )]
    #[case::unknown_member(
        r#"{"payer": "A", "payees": ["B"], "items": {"Rice": 1}, "assignment": {"Rice": ["Z"]}}"#,
        |err: &SessionFileError| matches!(err, SessionFileError::Session(SessionError::UnknownMember { .. }))
    )]
    #[case::unknown_item(
        r#"{"payer": "A", "payees": ["B"], "items": {"Rice": 1}, "assignment": {"Laksa": ["B"]}}"#,
        |err: &SessionFileError| matches!(err, SessionFileError::Session(SessionError::UnknownItem { .. }))
    )]
    #[case::bad_price(
        r#"{"payer": "A", "payees": ["B"], "items": {"Rice": "cheap"}}"#,
        |err: &SessionFileError| matches!(err, SessionFileError::Receipt(ReceiptParseError::InvalidPrice { .. }))
    )]
    #[case::repeated_item(
        r#"{"payer": "A", "payees": ["B"], "items": {"Rice": 1, "Rice": 2}}"#,
        |err: &SessionFileError| matches!(err, SessionFileError::Receipt(ReceiptParseError::Receipt(ReceiptBuildError::DuplicateItem { .. })))
    )]
    #[case::items_not_object(
        r#"{"payer": "A", "payees": ["B"], "items": [1]}"#,
        |err: &SessionFileError| matches!(err, SessionFileError::Json(_))
    )]
    #[case::unknown_field(
        r#"{"payer": "A", "payees": ["B"], "items": {}, "tip": 5}"#,
        |err: &SessionFileError| matches!(err, SessionFileError::Json(_))
    )]
    fn test_invalid_session_files(
        #[case] json: &str,
        #[case] is_expected: fn(&SessionFileError) -> bool,
    ) {
        let err = SessionFile::from_json(json)
            .and_then(SessionFile::into_session)
            .expect_err("invalid session file");
        assert!(is_expected(&err), "unexpected error: {err:?}");
    }
}
