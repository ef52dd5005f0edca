use splitbill_domain::{Assignment, Item, MemberSet, Receipt, Roster, SplitInput, SurchargeFlags};

use crate::{error::SessionError, model::SplitMode};

/// Mutable state of one bill split, owned by the caller.
///
/// Calculations run on the snapshot returned by [`SplitSession::input`].
#[derive(Clone, Debug)]
pub struct SplitSession {
    roster: Roster,
    receipt: Receipt,
    assignment: Assignment,
    flags: SurchargeFlags,
    mode: SplitMode,
}

impl SplitSession {
    pub fn new(roster: Roster, receipt: Receipt) -> Self {
        Self {
            roster,
            receipt,
            assignment: Assignment::new(),
            flags: SurchargeFlags::none(),
            mode: SplitMode::default(),
        }
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn receipt(&self) -> &Receipt {
        &self.receipt
    }

    pub fn assignment(&self) -> &Assignment {
        &self.assignment
    }

    pub fn flags(&self) -> SurchargeFlags {
        self.flags
    }

    pub fn mode(&self) -> SplitMode {
        self.mode
    }

    pub fn members_of(&self, item: &str) -> Option<&MemberSet> {
        self.assignment.members_of(item)
    }

    /// Adds or removes `member` from `item`. Returns whether the member is
    /// assigned afterwards.
    pub fn toggle_member(&mut self, item: &str, member: &str) -> Result<bool, SessionError> {
        self.check(item, member)?;
        Ok(self.assignment.toggle(item, member))
    }

    /// Returns `false` when the member was already assigned.
    pub fn assign(&mut self, item: &str, member: &str) -> Result<bool, SessionError> {
        self.check(item, member)?;
        Ok(self.assignment.assign(item, member))
    }

    /// Removes the item from the receipt and from the assignment.
    pub fn delete_item(&mut self, item: &str) -> Result<Item, SessionError> {
        let removed = self
            .receipt
            .remove_item(item)
            .ok_or_else(|| SessionError::UnknownItem {
                name: item.to_owned(),
            })?;
        self.assignment.remove_item(item);
        tracing::debug!(item, remaining = self.receipt.len(), "Item deleted");
        Ok(removed)
    }

    pub fn set_gst(&mut self, enabled: bool) {
        self.flags.gst = enabled;
    }

    pub fn set_service_charge(&mut self, enabled: bool) {
        self.flags.service_charge = enabled;
    }

    pub fn set_mode(&mut self, mode: SplitMode) {
        self.mode = mode;
    }

    pub fn input(&self) -> SplitInput<'_> {
        SplitInput {
            receipt: &self.receipt,
            assignment: &self.assignment,
            flags: self.flags,
            roster: &self.roster,
        }
    }

    fn check(&self, item: &str, member: &str) -> Result<(), SessionError> {
        if !self.receipt.contains(item) {
            return Err(SessionError::UnknownItem {
                name: item.to_owned(),
            });
        }
        if !self.roster.is_member(member) {
            return Err(SessionError::UnknownMember {
                name: member.to_owned(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};
    use splitbill_domain::Money;

    #[fixture]
    fn session() -> SplitSession {
        let roster = Roster::try_new("A", ["B", "C"]).expect("valid roster");
        let receipt = Receipt::try_from_items([
            Item::new("Rice", Money::from_cents(560)),
            Item::new("Prata", Money::from_cents(430)),
        ])
        .expect("valid receipt");
        SplitSession::new(roster, receipt)
    }

    #[rstest]
    fn toggle_twice_unassigns(mut session: SplitSession) {
        assert_eq!(session.toggle_member("Rice", "B"), Ok(true));
        assert_eq!(session.toggle_member("Rice", "B"), Ok(false));
        assert!(session.members_of("Rice").is_some_and(MemberSet::is_empty));
    }

    #[rstest]
    fn assigning_twice_has_no_effect(mut session: SplitSession) {
        assert_eq!(session.assign("Rice", "B"), Ok(true));
        assert_eq!(session.assign("Rice", "B"), Ok(false));
        assert_eq!(session.members_of("Rice").map(MemberSet::len), Some(1));
    }

    #[rstest]
    #[case::unknown_item("Laksa", "B", SessionError::UnknownItem { name: "Laksa".to_string() })]
    #[case::unknown_member("Rice", "Z", SessionError::UnknownMember { name: "Z".to_string() })]
    fn assignment_is_checked(
        mut session: SplitSession,
        #[case] item: &str,
        #[case] member: &str,
        #[case] expected: SessionError,
    ) {
        assert_eq!(session.toggle_member(item, member), Err(expected));
    }

    #[rstest]
    fn delete_item_clears_assignment(mut session: SplitSession) {
        session.assign("Prata", "B").expect("valid assignment");

        let removed = session.delete_item("Prata").expect("item exists");

        assert_eq!(removed.name, "Prata");
        assert!(!session.receipt().contains("Prata"));
        assert!(session.members_of("Prata").is_none());
        assert_eq!(
            session.delete_item("Prata"),
            Err(SessionError::UnknownItem {
                name: "Prata".to_string()
            })
        );
    }

    #[rstest]
    fn flags_flow_into_input(mut session: SplitSession) {
        session.set_gst(true);
        session.set_service_charge(true);
        session.set_service_charge(false);
        assert_eq!(session.input().flags, SurchargeFlags::new(true, false));
    }
}
