//! Ephemeral what-if workspace.
//!
//! The playground holds a hypothetical bill set and income profile that are
//! never persisted. State changes go through a reducer so every transition
//! is explicit, and projections run through the exact same engine as the
//! real bill book; playground bills just carry locally generated ids.

use uuid::Uuid;

use crate::bills::{BillDraft, BillEvent, IncomeProfile};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlaygroundState {
    pub bills: Vec<BillEvent>,
    pub income_profile: Option<IncomeProfile>,
    pub initialized: bool,
}

#[derive(Debug, Clone)]
pub enum PlaygroundAction {
    /// Start with the given profile and no bills.
    InitFresh { income_profile: IncomeProfile },
    /// Start from copies of existing bills, re-identified so edits never
    /// alias the originals.
    InitClone {
        income_profile: IncomeProfile,
        bills: Vec<BillEvent>,
    },
    AddBill(BillDraft),
    UpdateBill { id: Uuid, draft: BillDraft },
    DeleteBill { id: Uuid },
    Reset,
}

impl PlaygroundState {
    /// Applies one action. Unknown ids are ignored, matching the
    /// collection-level semantics of update/delete on a filtered list.
    pub fn apply(&mut self, action: PlaygroundAction) {
        match action {
            PlaygroundAction::InitFresh { income_profile } => {
                self.bills = Vec::new();
                self.income_profile = Some(income_profile);
                self.initialized = true;
            }
            PlaygroundAction::InitClone {
                income_profile,
                bills,
            } => {
                self.bills = bills
                    .into_iter()
                    .map(|bill| BillEvent {
                        id: Uuid::new_v4(),
                        ..bill
                    })
                    .collect();
                self.income_profile = Some(income_profile);
                self.initialized = true;
            }
            PlaygroundAction::AddBill(draft) => {
                self.bills.push(draft.into_bill());
            }
            PlaygroundAction::UpdateBill { id, draft } => {
                if let Some(bill) = self.bills.iter_mut().find(|bill| bill.id == id) {
                    bill.apply_draft(draft);
                }
            }
            PlaygroundAction::DeleteBill { id } => {
                self.bills.retain(|bill| bill.id != id);
            }
            PlaygroundAction::Reset => {
                *self = PlaygroundState::default();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bills::{Cadence, PayFrequency, Recurrence};
    use chrono::NaiveDate;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn profile() -> IncomeProfile {
        IncomeProfile::new(PayFrequency::Fortnightly, date(2024, 1, 1), Some(2000.0))
    }

    #[test]
    fn init_fresh_starts_empty() {
        let mut state = PlaygroundState::default();
        assert!(!state.initialized);
        state.apply(PlaygroundAction::InitFresh {
            income_profile: profile(),
        });
        assert!(state.initialized);
        assert!(state.bills.is_empty());
        assert_eq!(state.income_profile, Some(profile()));
    }

    #[test]
    fn init_clone_re_identifies_bills() {
        let original = BillDraft::recurring(
            "Gym",
            Recurrence::new(Cadence::Weekly, 1).with_start_date(date(2024, 1, 3)),
            Some(25.0),
        )
        .into_bill();

        let mut state = PlaygroundState::default();
        state.apply(PlaygroundAction::InitClone {
            income_profile: profile(),
            bills: vec![original.clone()],
        });

        assert_eq!(state.bills.len(), 1);
        let clone = &state.bills[0];
        assert_ne!(clone.id, original.id);
        assert_eq!(clone.title, original.title);
        assert_eq!(clone.kind, original.kind);
    }

    #[test]
    fn update_and_delete_target_by_id() {
        let mut state = PlaygroundState::default();
        state.apply(PlaygroundAction::InitFresh {
            income_profile: profile(),
        });
        state.apply(PlaygroundAction::AddBill(BillDraft::single(
            "Rent",
            date(2024, 1, 15),
            Some(1000.0),
        )));
        let id = state.bills[0].id;

        state.apply(PlaygroundAction::UpdateBill {
            id,
            draft: BillDraft::single("Rent", date(2024, 1, 15), Some(1200.0)),
        });
        assert_eq!(state.bills[0].amount, Some(1200.0));
        assert_eq!(state.bills[0].id, id);

        // Unknown ids fall through silently.
        state.apply(PlaygroundAction::DeleteBill { id: Uuid::new_v4() });
        assert_eq!(state.bills.len(), 1);

        state.apply(PlaygroundAction::DeleteBill { id });
        assert!(state.bills.is_empty());
    }

    #[test]
    fn reset_returns_to_the_initial_state() {
        let mut state = PlaygroundState::default();
        state.apply(PlaygroundAction::InitFresh {
            income_profile: profile(),
        });
        state.apply(PlaygroundAction::Reset);
        assert_eq!(state, PlaygroundState::default());
    }
}
