use bill_core::bills::{
    project_pay_periods, BillDraft, Cadence, IncomeProfile, PayFrequency, Recurrence,
};
use bill_core::playground::{PlaygroundAction, PlaygroundState};
use chrono::NaiveDate;

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

fn profile() -> IncomeProfile {
    IncomeProfile::new(PayFrequency::Fortnightly, date(2024, 1, 5), Some(2400.0))
}

fn sample_bills() -> Vec<bill_core::bills::BillEvent> {
    vec![
        BillDraft::single("Rent", date(2024, 3, 15), Some(1000.0)).into_bill(),
        BillDraft::recurring(
            "Net",
            Recurrence::new(Cadence::Weekly, 2).with_start_date(date(2024, 1, 3)),
            Some(50.0),
        )
        .into_bill(),
    ]
}

#[test]
fn cloned_playground_projects_the_same_dates_as_the_book() {
    let book_bills = sample_bills();
    let mut state = PlaygroundState::default();
    state.apply(PlaygroundAction::InitClone {
        income_profile: profile(),
        bills: book_bills.clone(),
    });

    let today = date(2024, 3, 1);
    let from_book = project_pay_periods(&book_bills, &profile(), today, 6);
    let from_playground = project_pay_periods(&state.bills, &profile(), today, 6);

    assert_eq!(from_book.len(), from_playground.len());
    for (book_bucket, playground_bucket) in from_book.iter().zip(&from_playground) {
        assert_eq!(book_bucket.pay_date, playground_bucket.pay_date);
        assert_eq!(book_bucket.after, playground_bucket.after);
        let book_view: Vec<_> = book_bucket
            .bills
            .iter()
            .map(|b| (b.title.as_str(), b.date, b.amount))
            .collect();
        let playground_view: Vec<_> = playground_bucket
            .bills
            .iter()
            .map(|b| (b.title.as_str(), b.date, b.amount))
            .collect();
        assert_eq!(book_view, playground_view);
    }
}

#[test]
fn playground_ids_are_local_and_never_alias_the_book() {
    let book_bills = sample_bills();
    let mut state = PlaygroundState::default();
    state.apply(PlaygroundAction::InitClone {
        income_profile: profile(),
        bills: book_bills.clone(),
    });

    for (clone, original) in state.bills.iter().zip(&book_bills) {
        assert_ne!(clone.id, original.id);
    }

    // Editing a clone leaves the source list untouched.
    let clone_id = state.bills[0].id;
    state.apply(PlaygroundAction::UpdateBill {
        id: clone_id,
        draft: BillDraft::single("Rent", date(2024, 3, 15), Some(1500.0)),
    });
    assert_eq!(state.bills[0].amount, Some(1500.0));
    assert_eq!(book_bills[0].amount, Some(1000.0));
}

#[test]
fn what_if_edits_change_the_projection() {
    let mut state = PlaygroundState::default();
    state.apply(PlaygroundAction::InitFresh {
        income_profile: profile(),
    });
    state.apply(PlaygroundAction::AddBill(BillDraft::recurring(
        "Gym",
        Recurrence::new(Cadence::Weekly, 1).with_start_date(date(2024, 1, 3)),
        Some(25.0),
    )));

    let today = date(2024, 3, 1);
    let before = project_pay_periods(&state.bills, &profile(), today, 3);
    let occurrences_before: usize = before.iter().map(|b| b.bills.len()).sum();
    assert!(occurrences_before > 0);

    let id = state.bills[0].id;
    state.apply(PlaygroundAction::DeleteBill { id });
    let after = project_pay_periods(&state.bills, &profile(), today, 3);
    assert!(after.iter().all(|bucket| bucket.bills.is_empty()));
}

#[test]
fn reset_drops_the_hypothetical_world() {
    let mut state = PlaygroundState::default();
    state.apply(PlaygroundAction::InitClone {
        income_profile: profile(),
        bills: sample_bills(),
    });
    assert!(state.initialized);
    state.apply(PlaygroundAction::Reset);
    assert!(!state.initialized);
    assert!(state.bills.is_empty());
    assert!(state.income_profile.is_none());
}
