use std::collections::HashSet;

use chrono::NaiveDate;
use serde::Serialize;
use uuid::Uuid;

use super::bill::{BillEvent, BillOccurrence};
use super::income::IncomeProfile;
use super::window::DateWindow;

pub const DEFAULT_HORIZON_MONTHS: u32 = 6;

/// One pay period and the bill occurrences due inside it.
///
/// `after` is the next pay date (the period's exclusive end), or `None` for
/// the final period of the horizon; callers treat that as open-ended.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PeriodBucket {
    pub pay_date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub after: Option<NaiveDate>,
    pub bills: Vec<BillOccurrence>,
}

/// Resolves every bill against one period window and returns the dated
/// occurrences, ascending by date. Ties on the same date keep the order the
/// bills were supplied in; duplicate `(bill, date)` pairs collapse to one.
pub fn bills_in_window(bills: &[BillEvent], window: DateWindow) -> Vec<BillOccurrence> {
    let mut seen: HashSet<(Uuid, NaiveDate)> = HashSet::new();
    let mut occurrences = Vec::new();
    for bill in bills {
        for date in bill.due_dates_in_window(window) {
            if seen.insert((bill.id, date)) {
                occurrences.push(BillOccurrence {
                    bill_id: bill.id,
                    title: bill.title.clone(),
                    amount: bill.amount,
                    date,
                });
            }
        }
    }
    occurrences.sort_by_key(|occurrence| occurrence.date);
    occurrences
}

/// Builds the full projection: one bucket per pay date across the horizon.
///
/// The final bucket exposes `after = None`, but its assignment window is
/// still bounded by the next theoretical pay date so every occurrence lands
/// in exactly one bucket. Without an active profile (anchor in the future)
/// the projection is empty rather than an error.
pub fn project_pay_periods(
    bills: &[BillEvent],
    profile: &IncomeProfile,
    today: NaiveDate,
    horizon_months: u32,
) -> Vec<PeriodBucket> {
    let pay_dates = profile.pay_dates(today, horizon_months);
    let mut buckets = Vec::with_capacity(pay_dates.len());
    for (position, &pay_date) in pay_dates.iter().enumerate() {
        let after = pay_dates.get(position + 1).copied();
        let end = after.unwrap_or_else(|| profile.next_pay_after(pay_date));
        let window = DateWindow {
            start: pay_date,
            end,
        };
        buckets.push(PeriodBucket {
            pay_date,
            after,
            bills: bills_in_window(bills, window),
        });
    }
    buckets
}

/// Aggregate figures for one period, usually the current (first) bucket.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PeriodSummary {
    pub income: f64,
    pub total_due: f64,
    pub balance: f64,
    pub next_bill: Option<BillOccurrence>,
}

/// Derives the display figures for a bucket.
///
/// `excluded` holds bill ids the caller has toggled out of the running
/// total; it narrows `total_due` and `balance` only. The bucket itself and
/// the next-due lookup are untouched by it.
pub fn summarize_period(
    bucket: &PeriodBucket,
    profile: &IncomeProfile,
    excluded: &HashSet<Uuid>,
    today: NaiveDate,
) -> PeriodSummary {
    let income = profile.amount.unwrap_or(0.0);
    let total_due: f64 = bucket
        .bills
        .iter()
        .filter(|occurrence| !excluded.contains(&occurrence.bill_id))
        .map(|occurrence| occurrence.amount.unwrap_or(0.0))
        .sum();
    let next_bill = bucket
        .bills
        .iter()
        .find(|occurrence| occurrence.date >= today)
        .cloned();
    PeriodSummary {
        income,
        total_due,
        balance: income - total_due,
        next_bill,
    }
}
