use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

use super::window::{month_index, shift_months};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PayFrequency {
    Weekly,
    Fortnightly,
    Monthly,
}

impl PayFrequency {
    pub fn label(&self) -> &'static str {
        match self {
            PayFrequency::Weekly => "Weekly",
            PayFrequency::Fortnightly => "Fortnightly",
            PayFrequency::Monthly => "Monthly",
        }
    }

    /// Unit the income amount is earned per, e.g. "Per fortnight".
    pub fn per_label(&self) -> &'static str {
        match self {
            PayFrequency::Weekly => "Per week",
            PayFrequency::Fortnightly => "Per fortnight",
            PayFrequency::Monthly => "Per month",
        }
    }

    fn step_days(&self) -> Option<i64> {
        match self {
            PayFrequency::Weekly => Some(7),
            PayFrequency::Fortnightly => Some(14),
            PayFrequency::Monthly => None,
        }
    }
}

/// The user's pay schedule: cadence, cycle anchor, and nominal income per
/// period. At most one profile exists per bill book.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IncomeProfile {
    pub pay_frequency: PayFrequency,
    pub start_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
}

impl IncomeProfile {
    pub fn new(pay_frequency: PayFrequency, start_date: NaiveDate, amount: Option<f64>) -> Self {
        Self {
            pay_frequency,
            start_date,
            amount,
        }
    }

    pub fn validate(&self, today: NaiveDate) -> Result<(), CoreError> {
        if self.start_date > today {
            return Err(CoreError::InvalidInput(
                "income start date must not be in the future".into(),
            ));
        }
        if let Some(amount) = self.amount {
            if amount < 0.0 || !amount.is_finite() {
                return Err(CoreError::InvalidInput(
                    "income amount must be a non-negative number".into(),
                ));
            }
        }
        Ok(())
    }

    /// Pay date at `index` steps after the cycle anchor.
    ///
    /// Monthly steps are always taken from the anchor itself so a day-31
    /// anchor clamps to short months without drifting (Jan 31, Feb 29,
    /// Mar 31, ...).
    fn pay_date_at(&self, index: i64) -> NaiveDate {
        match self.pay_frequency.step_days() {
            Some(step) => self.start_date + Duration::days(step * index),
            None => shift_months(self.start_date, index as i32),
        }
    }

    /// Latest pay date at or before `today`, or `None` while the profile is
    /// not yet active (anchor still in the future).
    pub fn current_pay(&self, today: NaiveDate) -> Option<NaiveDate> {
        if self.start_date > today {
            return None;
        }
        match self.pay_frequency.step_days() {
            Some(step) => {
                let steps = (today - self.start_date).num_days().div_euclid(step);
                Some(self.pay_date_at(steps))
            }
            None => {
                let mut steps = i64::from(month_index(today) - month_index(self.start_date));
                if self.pay_date_at(steps) > today {
                    steps -= 1;
                }
                Some(self.pay_date_at(steps))
            }
        }
    }

    /// First pay date strictly after `date`.
    pub fn next_pay_after(&self, date: NaiveDate) -> NaiveDate {
        if date < self.start_date {
            return self.start_date;
        }
        match self.pay_frequency.step_days() {
            Some(step) => {
                let steps = (date - self.start_date).num_days().div_euclid(step) + 1;
                self.pay_date_at(steps)
            }
            None => {
                let mut steps = i64::from(month_index(date) - month_index(self.start_date));
                let mut candidate = self.pay_date_at(steps);
                while candidate <= date {
                    steps += 1;
                    candidate = self.pay_date_at(steps);
                }
                candidate
            }
        }
    }

    /// Strictly increasing pay dates from the current pay through
    /// `horizon_months` months ahead, inclusive of both bounds. Empty while
    /// the profile is not yet active.
    pub fn pay_dates(&self, today: NaiveDate, horizon_months: u32) -> Vec<NaiveDate> {
        let Some(current) = self.current_pay(today) else {
            return Vec::new();
        };
        let horizon_end = shift_months(current, horizon_months as i32);

        let first_index = match self.pay_frequency.step_days() {
            Some(step) => (current - self.start_date).num_days().div_euclid(step),
            None => i64::from(month_index(current) - month_index(self.start_date)),
        };

        let mut dates = Vec::new();
        let mut index = first_index;
        loop {
            let date = self.pay_date_at(index);
            if date > horizon_end {
                break;
            }
            dates.push(date);
            index += 1;
        }
        dates
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn weekly_current_pay_is_latest_at_or_before_today() {
        let profile = IncomeProfile::new(PayFrequency::Weekly, date(2024, 1, 1), None);
        assert_eq!(profile.current_pay(date(2024, 1, 10)), Some(date(2024, 1, 8)));
        assert_eq!(profile.current_pay(date(2024, 1, 8)), Some(date(2024, 1, 8)));
        assert_eq!(profile.current_pay(date(2024, 1, 1)), Some(date(2024, 1, 1)));
    }

    #[test]
    fn future_anchor_means_not_yet_active() {
        let profile = IncomeProfile::new(PayFrequency::Weekly, date(2024, 6, 1), None);
        assert_eq!(profile.current_pay(date(2024, 1, 10)), None);
        assert!(profile.pay_dates(date(2024, 1, 10), 6).is_empty());
        assert!(profile.validate(date(2024, 1, 10)).is_err());
    }

    #[test]
    fn fortnightly_steps_fourteen_days() {
        let profile = IncomeProfile::new(PayFrequency::Fortnightly, date(2024, 1, 5), None);
        assert_eq!(
            profile.current_pay(date(2024, 2, 1)),
            Some(date(2024, 1, 19))
        );
        assert_eq!(profile.next_pay_after(date(2024, 1, 19)), date(2024, 2, 2));
    }

    #[test]
    fn monthly_day_31_clamps_without_drifting() {
        let profile = IncomeProfile::new(PayFrequency::Monthly, date(2024, 1, 31), None);
        let dates = profile.pay_dates(date(2024, 2, 10), 3);
        assert_eq!(
            dates,
            vec![
                date(2024, 1, 31),
                date(2024, 2, 29),
                date(2024, 3, 31),
                date(2024, 4, 30)
            ]
        );
    }

    #[test]
    fn monthly_current_pay_handles_clamped_boundary() {
        let profile = IncomeProfile::new(PayFrequency::Monthly, date(2024, 1, 31), None);
        // March 15 is before March 31, so the current pay is February's.
        assert_eq!(
            profile.current_pay(date(2024, 3, 15)),
            Some(date(2024, 2, 29))
        );
    }

    #[test]
    fn pay_dates_are_strictly_increasing_and_span_the_horizon() {
        let profile = IncomeProfile::new(PayFrequency::Weekly, date(2024, 1, 1), None);
        let dates = profile.pay_dates(date(2024, 1, 10), 6);
        assert_eq!(dates.first(), Some(&date(2024, 1, 8)));
        assert!(dates.windows(2).all(|pair| pair[0] < pair[1]));
        assert!(*dates.last().unwrap() <= date(2024, 7, 8));
        // Horizon end is itself a pay date here: Jan 8 + 6 months.
        assert_eq!(dates.last(), Some(&date(2024, 7, 8)));
    }

    #[test]
    fn validate_rejects_negative_amount() {
        let profile = IncomeProfile::new(PayFrequency::Weekly, date(2024, 1, 1), Some(-5.0));
        assert!(profile.validate(date(2024, 2, 1)).is_err());
    }
}
