use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::errors::CoreError;

use super::window::{month_index, DateWindow};

/// Upper bound on generated candidates per expansion. Keeps a misconfigured
/// rule (huge `count`, anchor decades in the past) from spinning.
pub(crate) const MAX_OCCURRENCES: usize = 1024;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Cadence {
    Weekly,
    Monthly,
}

/// Repetition rule for a recurring bill.
///
/// Stepping is anchored at `start_date`; a rule without one anchors to the
/// start of whichever window it is queried against, which makes its
/// occurrences depend on the horizon being viewed. Creation flows always set
/// an anchor; the fallback only exists for hand-edited documents and is
/// logged when hit.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Recurrence {
    pub cadence: Cadence,
    pub interval: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub by_month_day: Vec<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub until: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<u32>,
}

impl Recurrence {
    pub fn new(cadence: Cadence, interval: u32) -> Self {
        Self {
            cadence,
            interval,
            start_date: None,
            by_month_day: Vec::new(),
            until: None,
            count: None,
        }
    }

    pub fn with_start_date(mut self, start_date: NaiveDate) -> Self {
        self.start_date = Some(start_date);
        self
    }

    /// Short human label, e.g. "Monthly on day 5" or "Every 2 weeks".
    pub fn label(&self) -> String {
        let base = match (self.interval, self.cadence) {
            (1, Cadence::Weekly) => "Weekly".to_string(),
            (1, Cadence::Monthly) => "Monthly".to_string(),
            (n, Cadence::Weekly) => format!("Every {} weeks", n),
            (n, Cadence::Monthly) => format!("Every {} months", n),
        };
        if self.by_month_day.is_empty() {
            base
        } else {
            let days: Vec<String> = self.by_month_day.iter().map(u32::to_string).collect();
            format!("{} on day {}", base, days.join(", "))
        }
    }

    /// Rejects rules the expansion is not defined for. Runs at the input
    /// boundary; expansion itself assumes an already-validated rule.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.interval < 1 {
            return Err(CoreError::InvalidInput(
                "recurrence interval must be at least 1".into(),
            ));
        }
        if let Some(count) = self.count {
            if count < 1 {
                return Err(CoreError::InvalidInput(
                    "recurrence count must be at least 1".into(),
                ));
            }
        }
        if !self.by_month_day.is_empty() && self.cadence != Cadence::Monthly {
            return Err(CoreError::InvalidInput(
                "day-of-month constraints require a monthly cadence".into(),
            ));
        }
        for &day in &self.by_month_day {
            if !(1..=31).contains(&day) {
                return Err(CoreError::InvalidInput(format!(
                    "day of month {} is outside 1-31",
                    day
                )));
            }
        }
        if let (Some(start), Some(until)) = (self.start_date, self.until) {
            if until <= start {
                return Err(CoreError::InvalidInput(
                    "recurrence end date must be after its start date".into(),
                ));
            }
        }
        Ok(())
    }

    /// Ordered, deduplicated occurrence dates `d` with
    /// `window.start <= d < window.end`.
    ///
    /// `until` is exclusive (no occurrence on or after it) and `count` caps
    /// the total occurrences ever produced from the anchor; whichever bound
    /// is reached first halts generation.
    pub fn occurrences_in_window(
        &self,
        window: DateWindow,
        fallback_anchor: NaiveDate,
    ) -> Vec<NaiveDate> {
        let anchor = match self.start_date {
            Some(date) => date,
            None => {
                warn!(
                    anchor = %fallback_anchor,
                    "recurrence has no start date; anchoring to the queried window start, \
                     occurrences will shift with the horizon"
                );
                fallback_anchor
            }
        };
        match self.cadence {
            Cadence::Weekly => self.weekly_occurrences(anchor, window),
            Cadence::Monthly => self.monthly_occurrences(anchor, window),
        }
    }

    fn weekly_occurrences(&self, anchor: NaiveDate, window: DateWindow) -> Vec<NaiveDate> {
        let step_days = i64::from(self.interval) * 7;
        let mut date = anchor;
        // Counting is only needed when a count cap applies; otherwise the
        // stepping can jump straight to the window.
        if self.count.is_none() && window.start > anchor {
            let steps = (window.start - anchor).num_days().div_euclid(step_days);
            date = anchor + Duration::days(steps * step_days);
        }

        let mut produced = 0u32;
        let mut occurrences = Vec::new();
        let mut guard = 0usize;
        while date < window.end && guard < MAX_OCCURRENCES {
            if self.count.is_some_and(|cap| produced >= cap) {
                break;
            }
            if self.until.is_some_and(|until| date >= until) {
                break;
            }
            if window.contains(date) {
                occurrences.push(date);
            }
            produced += 1;
            date += Duration::days(step_days);
            guard += 1;
        }
        occurrences
    }

    fn monthly_occurrences(&self, anchor: NaiveDate, window: DateWindow) -> Vec<NaiveDate> {
        let mut days: Vec<u32> = if self.by_month_day.is_empty() {
            vec![anchor.day()]
        } else {
            self.by_month_day.clone()
        };
        days.sort_unstable();
        days.dedup();

        let interval = self.interval as i32;
        let mut month = month_index(anchor);
        if self.count.is_none() {
            let target = month_index(window.start);
            if target > month {
                let steps = (target - month).div_euclid(interval);
                month += steps * interval;
            }
        }

        let mut produced = 0u32;
        let mut occurrences = Vec::new();
        let mut guard = 0usize;
        loop {
            guard += 1;
            if guard > MAX_OCCURRENCES {
                break;
            }
            let year = month.div_euclid(12);
            let month_of_year = month.rem_euclid(12) as u32 + 1;
            let Some(month_start) = NaiveDate::from_ymd_opt(year, month_of_year, 1) else {
                break;
            };
            if month_start >= window.end {
                break;
            }

            let mut halted = false;
            for &day in &days {
                // A month without the requested day contributes nothing.
                let Some(date) = NaiveDate::from_ymd_opt(year, month_of_year, day) else {
                    continue;
                };
                if date < anchor {
                    continue;
                }
                if self.count.is_some_and(|cap| produced >= cap) {
                    halted = true;
                    break;
                }
                if self.until.is_some_and(|until| date >= until) {
                    halted = true;
                    break;
                }
                if date >= window.end {
                    halted = true;
                    break;
                }
                if window.contains(date) {
                    occurrences.push(date);
                }
                produced += 1;
            }
            if halted {
                break;
            }
            month += interval;
        }
        occurrences
    }
}
