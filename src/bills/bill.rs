use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::CoreError;

use super::recurrence::Recurrence;
use super::window::DateWindow;

/// A registered bill: either a single due date or a recurring rule.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BillEvent {
    pub id: Uuid,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    #[serde(flatten)]
    pub kind: BillKind,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum BillKind {
    Single { due: NaiveDate },
    Recurring { rule: Recurrence },
}

impl BillKind {
    /// Short human label for list views.
    pub fn describe(&self) -> String {
        match self {
            BillKind::Single { due } => format!("Due {}", due.format("%Y-%m-%d")),
            BillKind::Recurring { rule } => {
                let mut label = rule.label();
                if let Some(start) = rule.start_date {
                    label.push_str(&format!(" from {}", start.format("%Y-%m-%d")));
                }
                if let Some(until) = rule.until {
                    label.push_str(&format!(" until {}", until.format("%Y-%m-%d")));
                }
                if let Some(count) = rule.count {
                    label.push_str(&format!(", {} times", count));
                }
                label
            }
        }
    }
}

impl BillEvent {
    pub fn from_draft(draft: BillDraft) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: draft.title,
            amount: draft.amount,
            kind: draft.kind,
        }
    }

    /// Replaces everything but the identifier.
    pub fn apply_draft(&mut self, draft: BillDraft) {
        self.title = draft.title;
        self.amount = draft.amount;
        self.kind = draft.kind;
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        validate_fields(&self.title, self.amount, &self.kind)
    }

    /// Concrete due dates inside `window`, honoring the recurrence's own
    /// bounds. The window start doubles as the fallback anchor for rules
    /// without an explicit start date.
    pub fn due_dates_in_window(&self, window: DateWindow) -> Vec<NaiveDate> {
        match &self.kind {
            BillKind::Single { due } => {
                if window.contains(*due) {
                    vec![*due]
                } else {
                    Vec::new()
                }
            }
            BillKind::Recurring { rule } => rule.occurrences_in_window(window, window.start),
        }
    }
}

/// A bill minus its identifier: create and update flows, and the playground
/// store, hand these around before an id exists or without touching one.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BillDraft {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    #[serde(flatten)]
    pub kind: BillKind,
}

impl BillDraft {
    pub fn single(title: impl Into<String>, due: NaiveDate, amount: Option<f64>) -> Self {
        Self {
            title: title.into(),
            amount,
            kind: BillKind::Single { due },
        }
    }

    pub fn recurring(title: impl Into<String>, rule: Recurrence, amount: Option<f64>) -> Self {
        Self {
            title: title.into(),
            amount,
            kind: BillKind::Recurring { rule },
        }
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        validate_fields(&self.title, self.amount, &self.kind)
    }

    pub fn into_bill(self) -> BillEvent {
        BillEvent::from_draft(self)
    }
}

fn validate_fields(title: &str, amount: Option<f64>, kind: &BillKind) -> Result<(), CoreError> {
    if title.trim().is_empty() {
        return Err(CoreError::InvalidInput("bill title must not be empty".into()));
    }
    if let Some(amount) = amount {
        if amount < 0.0 || !amount.is_finite() {
            return Err(CoreError::InvalidInput(
                "bill amount must be a non-negative number".into(),
            ));
        }
    }
    match kind {
        BillKind::Single { .. } => Ok(()),
        BillKind::Recurring { rule } => rule.validate(),
    }
}

/// One concrete due-date instance, tagged with its owning bill's static
/// fields; the unit period views and summaries are built from.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct BillOccurrence {
    pub bill_id: Uuid,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    pub date: NaiveDate,
}
