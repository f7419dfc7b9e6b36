//! Bill domain models, pay-schedule generation, and period projection.

pub mod bill;
pub mod book;
pub mod income;
pub mod projection;
pub mod recurrence;
pub mod window;

pub use bill::{BillDraft, BillEvent, BillKind, BillOccurrence};
pub use book::BillBook;
pub use income::{IncomeProfile, PayFrequency};
pub use projection::{
    bills_in_window, project_pay_periods, summarize_period, PeriodBucket, PeriodSummary,
    DEFAULT_HORIZON_MONTHS,
};
pub use recurrence::{Cadence, Recurrence};
pub use window::DateWindow;
