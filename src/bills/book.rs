use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::CoreError;

use super::bill::{BillDraft, BillEvent};
use super::income::IncomeProfile;

const CURRENT_SCHEMA_VERSION: u8 = 1;

/// The persisted document: one income profile and the registered bills.
///
/// Mutators validate their input here, at the boundary, so the projection
/// engine downstream only ever sees well-formed records.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BillBook {
    #[serde(default = "BillBook::schema_version_default")]
    pub schema_version: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub income_profile: Option<IncomeProfile>,
    #[serde(default)]
    pub bills: Vec<BillEvent>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl BillBook {
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            schema_version: CURRENT_SCHEMA_VERSION,
            income_profile: None,
            bills: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Replaces the income profile; at most one is active at a time.
    pub fn set_income_profile(
        &mut self,
        profile: IncomeProfile,
        today: NaiveDate,
    ) -> Result<(), CoreError> {
        profile.validate(today)?;
        self.income_profile = Some(profile);
        self.touch();
        Ok(())
    }

    pub fn clear_income_profile(&mut self) {
        self.income_profile = None;
        self.touch();
    }

    pub fn add_bill(&mut self, draft: BillDraft) -> Result<Uuid, CoreError> {
        draft.validate()?;
        let bill = draft.into_bill();
        let id = bill.id;
        self.bills.push(bill);
        self.touch();
        Ok(id)
    }

    pub fn update_bill(&mut self, id: Uuid, draft: BillDraft) -> Result<(), CoreError> {
        draft.validate()?;
        let bill = self
            .bills
            .iter_mut()
            .find(|bill| bill.id == id)
            .ok_or(CoreError::BillNotFound(id))?;
        bill.apply_draft(draft);
        self.touch();
        Ok(())
    }

    pub fn remove_bill(&mut self, id: Uuid) -> Result<(), CoreError> {
        let before = self.bills.len();
        self.bills.retain(|bill| bill.id != id);
        if self.bills.len() == before {
            return Err(CoreError::BillNotFound(id));
        }
        self.touch();
        Ok(())
    }

    pub fn bill(&self, id: Uuid) -> Option<&BillEvent> {
        self.bills.iter().find(|bill| bill.id == id)
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    pub fn schema_version_default() -> u8 {
        CURRENT_SCHEMA_VERSION
    }
}

impl Default for BillBook {
    fn default() -> Self {
        Self::new()
    }
}
