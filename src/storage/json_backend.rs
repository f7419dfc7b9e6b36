use std::{
    fs,
    path::{Path, PathBuf},
};

use chrono::Utc;

use crate::{
    bills::BillBook,
    errors::CoreError,
    utils::{app_data_dir, ensure_dir},
};

const BOOK_FILE: &str = "book.json";
const BACKUP_DIR: &str = "backups";
const BACKUP_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";
const TMP_SUFFIX: &str = "tmp";
const DEFAULT_RETENTION: usize = 5;

/// JSON-file persistence for the bill book.
///
/// Saves are atomic (tmp file + rename) and the previous document is kept
/// as a timestamped backup, pruned to a bounded retention.
#[derive(Debug, Clone)]
pub struct JsonStore {
    root: PathBuf,
    book_path: PathBuf,
    backups_dir: PathBuf,
    retention: usize,
}

impl JsonStore {
    pub fn new(root: Option<PathBuf>, retention: Option<usize>) -> Result<Self, CoreError> {
        let root = root.unwrap_or_else(app_data_dir);
        ensure_dir(&root)?;
        let backups_dir = root.join(BACKUP_DIR);
        ensure_dir(&backups_dir)?;
        Ok(Self {
            book_path: root.join(BOOK_FILE),
            root,
            backups_dir,
            retention: retention.unwrap_or(DEFAULT_RETENTION).max(1),
        })
    }

    pub fn new_default() -> Result<Self, CoreError> {
        Self::new(None, None)
    }

    pub fn base_dir(&self) -> &Path {
        &self.root
    }

    pub fn book_path(&self) -> &Path {
        &self.book_path
    }

    /// Loads the stored book, or a fresh empty one when none exists yet.
    pub fn load(&self) -> Result<BillBook, CoreError> {
        if self.book_path.exists() {
            let data = fs::read_to_string(&self.book_path)?;
            Ok(serde_json::from_str(&data)?)
        } else {
            Ok(BillBook::new())
        }
    }

    pub fn save(&self, book: &BillBook) -> Result<(), CoreError> {
        if self.book_path.exists() {
            self.backup_existing_file()?;
        }
        let json = serde_json::to_string_pretty(book)?;
        write_atomic(&self.book_path, &json)
    }

    pub fn list_backups(&self) -> Result<Vec<String>, CoreError> {
        if !self.backups_dir.exists() {
            return Ok(Vec::new());
        }
        let mut entries = Vec::new();
        for entry in fs::read_dir(&self.backups_dir)? {
            let entry = entry?;
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
                continue;
            }
            if let Some(name) = path.file_name().and_then(|name| name.to_str()) {
                entries.push(name.to_string());
            }
        }
        // Timestamped names sort lexicographically; newest first.
        entries.sort_by(|a, b| b.cmp(a));
        Ok(entries)
    }

    fn backup_existing_file(&self) -> Result<(), CoreError> {
        ensure_dir(&self.backups_dir)?;
        let timestamp = Utc::now().format(BACKUP_TIMESTAMP_FORMAT).to_string();
        let backup_path = self.backups_dir.join(format!("book_{}.json", timestamp));
        fs::copy(&self.book_path, &backup_path)?;
        self.prune_backups()?;
        Ok(())
    }

    fn prune_backups(&self) -> Result<(), CoreError> {
        let backups = self.list_backups()?;
        for name in backups.iter().skip(self.retention) {
            let _ = fs::remove_file(self.backups_dir.join(name));
        }
        Ok(())
    }
}

/// Writes through a sibling tmp file and renames over the target, so a
/// crash mid-write never leaves a truncated document behind.
fn write_atomic(path: &Path, data: &str) -> Result<(), CoreError> {
    let tmp = path.with_extension(TMP_SUFFIX);
    fs::write(&tmp, data)?;
    fs::rename(&tmp, path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bills::BillDraft;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn store_with_temp_dir() -> (JsonStore, TempDir) {
        let temp = TempDir::new().expect("temp dir");
        let store = JsonStore::new(Some(temp.path().to_path_buf()), Some(3)).expect("json store");
        (store, temp)
    }

    #[test]
    fn load_without_a_file_returns_an_empty_book() {
        let (store, _guard) = store_with_temp_dir();
        let book = store.load().expect("load");
        assert!(book.bills.is_empty());
        assert!(book.income_profile.is_none());
    }

    #[test]
    fn save_and_load_round_trip() {
        let (store, _guard) = store_with_temp_dir();
        let mut book = BillBook::new();
        book.add_bill(BillDraft::single(
            "Rent",
            NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            Some(1000.0),
        ))
        .expect("add bill");

        store.save(&book).expect("save");
        let loaded = store.load().expect("load");
        assert_eq!(loaded.bills.len(), 1);
        assert_eq!(loaded.bills[0].title, "Rent");
        assert_eq!(loaded.bills[0].id, book.bills[0].id);
    }

    #[test]
    fn saving_over_an_existing_book_leaves_a_backup() {
        let (store, _guard) = store_with_temp_dir();
        let book = BillBook::new();
        store.save(&book).expect("first save");
        store.save(&book).expect("second save");
        let backups = store.list_backups().expect("list");
        assert!(
            !backups.is_empty(),
            "expected at least one backup file to be created"
        );
    }

    #[test]
    fn backups_are_pruned_to_the_retention_limit() {
        let (store, _guard) = store_with_temp_dir();
        let book = BillBook::new();
        for _ in 0..8 {
            store.save(&book).expect("save");
        }
        let backups = store.list_backups().expect("list");
        assert!(backups.len() <= 3);
    }
}
