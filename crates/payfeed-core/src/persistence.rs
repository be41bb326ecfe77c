//! Snapshot persistence
//!
//! The whole collection is stored as one JSON array in a named durable
//! slot. Loading never fails: an empty, unreadable or corrupt slot yields
//! the default seed.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};

use crate::error::{CoreError, CoreResult};
use crate::models::{check_collection, TransactionRecord};
use crate::seed::default_seed;
use payfeed_config::Config;

/// Slot reference type
pub type SlotRef = Arc<dyn Slot>;

/// A single named durable string entry
pub trait Slot: Send + Sync {
    /// Human-readable location, used in log messages
    fn describe(&self) -> String;

    /// Current contents, or `None` when nothing was ever written
    fn read(&self) -> CoreResult<Option<String>>;

    /// Replace the contents
    fn write(&self, contents: &str) -> CoreResult<()>;
}

// ==================== File Slot ====================

/// Slot backed by a single JSON file
#[derive(Debug, Clone)]
pub struct FileSlot {
    path: PathBuf,
}

impl FileSlot {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Slot at `<storage.path>/<storage.slot>.json`
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.snapshot_path())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl Slot for FileSlot {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn read(&self) -> CoreResult<Option<String>> {
        match std::fs::read_to_string(&self.path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(CoreError::PersistenceRead {
                message: format!("{}: {}", self.path.display(), e),
            }),
        }
    }

    fn write(&self, contents: &str) -> CoreResult<()> {
        let write_error = |e: std::io::Error| CoreError::PersistenceWrite {
            message: format!("{}: {}", self.path.display(), e),
        };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(write_error)?;
        }

        // Write beside the target and rename so a crash never leaves a torn snapshot
        let temp = self.temp_path();
        std::fs::write(&temp, contents).map_err(write_error)?;
        std::fs::rename(&temp, &self.path).map_err(write_error)?;

        Ok(())
    }
}

// ==================== Memory Slot ====================

/// In-memory slot; clones share the same cell
#[derive(Debug, Clone, Default)]
pub struct MemorySlot {
    cell: Arc<RwLock<Option<String>>>,
    fail_writes: Arc<AtomicBool>,
}

impl MemorySlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_contents(contents: impl Into<String>) -> Self {
        let slot = Self::default();
        slot.set_contents(contents);
        slot
    }

    pub fn contents(&self) -> Option<String> {
        match self.cell.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn set_contents(&self, contents: impl Into<String>) {
        let mut guard = self.cell.write().unwrap_or_else(|poisoned| poisoned.into_inner());
        *guard = Some(contents.into());
    }

    /// Make subsequent writes fail, simulating an unwritable slot
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }
}

impl Slot for MemorySlot {
    fn describe(&self) -> String {
        "memory".to_string()
    }

    fn read(&self) -> CoreResult<Option<String>> {
        Ok(self.contents())
    }

    fn write(&self, contents: &str) -> CoreResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(CoreError::PersistenceWrite {
                message: "memory slot is read-only".to_string(),
            });
        }
        self.set_contents(contents);
        Ok(())
    }
}

// ==================== Adapter ====================

/// Serializes the collection into a slot and back
#[derive(Clone)]
pub struct PersistenceAdapter {
    slot: SlotRef,
}

impl PersistenceAdapter {
    pub fn new(slot: SlotRef) -> Self {
        Self { slot }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(Arc::new(FileSlot::from_config(config)))
    }

    /// Overwrite the slot with the full collection
    pub fn save(&self, transactions: &[TransactionRecord]) -> CoreResult<()> {
        let json = serde_json::to_string_pretty(transactions).map_err(|e| CoreError::Serialization {
            message: e.to_string(),
        })?;
        self.slot.write(&json)?;
        log::debug!(
            target: "payfeed::persistence",
            "Saved {} transactions to {}",
            transactions.len(),
            self.slot.describe()
        );
        Ok(())
    }

    /// Load the collection, falling back to the default seed
    pub fn load(&self) -> Vec<TransactionRecord> {
        match self.try_load() {
            Ok(Some(transactions)) => {
                log::info!(
                    target: "payfeed::persistence",
                    "Loaded {} transactions from {}",
                    transactions.len(),
                    self.slot.describe()
                );
                transactions
            }
            Ok(None) => {
                log::info!(
                    target: "payfeed::persistence",
                    "No snapshot in {}, starting from the default feed",
                    self.slot.describe()
                );
                default_seed()
            }
            Err(e) => {
                e.log("load snapshot");
                log::warn!(
                    target: "payfeed::persistence",
                    "Ignoring snapshot in {}, starting from the default feed",
                    self.slot.describe()
                );
                default_seed()
            }
        }
    }

    /// Load without the seed fallback. `Ok(None)` means the slot is empty.
    pub fn try_load(&self) -> CoreResult<Option<Vec<TransactionRecord>>> {
        let contents = match self.slot.read()? {
            Some(contents) if !contents.trim().is_empty() => contents,
            _ => return Ok(None),
        };

        let mut transactions: Vec<TransactionRecord> =
            serde_json::from_str(&contents).map_err(|e| CoreError::PersistenceRead {
                message: e.to_string(),
            })?;

        for tx in transactions.iter_mut() {
            let trimmed = tx.name.trim();
            if trimmed.len() != tx.name.len() {
                tx.name = trimmed.to_string();
            }
        }

        check_collection(&transactions)?;

        for tx in transactions.iter_mut() {
            if tx.avatar_initials.trim().is_empty() {
                tx.avatar_initials = payfeed_utils::initials(&tx.name);
            }
        }

        Ok(Some(transactions))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::amount::Amount;
    use tempfile::TempDir;

    fn adapter(slot: &MemorySlot) -> PersistenceAdapter {
        PersistenceAdapter::new(Arc::new(slot.clone()))
    }


    #[test]
    fn test_empty_slot_loads_seed() {
        let slot = MemorySlot::new();
        assert_eq!(adapter(&slot).load(), default_seed());

        let slot = MemorySlot::with_contents("   ");
        assert_eq!(adapter(&slot).load(), default_seed());
    }

    #[test]
    fn test_save_then_load_round_trip() {
        let slot = MemorySlot::new();
        let mut txs = default_seed();
        txs[1].image_url = Some("https://img.test/g.png".to_string());
        txs.remove(3);

        adapter(&slot).save(&txs).unwrap();
        assert_eq!(adapter(&slot).load(), txs);
    }

    #[test]
    fn test_empty_array_is_a_valid_snapshot() {
        let slot = MemorySlot::with_contents("[]");
        assert!(adapter(&slot).load().is_empty());
    }

    #[test]
    fn test_truncated_snapshot_loads_seed() {
        let slot = MemorySlot::new();
        adapter(&slot).save(&default_seed()[..2]).unwrap();
        let full = slot.contents().unwrap();
        slot.set_contents(&full[..full.len() / 2]);

        let persistence = adapter(&slot);
        assert!(matches!(
            persistence.try_load(),
            Err(CoreError::PersistenceRead { .. })
        ));
        assert_eq!(persistence.load(), default_seed());
    }

    #[test]
    fn test_invalid_records_load_seed() {
        for contents in [
            r#"{"not":"an array"}"#,
            r#"[{"id":1,"name":"A","amount":"-4"}]"#,
            r#"[{"id":1,"name":"A","amount":"5"},{"id":1,"name":"B","amount":"6"}]"#,
            r#"[{"id":1,"name":"  ","amount":"5"}]"#,
            r#"[{"id":18446744073709551615,"name":"A","amount":"5"}]"#,
        ] {
            let slot = MemorySlot::with_contents(contents);
            assert_eq!(adapter(&slot).load(), default_seed(), "contents: {}", contents);
        }
    }

    #[test]
    fn test_legacy_snapshot_loads() {
        let slot = MemorySlot::with_contents(
            r#"[{"id":1712345678901,"name":"Ann B","desc":"","time":"1:05PM","amount":"$500","avatar":"AB"},
                {"id":4,"name":"jsosa","desc":"Fro buying $20 load","time":"9:18PM","amount":"$1,000","avatar":"JS"}]"#,
        );
        let txs = adapter(&slot).load();
        assert_eq!(txs.len(), 2);
        assert_eq!(txs[0].amount, Amount::units(500));
        assert_eq!(txs[1].avatar_initials, "JS");
        assert_eq!(txs[1].description, "Fro buying $20 load");
    }

    #[test]
    fn test_missing_initials_are_recomputed() {
        let slot = MemorySlot::with_contents(r#"[{"id":9,"name":"Mary Ann Lee","amount":12}]"#);
        let txs = adapter(&slot).load();
        assert_eq!(txs[0].avatar_initials, "MA");
        assert_eq!(txs[0].description, "");
    }

    #[test]
    fn test_names_are_trimmed_on_load() {
        let slot = MemorySlot::with_contents(
            r#"[{"id":2,"name":"  Ann ","amount":"5"},{"id":1,"name":"Ann","amount":"6"}]"#,
        );
        let txs = adapter(&slot).load();
        assert_eq!(txs[0].name, "Ann");
        assert_eq!(txs[0].avatar_initials, "A");
        assert_eq!(crate::contacts::derive_contacts(&txs).len(), 1);
    }

    #[test]
    fn test_unknown_fields_survive_resave() {
        let slot = MemorySlot::with_contents(
            r#"[{"id":1,"name":"A","amount":"5","category":"food","tags":["x"]}]"#,
        );
        let persistence = adapter(&slot);
        let txs = persistence.load();
        assert_eq!(txs[0].extra["category"], "food");

        persistence.save(&txs).unwrap();
        let saved: serde_json::Value = serde_json::from_str(&slot.contents().unwrap()).unwrap();
        assert_eq!(saved[0]["category"], "food");
        assert_eq!(saved[0]["tags"][0], "x");
    }

    #[test]
    fn test_failed_write_reports_error() {
        let slot = MemorySlot::new();
        slot.set_fail_writes(true);
        let err = adapter(&slot).save(&default_seed()).unwrap_err();
        assert!(matches!(err, CoreError::PersistenceWrite { .. }));
        assert!(slot.contents().is_none());
    }

    #[test]
    fn test_file_slot_round_trip() {
        let dir = TempDir::new().unwrap();
        let slot = FileSlot::new(dir.path().join("nested").join("transactions.json"));
        assert_eq!(slot.read().unwrap(), None);

        let persistence = PersistenceAdapter::new(Arc::new(slot.clone()));
        let txs = default_seed();
        persistence.save(&txs).unwrap();
        assert_eq!(persistence.load(), txs);
        assert!(!slot.temp_path().exists());

        std::fs::write(slot.path(), "[{\"id\":1,").unwrap();
        assert_eq!(persistence.load(), default_seed());
    }

    #[test]
    fn test_file_slot_from_config() {
        let mut config = Config::default();
        config.storage.path = PathBuf::from("/var/lib/payfeed");
        config.storage.slot = "feed".to_string();
        assert_eq!(
            FileSlot::from_config(&config).path(),
            Path::new("/var/lib/payfeed/feed.json")
        );
    }
}
