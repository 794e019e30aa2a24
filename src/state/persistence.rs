use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::warn;

use crate::error::Result;

/// File name suffix of the confirmed-menu ledger.
pub const HISTORY_SUFFIX: &str = "_history.txt";

/// File name suffix of the ingredient usage ledger.
pub const INVENTORY_SUFFIX: &str = "_inventory.json";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LedgerKind {
    History,
    Inventory,
}

impl fmt::Display for LedgerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LedgerKind::History => f.write_str("history"),
            LedgerKind::Inventory => f.write_str("inventory"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersistenceAction {
    Load,
    Save,
}

/// A ledger read or write that failed without stopping the session.
///
/// The in-memory ledger stays authoritative; the file on disk may be stale.
#[derive(Debug, Clone, PartialEq)]
pub struct PersistenceWarning {
    pub ledger: LedgerKind,
    pub action: PersistenceAction,
    pub path: PathBuf,
    pub message: String,
}

impl fmt::Display for PersistenceWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verb = match self.action {
            PersistenceAction::Load => "load",
            PersistenceAction::Save => "save",
        };
        write!(
            f,
            "failed to {} {} ledger {}: {}",
            verb,
            self.ledger,
            self.path.display(),
            self.message
        )
    }
}

/// Where one catalog's ledgers live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerPaths {
    pub history: PathBuf,
    pub inventory: PathBuf,
}

impl LedgerPaths {
    /// `<data_dir>/<catalog stem>_history.txt` and `<data_dir>/<catalog stem>_inventory.json`.
    pub fn for_catalog<P: AsRef<Path>, Q: AsRef<Path>>(data_dir: P, catalog: Q) -> Self {
        let stem = catalog
            .as_ref()
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "menu".to_string());
        let dir = data_dir.as_ref();
        Self {
            history: dir.join(format!("{}{}", stem, HISTORY_SUFFIX)),
            inventory: dir.join(format!("{}{}", stem, INVENTORY_SUFFIX)),
        }
    }
}

/// Read a JSON file.
pub fn read_json<T: DeserializeOwned, P: AsRef<Path>>(path: P) -> Result<T> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

/// Write a value as indented JSON, creating parent directories.
pub fn write_json_pretty<T: Serialize, P: AsRef<Path>>(path: P, value: &T) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let json = serde_json::to_string_pretty(value)?;
    fs::write(path, json)?;
    Ok(())
}

/// Load a ledger, treating a missing file as empty.
///
/// An unreadable or malformed file also yields an empty ledger, together
/// with a warning.
pub fn load_ledger<T, P>(path: P, ledger: LedgerKind) -> (T, Option<PersistenceWarning>)
where
    T: DeserializeOwned + Default,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    if !path.exists() {
        return (T::default(), None);
    }

    match read_json(path) {
        Ok(value) => (value, None),
        Err(e) => {
            let warning = PersistenceWarning {
                ledger,
                action: PersistenceAction::Load,
                path: path.to_path_buf(),
                message: e.to_string(),
            };
            warn!("{}", warning);
            (T::default(), Some(warning))
        }
    }
}

/// Rewrite a ledger file in full. Failures are logged and returned, never raised.
pub fn save_ledger<T, P>(path: P, ledger: LedgerKind, value: &T) -> Option<PersistenceWarning>
where
    T: Serialize,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    match write_json_pretty(path, value) {
        Ok(()) => None,
        Err(e) => {
            let warning = PersistenceWarning {
                ledger,
                action: PersistenceAction::Save,
                path: path.to_path_buf(),
                message: e.to_string(),
            };
            warn!("{}", warning);
            Some(warning)
        }
    }
}
