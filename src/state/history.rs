use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::models::DailyMenu;
use crate::state::persistence::{load_ledger, save_ledger, LedgerKind, PersistenceWarning};

/// Confirmed menus keyed by an opaque date string.
///
/// Written back to disk in full after every change.
#[derive(Debug, Clone)]
pub struct MenuHistory {
    path: PathBuf,
    menus: BTreeMap<String, DailyMenu>,
}

impl MenuHistory {
    /// Open the ledger at `path`. A missing file starts an empty history.
    pub fn open<P: AsRef<Path>>(path: P) -> (Self, Option<PersistenceWarning>) {
        let path = path.as_ref().to_path_buf();
        let (menus, warning): (BTreeMap<String, DailyMenu>, _) =
            load_ledger(&path, LedgerKind::History);
        info!(path = %path.display(), days = menus.len(), "opened menu history");
        (Self { path, menus }, warning)
    }

    /// Store a copy of `menu` under `date`, replacing any earlier entry, and persist.
    pub fn record(&mut self, date: &str, menu: &DailyMenu) -> Option<PersistenceWarning> {
        self.menus.insert(date.to_string(), menu.clone());
        self.save()
    }

    pub fn get(&self, date: &str) -> Option<&DailyMenu> {
        self.menus.get(date)
    }

    /// Recorded dates in key order.
    pub fn dates(&self) -> impl Iterator<Item = &str> {
        self.menus.keys().map(String::as_str)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn len(&self) -> usize {
        self.menus.len()
    }

    pub fn is_empty(&self) -> bool {
        self.menus.is_empty()
    }

    fn save(&self) -> Option<PersistenceWarning> {
        save_ledger(&self.path, LedgerKind::History, &self.menus)
    }
}
