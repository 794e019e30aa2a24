use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::models::DailyMenu;
use crate::state::persistence::{load_ledger, save_ledger, LedgerKind, PersistenceWarning};

/// Usage counters for one ingredient.
///
/// `total_amount` moves in step with `count`; there is no portion data yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct IngredientUsage {
    pub count: u64,
    pub total_amount: u64,
}

/// Ingredient usage derived from confirmed menus.
#[derive(Debug, Clone)]
pub struct IngredientInventory {
    path: PathBuf,
    entries: BTreeMap<String, IngredientUsage>,
}

impl IngredientInventory {
    /// Open the ledger at `path`. A missing file starts an empty inventory.
    pub fn open<P: AsRef<Path>>(path: P) -> (Self, Option<PersistenceWarning>) {
        let path = path.as_ref().to_path_buf();
        let (entries, warning): (BTreeMap<String, IngredientUsage>, _) =
            load_ledger(&path, LedgerKind::Inventory);
        info!(path = %path.display(), ingredients = entries.len(), "opened ingredient inventory");
        (Self { path, entries }, warning)
    }

    /// Count one use of every main ingredient of both dishes, then persist.
    pub fn record_menu(&mut self, menu: &DailyMenu) -> Option<PersistenceWarning> {
        for dish in menu.dishes() {
            for ingredient in dish.main_ingredient_list() {
                let usage = self.entries.entry(ingredient.to_string()).or_default();
                usage.count += 1;
                usage.total_amount += 1;
            }
        }
        save_ledger(&self.path, LedgerKind::Inventory, &self.entries)
    }

    pub fn get(&self, ingredient: &str) -> Option<IngredientUsage> {
        self.entries.get(ingredient).copied()
    }

    /// Entries in ingredient-name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &IngredientUsage)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
