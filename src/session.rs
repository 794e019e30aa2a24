use std::path::Path;

use tracing::info;

use crate::error::Result;
use crate::models::{DailyMenu, NutritionTarget};
use crate::selector::{DishSelector, SelectorSettings, SharedWeights, WeightStore};
use crate::state::{
    DishCatalog, IngredientInventory, LedgerPaths, MenuHistory, PersistenceWarning,
};

/// What to do with a freshly generated menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    Confirm,
    Regenerate,
    Quit,
}

/// Result of applying a [`MenuAction`] to a suggested menu.
#[derive(Debug)]
pub enum PlanStep {
    /// A new suggestion replacing the rejected one.
    Suggested(DailyMenu),
    /// The menu was recorded. Carries any ledger write failures.
    Confirmed(Vec<PersistenceWarning>),
    Discarded,
}

/// One open catalog: its selector plus the history and inventory ledgers.
///
/// Keep one session alive across several planned days so the recency window
/// and accumulated weights carry from one day to the next.
pub struct MenuSession {
    selector: DishSelector,
    history: MenuHistory,
    inventory: IngredientInventory,
    load_warnings: Vec<PersistenceWarning>,
}

impl MenuSession {
    /// Load the catalog at `catalog_path` with a weight store of its own.
    pub fn open<P, Q>(catalog_path: P, data_dir: Q, settings: SelectorSettings) -> Result<Self>
    where
        P: AsRef<Path>,
        Q: AsRef<Path>,
    {
        Self::open_with_weights(catalog_path, data_dir, WeightStore::shared(), settings)
    }

    /// Load the catalog at `catalog_path` over an existing weight store.
    pub fn open_with_weights<P, Q>(
        catalog_path: P,
        data_dir: Q,
        weights: SharedWeights,
        settings: SelectorSettings,
    ) -> Result<Self>
    where
        P: AsRef<Path>,
        Q: AsRef<Path>,
    {
        let catalog = DishCatalog::load_csv(catalog_path.as_ref())?;
        let paths = LedgerPaths::for_catalog(data_dir, catalog_path);
        Self::from_parts(catalog, &paths, weights, settings)
    }

    /// Assemble a session from an already built catalog.
    pub fn from_parts(
        catalog: DishCatalog,
        paths: &LedgerPaths,
        weights: SharedWeights,
        settings: SelectorSettings,
    ) -> Result<Self> {
        let selector = DishSelector::with_weights(catalog, weights, settings)?;

        let (history, history_warning) = MenuHistory::open(&paths.history);
        let (inventory, inventory_warning) = IngredientInventory::open(&paths.inventory);
        let load_warnings: Vec<PersistenceWarning> =
            history_warning.into_iter().chain(inventory_warning).collect();

        info!(
            dishes = selector.catalog().len(),
            recorded_days = history.len(),
            "menu session ready"
        );

        Ok(Self {
            selector,
            history,
            inventory,
            load_warnings,
        })
    }

    /// Suggest a lunch and dinner. Nothing is persisted until confirmed.
    pub fn generate_daily_menu(
        &mut self,
        target: NutritionTarget,
        regenerate: bool,
    ) -> Result<DailyMenu> {
        self.selector.generate_daily_menu(target, regenerate)
    }

    /// Confirm `menu` for `date`: record it in the history, then count its
    /// ingredients. Both ledgers are rewritten; write failures come back as
    /// warnings and the in-memory state is kept either way.
    pub fn add_menu_to_history(&mut self, date: &str, menu: &DailyMenu) -> Vec<PersistenceWarning> {
        let mut warnings = Vec::new();
        warnings.extend(self.history.record(date, menu));
        warnings.extend(self.inventory.record_menu(menu));
        info!(date, lunch = %menu.lunch.name, dinner = %menu.dinner.name, "confirmed menu");
        warnings
    }

    /// Apply the user's decision about `menu`, suggested for `target`.
    ///
    /// Confirm records it under `date`, Regenerate asks the selector for a
    /// replacement, Quit leaves every ledger untouched.
    pub fn apply_action(
        &mut self,
        action: MenuAction,
        menu: &DailyMenu,
        target: NutritionTarget,
        date: &str,
    ) -> Result<PlanStep> {
        match action {
            MenuAction::Confirm => Ok(PlanStep::Confirmed(self.add_menu_to_history(date, menu))),
            MenuAction::Regenerate => Ok(PlanStep::Suggested(
                self.generate_daily_menu(target, true)?,
            )),
            MenuAction::Quit => Ok(PlanStep::Discarded),
        }
    }

    pub fn get_menu_by_date(&self, date: &str) -> Option<&DailyMenu> {
        self.history.get(date)
    }

    pub fn catalog(&self) -> &DishCatalog {
        self.selector.catalog()
    }

    pub fn selector(&self) -> &DishSelector {
        &self.selector
    }

    pub fn selector_mut(&mut self) -> &mut DishSelector {
        &mut self.selector
    }

    pub fn history(&self) -> &MenuHistory {
        &self.history
    }

    pub fn inventory(&self) -> &IngredientInventory {
        &self.inventory
    }

    /// Problems met while reading the ledgers at open time.
    pub fn load_warnings(&self) -> &[PersistenceWarning] {
        &self.load_warnings
    }
}
