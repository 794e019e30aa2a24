mod catalog;
mod history;
mod inventory;
mod persistence;

pub use catalog::{backup_catalog, read_csv_dishes, DishCatalog, REQUIRED_COLUMNS};
pub use history::MenuHistory;
pub use inventory::{IngredientInventory, IngredientUsage};
pub use persistence::{
    load_ledger, read_json, save_ledger, write_json_pretty, LedgerKind, LedgerPaths,
    PersistenceAction, PersistenceWarning, HISTORY_SUFFIX, INVENTORY_SUFFIX,
};
