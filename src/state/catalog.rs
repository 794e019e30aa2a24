use std::collections::HashSet;
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::{MenuError, Result};
use crate::models::Dish;

/// Columns every catalog source must provide.
pub const REQUIRED_COLUMNS: [&str; 10] = [
    "name",
    "calories",
    "protein",
    "fat",
    "carb",
    "preference",
    "difficulty",
    "main_ingredients",
    "side_ingredients",
    "main_protein",
];

/// Immutable list of dishes, validated on construction.
///
/// Holds at least two dishes with unique names, since a day needs a lunch
/// and a different dinner.
#[derive(Debug, Clone)]
pub struct DishCatalog {
    source: Option<PathBuf>,
    dishes: Vec<Dish>,
}

impl DishCatalog {
    /// Build a catalog from in-memory dishes.
    pub fn from_dishes(dishes: Vec<Dish>) -> Result<Self> {
        if dishes.is_empty() {
            return Err(MenuError::EmptyCatalog);
        }

        let mut seen = HashSet::new();
        for dish in &dishes {
            dish.validate()?;
            if !seen.insert(dish.name.as_str()) {
                return Err(MenuError::Validation(format!(
                    "duplicate dish name '{}'",
                    dish.name
                )));
            }
        }

        if dishes.len() < 2 {
            return Err(MenuError::Validation(
                "catalog needs at least two dishes to plan lunch and dinner".to_string(),
            ));
        }

        Ok(Self {
            source: None,
            dishes,
        })
    }

    /// Load a catalog from a CSV file with a header row.
    pub fn load_csv<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = fs::File::open(path)?;
        let dishes = read_csv_dishes(file)?;
        let mut catalog = Self::from_dishes(dishes)?;
        catalog.source = Some(path.to_path_buf());

        info!(path = %path.display(), dishes = catalog.len(), "loaded dish catalog");
        Ok(catalog)
    }

    /// File the catalog was loaded from, if any.
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    pub fn dishes(&self) -> &[Dish] {
        &self.dishes
    }

    pub fn get(&self, name: &str) -> Option<&Dish> {
        self.dishes.iter().find(|d| d.name == name)
    }

    /// Number of distinct `main_protein` tags.
    pub fn protein_source_count(&self) -> usize {
        self.dishes
            .iter()
            .map(|d| d.main_protein.as_str())
            .collect::<HashSet<_>>()
            .len()
    }

    pub fn len(&self) -> usize {
        self.dishes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dishes.is_empty()
    }
}

/// Parse dish rows from CSV, checking the header first.
pub fn read_csv_dishes<R: Read>(reader: R) -> Result<Vec<Dish>> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    let missing: Vec<&str> = REQUIRED_COLUMNS
        .iter()
        .copied()
        .filter(|col| !headers.iter().any(|h| h == *col))
        .collect();
    if !missing.is_empty() {
        return Err(MenuError::Validation(format!(
            "catalog is missing required columns: {}",
            missing.join(", ")
        )));
    }

    let mut dishes = Vec::new();
    for (i, row) in rdr.deserialize::<Dish>().enumerate() {
        // Row 1 is the header.
        let dish = row.map_err(|e| MenuError::Validation(format!("row {}: {}", i + 2, e)))?;
        dishes.push(dish);
    }
    Ok(dishes)
}

/// Copy a catalog file into `data_dir` unless one with the same file name
/// is already there. Returns the path of the copy.
pub fn backup_catalog<P: AsRef<Path>, Q: AsRef<Path>>(source: P, data_dir: Q) -> Result<PathBuf> {
    let source = source.as_ref();
    let file_name = source.file_name().ok_or_else(|| {
        MenuError::InvalidInput(format!("'{}' is not a file path", source.display()))
    })?;

    fs::create_dir_all(data_dir.as_ref())?;
    let target = data_dir.as_ref().join(file_name);
    if !target.exists() {
        fs::copy(source, &target)?;
        info!(from = %source.display(), to = %target.display(), "backed up catalog");
    }
    Ok(target)
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str =
        "name,calories,protein,fat,carb,preference,difficulty,main_ingredients,side_ingredients,main_protein\n";

    #[test]
    fn test_read_csv_dishes() {
        let csv = format!(
            "{}{}{}",
            HEADER,
            "番茄炒蛋,320,18,22,12,0.8,易,\"鸡蛋, 番茄\",葱,egg\n",
            "Grilled fish,410,35,12,5,0.6,medium,fish,lemon,fish\n"
        );
        let dishes = read_csv_dishes(csv.as_bytes()).unwrap();
        assert_eq!(dishes.len(), 2);
        assert_eq!(dishes[0].name, "番茄炒蛋");
        assert_eq!(dishes[0].main_ingredient_list(), vec!["鸡蛋", "番茄"]);
        assert_eq!(dishes[1].protein, 35.0);
    }

    #[test]
    fn test_missing_columns_are_named() {
        let csv = "name,calories,protein,fat\nA,1,2,3\n";
        let err = read_csv_dishes(csv.as_bytes()).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("carb"));
        assert!(msg.contains("main_protein"));
        assert!(!msg.contains("calories"));
    }

    #[test]
    fn test_bad_number_reports_row() {
        let csv = format!("{}{}", HEADER, "A,lots,1,1,1,0.5,easy,x,y,beef\n");
        let err = read_csv_dishes(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, MenuError::Validation(ref m) if m.starts_with("row 2")));
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let csv = format!(
            "{}{}{}",
            HEADER, "A,1,1,1,1,0.5,easy,x,y,beef\n", "A,2,2,2,2,0.5,hard,x,y,pork\n"
        );
        let dishes = read_csv_dishes(csv.as_bytes()).unwrap();
        assert!(matches!(
            DishCatalog::from_dishes(dishes),
            Err(MenuError::Validation(_))
        ));
    }

    #[test]
    fn test_empty_catalog_rejected() {
        assert!(matches!(
            DishCatalog::from_dishes(Vec::new()),
            Err(MenuError::EmptyCatalog)
        ));
    }

    #[test]
    fn test_backup_keeps_existing_copy() {
        let dir = tempfile::TempDir::new().unwrap();
        let source = dir.path().join("home.csv");
        fs::write(&source, "first").unwrap();
        let data_dir = dir.path().join("data");

        let copy = backup_catalog(&source, &data_dir).unwrap();
        assert_eq!(copy, data_dir.join("home.csv"));
        assert_eq!(fs::read_to_string(&copy).unwrap(), "first");

        fs::write(&source, "second").unwrap();
        let again = backup_catalog(&source, &data_dir).unwrap();
        assert_eq!(again, copy);
        assert_eq!(fs::read_to_string(&again).unwrap(), "first");
    }
}
