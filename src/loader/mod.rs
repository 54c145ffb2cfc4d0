use crate::error::{Error, Result};
use serde::Deserialize;
use std::path::Path;
use tracing::info;

/// One recipe row from the dataset.
///
/// Only the three named columns are read; anything else in the file is
/// ignored. Fields may be blank here - validation happens at indexing
/// time so a bad row skips indexing without failing the whole load.
#[derive(Debug, Clone, Deserialize)]
pub struct RecipeRecord {
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Ingredients")]
    pub ingredients: String,
    #[serde(rename = "Instructions")]
    pub instructions: String,
}

impl RecipeRecord {
    /// A record is indexable only when all three fields are non-blank.
    pub fn is_valid(&self) -> bool {
        !self.title.trim().is_empty()
            && !self.ingredients.trim().is_empty()
            && !self.instructions.trim().is_empty()
    }
}

/// Load recipe records from a CSV file.
///
/// Failure kinds are closed: a missing file, an empty file, an
/// unparsable file, or any other I/O fault. A failed load never hands
/// back a partial table.
pub fn load_recipes(path: impl AsRef<Path>) -> Result<Vec<RecipeRecord>> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(Error::DatasetNotFound(path.display().to_string()));
    }

    let mut reader = csv::Reader::from_path(path)?;

    let mut records = Vec::new();
    for result in reader.deserialize() {
        let record: RecipeRecord = result?;
        records.push(record);
    }

    if records.is_empty() {
        return Err(Error::DatasetEmpty(path.display().to_string()));
    }

    info!("Loaded {} recipes from {}", records.len(), path.display());
    Ok(records)
}
