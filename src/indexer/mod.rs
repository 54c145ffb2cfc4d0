use tracing::{error, info, warn};

use crate::loader::RecipeRecord;
use crate::store::{RecipeCollection, RecipeStore};

/// Rebuild the named collection from the loaded records, one entry per
/// valid row, keyed by row index.
///
/// Best-effort pass: rows with blank fields are skipped and logged,
/// and any store failure degrades to an absent collection rather than
/// failing the caller. An absent or empty input table also yields an
/// absent collection.
pub async fn index_recipes(
    store: &RecipeStore,
    records: Option<&[RecipeRecord]>,
    collection_name: &str,
) -> Option<RecipeCollection> {
    let records = match records {
        Some(records) if !records.is_empty() => records,
        _ => {
            warn!("No recipes to index; queries will find nothing");
            return None;
        }
    };

    let collection = match store.create_collection(collection_name).await {
        Ok(collection) => collection,
        Err(e) => {
            error!("Failed to create '{collection_name}' collection: {e}");
            return None;
        }
    };

    let mut indexed = 0usize;
    for (idx, record) in records.iter().enumerate() {
        if !record.is_valid() {
            warn!("Row {idx} contains invalid data, skipping");
            continue;
        }

        if let Err(e) = collection.add(&idx.to_string(), record).await {
            error!("Failed to index row {idx}: {e}");
            return None;
        }

        indexed += 1;
    }

    info!(
        "Indexed {indexed} of {} recipes into '{collection_name}'",
        records.len()
    );

    Some(collection)
}
