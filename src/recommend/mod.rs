use crate::error::Result;
use crate::store::RecipeCollection;

/// Response used whenever nothing can be recommended.
pub const NO_MATCH_MESSAGE: &str = "No recipe found for the given ingredients.";

/// Ask the collection for the nearest matches and format the best one.
///
/// An absent collection, an empty collection, or a query with no
/// matches all produce the fixed no-match message; only store or
/// embedding faults surface as errors.
pub async fn generate(
    collection: Option<&RecipeCollection>,
    ingredients: &str,
    result_count: usize,
) -> Result<String> {
    let Some(collection) = collection else {
        return Ok(NO_MATCH_MESSAGE.to_string());
    };

    let matches = collection.query(ingredients, result_count).await?;

    Ok(match matches.first() {
        Some(best) => format!("Title: {}\n\nRecipe: {}", best.title, best.instructions),
        None => NO_MATCH_MESSAGE.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_absent_collection_yields_no_match() {
        let result = generate(None, "carrot, water", 2).await.unwrap();

        assert_eq!(result, NO_MATCH_MESSAGE);
    }
}
