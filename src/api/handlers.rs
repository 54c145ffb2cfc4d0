use axum::{
    extract::{Query, State},
    Json,
};
use std::sync::Arc;
use tracing::debug;

use crate::{api::models::*, recommend, Error, Result};

/// Shared application state, built once at startup and passed to every
/// handler. The collection handle is absent when loading or indexing
/// failed; queries then degrade to the fixed no-match response.
#[derive(Clone)]
pub struct AppState {
    pub collection: Option<Arc<crate::store::RecipeCollection>>,
    pub settings: crate::config::Settings,
}

/// GET /api/recommend - Recommend the closest recipe for an ingredient list
pub async fn recommend_recipe(
    State(state): State<AppState>,
    Query(params): Query<RecommendParams>,
) -> Result<Json<RecommendResponse>> {
    debug!("Recommend request: {:?}", params);

    let ingredients = params.ingredients.trim();
    if ingredients.is_empty() {
        return Err(Error::Validation(
            "Please enter at least one ingredient".to_string(),
        ));
    }

    let recommendation = recommend::generate(
        state.collection.as_deref(),
        ingredients,
        state.settings.search.result_count,
    )
    .await?;

    Ok(Json(RecommendResponse { recommendation }))
}

/// GET /api/stats - Index statistics
pub async fn get_stats(State(state): State<AppState>) -> Result<Json<StatsResponse>> {
    let indexed_recipes = match state.collection.as_deref() {
        Some(collection) => collection.count().await?,
        None => 0,
    };

    Ok(Json(StatsResponse { indexed_recipes }))
}

/// GET /health - Liveness check
pub async fn health_check() -> &'static str {
    "OK"
}
