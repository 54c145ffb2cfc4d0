use askama::Template;
use axum::{
    extract::{Query, State},
    response::{Html, IntoResponse},
};
use serde::Deserialize;

use crate::{api::handlers::AppState, recommend, Error, Result};

/// Search page template
#[derive(Template)]
#[template(path = "search.html")]
struct SearchTemplate {
    query: String,
    result: Option<String>,
    error: Option<String>,
}

#[derive(Deserialize)]
pub struct SearchParams {
    q: Option<String>,
}

/// GET / - Ingredient search page
///
/// A missing `q` renders the bare form; a blank `q` means the form was
/// submitted empty and prompts for input instead of querying.
pub async fn index(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<impl IntoResponse> {
    let query = params.q.clone().unwrap_or_default();

    let (result, error) = match params.q.as_deref().map(str::trim) {
        None => (None, None),
        Some("") => (
            None,
            Some("Please enter at least one ingredient.".to_string()),
        ),
        Some(ingredients) => {
            let recommendation = recommend::generate(
                state.collection.as_deref(),
                ingredients,
                state.settings.search.result_count,
            )
            .await?;

            (Some(recommendation), None)
        }
    };

    let template = SearchTemplate {
        query,
        result,
        error,
    };

    Ok(Html(template.render().map_err(|e| {
        Error::Internal(format!("Template render failed: {e}"))
    })?))
}
