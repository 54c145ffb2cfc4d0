use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct RecommendParams {
    #[serde(default)]
    pub ingredients: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendResponse {
    pub recommendation: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsResponse {
    pub indexed_recipes: usize,
}
