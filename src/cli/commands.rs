use reqwest::Client;
use serde::Deserialize;

use crate::{Error, Result};

/// Ask the server for a recommendation and print it
pub async fn query(server_url: &str, ingredients: &str) -> Result<()> {
    let client = Client::new();

    let url = format!(
        "{}/api/recommend?ingredients={}",
        server_url,
        urlencoding::encode(ingredients)
    );

    let response = client.get(&url).send().await?;

    if !response.status().is_success() {
        return Err(Error::Http(response.error_for_status().unwrap_err()));
    }

    let recommendation: RecommendResponse = response.json().await?;

    println!("{}", recommendation.recommendation);

    Ok(())
}

// Response types (matching API models)

#[derive(Debug, Deserialize)]
struct RecommendResponse {
    recommendation: String,
}
