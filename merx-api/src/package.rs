use axum::{extract::State, routing::post, Json, Router};
use serde::{Deserialize, Serialize};

use merx_connect::prompts;
use merx_core::market::{rank_sellers, summarize_price_range, PriceRangeSummary};

use crate::error::{optional_source, required_str, AppError};
use crate::state::AppState;

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageRequest {
    pub category_name: Option<String>,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub style: String,
    #[serde(default)]
    pub target_age: String,
    #[serde(default)]
    pub price_range: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageResponse {
    pub result: String,
    pub metadata: PackageMetadata,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageMetadata {
    pub total_products: Option<u64>,
    pub price_range: Option<PriceRangeSummary>,
    pub has_real_data: bool,
}

// ============================================================================
// Handlers
// ============================================================================

pub fn routes() -> Router<AppState> {
    Router::new().route("/v1/package/names", post(package_names))
}

/// POST /v1/package/names
/// Listing-name candidates for a product line, grounded in an optional
/// shopping snapshot of the same category and keywords
async fn package_names(
    State(state): State<AppState>,
    Json(req): Json<PackageRequest>,
) -> Result<Json<PackageResponse>, AppError> {
    let category_name = required_str("categoryName", req.category_name.as_deref())?.to_string();
    let keywords: Vec<String> = req
        .keywords
        .iter()
        .map(|k| k.trim().to_string())
        .filter(|k| !k.is_empty())
        .collect();
    if keywords.is_empty() {
        return Err(AppError::Validation(
            "at least one keyword is required".to_string(),
        ));
    }

    let search_query = format!("{category_name} {}", keywords.join(" "));
    let shopping = optional_source(
        state.provider.search_shopping(&search_query, 30).await,
        "shopping",
    );

    let mut market_block = String::new();
    let mut total_products = None;
    let mut price_range = None;
    let has_real_data = shopping.is_some();

    if let Some(shopping) = &shopping {
        total_products = Some(shopping.total);
        if !shopping.items.is_empty() {
            let range = summarize_price_range(&shopping.items)?;
            let top_sellers = rank_sellers(&shopping.items, 5);
            market_block.push_str(&prompts::render_shopping_block(
                shopping.total,
                &shopping.items,
                Some(&range),
                &top_sellers,
            ));
            price_range = Some(range);
        }
    }

    let (system, user) = prompts::package_names(
        &category_name,
        &keywords,
        &req.style,
        &req.target_age,
        &req.price_range,
        &market_block,
    );
    let result = state.generator.generate(&system, &user).await?;

    Ok(Json(PackageResponse {
        result,
        metadata: PackageMetadata {
            total_products,
            price_range,
            has_real_data,
        },
    }))
}
