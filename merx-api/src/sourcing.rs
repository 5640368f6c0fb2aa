use axum::{extract::State, routing::post, Json, Router};
use serde::{Deserialize, Serialize};

use merx_connect::dates;
use merx_connect::prompts;
use merx_core::market::{
    rank_sellers, summarize_price_range, trend_direction, PriceRangeSummary,
};

use crate::error::{optional_source, required_str, AppError};
use crate::state::AppState;

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct SourcingRequest {
    pub category: Option<String>,
    pub keyword: Option<String>,
    pub budget: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SourcingResponse {
    pub result: String,
    pub metadata: SourcingMetadata,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SourcingMetadata {
    pub total_products: Option<u64>,
    pub price_range: Option<PriceRangeSummary>,
    pub has_real_data: bool,
}

// ============================================================================
// Handlers
// ============================================================================

pub fn routes() -> Router<AppState> {
    Router::new().route("/v1/sourcing/ideas", post(sourcing_ideas))
}

/// POST /v1/sourcing/ideas
/// Shopping and trend lookups fan out concurrently; each is optional, and
/// the recommendation prompt is built from whatever data came back
async fn sourcing_ideas(
    State(state): State<AppState>,
    Json(req): Json<SourcingRequest>,
) -> Result<Json<SourcingResponse>, AppError> {
    let category = required_str("category", req.category.as_deref())?.to_string();
    let keyword = required_str("keyword", req.keyword.as_deref())?.to_string();
    let budget = req
        .budget
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty());

    let search_query = format!("{category} {keyword}");
    let trend_keywords = [keyword.clone(), category.clone()];

    let start_date = dates::months_ago(12);
    let end_date = dates::today();
    let (shopping, trend) = tokio::join!(
        state.provider.search_shopping(&search_query, 30),
        state
            .provider
            .search_trend(&trend_keywords, &start_date, &end_date),
    );
    let shopping = optional_source(shopping, "shopping");
    let trend = optional_source(trend, "trend");
    let has_real_data = shopping.is_some() || trend.is_some();

    let mut market_block = String::new();
    let mut total_products = None;
    let mut price_range = None;

    if let Some(shopping) = &shopping {
        total_products = Some(shopping.total);
        if !shopping.items.is_empty() {
            // Non-empty guard satisfied, so the summary cannot fail
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

    if let Some(trend) = &trend {
        let directions: Vec<_> = trend
            .results
            .iter()
            .map(|series| (series.title.clone(), trend_direction(&series.data)))
            .collect();
        market_block.push_str(&prompts::render_trend_block(&directions));
    }

    let (system, user) = prompts::sourcing_ideas(&category, &keyword, budget, &market_block);
    let result = state.generator.generate(&system, &user).await?;

    Ok(Json(SourcingResponse {
        result,
        metadata: SourcingMetadata {
            total_products,
            price_range,
            has_real_data,
        },
    }))
}
