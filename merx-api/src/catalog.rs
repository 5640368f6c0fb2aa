use axum::{extract::State, routing::post, Json, Router};
use serde::{Deserialize, Serialize};

use merx_connect::prompts;
use merx_core::pricing::{PriceQuote, PricingEngine, PricingResult};

use crate::error::AppError;
use crate::state::AppState;

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogMatchRequest {
    pub wholesale_price: Option<f64>,
    pub lowest_price: Option<f64>,
    pub keyword: Option<String>,
    pub category: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationResponse {
    pub target_price: i64,
    pub fee: i64,
    pub margin: i64,
    pub margin_rate: String,
}

impl From<PricingResult> for CalculationResponse {
    fn from(result: PricingResult) -> Self {
        Self {
            target_price: result.target_price,
            fee: result.fee,
            margin: result.margin,
            margin_rate: result.margin_rate_display,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogMatchResponse {
    pub calculation: CalculationResponse,
    pub generated_text: String,
}

// ============================================================================
// Handlers
// ============================================================================

pub fn routes() -> Router<AppState> {
    Router::new().route("/v1/catalog/match", post(catalog_match))
}

/// POST /v1/catalog/match
/// Price the listing to undercut the catalog's lowest offer, then generate
/// standard product names likely to attach to that catalog entry
async fn catalog_match(
    State(state): State<AppState>,
    Json(req): Json<CatalogMatchRequest>,
) -> Result<Json<CatalogMatchResponse>, AppError> {
    let wholesale = req
        .wholesale_price
        .ok_or_else(|| AppError::Validation("wholesalePrice is required".to_string()))?;
    let lowest = req
        .lowest_price
        .ok_or_else(|| AppError::Validation("lowestPrice is required".to_string()))?;

    // All arithmetic happens behind the validated quote; raw request numbers
    // never reach the calculator
    let quote = PriceQuote::from_raw(wholesale, lowest)?;
    let engine = PricingEngine::new(state.pricing.clone());
    let pricing = engine.compute_listing_economics(&quote)?;

    let keyword = req
        .keyword
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty());
    let category = req
        .category
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty());

    let (system, user) = prompts::catalog_match(keyword, category, &pricing);
    let generated_text = state.generator.generate(&system, &user).await?;

    Ok(Json(CatalogMatchResponse {
        calculation: pricing.into(),
        generated_text,
    }))
}
