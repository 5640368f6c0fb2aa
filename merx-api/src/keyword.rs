use axum::{extract::State, routing::post, Json, Router};
use serde::{Deserialize, Serialize};

use merx_connect::dates;
use merx_connect::prompts;
use merx_connect::provider::{KeywordStat, TrendSeries};
use merx_core::market::{trend_direction, TrendDirection};

use crate::error::{optional_source, required_str, AppError};
use crate::state::AppState;

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct KeywordAnalyzeRequest {
    pub keyword: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KeywordAnalyzeResponse {
    pub keywords: Vec<KeywordStat>,
    pub trends: Vec<TrendSeries>,
    pub related_keywords: Vec<String>,
    pub analysis: String,
    pub metadata: KeywordMetadata,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KeywordMetadata {
    pub shopping_count: Option<u64>,
    pub blog_count: Option<u64>,
    pub has_volume_data: bool,
}

// ============================================================================
// Handlers
// ============================================================================

pub fn routes() -> Router<AppState> {
    Router::new().route("/v1/keyword/analyze", post(analyze_keyword))
}

/// POST /v1/keyword/analyze
/// Pull four independent data sources for one keyword, downgrade whichever
/// are unavailable, and generate an analysis over what remains
async fn analyze_keyword(
    State(state): State<AppState>,
    Json(req): Json<KeywordAnalyzeRequest>,
) -> Result<Json<KeywordAnalyzeResponse>, AppError> {
    let keyword = required_str("keyword", req.keyword.as_deref())?.to_string();
    let keyword_group = [keyword.clone()];

    // Every source is optional here: each failure becomes an explicit None
    // and the analysis proceeds on partial data
    let start_date = dates::months_ago(12);
    let end_date = dates::today();
    let (stats, trend, shopping, blog) = tokio::join!(
        state.provider.keyword_stats(&keyword_group),
        state
            .provider
            .search_trend(&keyword_group, &start_date, &end_date),
        state.provider.search_shopping(&keyword, 1),
        state.provider.search_blog(&keyword, 1),
    );
    let stats = optional_source(stats, "keyword_stats");
    let trend = optional_source(trend, "trend");
    let shopping = optional_source(shopping, "shopping");
    let blog = optional_source(blog, "blog");

    let keywords: Vec<KeywordStat> = stats.unwrap_or_default();
    let related_keywords: Vec<String> = keywords
        .iter()
        .filter(|s| s.keyword != keyword)
        .map(|s| s.keyword.clone())
        .take(30)
        .collect();
    let trends: Vec<TrendSeries> = trend.map(|t| t.results).unwrap_or_default();
    let direction: Option<TrendDirection> = trends
        .first()
        .filter(|series| !series.data.is_empty())
        .map(|series| trend_direction(&series.data));

    let shopping_count = shopping.map(|s| s.total);
    let blog_count = blog.map(|b| b.total);
    let has_volume_data = keywords
        .first()
        .map(|s| s.monthly_total() > 0)
        .unwrap_or(false);

    let context = prompts::render_keyword_block(
        &keyword,
        keywords.first(),
        shopping_count,
        blog_count,
        &related_keywords,
        direction,
    );
    let (system, user) = prompts::keyword_analysis(&keyword, &context);
    let analysis = state.generator.generate(&system, &user).await?;

    let mut keywords = keywords;
    keywords.truncate(20);

    Ok(Json(KeywordAnalyzeResponse {
        keywords,
        trends,
        related_keywords,
        analysis,
        metadata: KeywordMetadata {
            shopping_count,
            blog_count,
            has_volume_data,
        },
    }))
}
