use axum::{extract::State, routing::post, Json, Router};
use serde::{Deserialize, Serialize};

use merx_connect::prompts::{self, BlogStyle, HookStyle};

use crate::error::{required_str, AppError};
use crate::state::AppState;

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogRequest {
    pub topic: Option<String>,
    pub keywords: Option<String>,
    #[serde(default)]
    pub style: BlogStyle,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HumanBlogRequest {
    pub topic: Option<String>,
    pub experience: Option<String>,
    pub emotion: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepurposeRequest {
    pub content: Option<String>,
    pub tone: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShortsRequest {
    pub topic: Option<String>,
    #[serde(default)]
    pub hook: HookStyle,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoScriptRequest {
    pub topic: Option<String>,
    pub duration: Option<String>,
    pub style: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailPageRequest {
    pub product_name: Option<String>,
    pub features: Option<String>,
    pub audience: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct GeneratedResponse {
    pub result: String,
}

// ============================================================================
// Handlers
// ============================================================================

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/generate/blog", post(generate_blog))
        .route("/v1/generate/human-blog", post(generate_human_blog))
        .route("/v1/generate/detail-page", post(generate_detail_page))
        .route("/v1/generate/repurpose", post(generate_repurpose))
        .route("/v1/generate/shorts", post(generate_shorts))
        .route("/v1/generate/video", post(generate_video))
}

/// POST /v1/generate/blog
/// SEO blog post from a topic, optional keywords, and a writing style
async fn generate_blog(
    State(state): State<AppState>,
    Json(req): Json<BlogRequest>,
) -> Result<Json<GeneratedResponse>, AppError> {
    let topic = required_str("topic", req.topic.as_deref())?;
    let keywords = req
        .keywords
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty());

    let (system, user) = prompts::blog_post(topic, keywords, req.style);
    let result = state.generator.generate(&system, &user).await?;

    Ok(Json(GeneratedResponse { result }))
}

/// POST /v1/generate/human-blog
/// Personal-essay blog post; experience and emotion are optional ingredients
async fn generate_human_blog(
    State(state): State<AppState>,
    Json(req): Json<HumanBlogRequest>,
) -> Result<Json<GeneratedResponse>, AppError> {
    let topic = required_str("topic", req.topic.as_deref())?;
    let experience = req
        .experience
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty());
    let emotion = req
        .emotion
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty());

    let (system, user) = prompts::human_blog(topic, experience, emotion);
    let result = state.generator.generate(&system, &user).await?;

    Ok(Json(GeneratedResponse { result }))
}

/// POST /v1/generate/repurpose
/// One source text adapted for three platforms in a single pass
async fn generate_repurpose(
    State(state): State<AppState>,
    Json(req): Json<RepurposeRequest>,
) -> Result<Json<GeneratedResponse>, AppError> {
    let content = required_str("content", req.content.as_deref())?;
    let tone = req
        .tone
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty());

    let (system, user) = prompts::repurpose_content(content, tone);
    let result = state.generator.generate(&system, &user).await?;

    Ok(Json(GeneratedResponse { result }))
}

/// POST /v1/generate/shorts
/// 60-second short-form script with a selectable hook style
async fn generate_shorts(
    State(state): State<AppState>,
    Json(req): Json<ShortsRequest>,
) -> Result<Json<GeneratedResponse>, AppError> {
    let topic = required_str("topic", req.topic.as_deref())?;

    let (system, user) = prompts::shorts_script(topic, req.hook);
    let result = state.generator.generate(&system, &user).await?;

    Ok(Json(GeneratedResponse { result }))
}

/// POST /v1/generate/video
/// Long-form video script from a topic plus optional length and style
async fn generate_video(
    State(state): State<AppState>,
    Json(req): Json<VideoScriptRequest>,
) -> Result<Json<GeneratedResponse>, AppError> {
    let topic = required_str("topic", req.topic.as_deref())?;
    let duration = req
        .duration
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty());
    let style = req
        .style
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty());

    let (system, user) = prompts::video_script(topic, duration, style);
    let result = state.generator.generate(&system, &user).await?;

    Ok(Json(GeneratedResponse { result }))
}

/// POST /v1/generate/detail-page
/// Product detail-page copy from a product name and optional context
async fn generate_detail_page(
    State(state): State<AppState>,
    Json(req): Json<DetailPageRequest>,
) -> Result<Json<GeneratedResponse>, AppError> {
    let product_name = required_str("productName", req.product_name.as_deref())?;
    let features = req
        .features
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty());
    let audience = req
        .audience
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty());

    let (system, user) = prompts::detail_page(product_name, features, audience);
    let result = state.generator.generate(&system, &user).await?;

    Ok(Json(GeneratedResponse { result }))
}
