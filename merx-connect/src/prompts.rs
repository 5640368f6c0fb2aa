//! Prompt templates for the text-generation collaborator.
//!
//! Builders return a `(system, user)` instruction pair. Inputs are already
//! validated and any market context arrives as a pre-rendered block, so this
//! module is pure string assembly.

use serde::Deserialize;

use merx_core::market::{ListingItem, PriceRangeSummary, SellerFrequency, TrendDirection};
use merx_core::pricing::PricingResult;

use crate::provider::KeywordStat;

/// Writing style for blog generation
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BlogStyle {
    Informational,
    Review,
    Listicle,
    Comparison,
}

impl Default for BlogStyle {
    fn default() -> Self {
        Self::Informational
    }
}

impl BlogStyle {
    fn guide(self) -> &'static str {
        match self {
            Self::Informational => {
                "Write in an objective, expert voice that delivers trustworthy information."
            }
            Self::Review => {
                "Write in first person as if from direct experience, honest and approachable."
            }
            Self::Listicle => {
                "Structure the post as a numbered list, e.g. \"5 ways\" or \"Top 7\"."
            }
            Self::Comparison => {
                "Compare pros and cons explicitly, using tables or side-by-side paragraphs."
            }
        }
    }
}

/// SEO blog post generation
pub fn blog_post(topic: &str, keywords: Option<&str>, style: BlogStyle) -> (String, String) {
    let system = format!(
        "You are a search-ranking specialist for marketplace blogs. \
         Write an SEO-optimized blog post.\n\n{}\n\n\
         Rules:\n\
         1. Title: propose 3 click-worthy title candidates containing the core keyword.\n\
         2. Body (1,500-2,000 characters): a hook intro, 3-5 sections with subheadings, \
         a closing summary with a call to action.\n\
         3. SEO: place the keyword naturally at least 5 times, include it in subheadings \
         and in the first paragraph.\n\
         4. Readability: short paragraphs of 2-3 sentences.\n\
         5. End with a question that invites comments.\n\n\
         The output must be ready to paste into a blog editor as-is.",
        style.guide()
    );

    let mut user = format!("Topic: {topic}\n");
    if let Some(keywords) = keywords {
        user.push_str(&format!("SEO keywords: {keywords}\n"));
    }
    user.push_str("Write the blog post for this topic.");

    (system, user)
}

/// Personal-essay blog post written to read human, not generated.
///
/// The PRISM rubric: Personal anecdotes, Relatable moments, Insightful
/// takeaways, Specific sensory detail, Memorable closing line.
pub fn human_blog(
    topic: &str,
    experience: Option<&str>,
    emotion: Option<&str>,
) -> (String, String) {
    let system = "You are an essayist and blogger writing with the PRISM rubric. \
         Drop the stiffness of generated text; the post must read like a person.\n\n\
         PRISM rules:\n\
         - P (Personal): include a personal experience and a concrete anecdote.\n\
         - R (Relatable): add moments that make the reader think \"that's me too\".\n\
         - I (Insightful): go beyond listing facts to a takeaway of your own.\n\
         - S (Specific): replace \"it was good\" with sensory, concrete description.\n\
         - M (Memorable): end on a line or metaphor that sticks.\n\n\
         Follow the rubric strictly."
        .to_string();

    let user = format!(
        "Topic: {topic}\n\
         My experience (Personal): {}\n\
         Feelings to convey: {}\n\n\
         Fold these ingredients into a human-sounding blog post that follows \
         the PRISM rules.",
        experience.unwrap_or("nothing in particular (invent something natural)"),
        emotion.unwrap_or("calm, quietly pleased"),
    );

    (system, user)
}

/// One source text repurposed for three platforms at once
pub fn repurpose_content(content: &str, tone: Option<&str>) -> (String, String) {
    let system = "You are a one-source multi-use content marketer. Take a single \
         text source and adapt it for Instagram, short-form video, and text SNS \
         (threads/microblogs), each optimized for its platform.\n\n\
         Output exactly these sections:\n\n\
         ## [INSTAGRAM]\n\
         - card-news copy per page (pages 1-5)\n\
         - a suggested image prompt\n\
         - 15 hashtags\n\n\
         ## [SHORTS]\n\
         - a 60-second short-form script\n\
         - hook opening -> body -> closing\n\
         - on-screen direction notes\n\n\
         ## [SNS]\n\
         - a short post for threads/microblog/feed\n\
         - readable style with line breaks and emoji\n\
         - core summary plus an empathy hook"
        .to_string();

    let user = format!(
        "[Source text]\n{content}\n\n\
         [Desired tone]\n{}\n\n\
         Generate the three platform variants from this source.",
        tone.unwrap_or("friendly and current"),
    );

    (system, user)
}

/// Hook style for short-form scripts
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum HookStyle {
    Shock,
    Question,
    Comparison,
    Tip,
}

impl Default for HookStyle {
    fn default() -> Self {
        Self::Shock
    }
}

impl HookStyle {
    fn guide(self) -> &'static str {
        match self {
            Self::Shock => {
                "open with a jolting fact or reversal, e.g. \"miss this and you \
                 lose money every month\""
            }
            Self::Question => {
                "open with a curiosity-baiting question, e.g. \"why does nobody \
                 tell you this?\""
            }
            Self::Comparison => {
                "open with an A vs B matchup, e.g. \"savings vs stocks, which \
                 actually pays?\""
            }
            Self::Tip => {
                "lead with the tip itself, e.g. \"do just this one thing\""
            }
        }
    }
}

/// 60-second short-form video script
pub fn shorts_script(topic: &str, hook: HookStyle) -> (String, String) {
    let system = "You are a short-form creator for vertical video platforms. \
         You make addictive sixty-second pieces that grab viewers and hold them \
         to the end. The contract: win the first 3 seconds, move fast, one clear \
         message."
        .to_string();

    let user = format!(
        "Write a short-form script under these conditions.\n\n\
         [Conditions]\n\
         - Topic: {topic}\n\
         - Hook style: {}\n\
         - Length: 60 seconds or less\n\n\
         Use this structure:\n\n\
         ## Hook (0-3s): the line that stops the scroll, with expression and \
         gesture notes\n\
         ## Body (4-50s): at most 3 points, each with its line, cut direction, \
         and caption text (bold the keywords)\n\
         ## Close (51-60s): one-line recap and a follow/like call to action\n\
         ## Edit guide: music mood, sound-effect timing, caption style, transitions\n\
         ## Hashtags: 10 suggestions\n\n\
         Then add 3 further short ideas on the same topic.",
        hook.guide(),
    );

    (system, user)
}

/// Long-form video script with retention-focused structure
pub fn video_script(
    topic: &str,
    duration: Option<&str>,
    style: Option<&str>,
) -> (String, String) {
    let system = "You are the script writer behind a million-subscriber channel. \
         Your scripts stop drop-off and keep people watching to the end."
        .to_string();

    let user = format!(
        "Write a video script under these conditions.\n\n\
         [Conditions]\n\
         - Topic: {topic}\n\
         - Video length: {}\n\
         - Style: {}\n\n\
         Use this structure:\n\n\
         ## Thumbnail & titles: 3 high-click titles plus thumbnail keyword ideas\n\
         ## Intro (first 30s): the hook, and why the viewer must stay to the end\n\
         ## Body: sectioned, with the key point and lines per section, caption \
         keywords marked\n\
         ## Outro: recap, subscribe/like ask, next-video tease\n\
         ## Edit points: B-roll spots, sound/music picks, caption emphasis\n\n\
         Make it concrete enough to shoot from directly.",
        duration.unwrap_or("about 10 minutes"),
        style.unwrap_or("informative"),
    );

    (system, user)
}

/// Product detail-page copy generation
pub fn detail_page(
    product_name: &str,
    features: Option<&str>,
    audience: Option<&str>,
) -> (String, String) {
    let system = "You are a conversion copywriter for online marketplace product pages. \
         Produce detail-page copy with: a headline, 3 selling-point sections with \
         subheadings, a specification summary, and a purchase-objection FAQ of 3 items. \
         Keep claims concrete and avoid superlatives that ad review would reject."
        .to_string();

    let mut user = format!("Product: {product_name}\n");
    if let Some(features) = features {
        user.push_str(&format!("Key features: {features}\n"));
    }
    if let Some(audience) = audience {
        user.push_str(&format!("Target audience: {audience}\n"));
    }
    user.push_str("Write the detail-page copy.");

    (system, user)
}

/// Standard product names tuned for price-comparison catalog matching
pub fn catalog_match(
    keyword: Option<&str>,
    category: Option<&str>,
    pricing: &PricingResult,
) -> (String, String) {
    let system = "You are a catalog-matching specialist for a price-comparison marketplace. \
         The strategy is to attach a listing to an existing well-selling catalog entry.\n\n\
         Rules:\n\
         1. Put the brand or manufacturer name first when one exists.\n\
         2. Include the exact model keyword.\n\
         3. Strip decorative modifiers; aim for a clean standard product name.\n\
         4. Catalog matching lives or dies on accuracy."
        .to_string();

    let mut user = String::new();
    if let Some(category) = category {
        user.push_str(&format!("Category: {category}\n"));
    }
    if let Some(keyword) = keyword {
        user.push_str(&format!("Core keyword: {keyword}\n"));
    }
    user.push_str(&format!(
        "Planned listing price: {} (margin rate {}%)\n\n\
         Recommend 5 standard product names likely to match the price-comparison \
         catalog, each with a one-line reason.",
        pricing.target_price, pricing.margin_rate_display
    ));

    (system, user)
}

/// Keyword analysis report over whatever data sources responded
pub fn keyword_analysis(keyword: &str, context_block: &str) -> (String, String) {
    let system = format!(
        "You are a marketplace SEO and search-marketing analyst. \
         Analyze the keyword data below and produce a practical report.\n\n\
         {context_block}\n\n\
         Report format:\n\
         ## Summary: market potential (high/medium/low) and competition level\n\
         ## Search intent: why people search this, purchase vs research split\n\
         ## Seller playbook: using the keyword in product names and detail pages\n\
         ## Blogger playbook: title patterns and related-keyword usage\n\
         ## Long-tail picks: 5 lower-competition keywords with real volume\n\
         ## Cautions: what to avoid with this keyword\n\n\
         Ground every recommendation in the data provided."
    );

    let user = format!("Analyze the keyword \"{keyword}\".");
    (system, user)
}

/// Product sourcing recommendations grounded in live market data
pub fn sourcing_ideas(
    category: &str,
    keyword: &str,
    budget: Option<&str>,
    market_block: &str,
) -> (String, String) {
    let data_section = if market_block.is_empty() {
        "(no live market data available - give general recommendations)".to_string()
    } else {
        market_block.to_string()
    };

    let system = format!(
        "You are a product-sourcing specialist with ten years of marketplace \
         experience. Analyze the live market data below and recommend products \
         with strong sales potential.\n\n{data_section}\n\n\
         Answer format:\n\
         ## Market summary: result counts, price bands, competition\n\
         ## 5 product ideas, each with: name, data-backed rationale, target buyer, \
         recommended price, estimated margin, sourcing channel, differentiation angle\n\
         ## Sourcing strategy: what it takes to win here, and the risks to avoid\n\n\
         Be specific and actionable; cite the data where it supports a claim."
    );

    let mut user = format!("Category of interest: {category}\nDetail keyword: {keyword}\n");
    if let Some(budget) = budget {
        user.push_str(&format!("Unit-cost budget: {budget}\n"));
    }
    user.push_str("Recommend sellable product ideas for these constraints.");

    (system, user)
}

/// Package/listing name candidates for a product line
pub fn package_names(
    category_name: &str,
    keywords: &[String],
    style: &str,
    target_age: &str,
    price_band: &str,
    market_block: &str,
) -> (String, String) {
    let data_section = if market_block.is_empty() {
        String::new()
    } else {
        format!("\n\nLive market data:\n{market_block}")
    };

    let system = format!(
        "You are a marketplace listing strategist. Craft product listing name \
         candidates that balance searchability with brand tone.{data_section}\n\n\
         Deliver: 5 listing name candidates, each with a one-line rationale, then \
         a short note on which keywords to keep out of the name."
    );

    let user = format!(
        "Category: {category_name}\n\
         Keywords: {}\n\
         Brand tone: {}\n\
         Target buyers: {}\n\
         Price positioning: {}\n\n\
         Propose the listing names.",
        keywords.join(", "),
        style_label(style),
        age_label(target_age),
        price_label(price_band),
    );

    (system, user)
}

fn style_label(code: &str) -> &str {
    match code {
        "premium" => "premium / upscale",
        "casual" => "casual / friendly",
        "minimal" => "minimal / clean",
        "trendy" => "trendy / current",
        other => other,
    }
}

fn age_label(code: &str) -> &str {
    match code {
        "20s" => "20s, trend-driven",
        "30s" => "30s, value-driven",
        "40s" => "40s-50s",
        "all" => "all ages",
        other => other,
    }
}

fn price_label(code: &str) -> &str {
    match code {
        "low" => "budget tier",
        "mid" => "low-to-mid tier",
        "high" => "upper-mid tier",
        "premium" => "premium tier",
        other => other,
    }
}

// ============================================================================
// Market-context rendering
// ============================================================================

/// Render a shopping snapshot (sample listings, price range, top sellers)
/// into a prompt-ready block
pub fn render_shopping_block(
    total: u64,
    items: &[ListingItem],
    range: Option<&PriceRangeSummary>,
    top_sellers: &[SellerFrequency],
) -> String {
    let mut block = format!("## Live shopping data ({total} products found)\n");

    if !items.is_empty() {
        block.push_str("\n### Currently selling:\n");
        for (i, item) in items.iter().take(5).enumerate() {
            block.push_str(&format!(
                "{}. {} - {} ({})\n",
                i + 1,
                item.title,
                item.price,
                item.seller_name
            ));
        }
    }

    if let Some(range) = range {
        block.push_str(&format!(
            "\n### Price analysis:\n- lowest: {}\n- highest: {}\n- average: {}\n",
            range.min, range.max, range.avg
        ));
    }

    if !top_sellers.is_empty() {
        block.push_str("\n### Leading sellers:\n");
        for seller in top_sellers {
            block.push_str(&format!(
                "- {}: {} listings\n",
                seller.seller_name, seller.count
            ));
        }
    }

    block
}

/// Render per-keyword trend directions into a prompt-ready block
pub fn render_trend_block(directions: &[(String, TrendDirection)]) -> String {
    if directions.is_empty() {
        return String::new();
    }
    let mut block = String::from("## Search trend (last 12 months)\n");
    for (keyword, direction) in directions {
        let word = match direction {
            TrendDirection::Rising => "rising",
            TrendDirection::Falling => "falling",
            TrendDirection::Flat => "steady",
        };
        block.push_str(&format!("- \"{keyword}\": recent interest {word}\n"));
    }
    block
}

/// Render whichever keyword data sources responded into an analysis context
pub fn render_keyword_block(
    keyword: &str,
    stats: Option<&KeywordStat>,
    shopping_count: Option<u64>,
    blog_count: Option<u64>,
    related: &[String],
    direction: Option<TrendDirection>,
) -> String {
    let mut block = format!("Keyword under analysis: {keyword}\n");

    if let Some(stats) = stats {
        if stats.monthly_total() > 0 {
            block.push_str(&format!(
                "Monthly searches: {}\n- PC: {}\n- mobile: {}\n",
                stats.monthly_total(),
                stats.monthly_pc,
                stats.monthly_mobile
            ));
        }
    }
    if let Some(count) = shopping_count {
        block.push_str(&format!("Shopping listings for this keyword: {count}\n"));
    }
    if let Some(count) = blog_count {
        block.push_str(&format!("Blog posts for this keyword: {count}\n"));
    }
    if !related.is_empty() {
        let shown: Vec<&str> = related.iter().take(10).map(String::as_str).collect();
        block.push_str(&format!("Related keywords: {}\n", shown.join(", ")));
    }
    if let Some(direction) = direction {
        let word = match direction {
            TrendDirection::Rising => "rising",
            TrendDirection::Falling => "falling",
            TrendDirection::Flat => "steady",
        };
        block.push_str(&format!("Search trend over the last 3 months: {word}\n"));
    }

    block
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::Competition;

    #[test]
    fn test_blog_post_carries_inputs() {
        let (system, user) = blog_post("camping chairs", Some("lightweight chair"), BlogStyle::Listicle);

        assert!(system.contains("numbered list"));
        assert!(user.contains("camping chairs"));
        assert!(user.contains("lightweight chair"));
    }

    #[test]
    fn test_blog_style_parses_from_request_codes() {
        let style: BlogStyle = serde_json::from_value(serde_json::json!("review")).unwrap();
        assert_eq!(style, BlogStyle::Review);
        assert!(serde_json::from_value::<BlogStyle>(serde_json::json!("poem")).is_err());
    }

    #[test]
    fn test_human_blog_defaults_missing_ingredients() {
        let (system, user) = human_blog("first solo camping trip", None, None);

        assert!(system.contains("PRISM"));
        assert!(user.contains("first solo camping trip"));
        assert!(user.contains("invent something natural"));

        let (_, user) = human_blog("gear review", Some("tent broke at 2am"), Some("frustration"));
        assert!(user.contains("tent broke at 2am"));
        assert!(user.contains("frustration"));
    }

    #[test]
    fn test_repurpose_content_carries_source_and_tone() {
        let (system, user) = repurpose_content("our spring sale landing copy", Some("playful"));

        assert!(system.contains("[INSTAGRAM]"));
        assert!(system.contains("[SHORTS]"));
        assert!(system.contains("[SNS]"));
        assert!(user.contains("our spring sale landing copy"));
        assert!(user.contains("playful"));
    }

    #[test]
    fn test_shorts_script_hook_styles() {
        let (_, user) = shorts_script("index funds", HookStyle::Comparison);
        assert!(user.contains("index funds"));
        assert!(user.contains("A vs B"));

        let style: HookStyle = serde_json::from_value(serde_json::json!("tip")).unwrap();
        assert_eq!(style, HookStyle::Tip);
        assert!(serde_json::from_value::<HookStyle>(serde_json::json!("drama")).is_err());
    }

    #[test]
    fn test_video_script_defaults() {
        let (_, user) = video_script("home espresso setup", None, None);

        assert!(user.contains("home espresso setup"));
        assert!(user.contains("about 10 minutes"));

        let (_, user) = video_script("home espresso setup", Some("8 minutes"), Some("vlog"));
        assert!(user.contains("8 minutes"));
        assert!(user.contains("vlog"));
    }

    #[test]
    fn test_catalog_match_embeds_pricing() {
        let pricing = PricingResult {
            target_price: 8850,
            fee: 531,
            margin: 3319,
            margin_rate_display: "37.5".to_string(),
        };
        let (_, user) = catalog_match(Some("earbuds x200"), Some("audio"), &pricing);

        assert!(user.contains("8850"));
        assert!(user.contains("37.5"));
        assert!(user.contains("earbuds x200"));
    }

    #[test]
    fn test_render_shopping_block() {
        let items = vec![ListingItem {
            title: "Earbuds Pro".to_string(),
            price: 12900,
            seller_name: "AudioHub".to_string(),
        }];
        let range = PriceRangeSummary {
            min: 9900,
            max: 15900,
            avg: 12400,
        };
        let sellers = vec![SellerFrequency {
            seller_name: "AudioHub".to_string(),
            count: 7,
        }];

        let block = render_shopping_block(4123, &items, Some(&range), &sellers);

        assert!(block.contains("4123 products"));
        assert!(block.contains("Earbuds Pro"));
        assert!(block.contains("lowest: 9900"));
        assert!(block.contains("AudioHub: 7 listings"));
    }

    #[test]
    fn test_render_keyword_block_with_partial_sources() {
        let stats = KeywordStat {
            keyword: "earbuds".to_string(),
            monthly_pc: 8200,
            monthly_mobile: 41200,
            competition: Competition::High,
        };

        // Only two of the four sources responded
        let block = render_keyword_block(
            "earbuds",
            Some(&stats),
            None,
            Some(320),
            &[],
            Some(TrendDirection::Rising),
        );

        assert!(block.contains("Monthly searches: 49400"));
        assert!(block.contains("Blog posts for this keyword: 320"));
        assert!(!block.contains("Shopping listings"));
        assert!(block.contains("rising"));
    }

    #[test]
    fn test_sourcing_ideas_without_market_data() {
        let (system, _) = sourcing_ideas("kitchen", "silicone spatula", None, "");
        assert!(system.contains("no live market data"));
    }
}
