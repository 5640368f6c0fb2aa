use std::sync::Arc;

use merx_connect::{MarketDataClient, TextGenerator};
use merx_core::pricing::PricingConfig;

/// Shared per-request context: collaborator clients are constructed once and
/// injected here, never reached through globals
#[derive(Clone)]
pub struct AppState {
    pub generator: Arc<TextGenerator>,
    pub provider: Arc<MarketDataClient>,
    pub pricing: PricingConfig,
}
