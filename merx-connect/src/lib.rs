pub mod dates;
pub mod error;
pub mod generation;
pub mod prompts;
pub mod provider;

pub use error::ConnectError;
pub use generation::{GeneratorConfig, TextGenerator};
pub use provider::{MarketDataClient, ProviderConfig};
