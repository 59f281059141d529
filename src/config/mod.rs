//! Configuration module for the chart signal application.

// Can all be private now because we have a public re-export.
mod debug;
mod indicators;
mod persistence;
mod provider;

// Re-export commonly used items
pub use debug::DF;
pub use indicators::{INDICATOR_DEFAULTS, INDICATOR_LIMITS, IndicatorLimits};
pub use persistence::PERSISTENCE;
pub use provider::{PROVIDER, ProviderConfig, model_badge};
