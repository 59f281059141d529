// Domain types and value objects
mod analysis;
mod settings;

#[cfg(test)]
pub(crate) use analysis::fixtures;

// Re-export commonly used types to the world
pub use analysis::{
    AnalysisResult, CandleColor, IndicatorAnalysis, IndicatorReadings, KeyLevels, Sentiment,
    Signal, TradeSetup,
};
pub use settings::{AnalysisSettings, BollingerSettings, EmaSettings, RejectedField, RsiSettings};
