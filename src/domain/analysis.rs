use {
    serde::{Deserialize, Serialize, Serializer},
    strum_macros::{AsRefStr, Display, EnumIter},
};

/// The definitive directional recommendation returned by the model.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter, AsRefStr,
)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum Signal {
    Buy,
    Sell,
    Neutral,
    Wait,
}

/// Per-indicator directional bias.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter, AsRefStr,
)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum Sentiment {
    Bullish,
    Bearish,
    Neutral,
}

/// Predicted colour of the active candle at close.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter, AsRefStr,
)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum CandleColor {
    Green,
    Red,
    Doji,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeSetup {
    pub entry: String,
    pub stop_loss: String,
    pub take_profit: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorAnalysis {
    /// e.g. "75 - Hooking Down", "Price < EMA 50"
    pub status: String,
    pub sentiment: Sentiment,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorReadings {
    pub rsi: IndicatorAnalysis,
    pub ema: IndicatorAnalysis,
    pub bollinger: IndicatorAnalysis,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyLevels {
    pub support: String,
    pub resistance: String,
}

/// One complete answer from the model. Built only from a successful response and never
/// mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub signal: Signal,
    /// Percentage as reported by the model. Not clamped.
    #[serde(serialize_with = "serialize_confidence")]
    pub confidence: f64,
    pub trade_setup: TradeSetup,
    pub market_structure: String,
    pub patterns_detected: Vec<String>,
    pub indicators: IndicatorReadings,
    pub predicted_candle_close: CandleColor,
    pub key_levels: KeyLevels,
    pub reasoning: Vec<String>,
}

impl AnalysisResult {
    /// Indicators in display order with their readings.
    pub fn indicator_rows(&self) -> [(&'static str, &IndicatorAnalysis); 3] {
        [
            ("RSI", &self.indicators.rsi),
            ("EMA", &self.indicators.ema),
            ("Bollinger", &self.indicators.bollinger),
        ]
    }

    /// How many indicators lean the same way as the signal.
    pub fn confluence(&self) -> usize {
        let wanted = match self.signal {
            Signal::Buy => Sentiment::Bullish,
            Signal::Sell => Sentiment::Bearish,
            Signal::Neutral | Signal::Wait => return 0,
        };
        self.indicator_rows()
            .iter()
            .filter(|(_, reading)| reading.sentiment == wanted)
            .count()
    }
}

/// Whole percentages go back out as integers, so `82` is written as `82`, not `82.0`.
fn serialize_confidence<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    const MAX_EXACT_INT: f64 = 9_007_199_254_740_992.0;
    if value.fract() == 0.0 && value.abs() <= MAX_EXACT_INT {
        serializer.serialize_i64(*value as i64)
    } else {
        serializer.serialize_f64(*value)
    }
}
