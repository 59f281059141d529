//! The instruction text and structured-output schema sent with every chart.

use {
    crate::domain::{AnalysisSettings, CandleColor, Sentiment, Signal},
    serde_json::{Value, json},
    strum::IntoEnumIterator,
};

/// Natural-language instruction conditioned on the user's indicator parameters.
pub fn build_instruction(settings: &AnalysisSettings) -> String {
    let rsi = &settings.rsi;
    let ema = &settings.ema;
    let bb = &settings.bollinger;

    format!(
        "You are an advanced OTC market signal bot.
Your job is to analyze price action and provide highly accurate BUY/SELL signals.

Integrate the following three indicators into your analysis, respecting these USER SETTINGS:

1. **RSI (Relative Strength Index)** - Period: {rsi_period}
   - Detect overbought (Above {overbought}) / oversold (Below {oversold}) conditions.
   - Confirm reversals when RSI crosses these key thresholds.

2. **Moving Averages (EMA {fast} & EMA {slow})**
   - Identify short-term vs long-term trend direction.
   - Generate signals when EMA crossover aligns with price action.
   - Bullish: Price > EMA {fast}. Bearish: Price < EMA {fast}.

3. **Bollinger Bands** - Period: {bb_period}, StdDev: {std_dev}
   - Spot volatility expansions and contractions.
   - Detect breakout or rejection at upper/lower bands.

**Signal Rules:**
- Combine candlestick psychology + market structure (support/resistance, FVG, order blocks) with these indicators.
- **Only issue signals when at least 2 out of 3 indicators confirm the same direction.**
- Provide clear ENTRY, STOP LOSS, and TARGET levels.
- Explain reasoning in simple terms (e.g., \"RSI oversold + EMA bearish crossover + price rejecting Bollinger mid-band\").
- Accuracy goal: 90% or higher.

OUTPUT:
- JSON format only.
",
        rsi_period = rsi.period,
        overbought = rsi.overbought,
        oversold = rsi.oversold,
        fast = ema.period1,
        slow = ema.period2,
        bb_period = bb.period,
        std_dev = format_multiplier(bb.std_dev),
    )
}

/// `2.0` -> `2`, `2.125` -> `2.125`. Rounds to 12 significant digits to drop slider float
/// noise such as `2.3000000000000003`, so the value reads as the user set it.
fn format_multiplier(value: f64) -> String {
    let cleaned = format!("{:.11e}", value).parse::<f64>().unwrap_or(value);
    format!("{}", cleaned)
}

fn enum_values<E: IntoEnumIterator + AsRef<str>>() -> Vec<String> {
    E::iter().map(|v| v.as_ref().to_owned()).collect()
}

fn indicator_schema(status_hint: &str) -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "status": { "type": "STRING", "description": status_hint },
            "sentiment": { "type": "STRING", "enum": enum_values::<Sentiment>() }
        },
        "required": ["status", "sentiment"]
    })
}

/// Structured-output schema mirroring [`crate::domain::AnalysisResult`].
pub fn response_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "signal": {
                "type": "STRING",
                "enum": enum_values::<Signal>(),
                "description": "The definitive trading signal. MUST have confluence of at least 2 indicators, ideally 3."
            },
            "confidence": {
                "type": "NUMBER",
                "description": "Confidence percentage based on indicator alignment."
            },
            "trade_setup": {
                "type": "OBJECT",
                "properties": {
                    "entry": { "type": "STRING", "description": "Exact entry level (e.g. 'Current Market Price' or specific level)." },
                    "stop_loss": { "type": "STRING", "description": "Tight Stop Loss level." },
                    "take_profit": { "type": "STRING", "description": "Realistic Take Profit level." }
                },
                "required": ["entry", "stop_loss", "take_profit"]
            },
            "market_structure": {
                "type": "STRING",
                "description": "Trend context (Uptrend, Downtrend, Ranging)."
            },
            "patterns_detected": {
                "type": "ARRAY",
                "items": { "type": "STRING" },
                "description": "Candle patterns or chart patterns detected."
            },
            "indicators": {
                "type": "OBJECT",
                "properties": {
                    "rsi": indicator_schema("Value & Action (e.g. '75 - Hooking Down')"),
                    "ema": indicator_schema("Trend relation (e.g. 'Price < EMA 50')"),
                    "bollinger": indicator_schema("Band interaction (e.g. 'Upper Band Rejection')")
                },
                "required": ["rsi", "ema", "bollinger"]
            },
            "predicted_candle_close": {
                "type": "STRING",
                "enum": enum_values::<CandleColor>(),
                "description": "Prediction for the active candle color."
            },
            "key_levels": {
                "type": "OBJECT",
                "properties": {
                    "support": { "type": "STRING" },
                    "resistance": { "type": "STRING" }
                },
                "required": ["support", "resistance"]
            },
            "reasoning": {
                "type": "ARRAY",
                "items": { "type": "STRING" },
                "description": "Explain why the indicators align or contradict."
            }
        },
        "required": [
            "signal",
            "confidence",
            "trade_setup",
            "market_structure",
            "patterns_detected",
            "indicators",
            "predicted_candle_close",
            "key_levels",
            "reasoning"
        ]
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RsiSettings;

    #[test]
    fn instruction_embeds_user_rsi_values() {
        let mut settings = AnalysisSettings::default();
        settings.rsi = RsiSettings {
            period: 21,
            overbought: 75,
            oversold: 25,
        };

        let text = build_instruction(&settings);
        assert!(text.contains("Period: 21"));
        assert!(text.contains("Above 75"));
        assert!(text.contains("Below 25"));
    }

    #[test]
    fn instruction_embeds_ema_and_bollinger_values() {
        let mut settings = AnalysisSettings::default();
        settings.ema.period1 = 9;
        settings.ema.period2 = 200;
        settings.bollinger.period = 34;
        settings.bollinger.std_dev = 2.5;

        let text = build_instruction(&settings);
        assert!(text.contains("EMA 9 & EMA 200"));
        assert!(text.contains("Price > EMA 9"));
        assert!(text.contains("Period: 34, StdDev: 2.5"));
        assert!(text.contains("at least 2 out of 3 indicators"));
    }

    #[test]
    fn whole_multipliers_print_without_decimals() {
        assert_eq!(format_multiplier(2.0), "2");
        assert_eq!(format_multiplier(2.5), "2.5");
        assert_eq!(format_multiplier(1.7000000000000002), "1.7");
        assert_eq!(format_multiplier(2.3000000000000003), "2.3");
    }

    #[test]
    fn multipliers_keep_every_significant_digit() {
        assert_eq!(format_multiplier(2.125), "2.125");
        assert_eq!(format_multiplier(0.0625), "0.0625");
        assert_eq!(format_multiplier(1e20), "100000000000000000000");

        let mut settings = AnalysisSettings::default();
        settings.bollinger.std_dev = 2.125;
        assert!(build_instruction(&settings).contains("StdDev: 2.125"));
    }

    #[test]
    fn schema_requires_all_nine_fields() {
        let schema = response_schema();
        let required = schema["required"].as_array().unwrap();
        assert_eq!(required.len(), 9);
        for field in required {
            let name = field.as_str().unwrap();
            assert!(schema["properties"].get(name).is_some(), "{} has no property", name);
        }
    }

    #[test]
    fn schema_enums_follow_the_domain_enums() {
        let schema = response_schema();
        assert_eq!(
            schema["properties"]["signal"]["enum"],
            json!(["BUY", "SELL", "NEUTRAL", "WAIT"])
        );
        assert_eq!(
            schema["properties"]["predicted_candle_close"]["enum"],
            json!(["GREEN", "RED", "DOJI"])
        );
        assert_eq!(
            schema["properties"]["indicators"]["properties"]["ema"]["properties"]["sentiment"]["enum"],
            json!(["BULLISH", "BEARISH", "NEUTRAL"])
        );
    }
}
