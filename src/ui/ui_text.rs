use std::sync::LazyLock;

pub struct UiText {
    // Header
    pub app_title_left: String,
    pub app_title_right: String,
    pub app_tagline: String,
    pub model_active_suffix: String,
    pub page_heading: String,
    pub page_intro: String,
    pub missing_api_key: String,

    // Settings panel
    pub settings_heading: String,
    pub settings_auto_saved: String,
    pub settings_footnote: String,
    pub rsi_heading: String,
    pub rsi_period: String,
    pub rsi_overbought: String,
    pub rsi_oversold: String,
    pub bb_heading: String,
    pub bb_period: String,
    pub bb_std_dev: String,
    pub ema_heading: String,
    pub ema_fast: String,
    pub ema_slow: String,

    // Uploader
    pub upload_prompt: String,
    pub upload_formats: String,
    pub upload_drop_now: String,
    pub upload_path_hint: String,
    pub upload_load: String,
    pub upload_processing: String,
    pub upload_new: String,

    // Errors
    pub error_prefix: String,

    // Empty state
    pub guide_steps: [(String, String); 3],

    // Result card
    pub loading_lines: [String; 3],
    pub card_confidence: String,
    pub card_target: String,
    pub card_confluence: String,
    pub card_entry: String,
    pub card_stop_loss: String,
    pub card_take_profit: String,
    pub card_support: String,
    pub card_resistance: String,
    pub card_reasoning: String,
    pub card_structure: String,
    pub card_completed: String,
}

pub static UI_TEXT: LazyLock<UiText> = LazyLock::new(|| UiText {
    app_title_left: "OTC".to_string(),
    app_title_right: "Analyst".to_string(),
    app_tagline: "AI POWERED SIGNAL BOT".to_string(),
    model_active_suffix: "ACTIVE".to_string(),
    page_heading: "Chart Analysis".to_string(),
    page_intro: "Upload a screenshot of your OTC market chart. Our AI will analyze price action \
                 based on your custom indicator parameters."
        .to_string(),
    missing_api_key: "No API key configured. Set API_KEY or pass --api-key.".to_string(),

    settings_heading: "Indicator Strategy Settings".to_string(),
    settings_auto_saved: "AUTO-SAVED".to_string(),
    settings_footnote: "* Adjusting these values enforces stricter rules for the AI, filtering out \
                        noise and weak signals. Settings are saved automatically."
        .to_string(),
    rsi_heading: "RSI CONFIGURATION".to_string(),
    rsi_period: "Period Length".to_string(),
    rsi_overbought: "Overbought >".to_string(),
    rsi_oversold: "Oversold <".to_string(),
    bb_heading: "BOLLINGER BANDS".to_string(),
    bb_period: "Period (SMA)".to_string(),
    bb_std_dev: "Std Deviation".to_string(),
    ema_heading: "EMA (MOVING AVERAGE) CONFIGURATION".to_string(),
    ema_fast: "Short Period (Fast)".to_string(),
    ema_slow: "Long Period (Slow)".to_string(),

    upload_prompt: "Drag Chart Screenshot Here".to_string(),
    upload_formats: "Supports JPG, PNG, WEBP".to_string(),
    upload_drop_now: "Release to analyze".to_string(),
    upload_path_hint: "or enter a path to a chart image".to_string(),
    upload_load: "Load".to_string(),
    upload_processing: "Processing Image...".to_string(),
    upload_new: "✖ Upload New Chart".to_string(),

    error_prefix: "Error:".to_string(),

    guide_steps: [
        (
            "Set Strategy".to_string(),
            "Configure RSI, EMA & Bollinger thresholds.".to_string(),
        ),
        (
            "Upload Chart".to_string(),
            "Take a clear screenshot of your broker's chart.".to_string(),
        ),
        (
            "Get Signal".to_string(),
            "Receive a Buy/Sell signal with detailed reasoning.".to_string(),
        ),
    ],

    loading_lines: [
        "CALCULATING RSI DIVERGENCE...".to_string(),
        "CHECKING EMA CROSSOVERS...".to_string(),
        "ANALYZING BOLLINGER VOLATILITY...".to_string(),
    ],
    card_confidence: "CONFIDENCE".to_string(),
    card_target: "TARGET".to_string(),
    card_confluence: "TECHNICAL CONFLUENCE".to_string(),
    card_entry: "ENTRY".to_string(),
    card_stop_loss: "STOP LOSS".to_string(),
    card_take_profit: "TAKE PROFIT".to_string(),
    card_support: "Support".to_string(),
    card_resistance: "Resistance".to_string(),
    card_reasoning: "STRATEGY REASONING".to_string(),
    card_structure: "Structure".to_string(),
    card_completed: "Completed".to_string(),
});
