//! Indicator defaults and the ranges the settings panel offers.
use std::ops::RangeInclusive;

pub struct RsiDefaults {
    pub period: u32,
    pub overbought: u32,
    pub oversold: u32,
}

pub struct BollingerDefaults {
    pub period: u32,
    pub std_dev: f64,
}

pub struct EmaDefaults {
    pub fast: u32,
    pub slow: u32,
}

pub struct IndicatorDefaults {
    pub rsi: RsiDefaults,
    pub bollinger: BollingerDefaults,
    pub ema: EmaDefaults,
}

pub const INDICATOR_DEFAULTS: IndicatorDefaults = IndicatorDefaults {
    rsi: RsiDefaults {
        period: 14,
        overbought: 70,
        oversold: 30,
    },
    bollinger: BollingerDefaults {
        period: 20,
        std_dev: 2.0,
    },
    ema: EmaDefaults {
        fast: 20,
        slow: 50,
    },
};

/// Slider and drag-value bounds for the settings panel.
pub struct IndicatorLimits {
    pub rsi_period: RangeInclusive<u32>,
    /// Thresholds are free numeric fields; only keep them on the RSI scale.
    pub rsi_threshold: RangeInclusive<u32>,
    pub bollinger_period: RangeInclusive<u32>,
    pub bollinger_std_dev: RangeInclusive<f64>,
    pub bollinger_std_dev_step: f64,
    pub ema_fast: RangeInclusive<u32>,
    pub ema_slow: RangeInclusive<u32>,
}

pub const INDICATOR_LIMITS: IndicatorLimits = IndicatorLimits {
    rsi_period: 2..=30,
    rsi_threshold: 1..=100,
    bollinger_period: 5..=50,
    bollinger_std_dev: 1.0..=4.0,
    bollinger_std_dev_step: 0.1,
    ema_fast: 5..=100,
    ema_slow: 10..=200,
};
