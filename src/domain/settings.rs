use {
    crate::config::INDICATOR_DEFAULTS,
    serde::{Deserialize, Serialize},
    serde_json::{Map, Value},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RsiSettings {
    pub period: u32,
    pub overbought: u32,
    pub oversold: u32,
}

impl Default for RsiSettings {
    fn default() -> Self {
        Self {
            period: INDICATOR_DEFAULTS.rsi.period,
            overbought: INDICATOR_DEFAULTS.rsi.overbought,
            oversold: INDICATOR_DEFAULTS.rsi.oversold,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BollingerSettings {
    pub period: u32,
    #[serde(rename = "stdDev")]
    pub std_dev: f64,
}

impl Default for BollingerSettings {
    fn default() -> Self {
        Self {
            period: INDICATOR_DEFAULTS.bollinger.period,
            std_dev: INDICATOR_DEFAULTS.bollinger.std_dev,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmaSettings {
    /// Short term (fast)
    pub period1: u32,
    /// Long term (slow)
    pub period2: u32,
}

impl Default for EmaSettings {
    fn default() -> Self {
        Self {
            period1: INDICATOR_DEFAULTS.ema.fast,
            period2: INDICATOR_DEFAULTS.ema.slow,
        }
    }
}

/// User-chosen indicator parameters that condition the model's analysis.
/// Ordering between thresholds and periods is not enforced.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AnalysisSettings {
    pub rsi: RsiSettings,
    pub bollinger: BollingerSettings,
    pub ema: EmaSettings,
}

/// A field that was present in a stored record but could not be used.
#[derive(Debug, Clone, PartialEq)]
pub struct RejectedField {
    pub group: &'static str,
    pub field: &'static str,
    pub value: Value,
}

impl std::fmt::Display for RejectedField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{} = {}", self.group, self.field, self.value)
    }
}

impl AnalysisSettings {
    /// Rebuild settings from a stored JSON record.
    ///
    /// Each group (`rsi`, `bollinger`, `ema`) is merged independently over the defaults:
    /// present keys override, missing keys keep the default. Present values that are not
    /// positive numbers of the right kind fall back to the default and are reported back.
    pub fn merge_over_defaults(record: &Value) -> (Self, Vec<RejectedField>) {
        let mut settings = Self::default();
        let mut rejected = Vec::new();
        let group = |name: &str| -> Map<String, Value> {
            record
                .get(name)
                .and_then(Value::as_object)
                .cloned()
                .unwrap_or_default()
        };

        let rsi = &group("rsi");
        merge_u32(rsi, "rsi", "period", &mut settings.rsi.period, &mut rejected);
        merge_u32(rsi, "rsi", "overbought", &mut settings.rsi.overbought, &mut rejected);
        merge_u32(rsi, "rsi", "oversold", &mut settings.rsi.oversold, &mut rejected);

        let bollinger = &group("bollinger");
        merge_u32(bollinger, "bollinger", "period", &mut settings.bollinger.period, &mut rejected);
        merge_f64(bollinger, "bollinger", "stdDev", &mut settings.bollinger.std_dev, &mut rejected);

        let ema = &group("ema");
        merge_u32(ema, "ema", "period1", &mut settings.ema.period1, &mut rejected);
        merge_u32(ema, "ema", "period2", &mut settings.ema.period2, &mut rejected);

        (settings, rejected)
    }

    /// True when every value is strictly positive.
    pub fn is_valid(&self) -> bool {
        self.rsi.period > 0
            && self.rsi.overbought > 0
            && self.rsi.oversold > 0
            && self.bollinger.period > 0
            && self.bollinger.std_dev.is_finite()
            && self.bollinger.std_dev > 0.0
            && self.ema.period1 > 0
            && self.ema.period2 > 0
    }

    /// Display labels carrying the parameters, in RSI / EMA / Bollinger order.
    pub fn indicator_labels(&self) -> [String; 3] {
        [
            format!("RSI ({})", self.rsi.period),
            format!("EMA {}/{}", self.ema.period1, self.ema.period2),
            format!("Bollinger ({})", self.bollinger.period),
        ]
    }

    /// Advisory notes for orderings the model may find contradictory. Never blocks a request.
    pub fn ordering_hints(&self) -> Vec<&'static str> {
        let mut hints = Vec::new();
        if self.rsi.oversold >= self.rsi.overbought {
            hints.push("RSI oversold is not below overbought");
        }
        if self.ema.period1 >= self.ema.period2 {
            hints.push("EMA fast period is not shorter than slow period");
        }
        hints
    }
}

fn merge_u32(
    group: &Map<String, Value>,
    group_name: &'static str,
    field: &'static str,
    target: &mut u32,
    rejected: &mut Vec<RejectedField>,
) {
    let Some(value) = group.get(field) else {
        return;
    };
    let parsed = value
        .as_u64()
        .or_else(|| {
            value
                .as_f64()
                .filter(|f| f.fract() == 0.0 && *f >= 0.0)
                .map(|f| f as u64)
        })
        .filter(|v| *v > 0)
        .and_then(|v| u32::try_from(v).ok());

    match parsed {
        Some(v) => *target = v,
        None => rejected.push(RejectedField {
            group: group_name,
            field,
            value: value.clone(),
        }),
    }
}

fn merge_f64(
    group: &Map<String, Value>,
    group_name: &'static str,
    field: &'static str,
    target: &mut f64,
    rejected: &mut Vec<RejectedField>,
) {
    let Some(value) = group.get(field) else {
        return;
    };
    match value.as_f64().filter(|v| v.is_finite() && *v > 0.0) {
        Some(v) => *target = v,
        None => rejected.push(RejectedField {
            group: group_name,
            field,
            value: value.clone(),
        }),
    }
}
