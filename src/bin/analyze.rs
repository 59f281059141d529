use anyhow::{Context, Result};
use chart_signal::{
    AnalysisProvider, AnalysisResult, AnalysisSettings, ChartImage, GeminiClient, PROVIDER,
    SettingsStore,
    data::JsonFileStorage,
    engine::ANALYSIS_FAILED_MESSAGE,
    utils::{AppInstant, format_duration_ms},
};
use clap::Parser;
use std::path::PathBuf;
use tabled::{
    Table, Tabled,
    settings::{Style, object::Columns, Width},
};

/// Analyze a chart screenshot from the command line.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Chart screenshot (png, jpg, webp, gif, bmp)
    #[arg(long)]
    image: PathBuf,

    /// JSON file holding the persisted indicator settings; created if missing
    #[arg(long)]
    settings: Option<PathBuf>,

    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    rsi_period: Option<u32>,
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    rsi_overbought: Option<u32>,
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    rsi_oversold: Option<u32>,
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    ema_fast: Option<u32>,
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    ema_slow: Option<u32>,
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    bb_period: Option<u32>,
    #[arg(long, value_parser = parse_positive_f64)]
    bb_std_dev: Option<f64>,

    /// API key for the hosted model
    #[arg(long, env = "API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    #[arg(long, default_value = PROVIDER.model)]
    model: String,

    #[arg(long, default_value = PROVIDER.base_url)]
    base_url: String,

    /// Print the raw result JSON instead of tables
    #[arg(long, default_value_t = false)]
    json: bool,
}

impl Args {
    fn has_overrides(&self) -> bool {
        self.rsi_period.is_some()
            || self.rsi_overbought.is_some()
            || self.rsi_oversold.is_some()
            || self.ema_fast.is_some()
            || self.ema_slow.is_some()
            || self.bb_period.is_some()
            || self.bb_std_dev.is_some()
    }

    fn apply_overrides(&self, settings: &mut AnalysisSettings) {
        if let Some(v) = self.rsi_period {
            settings.rsi.period = v;
        }
        if let Some(v) = self.rsi_overbought {
            settings.rsi.overbought = v;
        }
        if let Some(v) = self.rsi_oversold {
            settings.rsi.oversold = v;
        }
        if let Some(v) = self.ema_fast {
            settings.ema.period1 = v;
        }
        if let Some(v) = self.ema_slow {
            settings.ema.period2 = v;
        }
        if let Some(v) = self.bb_period {
            settings.bollinger.period = v;
        }
        if let Some(v) = self.bb_std_dev {
            settings.bollinger.std_dev = v;
        }
    }
}

fn parse_positive_f64(s: &str) -> Result<f64, String> {
    let v: f64 = s.parse().map_err(|e| format!("{}", e))?;
    if v.is_finite() && v > 0.0 {
        Ok(v)
    } else {
        Err(format!("{} is not a positive number", s))
    }
}

/// Settings from the file (if any) with command-line overrides on top.
/// The merged record is written back so the next run starts from it.
fn resolve_settings(args: &Args) -> Result<AnalysisSettings> {
    let Some(path) = &args.settings else {
        let mut settings = AnalysisSettings::default();
        args.apply_overrides(&mut settings);
        return Ok(settings);
    };

    let mut storage = JsonFileStorage::open(path)
        .with_context(|| format!("Failed to open settings file {}", path.display()))?;
    let mut settings = storage.load_settings();
    if args.has_overrides() {
        log::info!("Applying command-line overrides to {}", path.display());
    }
    args.apply_overrides(&mut settings);
    storage.save_settings(&settings);
    Ok(settings)
}

#[derive(Tabled)]
struct FieldRow {
    #[tabled(rename = "Field")]
    field: &'static str,
    #[tabled(rename = "Value")]
    value: String,
}

#[derive(Tabled)]
struct IndicatorRow {
    #[tabled(rename = "Indicator")]
    label: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Sentiment")]
    sentiment: String,
}

fn summary_rows(result: &AnalysisResult) -> Vec<FieldRow> {
    let row = |field, value: String| FieldRow { field, value };
    vec![
        row("Signal", result.signal.to_string()),
        row("Confidence", format!("{}%", result.confidence)),
        row("Predicted Candle", result.predicted_candle_close.to_string()),
        row("Market Structure", result.market_structure.clone()),
        row("Entry", result.trade_setup.entry.clone()),
        row("Stop Loss", result.trade_setup.stop_loss.clone()),
        row("Take Profit", result.trade_setup.take_profit.clone()),
        row("Support", result.key_levels.support.clone()),
        row("Resistance", result.key_levels.resistance.clone()),
        row("Patterns", result.patterns_detected.join(", ")),
    ]
}

fn indicator_rows(result: &AnalysisResult, settings: &AnalysisSettings) -> Vec<IndicatorRow> {
    result
        .indicator_rows()
        .into_iter()
        .zip(settings.indicator_labels())
        .map(|((_, reading), label)| IndicatorRow {
            label,
            status: reading.status.clone(),
            sentiment: reading.sentiment.to_string(),
        })
        .collect()
}

fn print_tables(result: &AnalysisResult, settings: &AnalysisSettings) {
    let mut summary = Table::new(summary_rows(result));
    summary
        .with(Style::rounded())
        .modify(Columns::last(), Width::wrap(70));
    println!("{}", summary);

    let mut indicators = Table::new(indicator_rows(result, settings));
    indicators.with(Style::rounded());
    println!(
        "\nTechnical confluence: {}/3\n{}",
        result.confluence(),
        indicators
    );

    println!("\nReasoning:");
    for reason in &result.reasoning {
        println!("  • {}", reason);
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("warn,chart_signal=info,analyze=info"),
    )
    .init();

    let args = Args::parse();
    let settings = resolve_settings(&args)?;
    for hint in settings.ordering_hints() {
        log::warn!("⚠ {}", hint);
    }

    let image = ChartImage::from_path(&args.image)
        .with_context(|| format!("Failed to load chart image {}", args.image.display()))?;
    log::info!(
        "Analyzing {} ({}, {} bytes) with {}",
        image.name,
        image.mime,
        image.bytes.len(),
        args.model
    );

    let client = GeminiClient::new(args.api_key.clone())
        .with_model(args.model.clone())
        .with_base_url(args.base_url.clone());

    let start = AppInstant::now();
    let result = client
        .analyze(image.data_uri(), &settings)
        .await
        .context(ANALYSIS_FAILED_MESSAGE)?;
    log::info!(
        "Analysis finished in {}",
        format_duration_ms(start.elapsed().as_millis())
    );

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print_tables(&result, &settings);
    }
    Ok(())
}
