use std::collections::BTreeMap;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use chart_binder::{bind_charts, ChartTargets, EmbeddedChartData, RecordingChart};
use dashboard_core::{MemoryRegion, Methodology, Region};
use dashboard_orchestrator::{
    ChatSession, FetchOrchestrator, MemoryTranscript, ValueAnalysisTargets,
};
use serde_json::Value;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use value_client::{ChatClient, ClientConfig, ValueAnalysisClient};

const USAGE: &str = "Usage: dashboard-cli <SYMBOL> [--chart-data <file.json>] [--chat <message>]";

struct Args {
    symbol: String,
    chart_data: Option<String>,
    chat: Option<String>,
}

fn parse_args() -> Result<Args> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let flag_value = |name: &str| -> Result<Option<String>> {
        match args.iter().position(|a| a == name) {
            Some(i) => match args.get(i + 1) {
                Some(v) => Ok(Some(v.clone())),
                None => bail!("{} needs a value\n{}", name, USAGE),
            },
            None => Ok(None),
        }
    };

    let chart_data = flag_value("--chart-data")?;
    let chat = flag_value("--chat")?;

    // The symbol is the first argument that is neither a flag nor a flag value.
    let mut symbol = None;
    let mut skip_next = false;
    for arg in &args {
        if skip_next {
            skip_next = false;
        } else if arg == "--chart-data" || arg == "--chat" {
            skip_next = true;
        } else if symbol.is_none() {
            symbol = Some(arg.clone());
        }
    }

    Ok(Args {
        symbol: symbol.unwrap_or_default(),
        chart_data,
        chat,
    })
}

/// Reads a JSON object of embedded attribute name -> raw attribute string.
fn load_chart_attributes(path: &str) -> Result<Vec<(String, String)>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read chart data from {}", path))?;
    let parsed: Value =
        serde_json::from_str(&raw).with_context(|| format!("Invalid JSON in {}", path))?;
    let Value::Object(map) = parsed else {
        bail!("{} must contain a JSON object of attribute strings", path);
    };

    Ok(map
        .into_iter()
        .map(|(key, value)| match value {
            Value::String(s) => (key, s),
            other => (key, other.to_string()),
        })
        .collect())
}

fn print_region(region: &MemoryRegion) {
    let snapshot = region.snapshot();
    let state = if snapshot.visible { "shown" } else { "hidden" };
    println!("[{}] ({})", region.name(), state);
    if !snapshot.text.is_empty() {
        println!("{}", snapshot.text);
    }
    if !snapshot.html.is_empty() {
        println!("{}", snapshot.html);
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let json_logging = std::env::var("LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "dashboard_cli=info,dashboard_orchestrator=info".into());

    if json_logging {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }

    let args = parse_args()?;
    let config = ClientConfig::default();
    tracing::info!("Value analysis endpoint: {}", config.value_analysis_url);

    // Value analysis
    let error = Arc::new(MemoryRegion::hidden("va-error"));
    let loading = Arc::new(MemoryRegion::hidden("va-loader"));
    let content = Arc::new(MemoryRegion::hidden("va-content"));
    let score = Arc::new(MemoryRegion::visible("va-score-body"));
    let input = Arc::new(MemoryRegion::visible("symbol-input"));
    let panels: BTreeMap<Methodology, Arc<MemoryRegion>> = Methodology::ALL
        .iter()
        .map(|m| (*m, Arc::new(MemoryRegion::visible(format!("va-{}-body", m.key())))))
        .collect();

    let targets = ValueAnalysisTargets {
        error: error.clone(),
        loading: loading.clone(),
        content: content.clone(),
        panels: panels
            .iter()
            .map(|(m, region)| (*m, region.clone() as Arc<dyn Region>))
            .collect(),
        score: score.clone(),
        symbol_input: Some(input.clone()),
    };
    let orchestrator =
        FetchOrchestrator::new(Arc::new(ValueAnalysisClient::new(&config)), targets);

    let state = match orchestrator.initialize(Some(args.symbol.as_str())).await {
        Some(state) => state,
        None => {
            // Same path as submitting an empty form.
            if orchestrator.submit(&args.symbol).await.is_err() {
                print_region(&error);
            }
            bail!("{}", USAGE);
        }
    };

    println!("== Value-Analyse ==");
    println!("{}", serde_json::to_string(&state)?);
    for region in [&input, &error, &loading, &content] {
        print_region(region);
    }
    for (methodology, region) in &panels {
        println!("-- {} --", methodology.title());
        print_region(region);
    }
    println!("-- Value Score --");
    print_region(&score);

    // Charts
    if let Some(path) = &args.chart_data {
        let data = EmbeddedChartData::from_attributes(load_chart_attributes(path)?);

        let pie = Arc::new(RecordingChart::new());
        let bar = Arc::new(RecordingChart::new());
        let line = Arc::new(RecordingChart::new());
        let gauge = Arc::new(RecordingChart::new());
        let advisory = Arc::new(MemoryRegion::hidden("sectorAdvisory"));
        let risk_value = Arc::new(MemoryRegion::visible("riskScoreValue"));

        let report = bind_charts(
            &data,
            &ChartTargets {
                positions_pie: Some(pie.clone()),
                sector_bar: Some(bar.clone()),
                sector_advisory: Some(advisory.clone()),
                performance_line: Some(line.clone()),
                risk_gauge: Some(gauge.clone()),
                risk_value: Some(risk_value.clone()),
            },
        );

        println!("== Charts ==");
        for (name, outcome, chart) in [
            ("positionsChart", &report.pie, &pie),
            ("sectorChart", &report.bar, &bar),
            ("performanceChart", &report.line, &line),
            ("riskGauge", &report.gauge, &gauge),
        ] {
            println!("[{}] {:?}", name, outcome);
            for spec in chart.drawn() {
                println!("{}", serde_json::to_string_pretty(&spec)?);
            }
        }
        print_region(&advisory);
        print_region(&risk_value);
    }

    // Chat
    if let Some(message) = &args.chat {
        let transcript = Arc::new(MemoryTranscript::default());
        let session =
            ChatSession::start(Arc::new(ChatClient::new(&config)), transcript.clone());
        session.submit(message).await;

        println!("== Chat ==");
        for entry in transcript.messages() {
            println!("{}", serde_json::to_string(&entry)?);
        }
    }

    Ok(())
}
