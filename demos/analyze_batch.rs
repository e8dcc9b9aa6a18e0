//! Example: Assess multiple journal entries in parallel
//!
//! Each file is read as one free-text entry and assessed on the text modality.
//!
//! Usage:
//!   cargo run --release --example analyze_batch -- [--jobs N] [--json] <file1> <file2> ...
//!
//! Notes:
//! - Parallelism is across files. Each assessment is single-threaded.
//! - Default workers: (available CPU threads - 1), keeping one core free for the system.

use mindguard::{assess, AnalysisConfig, Analyzer, RiskLevel};
use rayon::prelude::*;
use serde::Serialize;
use std::env;
use std::time::Instant;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ItemOut {
    file: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    overall_risk: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    risk_level: Option<RiskLevel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    alerts: Option<usize>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    risk_indicators: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl ItemOut {
    fn failed(file: String, error: String) -> Self {
        Self {
            file,
            overall_risk: None,
            risk_level: None,
            alerts: None,
            risk_indicators: vec![],
            error: Some(error),
        }
    }
}

fn default_jobs() -> usize {
    let n = std::thread::available_parallelism().map(|v| v.get()).unwrap_or(1);
    std::cmp::max(1, n.saturating_sub(1))
}

fn assess_file(path: &str, config: &AnalysisConfig) -> ItemOut {
    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) => return ItemOut::failed(path.to_string(), format!("read failed: {e}")),
    };

    let analyzer = match Analyzer::new(config.clone()) {
        Ok(analyzer) => analyzer,
        Err(e) => return ItemOut::failed(path.to_string(), e.to_string()),
    };

    let indicators = analyzer.analyze_text(&text);
    match assess(Some(&indicators), None, None, config.confidence_policy) {
        Some(assessment) => ItemOut {
            file: path.to_string(),
            overall_risk: Some(assessment.fusion.overall_risk),
            risk_level: Some(assessment.fusion.risk_level),
            alerts: Some(assessment.alerts.len()),
            risk_indicators: indicators
                .risk_indicators
                .iter()
                .map(ToString::to_string)
                .collect(),
            error: None,
        },
        None => ItemOut::failed(path.to_string(), "nothing to assess".to_string()),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let mut args: Vec<String> = env::args().skip(1).collect();

    let mut json = false;
    let mut jobs: Option<usize> = None;
    let mut paths: Vec<String> = Vec::new();

    while let Some(a) = args.first().cloned() {
        args.remove(0);
        match a.as_str() {
            "--json" => json = true,
            "--jobs" => {
                let v = args
                    .first()
                    .ok_or("--jobs requires a value")?
                    .parse::<usize>()?;
                args.remove(0);
                jobs = Some(std::cmp::max(1, v));
            }
            "--help" | "-h" => {
                eprintln!(
                    "Usage: analyze_batch [--jobs N] [--json] <file1> <file2> ...\n\
                     \n\
                     --jobs N   Parallel workers (default: CPU-1)\n\
                     --json     Emit one JSON object per line (JSONL)\n"
                );
                return Ok(());
            }
            _ => paths.push(a),
        }
    }

    if paths.is_empty() {
        eprintln!("ERROR: Provide at least one text file path. Use --help for usage.");
        std::process::exit(2);
    }

    let jobs = jobs.unwrap_or_else(default_jobs);
    eprintln!("Batch: {} files, jobs={}", paths.len(), jobs);

    let config = AnalysisConfig::default();

    let t0 = Instant::now();
    let pool = rayon::ThreadPoolBuilder::new().num_threads(jobs).build()?;

    let outs: Vec<ItemOut> = pool.install(|| {
        paths
            .par_iter()
            .map(|path| assess_file(path, &config))
            .collect()
    });

    for (idx, o) in outs.iter().enumerate() {
        if json {
            println!("{}", serde_json::to_string(o)?);
            continue;
        }
        match (&o.error, o.overall_risk, o.risk_level) {
            (None, Some(risk), Some(level)) => println!(
                "[{}/{}] {}: risk={:.3} level={} alerts={}{}",
                idx + 1,
                outs.len(),
                o.file,
                risk,
                level,
                o.alerts.unwrap_or(0),
                if o.risk_indicators.is_empty() {
                    String::new()
                } else {
                    format!(" [{}]", o.risk_indicators.join(", "))
                }
            ),
            _ => println!(
                "[{}/{}] {}: ERROR: {}",
                idx + 1,
                outs.len(),
                o.file,
                o.error.as_deref().unwrap_or("unknown error")
            ),
        }
    }

    let flagged = outs
        .iter()
        .filter(|o| matches!(o.risk_level, Some(RiskLevel::High | RiskLevel::Critical)))
        .count();
    let ok = outs.iter().filter(|o| o.error.is_none()).count();

    eprintln!(
        "Done: ok={}/{} flagged={} wall={:.0}ms",
        ok,
        outs.len(),
        flagged,
        t0.elapsed().as_secs_f64() * 1000.0
    );

    Ok(())
}
