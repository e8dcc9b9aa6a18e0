//! Example: Walk through a multi-modal assessment session
//!
//! Submits text, a synthetic voice recording and a synthetic face frame one
//! after another, printing the re-fused assessment after each step.
//!
//! Usage:
//!   cargo run --example analyze_session -- [--json] [--seed N] [text...]

use mindguard::features::image::SeededNoise;
use mindguard::features::text::{ClassifierHandle, Sentiment, SentimentLabel};
use mindguard::{AnalysisConfig, Analyzer, Assessment, ImageFrame, SampleBuffer, Session};
use std::env;

/// Toy classifier: negative if the text contains more "not"/"never" than "!"
fn toy_sentiment(text: &str) -> Sentiment {
    let lower = text.to_lowercase();
    let negations = lower.matches("not").count() + lower.matches("never").count();
    let exclamations = text.matches('!').count();
    if negations > exclamations {
        Sentiment::new(SentimentLabel::Negative, 0.6 + 0.1 * negations.min(3) as f32)
    } else if exclamations > 0 {
        Sentiment::new(SentimentLabel::Positive, 0.8)
    } else {
        Sentiment::neutral()
    }
}

/// Half a second of a quiet, low-frequency tone, delivered in recorder-sized chunks
fn record_voice() -> SampleBuffer {
    let sample_rate = 16_000;
    let chunk = 1024;
    let mut buffer = SampleBuffer::new(sample_rate / 2);
    let mut t = 0usize;
    while t < sample_rate / 2 {
        let samples: Vec<f32> = (t..t + chunk)
            .map(|i| (i as f32 * 2.0 * std::f32::consts::PI * 140.0 / sample_rate as f32).sin() * 0.04)
            .collect();
        buffer.push(&samples);
        t += chunk;
    }
    buffer
}

/// Vertical gradient, darker towards the bottom
fn capture_frame() -> Result<ImageFrame, mindguard::AnalysisError> {
    let (width, height) = (160, 120);
    let mut rgba = Vec::with_capacity(width * height * 4);
    for y in 0..height {
        let v = (200 - (y * 120 / height)) as u8;
        for _x in 0..width {
            rgba.extend_from_slice(&[v, v.saturating_sub(20), v.saturating_sub(30), 255]);
        }
    }
    ImageFrame::new(width, height, rgba)
}

fn report(step: &str, assessment: &Assessment, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    if json {
        println!("{}", serde_json::to_string(assessment)?);
        return Ok(());
    }

    let fusion = &assessment.fusion;
    println!("== {step}");
    println!(
        "  Risk: {:.3} ({}) confidence {:.2} [{}]",
        fusion.overall_risk,
        fusion.risk_level,
        fusion.confidence,
        fusion.confidence_level()
    );
    println!(
        "  Breakdown: text={:.3} audio={:.3} facial={:.3}",
        fusion.breakdown.text, fusion.breakdown.audio, fusion.breakdown.facial
    );
    for alert in &assessment.alerts {
        println!("  [{}] {}: {}", alert.level, alert.title, alert.message);
    }
    for line in &assessment.explanation.decision_path {
        println!("  > {line}");
    }
    for warning in &assessment.metadata.warnings {
        println!("  warning: {warning}");
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let mut args: Vec<String> = env::args().skip(1).collect();
    let mut json = false;
    let mut seed: Option<u64> = None;
    let mut words: Vec<String> = Vec::new();

    while let Some(a) = args.first().cloned() {
        args.remove(0);
        match a.as_str() {
            "--json" => json = true,
            "--seed" => {
                let v = args.first().ok_or("--seed requires a value")?.parse::<u64>()?;
                args.remove(0);
                seed = Some(v);
            }
            _ => words.push(a),
        }
    }

    let text = if words.is_empty() {
        "I have not been sleeping and I feel tired and overwhelmed at work".to_string()
    } else {
        words.join(" ")
    };

    let noise = match seed {
        Some(seed) => SeededNoise::from_seed(seed),
        None => SeededNoise::from_entropy(),
    };
    let analyzer = Analyzer::new(AnalysisConfig::default())?
        .with_classifier(ClassifierHandle::from_fn(|text| Ok(toy_sentiment(text))))
        .with_noise(noise);
    let mut session = Session::new(analyzer);

    let assessment = session.submit_text(&text);
    report("text", &assessment, json)?;

    let recording = record_voice();
    let assessment = session.submit_audio(recording.samples());
    report("text + audio", &assessment, json)?;

    let frame = capture_frame()?;
    let assessment = session.submit_image(&frame);
    report("text + audio + facial", &assessment, json)?;

    if !json {
        println!("  Recommendations:");
        for rec in &assessment.recommendations {
            println!("    {} {} - {}", rec.icon, rec.title, rec.description);
        }
    }

    Ok(())
}
