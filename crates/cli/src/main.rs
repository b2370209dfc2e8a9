use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::Path;
use tracing_subscriber::fmt::SubscriberBuilder;

mod provenance;
mod script;

use provenance::{write_sidecar, Payload, Record};
use script::{load_script, run_random, run_script, ArenaSpec, Summary};

#[derive(Parser)]
#[command(name = "territory-cli")]
#[command(about = "Replay and sample territory claim sessions")]
struct Cmd {
    /// Optional run tag; propagated to outputs and logs
    #[arg(long)]
    tag: Option<String>,

    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Apply a JSON claim script and write a session summary
    Replay {
        #[arg(long)]
        input: String,
        #[arg(long)]
        out: String,
    },
    /// Run a seeded random session and write its summary
    Random {
        #[arg(long, default_value_t = 0)]
        seed: u64,
        #[arg(long, default_value_t = 10)]
        claims: usize,
        #[arg(long, default_value_t = 960.0)]
        width: f64,
        #[arg(long, default_value_t = 720.0)]
        height: f64,
        #[arg(long, default_value_t = 20.0)]
        line_thickness: f64,
        #[arg(long)]
        out: String,
    },
    /// Print a small provenance JSON block
    Report,
}

fn main() -> Result<()> {
    SubscriberBuilder::default().with_target(false).init();
    let cmd = Cmd::parse();
    match cmd.action {
        Action::Replay { input, out } => replay(input, out, cmd.tag),
        Action::Random {
            seed,
            claims,
            width,
            height,
            line_thickness,
            out,
        } => {
            let arena = ArenaSpec {
                width,
                height,
                line_thickness,
                border_correction: None,
                snap_tolerance: None,
                hazard_tolerance: None,
            };
            random(arena, seed, claims, out, cmd.tag)
        }
        Action::Report => report(cmd.tag),
    }
}

fn replay(input: String, out: String, tag: Option<String>) -> Result<()> {
    tracing::info!(input, out, tag = ?tag, "replay");
    let raw = std::fs::read(&input).with_context(|| format!("reading {input}"))?;
    let script = load_script(&raw)?;
    let steps = script.claims.len();
    let summary = run_script(script, tag.clone())?;
    let params = serde_json::json!({ "mode": "replay", "input": input, "steps": steps });
    write_summary(&summary, &out, Payload::new(params, tag))
}

fn random(arena: ArenaSpec, seed: u64, claims: usize, out: String, tag: Option<String>) -> Result<()> {
    tracing::info!(seed, claims, out, tag = ?tag, "random");
    let params = serde_json::json!({ "mode": "random", "seed": seed, "claims": claims, "arena": &arena });
    let summary = run_random(arena, seed, claims, tag.clone())?;
    write_summary(&summary, &out, Payload::new(params, tag))
}

fn write_summary(summary: &Summary, out: &str, payload: Payload) -> Result<()> {
    tracing::info!(
        accepted = summary.accepted,
        rejected = summary.rejected,
        claimed_percentage = summary.claimed_percentage,
        "session_summary"
    );
    let out_path = Path::new(out);
    if let Some(parent) = out_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(out_path, serde_json::to_vec_pretty(summary)?)
        .with_context(|| format!("writing {out}"))?;
    write_sidecar(out_path, payload)?;
    Ok(())
}

fn report(tag: Option<String>) -> Result<()> {
    let record = Record::new(Payload::new(serde_json::json!({}), tag), Vec::new());
    println!("{}", serde_json::to_string_pretty(&record)?);
    Ok(())
}
