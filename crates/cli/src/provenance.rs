//! Provenance records for session artifacts.
//!
//! Every file the CLI writes gets a `<stem>.provenance.json` neighbour naming
//! the engine build, the command parameters and the call site that wrote it.

use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::Value;
use std::fs;
use std::panic::Location;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Command parameters plus the optional free-form `--tag`.
pub struct Payload {
    pub params: Value,
    pub tag: Option<String>,
}

impl Payload {
    pub fn new(params: Value, tag: Option<String>) -> Self {
        Self { params, tag }
    }
}

#[derive(Serialize)]
pub struct Callsite {
    pub file: &'static str,
    pub line: u32,
}

/// Serialized body of a sidecar, also printed by `report`.
#[derive(Serialize)]
pub struct Record {
    pub code_rev: String,
    pub engine_version: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub callsite: Option<Callsite>,
    pub tag: Option<String>,
    pub params: Value,
    pub outputs: Vec<String>,
}

impl Record {
    pub fn new(payload: Payload, outputs: Vec<String>) -> Self {
        Self {
            code_rev: code_rev(),
            engine_version: territory::VERSION,
            callsite: None,
            tag: payload.tag,
            params: payload.params,
            outputs,
        }
    }
}

/// Write the sidecar next to `artifact` and return its path.
#[track_caller]
pub fn write_sidecar<P: AsRef<Path>>(artifact: P, payload: Payload) -> Result<PathBuf> {
    let caller = Location::caller();
    let artifact = artifact.as_ref();
    let target = sidecar_path(artifact);
    let dir = target.parent().filter(|d| !d.as_os_str().is_empty());
    if let Some(dir) = dir {
        fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    }

    let mut record = Record::new(payload, vec![artifact.display().to_string()]);
    record.callsite = Some(Callsite {
        file: caller.file(),
        line: caller.line(),
    });
    let body = serde_json::to_vec_pretty(&record)?;
    fs::write(&target, body).with_context(|| format!("writing {}", target.display()))?;
    Ok(target)
}

/// `runs/summary.json` -> `runs/summary.provenance.json`.
fn sidecar_path(artifact: &Path) -> PathBuf {
    artifact.with_extension("provenance.json")
}

/// Commit of the running engine: `GIT_COMMIT` at run time, then at build
/// time, then `git rev-parse HEAD`, else `"unknown"`.
pub fn code_rev() -> String {
    let from_env = std::env::var("GIT_COMMIT")
        .ok()
        .or_else(|| option_env!("GIT_COMMIT").map(str::to_owned))
        .filter(|rev| !rev.is_empty());
    if let Some(rev) = from_env {
        return rev;
    }
    let head = Command::new("git").args(["rev-parse", "HEAD"]).output();
    match head {
        Ok(out) if out.status.success() => String::from_utf8_lossy(&out.stdout).trim().to_owned(),
        _ => "unknown".to_owned(),
    }
}
