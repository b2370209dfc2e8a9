//! Claim scripts and session summaries (JSON).

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use territory::sample::{draw_chord, draw_interior_point, ChordCfg, ReplayToken};
use territory::{Field, FieldCfg, Point};

/// Arena parameters; unset knobs fall back to `FieldCfg` defaults.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ArenaSpec {
    pub width: f64,
    pub height: f64,
    pub line_thickness: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_correction: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snap_tolerance: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hazard_tolerance: Option<f64>,
}

impl ArenaSpec {
    pub fn to_cfg(&self) -> FieldCfg {
        let base = FieldCfg::new(self.width, self.height, self.line_thickness);
        FieldCfg {
            border_correction: self.border_correction.unwrap_or(base.border_correction),
            snap_tolerance: self.snap_tolerance.unwrap_or(base.snap_tolerance),
            hazard_tolerance: self.hazard_tolerance.unwrap_or(base.hazard_tolerance),
            ..base
        }
    }
}

/// One drawing action: the player's trail and where the hazard was.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ClaimStep {
    pub path: Vec<[f64; 2]>,
    pub hazard: [f64; 2],
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Script {
    pub arena: ArenaSpec,
    pub claims: Vec<ClaimStep>,
}

#[derive(Clone, Debug, Serialize)]
pub struct ClaimOutcome {
    pub index: usize,
    #[serde(flatten)]
    pub step: ClaimStep,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub area: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub claimed_percentage: f64,
}

#[derive(Clone, Debug, Serialize)]
pub struct Summary {
    pub tag: Option<String>,
    pub arena: ArenaSpec,
    pub claims: Vec<ClaimOutcome>,
    pub accepted: usize,
    pub rejected: usize,
    pub total_area: f64,
    pub total_claimed_area: f64,
    pub claimed_percentage: f64,
    pub playable_boundary: Vec<[f64; 2]>,
}

fn to_point(p: [f64; 2]) -> Point {
    Point::new(p[0], p[1])
}

fn from_point(p: &Point) -> [f64; 2] {
    [p.x, p.y]
}

struct Session {
    field: Field,
    outcomes: Vec<ClaimOutcome>,
}

impl Session {
    fn new(arena: &ArenaSpec) -> Result<Self> {
        let field = Field::with_cfg(arena.to_cfg()).context("building field")?;
        Ok(Self {
            field,
            outcomes: Vec::new(),
        })
    }

    fn apply(&mut self, step: ClaimStep) {
        let path: Vec<Point> = step.path.iter().copied().map(to_point).collect();
        let result = self.field.process_claim(&path, to_point(step.hazard));
        let index = self.outcomes.len();
        let (area, error_kind, error) = match result {
            Ok(area) => (Some(area), None, None),
            Err(e) => (None, Some(e.kind()), Some(e.to_string())),
        };
        self.outcomes.push(ClaimOutcome {
            index,
            step,
            area,
            error_kind,
            error,
            claimed_percentage: self.field.claimed_percentage(),
        });
    }

    fn finish(self, arena: ArenaSpec, tag: Option<String>) -> Summary {
        let accepted = self.outcomes.iter().filter(|o| o.area.is_some()).count();
        Summary {
            tag,
            arena,
            accepted,
            rejected: self.outcomes.len() - accepted,
            claims: self.outcomes,
            total_area: self.field.total_area(),
            total_claimed_area: self.field.total_claimed_area(),
            claimed_percentage: self.field.claimed_percentage(),
            playable_boundary: self
                .field
                .current_playable_boundary()
                .vertices()
                .iter()
                .map(from_point)
                .collect(),
        }
    }
}

/// Apply every step of `script` in order. Rejected claims are recorded, not fatal.
pub fn run_script(script: Script, tag: Option<String>) -> Result<Summary> {
    let mut session = Session::new(&script.arena)?;
    for step in script.claims {
        session.apply(step);
    }
    Ok(session.finish(script.arena, tag))
}

/// Seeded random session: chord and hazard for claim `k` come from token `(seed, k)`.
pub fn run_random(
    arena: ArenaSpec,
    seed: u64,
    claims: usize,
    tag: Option<String>,
) -> Result<Summary> {
    let mut session = Session::new(&arena)?;
    for k in 0..claims as u64 {
        let ring = session.field.current_playable_boundary();
        let tok = ReplayToken { seed, index: k };
        let drawn = draw_chord(&ring, ChordCfg::default(), tok)
            .zip(draw_interior_point(&ring, tok));
        let Some((path, hazard)) = drawn else {
            tracing::warn!(seed, index = k, "sampler found no chord; stopping");
            break;
        };
        session.apply(ClaimStep {
            path: path.iter().map(from_point).collect(),
            hazard: from_point(&hazard),
        });
    }
    Ok(session.finish(arena, tag))
}

pub fn load_script(raw: &[u8]) -> Result<Script> {
    serde_json::from_slice(raw).context("parsing claim script")
}
