use std::fs;
use std::path::Path;

use anyhow::Context;
use serde::Deserialize;
use trellis_memory_core::{Coord2, KeySet};

/// Keys held from `at_ms` until the next step.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Step {
    pub at_ms: u64,
    #[serde(default)]
    pub pressed: Vec<Coord2>,
}

/// Timed pressed-key snapshots replayed in place of physical keys.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Script {
    steps: Vec<Step>,
}

impl Script {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Could not read script {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("Invalid script {}", path.display()))
    }

    pub fn parse(text: &str) -> anyhow::Result<Self> {
        let mut steps: Vec<Step> = serde_json::from_str(text)?;
        steps.sort_by_key(|step| step.at_ms);
        Ok(Self { steps })
    }

    /// Snapshot of the latest step at or before `now_ms`.
    pub fn pressed_at(&self, now_ms: u64) -> KeySet {
        self.steps
            .iter()
            .rev()
            .find(|step| step.at_ms <= now_ms)
            .map(|step| step.pressed.iter().copied().collect())
            .unwrap_or_default()
    }

    pub fn end_ms(&self) -> u64 {
        self.steps.last().map_or(0, |step| step.at_ms)
    }
}
