use serde::{Deserialize, Serialize};

use crate::{
    domain::{SelectedFile, SlotKind},
    error::ErrorBody,
};

pub const ANALYZE_PATH: &str = "/analyze";
pub const REPLAY_FIELD: &str = "replay_file";
pub const BEATMAP_FIELD: &str = "beatmap_file";

/// Both files of one submission. Only built once both slots hold a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisRequest {
    pub replay: SelectedFile,
    pub beatmap: SelectedFile,
}

impl AnalysisRequest {
    pub fn new(replay: SelectedFile, beatmap: SelectedFile) -> Self {
        Self { replay, beatmap }
    }

    pub fn file(&self, slot: SlotKind) -> &SelectedFile {
        match slot {
            SlotKind::Replay => &self.replay,
            SlotKind::Beatmap => &self.beatmap,
        }
    }

    /// Multipart parts in posting order, keyed by field name.
    pub fn into_parts(self) -> [(&'static str, SelectedFile); 2] {
        [(REPLAY_FIELD, self.replay), (BEATMAP_FIELD, self.beatmap)]
    }
}

/// Hit judgement counters the analysis service reports alongside the press
/// timings. Older deployments omit them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Judgements {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count_300: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count_geki: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count_100: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count_katu: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count_50: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count_miss: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<u64>,
}

impl Judgements {
    pub fn is_empty(&self) -> bool {
        self == &Judgements::default()
    }
}

/// Press timing statistics; all times are in milliseconds and `plot` is a
/// base64 PNG without a data-URI prefix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PressStatistics {
    pub total_presses: u64,
    pub avg_press_time: f64,
    pub min_press_time: f64,
    pub max_press_time: f64,
    pub plot: String,
    #[serde(flatten)]
    pub judgements: Judgements,
}

/// Decoded `/analyze` body. A body carrying an `error` field is always a
/// failure, whatever else it contains.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnalyzeResponse {
    Failure(ErrorBody),
    Success(PressStatistics),
}

#[cfg(test)]
#[path = "tests/protocol_tests.rs"]
mod tests;
