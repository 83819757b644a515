//! Pipeline stages.

use serde::Serialize;
use std::fmt;

/// Progress of a run through the pipeline.
///
/// `Init → WorkspacePrepared → (Mirrored | MirrorSkipped) → Extracted →
/// Translated → Replicated → CleanedUp`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    #[default]
    Init,
    WorkspacePrepared,
    Mirrored,
    MirrorSkipped,
    Extracted,
    Translated,
    Replicated,
    CleanedUp,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Init => "init",
            Stage::WorkspacePrepared => "workspace prepared",
            Stage::Mirrored => "mirrored",
            Stage::MirrorSkipped => "mirror skipped",
            Stage::Extracted => "extracted",
            Stage::Translated => "translated",
            Stage::Replicated => "replicated",
            Stage::CleanedUp => "cleaned up",
        };
        f.write_str(name)
    }
}
