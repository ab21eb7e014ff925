//! Drag-and-drop batches.

use crate::limits;
use crate::model::LayerId;
use serde::{Deserialize, Serialize};

pub const ACCEPTED_EXTENSIONS: &[&str] = &["json", "geojson"];
pub const DROPPED_SOURCE: &str = "dropped file";

/// A dropped file after the browser has read it as text.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DroppedFile {
    pub name: String,
    pub text: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "lowercase")]
pub enum DropOutcome {
    Added { id: LayerId },
    Rejected { reason: String },
    Failed { error: String },
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DroppedFileResult {
    pub name: String,
    #[serde(flatten)]
    pub outcome: DropOutcome,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct DropReport {
    pub files: Vec<DroppedFileResult>,
}

impl DropReport {
    pub fn added(&self) -> Vec<LayerId> {
        self.files
            .iter()
            .filter_map(|f| match f.outcome {
                DropOutcome::Added { id } => Some(id),
                _ => None,
            })
            .collect()
    }

    /// User-facing warnings for rejected or failed files.
    pub fn warnings(&self) -> Vec<String> {
        self.files
            .iter()
            .filter_map(|f| match &f.outcome {
                DropOutcome::Added { .. } => None,
                DropOutcome::Rejected { reason } => Some(format!("{}: {}", f.name, reason)),
                DropOutcome::Failed { error } => Some(format!("{}: {}", f.name, error)),
            })
            .collect()
    }
}

pub fn has_accepted_extension(name: &str) -> bool {
    match name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => {
            ACCEPTED_EXTENSIONS.iter().any(|a| ext.eq_ignore_ascii_case(a))
        }
        _ => false,
    }
}

/// Pre-parse screening. Returns the rejection reason, if any.
pub fn screen(file: &DroppedFile) -> Option<String> {
    if !has_accepted_extension(&file.name) {
        return Some("only .json and .geojson files are supported".to_string());
    }
    if file.text.len() > limits::MAX_DROP_FILE_BYTES {
        return Some(format!("file exceeds {} bytes", limits::MAX_DROP_FILE_BYTES));
    }
    None
}
