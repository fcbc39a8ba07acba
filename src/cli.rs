// Copyright 2025 the Runebender Xilem Authors
// SPDX-License-Identifier: Apache-2.0

//! Gesture replay: load a contour, a selection and a list of pointer
//! deltas from a JSON or TOML file and run them through a path edit
//! behavior.

use crate::editing::{Modifiers, PathEditBehavior, PointPosition, PointUpdate, Selection};
use crate::path::{Contour, Path, PathPoint};
use kurbo::Vec2;
use serde::{Deserialize, Serialize};
use std::path::Path as FsPath;

#[derive(Debug, thiserror::Error)]
pub enum GestureFileError {
    #[error("failed to read gesture file: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid JSON gesture: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid TOML gesture: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("unsupported gesture file extension: {0:?}")]
    UnsupportedExtension(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GesturePointKind {
    Corner,
    Smooth,
    Cubic,
    Quad,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GesturePoint {
    pub x: f64,
    pub y: f64,
    #[serde(rename = "type")]
    pub kind: GesturePointKind,
    #[serde(default)]
    pub selected: bool,
}

impl GesturePoint {
    fn to_path_point(self) -> PathPoint {
        match self.kind {
            GesturePointKind::Corner => PathPoint::corner(self.x, self.y),
            GesturePointKind::Smooth => PathPoint::smooth(self.x, self.y),
            GesturePointKind::Cubic => PathPoint::off_curve(self.x, self.y),
            GesturePointKind::Quad => PathPoint::quad_off_curve(self.x, self.y),
        }
    }
}

/// One recorded drag gesture on a single contour
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GestureFile {
    #[serde(default)]
    pub closed: bool,
    pub points: Vec<GesturePoint>,
    #[serde(default)]
    pub modifiers: Modifiers,
    /// Pointer deltas, each measured from the gesture start
    #[serde(default)]
    pub deltas: Vec<[f64; 2]>,
}

/// Output of a replayed gesture
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GestureReplay {
    pub frames: Vec<Vec<PointUpdate>>,
    pub rollback: Vec<PointPosition>,
}

impl GestureFile {
    /// Load a gesture, picking the format from the file extension
    pub fn load(path: impl AsRef<FsPath>) -> Result<Self, GestureFileError> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();
        let text = std::fs::read_to_string(path)?;
        match extension.as_str() {
            "json" => Self::from_json_str(&text),
            "toml" => Self::from_toml_str(&text),
            _ => Err(GestureFileError::UnsupportedExtension(extension)),
        }
    }

    pub fn from_json_str(text: &str) -> Result<Self, GestureFileError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn from_toml_str(text: &str) -> Result<Self, GestureFileError> {
        Ok(toml::from_str(text)?)
    }

    pub fn contour(&self) -> Contour {
        Contour::new(
            self.points.iter().map(|p| p.to_path_point()).collect(),
            self.closed,
        )
    }

    pub fn selection(&self) -> Selection<usize> {
        self.points
            .iter()
            .enumerate()
            .filter(|(_, p)| p.selected)
            .map(|(i, _)| i)
            .collect()
    }

    /// Run every delta through a fresh behavior
    pub fn replay(&self) -> GestureReplay {
        let path = Path::new(vec![self.contour()]);
        let mut behavior = PathEditBehavior::new(&path, &self.selection(), self.modifiers);
        let frames = self
            .deltas
            .iter()
            .map(|&[dx, dy]| behavior.apply_delta(Vec2::new(dx, dy)))
            .collect();
        tracing::info!(
            "Replayed {} deltas on {} points",
            self.deltas.len(),
            self.points.len()
        );
        GestureReplay {
            frames,
            rollback: behavior.rollback(),
        }
    }
}
