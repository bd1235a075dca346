//! FLIP planning: compare two snapshots and describe, per tile, the
//! transition that makes it glide from its old box to its new one.

use serde::{Deserialize, Serialize};

use crate::geometry::{FlipTransform, Rect, FALLBACK_ORIGIN};
use crate::ids::TileId;
use crate::snapshot::PositionSnapshot;

pub const REPOSITION_DURATION_MS: f64 = 300.0;
pub const REPOSITION_EASING: &str = "ease-in-out";
pub const TRANSFORM_ORIGIN: &str = "top left";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationSettings {
    pub duration_ms: f64,
    pub easing: String,
    pub fallback_origin: Rect,
}

impl Default for AnimationSettings {
    fn default() -> Self {
        Self {
            duration_ms: REPOSITION_DURATION_MS,
            easing: REPOSITION_EASING.to_string(),
            fallback_origin: FALLBACK_ORIGIN,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Keyframe {
    pub transform_origin: &'static str,
    pub transform: String,
}

/// Options accepted by `Element.animate`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnimationOptions {
    pub duration: f64,
    pub easing: String,
    /// `backwards` holds the first keyframe until playback starts, so the
    /// element never flashes at its new position.
    pub fill: &'static str,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RepositionPlan<H> {
    pub tile_id: TileId,
    pub handle: H,
    pub from: Rect,
    pub to: Rect,
    /// True when `from` is the fallback origin rather than a measured box.
    pub introduced: bool,
    pub transform: FlipTransform,
}

impl<H> RepositionPlan<H> {
    pub fn keyframes(&self) -> [Keyframe; 2] {
        [
            Keyframe {
                transform_origin: TRANSFORM_ORIGIN,
                transform: self.transform.to_css(),
            },
            Keyframe {
                transform_origin: TRANSFORM_ORIGIN,
                transform: "none".to_string(),
            },
        ]
    }
}

impl AnimationSettings {
    pub fn options(&self) -> AnimationOptions {
        AnimationOptions {
            duration: self.duration_ms,
            easing: self.easing.clone(),
            fill: "backwards",
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if !self.duration_ms.is_finite() || self.duration_ms <= 0.0 {
            return Err(format!("invalid animation duration {}", self.duration_ms));
        }
        if self.easing.trim().is_empty() {
            return Err("missing animation easing".to_string());
        }
        if !self.fallback_origin.has_area() {
            return Err("fallback origin must have a non-zero size".to_string());
        }
        Ok(())
    }
}

/// Plans one transition per tile of `current` whose box differs from the
/// one recorded in `previous`. Tiles missing from `previous` start from
/// `fallback`. Unchanged tiles produce no plan.
pub fn plan_reposition<H: Clone>(
    previous: &PositionSnapshot<H>,
    current: &PositionSnapshot<H>,
    fallback: Rect,
) -> Vec<RepositionPlan<H>> {
    let mut plans = Vec::new();
    for (tile_id, entry) in current.iter() {
        let (from, introduced) = match previous.rect(tile_id) {
            Some(rect) => (rect, false),
            None => (fallback, true),
        };
        if from == entry.rect {
            continue;
        }
        plans.push(RepositionPlan {
            tile_id: tile_id.clone(),
            handle: entry.handle.clone(),
            from,
            to: entry.rect,
            introduced,
            transform: FlipTransform::invert(&from, &entry.rect),
        });
    }
    plans
}
