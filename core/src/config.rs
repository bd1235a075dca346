use serde::{Deserialize, Serialize};

use crate::protocol::PRINT_EVENT;
use crate::reposition::AnimationSettings;

pub const TILE_ATTR_DEFAULT: &str = "data-tile-id";
pub const SET_ATTR_DEFAULT: &str = "data-set-index";
pub const DRAG_MIME_DEFAULT: &str = "application/x-tile-id";
pub const PROGRESS_DELAY_MS_DEFAULT: u32 = 300;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkClasses {
    pub tile: String,
    pub selected: String,
    pub dragged: String,
    pub hover: String,
}

impl Default for MarkClasses {
    fn default() -> Self {
        Self {
            tile: "tile".to_string(),
            selected: "selected".to_string(),
            dragged: "dragged".to_string(),
            hover: "dragover".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgressSettings {
    pub enabled: bool,
    /// Name of the global indicator object exposing `show`/`hide`.
    pub global: String,
    pub delay_ms: u32,
}

impl Default for ProgressSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            global: "topbar".to_string(),
            delay_ms: PROGRESS_DELAY_MS_DEFAULT,
        }
    }
}

/// Page-wide settings for every hook. Missing fields keep their defaults,
/// so hosts only spell out what they change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HookConfig {
    pub tile_attr: String,
    pub set_attr: String,
    pub drag_mime: String,
    pub print_event: String,
    pub classes: MarkClasses,
    pub animation: AnimationSettings,
    pub progress: ProgressSettings,
    pub debug: bool,
}

impl Default for HookConfig {
    fn default() -> Self {
        Self {
            tile_attr: TILE_ATTR_DEFAULT.to_string(),
            set_attr: SET_ATTR_DEFAULT.to_string(),
            drag_mime: DRAG_MIME_DEFAULT.to_string(),
            print_event: PRINT_EVENT.to_string(),
            classes: MarkClasses::default(),
            animation: AnimationSettings::default(),
            progress: ProgressSettings::default(),
            debug: false,
        }
    }
}

impl HookConfig {
    pub fn from_json(json: &str) -> Result<Self, String> {
        let config: Self =
            serde_json::from_str(json).map_err(|err| format!("invalid hook config: {err}"))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), String> {
        for (name, value) in [("tile_attr", &self.tile_attr), ("set_attr", &self.set_attr)] {
            if !value.starts_with("data-") {
                return Err(format!("{name} must be a data- attribute, got {value:?}"));
            }
        }
        let required = [
            ("drag_mime", &self.drag_mime),
            ("print_event", &self.print_event),
            ("classes.tile", &self.classes.tile),
            ("classes.selected", &self.classes.selected),
            ("classes.dragged", &self.classes.dragged),
            ("classes.hover", &self.classes.hover),
        ];
        for (name, value) in required {
            if value.trim().is_empty() {
                return Err(format!("missing {name}"));
            }
        }
        if self.progress.enabled && self.progress.global.trim().is_empty() {
            return Err("missing progress.global".to_string());
        }
        self.animation.validate()
    }

    /// Selector matching every tracked tile.
    pub fn tile_selector(&self) -> String {
        format!("[{}]", self.tile_attr)
    }

    pub fn set_selector(&self) -> String {
        format!("[{}]", self.set_attr)
    }
}
