pub mod config;
pub mod geometry;
pub mod ids;
pub mod interaction;
pub mod protocol;
pub mod reposition;
pub mod snapshot;
pub mod terminal;

pub use config::{HookConfig, MarkClasses, ProgressSettings};
pub use geometry::{FlipTransform, Rect, FALLBACK_ORIGIN};
pub use ids::{IdError, SetId, TileId};
pub use interaction::{
    Effect, InteractionController, InteractionEvent, Mark, Outcome, TileLocator,
};
pub use protocol::{
    DomKey, KeyStroke, MoveIntent, OutboundEvent, PrintEvent, Transport, KEY_EVENT, PRINT_EVENT,
    TILE_MOVED_EVENT,
};
pub use reposition::{plan_reposition, AnimationSettings, RepositionPlan};
pub use snapshot::{PositionSnapshot, SnapshotEntry};
pub use terminal::{TerminalBridge, TerminalSink};
