use serde::{Deserialize, Serialize};

use crate::ids::{SetId, TileId};

pub const TILE_MOVED_EVENT: &str = "tile-moved";
pub const KEY_EVENT: &str = "key";
pub const PRINT_EVENT: &str = "phx:print";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveIntent {
    pub tile_id: TileId,
    #[serde(rename = "srcSet", skip_serializing_if = "Option::is_none", default)]
    pub src_set: Option<SetId>,
    #[serde(rename = "destSet")]
    pub dest_set: SetId,
}

/// Keyboard details attached to a terminal keystroke.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DomKey {
    pub key: String,
    pub code: String,
    pub alt_key: bool,
    pub ctrl_key: bool,
    pub meta_key: bool,
    pub shift_key: bool,
}

/// Payload of the terminal widget's `onKey` callback. `key` holds the data
/// the widget would send to a pty for this keystroke.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyStroke {
    pub key: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub dom_event: Option<DomKey>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrintEvent {
    pub data: String,
}

impl PrintEvent {
    /// Parses a `phx:print` detail. Anything without a string `data` field
    /// is rejected.
    pub fn from_detail_json(json: &str) -> Result<Self, String> {
        serde_json::from_str(json).map_err(|err| format!("invalid print payload: {err}"))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum OutboundEvent {
    TileMoved(MoveIntent),
    Key(KeyStroke),
}

impl OutboundEvent {
    pub fn name(&self) -> &'static str {
        match self {
            OutboundEvent::TileMoved(_) => TILE_MOVED_EVENT,
            OutboundEvent::Key(_) => KEY_EVENT,
        }
    }

    pub fn payload_json(&self) -> Result<String, String> {
        let encoded = match self {
            OutboundEvent::TileMoved(intent) => serde_json::to_string(intent),
            OutboundEvent::Key(key) => serde_json::to_string(key),
        };
        encoded.map_err(|err| format!("failed to encode {} payload: {err}", self.name()))
    }
}

/// Outbound side of the live connection. Implementations hand the event to
/// the host framework; delivery, retries and reconnects are its business.
pub trait Transport {
    fn push(&self, event: OutboundEvent) -> Result<(), String>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn intent(src: Option<&str>) -> MoveIntent {
        MoveIntent {
            tile_id: TileId::parse("t1").expect("tile"),
            src_set: src.map(|value| SetId::parse(value).expect("set")),
            dest_set: SetId::parse("2").expect("set"),
        }
    }

    #[test]
    fn move_intent_uses_wire_names() {
        let json = OutboundEvent::TileMoved(intent(Some("0")))
            .payload_json()
            .expect("encode");
        assert_eq!(json, r#"{"tileId":"t1","srcSet":"0","destSet":"2"}"#);
    }

    #[test]
    fn move_intent_omits_unknown_source() {
        let json = OutboundEvent::TileMoved(intent(None))
            .payload_json()
            .expect("encode");
        assert_eq!(json, r#"{"tileId":"t1","destSet":"2"}"#);
    }

    #[test]
    fn print_detail_requires_string_data() {
        assert_eq!(
            PrintEvent::from_detail_json(r#"{"data":"hello"}"#),
            Ok(PrintEvent {
                data: "hello".to_string()
            })
        );
        assert!(PrintEvent::from_detail_json(r#"{"data":3}"#).is_err());
        assert!(PrintEvent::from_detail_json("null").is_err());
    }
}
