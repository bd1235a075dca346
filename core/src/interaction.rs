//! Tile selection and drag state, driven by one dispatch function.
//!
//! A tile is Idle, Selected or Dragging. At most one tile is selected and at
//! most one is dragged at any time. Clicking a tile while another one is
//! selected moves the selected tile into the clicked tile's set. That choice
//! is made from the current state, never from listener order.

use crate::ids::{SetId, TileId};
use crate::protocol::MoveIntent;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mark {
    Selected,
    Dragged,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InteractionEvent {
    DragStart { tile: TileId },
    DragOver { set: SetId },
    DragLeave { set: SetId },
    /// `tile` is the id carried in the drag payload, if any.
    Drop { tile: Option<TileId>, set: SetId },
    /// Document-wide end of a drag, fired whether or not a drop happened.
    DragEnd,
    /// `tile` is the clicked tile, `set` the set enclosing the click.
    Click {
        tile: Option<TileId>,
        set: Option<SetId>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Mark { tile: TileId, mark: Mark },
    Unmark { tile: TileId, mark: Mark },
    HoverOn { set: SetId },
    HoverOff { set: SetId },
    SetDragPayload { tile: TileId },
    PreventDefault,
    StopPropagation,
    Emit(MoveIntent),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Outcome {
    pub effects: Vec<Effect>,
}

impl Outcome {
    fn push(&mut self, effect: Effect) {
        self.effects.push(effect);
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }

    pub fn intents(&self) -> impl Iterator<Item = &MoveIntent> {
        self.effects.iter().filter_map(|effect| match effect {
            Effect::Emit(intent) => Some(intent),
            _ => None,
        })
    }

    pub fn stops_propagation(&self) -> bool {
        self.effects.contains(&Effect::StopPropagation)
    }

    pub fn prevents_default(&self) -> bool {
        self.effects.contains(&Effect::PreventDefault)
    }
}

/// Read access to where tiles currently live.
pub trait TileLocator {
    fn contains(&self, tile: &TileId) -> bool;
    /// Set of the tile's parent node, if the parent is a set.
    fn set_of(&self, tile: &TileId) -> Option<SetId>;
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InteractionController {
    selected: Option<TileId>,
    dragged: Option<TileId>,
}

impl InteractionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> Option<&TileId> {
        self.selected.as_ref()
    }

    pub fn dragged(&self) -> Option<&TileId> {
        self.dragged.as_ref()
    }

    /// Mark currently held by `tile`. Dragging wins over selection.
    pub fn mark_of(&self, tile: &TileId) -> Option<Mark> {
        if self.dragged.as_ref() == Some(tile) {
            Some(Mark::Dragged)
        } else if self.selected.as_ref() == Some(tile) {
            Some(Mark::Selected)
        } else {
            None
        }
    }

    pub fn dispatch(&mut self, event: InteractionEvent, locator: &dyn TileLocator) -> Outcome {
        let mut outcome = Outcome::default();
        match event {
            InteractionEvent::DragStart { tile } => self.drag_start(tile, &mut outcome),
            InteractionEvent::DragOver { set } => {
                outcome.push(Effect::HoverOn { set });
                outcome.push(Effect::PreventDefault);
            }
            InteractionEvent::DragLeave { set } => outcome.push(Effect::HoverOff { set }),
            InteractionEvent::Drop { tile, set } => self.drop(tile, set, locator, &mut outcome),
            InteractionEvent::DragEnd => {
                if let Some(tile) = self.dragged.take() {
                    outcome.push(Effect::Unmark {
                        tile,
                        mark: Mark::Dragged,
                    });
                }
            }
            InteractionEvent::Click { tile, set } => self.click(tile, set, locator, &mut outcome),
        }
        outcome
    }

    /// Forgets any state held for a tile that left the document.
    pub fn forget(&mut self, tile: &TileId) {
        if self.selected.as_ref() == Some(tile) {
            self.selected = None;
        }
        if self.dragged.as_ref() == Some(tile) {
            self.dragged = None;
        }
    }

    fn drag_start(&mut self, tile: TileId, outcome: &mut Outcome) {
        if self.selected.as_ref() == Some(&tile) {
            self.selected = None;
            outcome.push(Effect::Unmark {
                tile: tile.clone(),
                mark: Mark::Selected,
            });
        }
        if let Some(previous) = self.dragged.take() {
            if previous != tile {
                outcome.push(Effect::Unmark {
                    tile: previous,
                    mark: Mark::Dragged,
                });
            }
        }
        self.dragged = Some(tile.clone());
        outcome.push(Effect::Mark {
            tile: tile.clone(),
            mark: Mark::Dragged,
        });
        outcome.push(Effect::SetDragPayload { tile });
    }

    fn drop(
        &mut self,
        tile: Option<TileId>,
        set: SetId,
        locator: &dyn TileLocator,
        outcome: &mut Outcome,
    ) {
        outcome.push(Effect::HoverOff { set: set.clone() });
        let Some(tile) = tile else {
            return;
        };
        if !locator.contains(&tile) {
            return;
        }
        if self.dragged.as_ref() == Some(&tile) {
            self.dragged = None;
        }
        outcome.push(Effect::Unmark {
            tile: tile.clone(),
            mark: Mark::Dragged,
        });
        let src_set = locator.set_of(&tile);
        outcome.push(Effect::Emit(MoveIntent {
            tile_id: tile,
            src_set,
            dest_set: set,
        }));
    }

    fn click(
        &mut self,
        tile: Option<TileId>,
        set: Option<SetId>,
        locator: &dyn TileLocator,
        outcome: &mut Outcome,
    ) {
        match (tile, self.selected.clone()) {
            (Some(tile), None) => {
                self.selected = Some(tile.clone());
                outcome.push(Effect::Mark {
                    tile,
                    mark: Mark::Selected,
                });
                outcome.push(Effect::StopPropagation);
            }
            (Some(tile), Some(selected)) if tile == selected => {
                self.selected = None;
                outcome.push(Effect::Unmark {
                    tile,
                    mark: Mark::Selected,
                });
                outcome.push(Effect::StopPropagation);
            }
            (Some(_), Some(selected)) => {
                // Another tile was clicked: its set is the destination.
                let Some(set) = set else {
                    return;
                };
                self.move_selected(selected, set, locator, outcome);
                outcome.push(Effect::StopPropagation);
            }
            (None, Some(selected)) => {
                if let Some(set) = set {
                    self.move_selected(selected, set, locator, outcome);
                }
            }
            (None, None) => {}
        }
    }

    fn move_selected(
        &mut self,
        selected: TileId,
        set: SetId,
        locator: &dyn TileLocator,
        outcome: &mut Outcome,
    ) {
        self.selected = None;
        outcome.push(Effect::Unmark {
            tile: selected.clone(),
            mark: Mark::Selected,
        });
        if !locator.contains(&selected) {
            return;
        }
        let src_set = locator.set_of(&selected);
        outcome.push(Effect::Emit(MoveIntent {
            tile_id: selected,
            src_set,
            dest_set: set,
        }));
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    struct Board(HashMap<TileId, Option<SetId>>);

    impl TileLocator for Board {
        fn contains(&self, tile: &TileId) -> bool {
            self.0.contains_key(tile)
        }

        fn set_of(&self, tile: &TileId) -> Option<SetId> {
            self.0.get(tile).cloned().flatten()
        }
    }

    fn tile(id: &str) -> TileId {
        TileId::parse(id).expect("valid tile id")
    }

    fn set(id: &str) -> SetId {
        SetId::parse(id).expect("valid set id")
    }

    fn board() -> Board {
        let mut tiles = HashMap::new();
        tiles.insert(tile("a"), Some(set("0")));
        tiles.insert(tile("b"), Some(set("1")));
        tiles.insert(tile("loose"), None);
        Board(tiles)
    }

    #[test]
    fn drag_start_clears_selection_of_same_tile() {
        let board = board();
        let mut controller = InteractionController::new();
        controller.dispatch(
            InteractionEvent::Click {
                tile: Some(tile("a")),
                set: Some(set("0")),
            },
            &board,
        );
        let outcome = controller.dispatch(InteractionEvent::DragStart { tile: tile("a") }, &board);
        assert_eq!(
            outcome.effects,
            vec![
                Effect::Unmark {
                    tile: tile("a"),
                    mark: Mark::Selected
                },
                Effect::Mark {
                    tile: tile("a"),
                    mark: Mark::Dragged
                },
                Effect::SetDragPayload { tile: tile("a") },
            ]
        );
        assert_eq!(controller.selected(), None);
        assert_eq!(controller.mark_of(&tile("a")), Some(Mark::Dragged));
    }

    #[test]
    fn drag_over_prevents_default() {
        let mut controller = InteractionController::new();
        let outcome = controller.dispatch(InteractionEvent::DragOver { set: set("1") }, &board());
        assert!(outcome.prevents_default());
        assert_eq!(outcome.effects[0], Effect::HoverOn { set: set("1") });
    }

    #[test]
    fn drop_without_payload_only_clears_hover() {
        let mut controller = InteractionController::new();
        let outcome = controller.dispatch(
            InteractionEvent::Drop {
                tile: None,
                set: set("1"),
            },
            &board(),
        );
        assert_eq!(outcome.effects, vec![Effect::HoverOff { set: set("1") }]);
    }

    #[test]
    fn click_on_other_tile_without_set_does_nothing() {
        let board = board();
        let mut controller = InteractionController::new();
        controller.dispatch(
            InteractionEvent::Click {
                tile: Some(tile("a")),
                set: Some(set("0")),
            },
            &board,
        );
        let outcome = controller.dispatch(
            InteractionEvent::Click {
                tile: Some(tile("loose")),
                set: None,
            },
            &board,
        );
        assert!(outcome.is_empty());
        assert_eq!(controller.selected(), Some(&tile("a")));
    }

    #[test]
    fn forget_drops_state_for_removed_tile() {
        let board = board();
        let mut controller = InteractionController::new();
        controller.dispatch(InteractionEvent::DragStart { tile: tile("b") }, &board);
        controller.forget(&tile("b"));
        assert_eq!(controller.dragged(), None);
        let outcome = controller.dispatch(InteractionEvent::DragEnd, &board);
        assert!(outcome.is_empty());
    }
}
