//! Pointer/keyboard intent translation.
//!
//! Raw pointer events come in with screen coordinates and an optional
//! hit target supplied by the backend's hit-testing. This module turns
//! them into [`Command`]s: single clicks select, drags become
//! rectangle selection, context-clicks interact or move. Entity ids are
//! never captured ahead of time; they are resolved through
//! [`SlotBindings`] when the event fires, so a binding that shifted
//! between ticks can never produce a stale id.

use tracing::warn;

use crate::command::Command;
use crate::reconcile::SlotBindings;
use crate::scene::EntityKind;

/// Primary releases within this distance of the drag start count as a
/// click on the background rather than a rectangle selection.
pub const CLICK_SLOP: f32 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Secondary,
    Auxiliary,
}

/// What the backend's hit-testing found under the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HitTarget {
    pub kind: EntityKind,
    pub slot: usize,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    /// Position in screen space (page coordinates).
    pub screen: Point,
    pub button: PointerButton,
    pub hit: Option<HitTarget>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum DragState {
    Idle,
    /// Drag start, already translated to world space.
    Dragging { start: Point },
}

/// Two-state pointer machine plus shift tracking.
///
/// Callers must suppress the platform context menu whenever they feed a
/// secondary-button event here; the translator owns its semantics.
#[derive(Debug)]
pub struct InteractionTranslator {
    surface_origin: Point,
    shift_held: bool,
    drag: DragState,
}

impl InteractionTranslator {
    /// `surface_origin` is the rendering surface's on-page offset; world
    /// positions are screen positions minus this.
    pub fn new(surface_origin: Point) -> Self {
        Self {
            surface_origin,
            shift_held: false,
            drag: DragState::Idle,
        }
    }

    pub fn set_shift(&mut self, held: bool) {
        self.shift_held = held;
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.drag, DragState::Dragging { .. })
    }

    pub fn to_world(&self, screen: Point) -> Point {
        Point::new(screen.x - self.surface_origin.x, screen.y - self.surface_origin.y)
    }

    /// Primary press on empty background arms a rectangle drag.
    pub fn pointer_down(&mut self, event: &PointerEvent) {
        if event.hit.is_none() && event.button == PointerButton::Primary {
            self.drag = DragState::Dragging {
                start: self.to_world(event.screen),
            };
        }
    }

    /// Resolve a release into zero or more commands, in emission order.
    pub fn pointer_up(
        &mut self,
        event: &PointerEvent,
        bindings: &dyn SlotBindings,
    ) -> Vec<Command> {
        if let DragState::Dragging { start } = self.drag {
            self.drag = DragState::Idle;
            if event.button != PointerButton::Primary {
                // Any other button while dragging cancels silently.
                return Vec::new();
            }

            let end = self.to_world(event.screen);
            if (end.x - start.x).abs() <= CLICK_SLOP && (end.y - start.y).abs() <= CLICK_SLOP {
                return vec![Command::DeselectAllBeetles];
            }
            let (x1, y1, x2, y2) = normalize_rect(start, end);
            return vec![Command::SelectAllInArea { x1, y1, x2, y2 }];
        }

        match (event.hit, event.button) {
            (Some(target), PointerButton::Primary) => self.click_entity(target, bindings),
            (Some(target), PointerButton::Secondary) => self.context_entity(target, bindings),
            (None, PointerButton::Secondary) => {
                let world = self.to_world(event.screen);
                vec![Command::SelectedMove {
                    x: world.x,
                    y: world.y,
                }]
            }
            _ => Vec::new(),
        }
    }

    fn click_entity(&self, target: HitTarget, bindings: &dyn SlotBindings) -> Vec<Command> {
        // Only beetles are selectable; foods and bases react to
        // context-clicks only.
        if target.kind != EntityKind::Beetle {
            return Vec::new();
        }
        let Some(beetle_id) = bindings.bound_id(target.kind, target.slot) else {
            warn!(slot = target.slot, "click on unbound beetle slot; dropping");
            return Vec::new();
        };

        let mut commands = Vec::with_capacity(2);
        if !self.shift_held {
            commands.push(Command::DeselectAllBeetles);
        }
        commands.push(Command::SelectBeetle { beetle_id });
        commands
    }

    fn context_entity(&self, target: HitTarget, bindings: &dyn SlotBindings) -> Vec<Command> {
        let Some(target_id) = bindings.bound_id(target.kind, target.slot) else {
            warn!(
                kind = ?target.kind,
                slot = target.slot,
                "context-click on unbound slot; dropping"
            );
            return Vec::new();
        };
        vec![Command::SelectedInteract { target_id }]
    }
}

/// Corners may be captured in any order depending on drag direction.
pub fn normalize_rect(a: Point, b: Point) -> (f32, f32, f32, f32) {
    (
        a.x.min(b.x),
        a.y.min(b.y),
        a.x.max(b.x),
        a.y.max(b.y),
    )
}
