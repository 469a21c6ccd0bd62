//! Positional reconciliation of snapshot entities onto pooled proxies.
//!
//! Every tick the server replaces the whole entity list; the reconciler
//! maps that list onto a stable arena of visual proxies slot-by-slot.
//! Pools only ever grow. A shrinking entity list hides the surplus
//! proxies (and clears their selection rings) rather than freeing
//! backend resources, trading memory for allocation churn.
//!
//! Matching is positional, not identity-tracking: the proxy at slot `i`
//! represents whatever entity occupies index `i` *this* tick. The only
//! guarantee is that a slot's bound id is current before any interaction
//! handler can use it; a given proxy is free to represent different
//! logical entities on different ticks. This assumes the server emits
//! entities in a stable order per identity, which is an assumption on
//! the producer, not something verified here.

use tracing::warn;

use crate::proto;
use crate::scene::{
    EntityKind, Rgba, SceneHandle, SceneRenderer, BASE_FILL, BEETLE_REF_LENGTH, BEETLE_REF_WIDTH,
    FOOD_FILL,
};

/// Per-slot visual attributes, normalized across entity kinds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlotAttrs {
    pub x: f32,
    pub y: f32,
    pub angle: f32,
    pub scale: (f32, f32),
    pub fill: Rgba,
    pub selected: bool,
    pub label: i32,
}

/// One snapshot entity flattened for reconciliation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlotEntity {
    pub id: i32,
    pub attrs: SlotAttrs,
}

/// Slot -> currently-bound entity id, resolved by the interaction layer
/// at event time. This replaces per-tick handler closures: handlers
/// never capture an id, they look it up through the slot when the event
/// fires, so they cannot go stale between ticks.
pub trait SlotBindings {
    fn bound_id(&self, kind: EntityKind, slot: usize) -> Option<i32>;
}

#[derive(Debug)]
struct VisualProxy {
    handle: SceneHandle,
    bound_id: Option<i32>,
    selection_ring: bool,
}

/// Index-addressed arena of proxies for one entity kind, plus the count
/// of currently live slots. Slots `>= live` exist but are hidden.
#[derive(Debug)]
pub struct ProxyPool {
    kind: EntityKind,
    proxies: Vec<VisualProxy>,
    live: usize,
}

impl ProxyPool {
    pub fn new(kind: EntityKind) -> Self {
        Self {
            kind,
            proxies: Vec::new(),
            live: 0,
        }
    }

    /// Total allocated proxies, live or hidden.
    pub fn len(&self) -> usize {
        self.proxies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.proxies.is_empty()
    }

    /// Slots bound to an entity this tick.
    pub fn live(&self) -> usize {
        self.live
    }

    /// Entity id currently occupying `slot`, if the slot is live.
    pub fn bound_id(&self, slot: usize) -> Option<i32> {
        if slot >= self.live {
            return None;
        }
        self.proxies[slot].bound_id
    }

    /// Backend handle for `slot`, if allocated.
    pub fn handle(&self, slot: usize) -> Option<SceneHandle> {
        self.proxies.get(slot).map(|p| p.handle)
    }

    /// Map this tick's entity list onto the pool, slot by slot.
    pub fn reconcile<S: SceneRenderer>(&mut self, scene: &mut S, entities: &[SlotEntity]) {
        for (slot, entity) in entities.iter().enumerate() {
            if slot == self.proxies.len() {
                let handle = scene.alloc(self.kind);
                self.proxies.push(VisualProxy {
                    handle,
                    bound_id: None,
                    selection_ring: false,
                });
                scene.set_visible(handle, true);
            } else if slot >= self.live {
                // Previously hidden proxy coming back into use.
                scene.set_visible(self.proxies[slot].handle, true);
            }

            let proxy = &mut self.proxies[slot];
            // Rebind before anything else: interaction handlers resolve
            // through this id, so it must name the slot's occupant for
            // the tick being applied.
            proxy.bound_id = Some(entity.id);

            let a = entity.attrs;
            scene.set_transform(
                proxy.handle,
                finite_or_zero(a.x),
                finite_or_zero(a.y),
                finite_or_zero(a.angle),
            );
            scene.set_scale(proxy.handle, a.scale.0, a.scale.1);
            scene.set_fill(proxy.handle, a.fill);
            scene.set_label(proxy.handle, a.label);
            scene.set_selection_ring(proxy.handle, a.selected);
            proxy.selection_ring = a.selected;
        }

        // Surplus slots: hide, clear the selection ring, unbind.
        for slot in entities.len()..self.live {
            let proxy = &mut self.proxies[slot];
            scene.set_visible(proxy.handle, false);
            scene.set_selection_ring(proxy.handle, false);
            proxy.selection_ring = false;
            proxy.bound_id = None;
        }

        self.live = entities.len();
        debug_assert!(
            self.proxies.len() >= self.live,
            "proxy pool shrank below the live entity count"
        );
        if self.proxies.len() < self.live {
            // Release-mode clamp; this indicates the positional-matching
            // invariant was broken upstream.
            warn!(
                kind = ?self.kind,
                pool = self.proxies.len(),
                live = self.live,
                "clamping live count to pool size"
            );
            self.live = self.proxies.len();
        }
    }
}

fn finite_or_zero(v: f32) -> f32 {
    if v.is_finite() {
        return v;
    }
    debug_assert!(false, "non-finite entity coordinate: {v}");
    0.0
}

/// The three per-kind pools plus the snapshot-to-slot flattening.
#[derive(Debug)]
pub struct Reconciler {
    beetles: ProxyPool,
    foods: ProxyPool,
    bases: ProxyPool,
}

impl Default for Reconciler {
    fn default() -> Self {
        Self::new()
    }
}

impl Reconciler {
    pub fn new() -> Self {
        Self {
            beetles: ProxyPool::new(EntityKind::Beetle),
            foods: ProxyPool::new(EntityKind::FoodSource),
            bases: ProxyPool::new(EntityKind::HomeBase),
        }
    }

    pub fn pool(&self, kind: EntityKind) -> &ProxyPool {
        match kind {
            EntityKind::Beetle => &self.beetles,
            EntityKind::FoodSource => &self.foods,
            EntityKind::HomeBase => &self.bases,
        }
    }

    /// Reconcile one full snapshot. Runs to completion; callers schedule
    /// the draw after this returns, never interleaved with it.
    pub fn apply<S: SceneRenderer>(&mut self, scene: &mut S, state: &proto::GameState) {
        let beetles: Vec<SlotEntity> = state.beetles.iter().map(beetle_slot).collect();
        let foods: Vec<SlotEntity> = state.food_sources.iter().map(food_slot).collect();
        let bases: Vec<SlotEntity> = state.home_bases.iter().map(base_slot).collect();

        self.bases.reconcile(scene, &bases);
        self.foods.reconcile(scene, &foods);
        self.beetles.reconcile(scene, &beetles);
    }
}

impl SlotBindings for Reconciler {
    fn bound_id(&self, kind: EntityKind, slot: usize) -> Option<i32> {
        self.pool(kind).bound_id(slot)
    }
}

fn beetle_slot(b: &proto::Beetle) -> SlotEntity {
    let fill = match &b.color {
        Some(c) => Rgba {
            r: c.r.min(255) as u8,
            g: c.g.min(255) as u8,
            b: c.b.min(255) as u8,
            a: c.a.clamp(0.0, 1.0),
        },
        None => Rgba {
            r: 0x1c,
            g: 0x1c,
            b: 0x1c,
            a: 1.0,
        },
    };

    SlotEntity {
        id: b.id,
        attrs: SlotAttrs {
            x: b.x,
            y: b.y,
            angle: b.angle,
            scale: (
                b.body_length / BEETLE_REF_LENGTH,
                b.body_width / BEETLE_REF_WIDTH,
            ),
            fill,
            selected: b.selected,
            label: b.food_carrying,
        },
    }
}

fn food_slot(f: &proto::FoodSource) -> SlotEntity {
    SlotEntity {
        id: f.id,
        attrs: SlotAttrs {
            x: f.x,
            y: f.y,
            angle: 0.0,
            scale: (1.0, 1.0),
            fill: FOOD_FILL,
            selected: false,
            label: f.amount,
        },
    }
}

fn base_slot(b: &proto::HomeBase) -> SlotEntity {
    SlotEntity {
        id: b.id,
        attrs: SlotAttrs {
            x: b.x,
            y: b.y,
            angle: 0.0,
            scale: (1.0, 1.0),
            fill: BASE_FILL,
            selected: false,
            label: b.food_stored_amount,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::RecordingScene;

    fn entity(id: i32, x: f32, selected: bool) -> SlotEntity {
        SlotEntity {
            id,
            attrs: SlotAttrs {
                x,
                y: 0.0,
                angle: 0.0,
                scale: (1.0, 1.0),
                fill: FOOD_FILL,
                selected,
                label: 0,
            },
        }
    }

    #[test]
    fn pool_grows_and_never_shrinks() {
        let mut scene = RecordingScene::new();
        let mut pool = ProxyPool::new(EntityKind::Beetle);

        pool.reconcile(&mut scene, &[entity(1, 0.0, false), entity(2, 0.0, false)]);
        assert_eq!(pool.len(), 2);
        assert_eq!(scene.alloc_count, 2);

        pool.reconcile(
            &mut scene,
            &[
                entity(1, 0.0, false),
                entity(2, 0.0, false),
                entity(3, 0.0, false),
            ],
        );
        assert_eq!(pool.len(), 3);

        pool.reconcile(&mut scene, &[entity(3, 0.0, false)]);
        assert_eq!(pool.len(), 3, "pool must not shrink on smaller snapshots");
        assert_eq!(pool.live(), 1);
        // Growth back within capacity allocates nothing new.
        pool.reconcile(&mut scene, &[entity(3, 0.0, false), entity(4, 0.0, false)]);
        assert_eq!(scene.alloc_count, 3);
    }

    #[test]
    fn surplus_proxies_end_hidden_with_ring_cleared() {
        let mut scene = RecordingScene::new();
        let mut pool = ProxyPool::new(EntityKind::Beetle);

        pool.reconcile(
            &mut scene,
            &[
                entity(1, 0.0, true),
                entity(2, 0.0, true),
                entity(3, 0.0, true),
            ],
        );
        pool.reconcile(&mut scene, &[entity(9, 5.0, false)]);

        for slot in 1..3 {
            let node = scene.node(pool.handle(slot).unwrap());
            assert!(!node.visible, "slot {slot} should be hidden");
            assert!(!node.selection_ring, "slot {slot} ring should be cleared");
            assert_eq!(pool.bound_id(slot), None);
        }
        let survivor = scene.node(pool.handle(0).unwrap());
        assert!(survivor.visible);
        assert_eq!(pool.bound_id(0), Some(9));
        assert_eq!(survivor.position.0, 5.0);
    }

    #[test]
    fn reconcile_is_idempotent() {
        let entities = [entity(1, 3.0, true), entity(2, 4.0, false)];

        let mut scene_once = RecordingScene::new();
        let mut pool_once = ProxyPool::new(EntityKind::Beetle);
        pool_once.reconcile(&mut scene_once, &entities);

        let mut scene_twice = RecordingScene::new();
        let mut pool_twice = ProxyPool::new(EntityKind::Beetle);
        pool_twice.reconcile(&mut scene_twice, &entities);
        pool_twice.reconcile(&mut scene_twice, &entities);

        for slot in 0..entities.len() {
            assert_eq!(
                scene_once.node(pool_once.handle(slot).unwrap()),
                scene_twice.node(pool_twice.handle(slot).unwrap()),
                "slot {slot} attributes must match after one or two applications"
            );
        }
        assert_eq!(scene_twice.alloc_count, 2);
    }

    #[test]
    fn rebinding_tracks_slot_occupant_across_ticks() {
        let mut scene = RecordingScene::new();
        let mut pool = ProxyPool::new(EntityKind::Beetle);

        pool.reconcile(&mut scene, &[entity(10, 0.0, false), entity(20, 0.0, false)]);
        assert_eq!(pool.bound_id(0), Some(10));
        assert_eq!(pool.bound_id(1), Some(20));

        // Same ids, swapped slots: positional matching just follows.
        pool.reconcile(&mut scene, &[entity(20, 0.0, false), entity(10, 0.0, false)]);
        assert_eq!(pool.bound_id(0), Some(20));
        assert_eq!(pool.bound_id(1), Some(10));
    }

    #[test]
    fn hidden_slot_resolves_to_no_binding() {
        let mut scene = RecordingScene::new();
        let mut pool = ProxyPool::new(EntityKind::Beetle);

        pool.reconcile(&mut scene, &[entity(1, 0.0, false), entity(2, 0.0, false)]);
        pool.reconcile(&mut scene, &[entity(1, 0.0, false)]);

        assert_eq!(pool.bound_id(1), None);
        assert_eq!(pool.bound_id(7), None, "unallocated slots resolve to None");
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "non-finite entity coordinate")]
    fn non_finite_coordinates_are_fatal_in_debug() {
        let mut scene = RecordingScene::new();
        let mut pool = ProxyPool::new(EntityKind::Beetle);
        pool.reconcile(&mut scene, &[entity(1, f32::NAN, false)]);
    }

    #[test]
    fn snapshot_apply_maps_all_three_categories() {
        let mut scene = RecordingScene::new();
        let mut reconciler = Reconciler::new();

        let state = proto::GameState {
            beetles: vec![proto::Beetle {
                id: 1,
                x: 10.0,
                y: 20.0,
                angle: 1.5,
                body_width: 10.0,
                body_length: 40.0,
                color: Some(proto::Color {
                    r: 200,
                    g: 100,
                    b: 50,
                    a: 0.5,
                }),
                selected: true,
                food_carrying: 3,
            }],
            food_sources: vec![proto::FoodSource {
                id: 2,
                x: 1.0,
                y: 2.0,
                amount: 64,
            }],
            home_bases: vec![proto::HomeBase {
                id: 3,
                x: 5.0,
                y: 6.0,
                food_stored_amount: 12,
            }],
        };
        reconciler.apply(&mut scene, &state);

        let beetle = scene.node(reconciler.pool(EntityKind::Beetle).handle(0).unwrap());
        assert_eq!(beetle.position, (10.0, 20.0));
        assert_eq!(beetle.scale, (2.0, 0.5));
        assert!(beetle.selection_ring);
        assert_eq!(beetle.label, 3);
        assert_eq!(beetle.fill.unwrap().r, 200);

        let food = scene.node(reconciler.pool(EntityKind::FoodSource).handle(0).unwrap());
        assert_eq!(food.label, 64);

        assert_eq!(reconciler.bound_id(EntityKind::HomeBase, 0), Some(3));
    }

    #[test]
    fn three_beetles_then_one_keeps_pool_and_rebinds_survivor() {
        let mut scene = RecordingScene::new();
        let mut reconciler = Reconciler::new();

        let mut beetles = Vec::new();
        for id in [11, 22, 33] {
            beetles.push(proto::Beetle {
                id,
                x: id as f32,
                ..Default::default()
            });
        }
        reconciler.apply(
            &mut scene,
            &proto::GameState {
                beetles,
                ..Default::default()
            },
        );

        reconciler.apply(
            &mut scene,
            &proto::GameState {
                beetles: vec![proto::Beetle {
                    id: 33,
                    x: 99.0,
                    ..Default::default()
                }],
                ..Default::default()
            },
        );

        let pool = reconciler.pool(EntityKind::Beetle);
        assert_eq!(pool.len(), 3);
        assert!(!scene.node(pool.handle(1).unwrap()).visible);
        assert!(!scene.node(pool.handle(2).unwrap()).visible);
        assert_eq!(pool.bound_id(0), Some(33));
        assert_eq!(scene.node(pool.handle(0).unwrap()).position.0, 99.0);
    }
}
