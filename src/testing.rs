//! Shared test doubles.

use std::collections::HashMap;

use crate::scene::{EntityKind, Rgba, SceneHandle, SceneRenderer};

/// Final attribute state of one renderable, as a backend would hold it.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RecordedNode {
    pub visible: bool,
    pub position: (f32, f32),
    pub angle: f32,
    pub scale: (f32, f32),
    pub fill: Option<Rgba>,
    pub selection_ring: bool,
    pub label: i32,
}

/// Records allocations and attribute writes instead of drawing.
#[derive(Debug, Default)]
pub struct RecordingScene {
    next_handle: u64,
    pub nodes: HashMap<SceneHandle, RecordedNode>,
    pub kinds: HashMap<SceneHandle, EntityKind>,
    pub alloc_count: usize,
    pub present_count: usize,
}

impl RecordingScene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn node(&self, handle: SceneHandle) -> &RecordedNode {
        self.nodes.get(&handle).expect("unknown scene handle")
    }
}

impl SceneRenderer for RecordingScene {
    fn alloc(&mut self, kind: EntityKind) -> SceneHandle {
        let handle = SceneHandle::new(self.next_handle);
        self.next_handle += 1;
        self.alloc_count += 1;
        self.nodes.insert(handle, RecordedNode::default());
        self.kinds.insert(handle, kind);
        handle
    }

    fn set_visible(&mut self, handle: SceneHandle, visible: bool) {
        self.nodes.get_mut(&handle).expect("unknown handle").visible = visible;
    }

    fn set_transform(&mut self, handle: SceneHandle, x: f32, y: f32, angle: f32) {
        let node = self.nodes.get_mut(&handle).expect("unknown handle");
        node.position = (x, y);
        node.angle = angle;
    }

    fn set_scale(&mut self, handle: SceneHandle, sx: f32, sy: f32) {
        self.nodes.get_mut(&handle).expect("unknown handle").scale = (sx, sy);
    }

    fn set_fill(&mut self, handle: SceneHandle, fill: Rgba) {
        self.nodes.get_mut(&handle).expect("unknown handle").fill = Some(fill);
    }

    fn set_selection_ring(&mut self, handle: SceneHandle, on: bool) {
        self.nodes.get_mut(&handle).expect("unknown handle").selection_ring = on;
    }

    fn set_label(&mut self, handle: SceneHandle, value: i32) {
        self.nodes.get_mut(&handle).expect("unknown handle").label = value;
    }

    fn present(&mut self) {
        self.present_count += 1;
    }
}
