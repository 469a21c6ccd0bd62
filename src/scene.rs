//! Seam to the external vector rendering backend.
//!
//! The engine never draws; it pushes attribute updates through
//! [`SceneRenderer`] and the backend rasterizes them however it likes.
//! Handles are opaque: the backend mints them in `alloc` and the
//! reconciler hands them back unchanged.

/// Reference beetle dimensions in world units. Entity scale is the
/// ratio of a snapshot's body size to these.
pub const BEETLE_REF_WIDTH: f32 = 20.0;
pub const BEETLE_REF_LENGTH: f32 = 20.0;

/// Head radius a backend should use for a beetle body of this width.
pub fn head_radius(body_width: f32) -> f32 {
    body_width / 3.0
}

/// Fixed fills for the non-beetle entity kinds.
pub const FOOD_FILL: Rgba = Rgba { r: 0xef, g: 0xc8, b: 0x5d, a: 1.0 };
pub const BASE_FILL: Rgba = Rgba { r: 0x72, g: 0x41, b: 0x00, a: 1.0 };

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

/// Opaque backend handle for one renderable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SceneHandle(u64);

impl SceneHandle {
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn raw(self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Beetle,
    FoodSource,
    HomeBase,
}

pub trait SceneRenderer {
    /// Provision one renderable of the given kind. This is the only
    /// point where backend resources are allocated; the reconciler
    /// hides proxies instead of freeing them.
    fn alloc(&mut self, kind: EntityKind) -> SceneHandle;

    fn set_visible(&mut self, handle: SceneHandle, visible: bool);

    /// Position in world units, heading in radians.
    fn set_transform(&mut self, handle: SceneHandle, x: f32, y: f32, angle: f32);

    fn set_scale(&mut self, handle: SceneHandle, sx: f32, sy: f32);

    fn set_fill(&mut self, handle: SceneHandle, fill: Rgba);

    fn set_selection_ring(&mut self, handle: SceneHandle, on: bool);

    /// Numeric label next to the entity (food carried / amount / stored).
    fn set_label(&mut self, handle: SceneHandle, value: i32);

    /// Called after a snapshot has been fully reconciled; the backend
    /// may now read proxy state and draw a frame.
    fn present(&mut self);
}
