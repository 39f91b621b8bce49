//! Pointer input for the portrait surface.
//!
//! The page reports pointer moves in client coordinates. The simulator
//! works in surface-local pixels, so the surface origin (its bounding-box
//! top-left in client space) is subtracted on read.

use lumina_core::Vec2;

/// Last known pointer position.
///
/// `None` until the first move: there is no repulsion before the pointer
/// has ever been seen over the page.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PointerState {
    /// Last pointer position in client space.
    client: Option<Vec2>,
    /// Surface top-left in client space.
    origin: Vec2,
    /// Moves seen since creation.
    moves: u64,
}

impl PointerState {
    /// Creates a state with no pointer and the surface at the client origin.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records where the surface sits in client space.
    pub fn set_surface_origin(&mut self, x: f64, y: f64) {
        if x.is_finite() && y.is_finite() {
            self.origin = Vec2::new(x, y);
        }
    }

    /// Records a pointer move. Non-finite coordinates are dropped.
    pub fn pointer_moved(&mut self, client_x: f64, client_y: f64) {
        if !(client_x.is_finite() && client_y.is_finite()) {
            return;
        }
        self.client = Some(Vec2::new(client_x, client_y));
        self.moves += 1;
    }

    /// Pointer position relative to the surface, if one has been seen.
    ///
    /// May lie outside the surface; the pointer is tracked over the whole page.
    #[inline]
    #[must_use]
    pub fn local(&self) -> Option<Vec2> {
        self.client.map(|client| client - self.origin)
    }

    /// Last raw client position.
    #[must_use]
    pub const fn client(&self) -> Option<Vec2> {
        self.client
    }

    /// Surface origin in client space.
    #[must_use]
    pub const fn surface_origin(&self) -> Vec2 {
        self.origin
    }

    /// Pointer moves recorded.
    #[must_use]
    pub const fn move_count(&self) -> u64 {
        self.moves
    }

    /// Forgets the pointer position.
    pub fn clear(&mut self) {
        self.client = None;
    }
}
