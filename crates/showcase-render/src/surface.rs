//! On-screen drawing surfaces.
//!
//! A [`Surface`] stands for one canvas element. Clones share state, so the
//! page that owns the element and the adapter drawing on it observe the same
//! attachment and binding.

use std::cell::Cell;
use std::rc::Rc;
use uuid::Uuid;

#[derive(Debug)]
struct SurfaceState {
    id: Uuid,
    attached: Cell<bool>,
    bound: Cell<bool>,
}

/// Handle to one canvas element.
#[derive(Debug, Clone)]
pub struct Surface {
    state: Rc<SurfaceState>,
}

impl Surface {
    /// Create an attached, unbound surface.
    pub fn new() -> Self {
        Self {
            state: Rc::new(SurfaceState {
                id: Uuid::new_v4(),
                attached: Cell::new(true),
                bound: Cell::new(false),
            }),
        }
    }

    pub fn id(&self) -> Uuid {
        self.state.id
    }

    pub fn is_attached(&self) -> bool {
        self.state.attached.get()
    }

    /// Whether an open adapter currently draws on this surface.
    pub fn is_bound(&self) -> bool {
        self.state.bound.get()
    }

    pub fn detach(&self) {
        self.state.attached.set(false);
    }

    pub fn attach(&self) {
        self.state.attached.set(true);
    }

    /// Claim the surface for one adapter. Fails if it is detached or
    /// already claimed.
    pub(crate) fn bind(&self) -> Result<SurfaceBinding, &'static str> {
        if !self.is_attached() {
            return Err("surface is detached");
        }
        if self.is_bound() {
            return Err("surface is already bound");
        }
        self.state.bound.set(true);
        Ok(SurfaceBinding {
            surface: self.clone(),
        })
    }
}

impl Default for Surface {
    fn default() -> Self {
        Self::new()
    }
}

/// Exclusive claim on a surface; releases it when dropped.
#[derive(Debug)]
pub(crate) struct SurfaceBinding {
    surface: Surface,
}

impl SurfaceBinding {
    pub(crate) fn surface_id(&self) -> Uuid {
        self.surface.id()
    }
}

impl Drop for SurfaceBinding {
    fn drop(&mut self) {
        self.surface.state.bound.set(false);
    }
}
