/// Height of the grab strip at the bottom edge of the viewport, in pixels.
pub const DEFAULT_GRAB_HEIGHT: u32 = 4;

/// Drag handle on the bottom edge of the viewport container.
///
/// A press within the bottom grab strip starts a drag; while dragging, the container's new
/// height follows the pointer. Pair every returned height with
/// [`crate::TableController::on_resize`] once the host has applied it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ViewportResizeHandle {
    height: u32,
    grab_height: u32,
    dragging: bool,
}

impl ViewportResizeHandle {
    pub fn new(height: u32) -> Self {
        Self {
            height,
            grab_height: DEFAULT_GRAB_HEIGHT,
            dragging: false,
        }
    }

    pub fn with_grab_height(mut self, grab_height: u32) -> Self {
        self.grab_height = grab_height;
        self
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// `pointer_y` is relative to the container top. Returns whether a drag started.
    pub fn pointer_down(&mut self, pointer_y: u32) -> bool {
        let top = self.height.saturating_sub(self.grab_height);
        self.dragging = pointer_y > top && pointer_y <= self.height;
        self.dragging
    }

    /// Returns the new container height while dragging.
    pub fn pointer_move(&mut self, pointer_y: u32) -> Option<u32> {
        if !self.dragging {
            return None;
        }
        self.height = pointer_y;
        atrace!(height = pointer_y, "viewport handle drag");
        Some(pointer_y)
    }

    pub fn pointer_up(&mut self) {
        self.dragging = false;
    }
}
