#[derive(Debug, Clone, Copy)]
struct DragState {
    anchor_pointer: [f32; 2],
    anchor_scroll: [f32; 2],
}

/// Pan gesture state machine. Mouse and touch feed the same pointer
/// coordinates; a gesture lives from `begin` until `end`, and `end` is safe
/// to call from any state so pointer-up, pointer-leave and touch-end can all
/// route here unconditionally.
#[derive(Debug, Default)]
pub struct PanTracker {
    drag: Option<DragState>,
}

impl PanTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&mut self, pointer: [f32; 2], scroll: [f32; 2]) {
        self.drag = Some(DragState {
            anchor_pointer: pointer,
            anchor_scroll: scroll,
        });
    }

    /// Scroll offset for the current pointer position, or `None` when no
    /// gesture is active. Dragging right moves content with the pointer, so
    /// the offset decreases by the pointer delta.
    pub fn update(&mut self, pointer: [f32; 2]) -> Option<[f32; 2]> {
        let drag = self.drag.as_ref()?;

        Some([
            drag.anchor_scroll[0] - (pointer[0] - drag.anchor_pointer[0]),
            drag.anchor_scroll[1] - (pointer[1] - drag.anchor_pointer[1]),
        ])
    }

    pub fn end(&mut self) {
        self.drag = None;
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }
}
