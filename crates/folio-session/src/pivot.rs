/// A logical point on the page that must stay visually stationary across a
/// scale change: where it sits on the page (as fractions of the content box)
/// and where it currently sits on screen (within the scroll viewport).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PivotAnchor {
    /// Position on the page, fractions of content width/height in 0..=1
    pub page_frac: [f32; 2],
    /// Position within the scroll viewport, logical pixels
    pub viewer_pos: [f32; 2],
}

impl PivotAnchor {
    /// Anchor at an arbitrary viewport position, e.g. the pointer during a
    /// wheel zoom. `scroll` and `content_size` describe the scrollable
    /// content at its current scale.
    pub fn from_pointer(pointer: [f32; 2], scroll: [f32; 2], content_size: [f32; 2]) -> Self {
        let frac = |axis: usize| {
            if content_size[axis] <= 0.0 {
                0.0
            } else {
                ((scroll[axis] + pointer[axis]) / content_size[axis]).clamp(0.0, 1.0)
            }
        };

        Self {
            page_frac: [frac(0), frac(1)],
            viewer_pos: pointer,
        }
    }

    /// Anchor at the center of the visible viewport, used by button zooms.
    pub fn from_viewport_center(
        viewport_size: [f32; 2],
        scroll: [f32; 2],
        content_size: [f32; 2],
    ) -> Self {
        Self::from_pointer(
            [viewport_size[0] / 2.0, viewport_size[1] / 2.0],
            scroll,
            content_size,
        )
    }

    /// Scroll offsets that put the anchored page point back under
    /// `viewer_pos` once the content has been resized.
    pub fn scroll_after_resize(&self, new_content_size: [f32; 2]) -> [f32; 2] {
        [
            (self.page_frac[0] * new_content_size[0] - self.viewer_pos[0]).max(0.0),
            (self.page_frac[1] * new_content_size[1] - self.viewer_pos[1]).max(0.0),
        ]
    }
}
