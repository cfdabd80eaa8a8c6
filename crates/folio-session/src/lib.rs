mod drag;
mod error;
mod options;
mod pivot;
mod session;
mod wheel;
mod zoom;

pub use drag::PanTracker;
pub use error::{Result, SessionError};
pub use options::ViewerOptions;
pub use pivot::PivotAnchor;
pub use session::{DocumentState, PageMetrics, RenderRequest, ViewerSession};
pub use wheel::{WheelAccumulator, ZoomDirection};
pub use zoom::{fit_width_scale, step_down, step_up};
