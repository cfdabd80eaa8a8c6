/// Absorbs floating-point drift so a percentage sitting exactly on a step
/// boundary still advances by one full step instead of zero.
const STEP_EPSILON: f32 = 0.1;

/// Next quantized zoom percentage above `percent`, capped at `max_percent`.
pub fn step_up(percent: f32, step: f32, max_percent: f32) -> f32 {
    let next = (((percent + STEP_EPSILON) / step).floor() + 1.0) * step;
    next.min(max_percent)
}

/// Next quantized zoom percentage below `percent`, floored at `min_percent`.
pub fn step_down(percent: f32, step: f32, min_percent: f32) -> f32 {
    let prev = (((percent - STEP_EPSILON) / step).ceil() - 1.0) * step;
    prev.max(min_percent)
}

/// Scale at which a page of `natural_width` exactly fills the container.
///
/// A container that has not been laid out yet reports zero width; the
/// fallback width stands in so the first render is not degenerate.
pub fn fit_width_scale(container_width: f32, natural_width: f32, fallback_width: f32) -> f32 {
    let width = if container_width > 0.0 {
        container_width
    } else {
        fallback_width
    };

    if natural_width <= 0.0 {
        return 1.0;
    }

    width / natural_width
}
