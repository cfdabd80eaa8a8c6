use folio_session::*;

const PAGE: PageMetrics = PageMetrics {
    width: 400.0,
    height: 600.0,
};

fn ready_session() -> ViewerSession {
    let mut session = ViewerSession::new(ViewerOptions::default());
    session.begin_load();
    let req = session
        .document_ready(5, PAGE, 800.0)
        .expect("initial render");
    session.render_complete(req.page, PAGE);
    session
}

fn center_pivot(session: &ViewerSession) -> PivotAnchor {
    PivotAnchor::from_viewport_center([400.0, 400.0], [0.0, 0.0], session.content_size())
}

#[test]
fn test_wheel_accumulates_to_one_step() {
    let mut session = ready_session();

    // Five +10 deltas: nothing fires until the sum reaches the 50 threshold
    for _ in 0..4 {
        let pivot = center_pivot(&session);
        assert!(session.wheel(10.0, true, pivot).is_none());
    }

    let pivot = center_pivot(&session);
    let req = session.wheel(10.0, true, pivot).expect("one zoom step");

    // Positive deltas are scroll-down, so the step zooms out
    assert_eq!(session.zoom_percent(), 75);
    assert_eq!(req.page, 1);
    assert_eq!(session.wheel_accumulated(), 0.0);

    // The next delta starts a fresh accumulation
    session.render_complete(req.page, PAGE);
    let pivot = center_pivot(&session);
    assert!(session.wheel(10.0, true, pivot).is_none());
    assert_eq!(session.wheel_accumulated(), 10.0);
}

#[test]
fn test_wheel_without_modifier_passes_through() {
    let mut session = ready_session();

    for _ in 0..20 {
        let pivot = center_pivot(&session);
        assert!(session.wheel(10.0, false, pivot).is_none());
    }

    // Unmodified wheel input never feeds the accumulator
    assert_eq!(session.wheel_accumulated(), 0.0);
    assert_eq!(session.zoom_percent(), 100);
}

#[test]
fn test_wheel_negative_deltas_zoom_in() {
    let mut session = ready_session();

    let pivot = center_pivot(&session);
    assert!(session.wheel(-30.0, true, pivot).is_none());
    let pivot = center_pivot(&session);
    let req = session.wheel(-30.0, true, pivot).expect("one zoom step");

    assert_eq!(session.zoom_percent(), 125);
    assert_eq!(session.wheel_accumulated(), 0.0);
    session.render_complete(req.page, PAGE);
}

#[test]
fn test_drag_offsets_scroll_by_pointer_delta() {
    let mut session = ready_session();

    session.begin_drag([100.0, 100.0], [50.0, 40.0]);
    assert!(session.is_dragging());

    // Pointer moved (-20, +30); content follows the pointer, so the scroll
    // offset moves by the opposite delta
    let scroll = session.drag_to([80.0, 130.0]).expect("active drag");
    assert_eq!(scroll, [70.0, 10.0]);

    session.end_drag();
    assert!(!session.is_dragging());

    // No gesture is left stuck active after release
    assert!(session.drag_to([0.0, 0.0]).is_none());
}

#[test]
fn test_drag_clears_on_leave_from_any_state() {
    let mut session = ready_session();

    // end without begin is fine (pointer-leave with no gesture)
    session.end_drag();
    assert!(!session.is_dragging());

    session.begin_drag([10.0, 10.0], [0.0, 0.0]);
    session.end_drag();
    session.end_drag();
    assert!(!session.is_dragging());
}

#[test]
fn test_drag_never_changes_scale() {
    let mut session = ready_session();

    session.begin_drag([100.0, 100.0], [0.0, 0.0]);
    session.drag_to([50.0, 50.0]);
    session.end_drag();

    assert_eq!(session.zoom_percent(), 100);
    assert!(!session.render_in_flight());
}

#[test]
fn test_pivot_keeps_viewport_center_stationary() {
    // Content 800x800 with the viewport center over the page midpoint
    let pivot = PivotAnchor::from_viewport_center([400.0, 400.0], [200.0, 200.0], [800.0, 800.0]);
    assert_eq!(pivot.page_frac, [0.5, 0.5]);

    // After scaling to 1000x1000 the midpoint must still sit at the center
    let scroll = pivot.scroll_after_resize([1000.0, 1000.0]);
    assert_eq!(scroll, [300.0, 300.0]);

    let midpoint_on_screen = [
        0.5 * 1000.0 - scroll[0],
        0.5 * 1000.0 - scroll[1],
    ];
    assert_eq!(midpoint_on_screen, pivot.viewer_pos);
}

#[test]
fn test_pivot_from_pointer_clamps_to_page() {
    // Pointer past the content edge clamps to fraction 1
    let pivot = PivotAnchor::from_pointer([500.0, 100.0], [400.0, 0.0], [800.0, 800.0]);
    assert_eq!(pivot.page_frac[0], 1.0);

    // Scroll offsets never go negative
    let scroll = pivot.scroll_after_resize([100.0, 100.0]);
    assert!(scroll[0] >= 0.0 && scroll[1] >= 0.0);
}

#[test]
fn test_wheel_zoom_carries_pointer_pivot() {
    let mut session = ready_session();

    // The request the host forwards carries the pointer anchor so the
    // zoomed frame can be re-scrolled under the cursor
    let pivot = PivotAnchor::from_pointer([120.0, 90.0], [0.0, 0.0], session.content_size());
    let req = session.wheel(-50.0, true, pivot).expect("zoom step");
    assert_eq!(req.pivot, Some(pivot));
}
