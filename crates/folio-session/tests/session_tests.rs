use folio_session::*;

const PAGE: PageMetrics = PageMetrics {
    width: 400.0,
    height: 600.0,
};

fn ready_session(page_count: u32) -> (ViewerSession, RenderRequest) {
    let mut session = ViewerSession::new(ViewerOptions::default());
    session.begin_load();
    let req = session
        .document_ready(page_count, PAGE, 800.0)
        .expect("initial render");
    (session, req)
}

#[test]
fn test_load_renders_page_one_at_base_scale() {
    let (session, req) = ready_session(5);
    assert_eq!(session.state(), DocumentState::Ready);
    assert_eq!(req.page, 1);
    assert_eq!(req.scale, session.base_scale());
    assert!(req.pivot.is_none());
    assert!(session.render_in_flight());
}

#[test]
fn test_load_failure_disables_navigation() {
    let mut session = ViewerSession::new(ViewerOptions::default());
    session.begin_load();
    session.load_failed();

    assert_eq!(session.state(), DocumentState::Failed);
    assert!(session.next_page().is_none());
    assert!(session.prev_page().is_none());
    assert!(session.refit(1200.0).is_none());
}

#[test]
fn test_navigation_clamps_at_document_bounds() {
    let (mut session, req) = ready_session(5);
    session.render_complete(req.page, PAGE);

    // prev at the first page is silently ignored
    assert!(session.prev_page().is_none());
    assert_eq!(session.current_page(), 1);

    // seven nexts on a five page document land on page 5
    for _ in 0..7 {
        if let Some(req) = session.next_page() {
            session.render_complete(req.page, PAGE);
        }
    }
    assert_eq!(session.current_page(), 5);

    assert!(session.next_page().is_none());
    assert_eq!(session.current_page(), 5);
}

#[test]
fn test_render_requests_serialize() {
    let (mut session, _initial) = ready_session(5);

    // Navigation while page 1 is still rasterizing defers instead of
    // starting a second render
    assert!(session.next_page().is_none());
    assert_eq!(session.pending_page(), Some(2));
    assert!(session.render_in_flight());

    // Rapid navigation coalesces to the latest target
    assert!(session.next_page().is_none());
    assert_eq!(session.pending_page(), Some(3));

    // Resolution hands out exactly one follow-up render
    let follow_up = session.render_complete(1, PAGE).expect("deferred render");
    assert_eq!(follow_up.page, 3);
    assert_eq!(session.pending_page(), None);
    assert!(session.render_in_flight());

    // And the chain drains cleanly
    assert!(session.render_complete(3, PAGE).is_none());
    assert!(!session.render_in_flight());
}

#[test]
fn test_render_failure_frees_the_pipeline() {
    let (mut session, _initial) = ready_session(5);

    assert!(session.next_page().is_none());

    // The failed render frees the slot and the deferred page still renders
    let follow_up = session.render_failed().expect("deferred render");
    assert_eq!(follow_up.page, 2);

    assert!(session.render_complete(2, PAGE).is_none());
    assert!(!session.render_in_flight());
}

#[test]
fn test_refit_resets_zoom_to_new_base() {
    let (mut session, req) = ready_session(5);
    session.render_complete(req.page, PAGE);

    let zoom_req = session.zoom_in(None).expect("zoom render");
    session.render_complete(zoom_req.page, PAGE);
    assert_eq!(session.zoom_percent(), 125);

    // Refit recomputes base from the new width and drops back to 100%
    let refit_req = session.refit(1200.0).expect("refit render");
    assert_eq!(session.base_scale(), 3.0);
    assert_eq!(session.zoom_percent(), 100);
    assert_eq!(refit_req.scale, 3.0);
}

#[test]
fn test_refit_during_render_defers() {
    let (mut session, _initial) = ready_session(5);

    // Page 1 is still in flight; the resize-driven render must wait
    assert!(session.refit(1200.0).is_none());
    assert_eq!(session.pending_page(), Some(1));

    // Scales are already consistent with the new width
    assert_eq!(session.base_scale(), 3.0);
    assert_eq!(session.current_scale(), 3.0);

    let follow_up = session.render_complete(1, PAGE).expect("deferred refit");
    assert_eq!(follow_up.page, 1);
    assert_eq!(follow_up.scale, 3.0);
}

#[test]
fn test_render_complete_tracks_natural_size() {
    let (mut session, req) = ready_session(5);
    session.render_complete(req.page, PAGE);

    let req = session.next_page().expect("page 2 render");
    let wide = PageMetrics {
        width: 800.0,
        height: 600.0,
    };
    session.render_complete(req.page, wide);

    // Refit uses the current page's natural width, not page 1's
    session.refit(800.0);
    assert_eq!(session.base_scale(), 1.0);
}

#[test]
fn test_content_size_follows_scale() {
    let (mut session, req) = ready_session(5);
    session.render_complete(req.page, PAGE);

    assert_eq!(session.content_size(), [800.0, 1200.0]);

    let req = session.zoom_in(None).expect("zoom render");
    session.render_complete(req.page, PAGE);
    assert_eq!(session.content_size(), [1000.0, 1500.0]);
}
