use folio_session::*;

fn ready_session(container_width: f32) -> ViewerSession {
    let mut session = ViewerSession::new(ViewerOptions::default());
    session.begin_load();
    let first = session.document_ready(
        5,
        PageMetrics {
            width: 400.0,
            height: 600.0,
        },
        container_width,
    );
    // Resolve the initial render so zoom calls are not coalesced
    let req = first.expect("initial render");
    session.render_complete(
        req.page,
        PageMetrics {
            width: 400.0,
            height: 600.0,
        },
    );
    session
}

fn resolve(session: &mut ViewerSession, req: Option<RenderRequest>) {
    if let Some(req) = req {
        session.render_complete(
            req.page,
            PageMetrics {
                width: 400.0,
                height: 600.0,
            },
        );
    }
}

#[test]
fn test_fit_width_base_scale() {
    let session = ready_session(800.0);
    assert_eq!(session.base_scale(), 2.0);
    assert_eq!(session.current_scale(), 2.0);
    assert_eq!(session.zoom_percent(), 100);
}

#[test]
fn test_fit_width_zero_container_falls_back() {
    // Container not laid out yet reports zero width; 800 stands in
    assert_eq!(fit_width_scale(0.0, 400.0, 800.0), 2.0);
    assert_eq!(fit_width_scale(1200.0, 400.0, 800.0), 3.0);
}

#[test]
fn test_zoom_in_steps_to_125() {
    let mut session = ready_session(800.0);
    let req = session.zoom_in(None).expect("zoom should render");
    assert_eq!(session.zoom_percent(), 125);
    assert_eq!(req.scale, session.current_scale());
}

#[test]
fn test_step_up_from_drifted_percentage() {
    // A value between boundaries snaps to the next boundary, not boundary + step
    assert_eq!(step_up(110.0, 25.0, 500.0), 125.0);
    // Exactly on a boundary still advances a full step
    assert_eq!(step_up(100.0, 25.0, 500.0), 125.0);
    assert_eq!(step_down(125.0, 25.0, 50.0), 100.0);
    assert_eq!(step_down(115.0, 25.0, 50.0), 100.0);
}

#[test]
fn test_zoom_out_at_minimum_is_noop() {
    let mut session = ready_session(800.0);

    // 100 -> 75 -> 50
    let req = session.zoom_out(None);
    resolve(&mut session, req);
    let req = session.zoom_out(None);
    resolve(&mut session, req);
    assert_eq!(session.zoom_percent(), 50);

    // Already at the floor: no render issued
    assert!(session.zoom_out(None).is_none());
    assert_eq!(session.zoom_percent(), 50);
    assert!(!session.render_in_flight());
}

#[test]
fn test_zoom_in_at_maximum_is_noop() {
    let mut session = ready_session(800.0);

    for _ in 0..16 {
        let req = session.zoom_in(None);
        resolve(&mut session, req);
    }
    assert_eq!(session.zoom_percent(), 500);
    assert!(session.zoom_in(None).is_none());
}

#[test]
fn test_zoom_always_quantized_and_bounded() {
    let mut session = ready_session(800.0);

    // Arbitrary step sequence; every resulting level is a multiple of 25
    // inside [50, 500]
    let steps = [1, 1, -1, 1, 1, 1, -1, -1, -1, -1, -1, 1, -1, -1, -1, 1, 1];
    for step in steps {
        let req = if step > 0 {
            session.zoom_in(None)
        } else {
            session.zoom_out(None)
        };
        resolve(&mut session, req);

        let percent = session.zoom_percent();
        assert_eq!(percent % 25, 0, "zoom {}% not on a step", percent);
        assert!((50..=500).contains(&percent), "zoom {}% out of bounds", percent);
    }
}

#[test]
fn test_zoom_before_load_is_noop() {
    let mut session = ViewerSession::new(ViewerOptions::default());
    assert!(session.zoom_in(None).is_none());
    assert!(session.zoom_out(None).is_none());
}
