use folio_session::*;

#[test]
fn test_default_options_validate() {
    assert!(ViewerOptions::default().validate().is_ok());
}

#[test]
fn test_validation_rejects_bad_zoom_range() {
    let mut options = ViewerOptions::default();
    options.min_zoom_percent = 600.0;

    let result = options.validate();
    assert!(result.is_err());
    match result {
        Err(SessionError::Config(msg)) => {
            assert!(msg.contains("Zoom bounds"));
        }
        _ => panic!("Expected Config error"),
    }
}

#[test]
fn test_validation_rejects_zero_step() {
    let mut options = ViewerOptions::default();
    options.zoom_step_percent = 0.0;
    assert!(options.validate().is_err());

    options.zoom_step_percent = 25.0;
    options.wheel_step_threshold = 0.0;
    assert!(options.validate().is_err());

    options.wheel_step_threshold = 50.0;
    options.page_cache_size = 0;
    assert!(options.validate().is_err());
}

#[cfg(feature = "serde")]
#[tokio::test]
async fn test_save_and_load_options() {
    use tempfile::NamedTempFile;

    let mut options = ViewerOptions::default();
    options.max_zoom_percent = 400.0;
    options.wheel_step_threshold = 80.0;
    options.prefetch_adjacent = false;

    let temp_file = NamedTempFile::new().unwrap();
    let path = temp_file.path();

    options.save(path).await.unwrap();
    let loaded = ViewerOptions::load(path).await.unwrap();

    assert_eq!(loaded, options);
}

#[cfg(feature = "serde")]
#[tokio::test]
async fn test_load_rejects_invalid_config() {
    use tempfile::NamedTempFile;

    let temp_file = NamedTempFile::new().unwrap();
    tokio::fs::write(temp_file.path(), b"{not json}").await.unwrap();

    assert!(ViewerOptions::load(temp_file.path()).await.is_err());
}
