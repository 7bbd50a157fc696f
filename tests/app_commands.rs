use eframe::Storage as _;
use flowchart_editor::{EdgeStyle, FlowchartApp, MemoryStorage, NodeId, Preferences};

#[test]
fn test_load_without_save_keeps_diagram() {
    let mut app = FlowchartApp::default();
    let before = app.controller().diagram().clone();

    app.load_from(&MemoryStorage::new());

    assert_eq!(app.notice().unwrap().message, "No saved flowchart found.");
    assert_eq!(app.controller().diagram(), &before);
}

#[test]
fn test_save_then_load_leaves_diagram_unchanged() {
    let mut app = FlowchartApp::default();
    let mut storage = MemoryStorage::new();

    app.save_to(&mut storage);
    assert_eq!(app.notice().unwrap().message, "Flowchart saved!");
    app.dismiss_notice();

    let before = app.controller().diagram().clone();
    app.load_from(&storage);

    assert_eq!(app.notice().unwrap().message, "Flowchart loaded!");
    assert_eq!(app.controller().diagram(), &before);
}

#[test]
fn test_corrupt_save_reports_error_and_keeps_diagram() {
    let mut app = FlowchartApp::default();
    let before = app.controller().diagram().clone();
    let mut storage = MemoryStorage::new();
    storage.set_string("flowchart", "not json".to_owned());

    app.load_from(&storage);

    let notice = app.notice().unwrap();
    assert_eq!(notice.title, "Error");
    assert!(notice.message.starts_with("Failed to load flowchart"));
    assert_eq!(app.controller().diagram(), &before);
}

#[test]
fn test_load_resets_canvas_state() {
    let mut app = FlowchartApp::default();
    let mut storage = MemoryStorage::new();
    app.save_to(&mut storage);

    app.load_from(&storage);
    assert!(app.canvas().selection().is_empty());
    assert!(!app.canvas().label_editor().is_editing());
}

#[test]
fn test_preferences_restore_controller_state() {
    let mut preferences = Preferences {
        dark_theme: true,
        edge_style: EdgeStyle::Step,
        ..Preferences::default()
    };
    preferences.config.storage_key = "custom".to_owned();

    let mut app = FlowchartApp::from_preferences(preferences.clone());
    assert!(app.controller().is_dark_theme());
    assert_eq!(app.controller().edge_style(), EdgeStyle::Step);
    assert_eq!(app.preferences(), preferences);

    let mut storage = MemoryStorage::new();
    app.save_to(&mut storage);
    assert!(storage.get_string("custom").is_some());
    assert!(storage.get_string("flowchart").is_none());
}

#[test]
fn test_preferences_tolerate_missing_fields() {
    let preferences: Preferences = serde_json::from_str(r#"{"dark_theme": true}"#).unwrap();
    assert!(preferences.dark_theme);
    assert_eq!(preferences.edge_style, EdgeStyle::Default);
    assert!(preferences.config.cascade_delete);
    assert_eq!(
        FlowchartApp::from_preferences(preferences).controller().next_node_seq(),
        NodeId::from_seq(3).seq()
    );
}
