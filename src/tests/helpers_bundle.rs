use serde_json::json;

use super::*;

#[test]
fn one_bundle_drives_every_helper() {
    let dom = page();
    let log = TraceLog::new();
    let helpers = UiHelpers::new(dom.clone(), log.clone());

    assert!(helpers.set_visible("panel", false).is_applied());
    assert!(helpers.set_enabled("submit", false).is_applied());
    assert_eq!(helpers.set_visible("nope", true), ToggleOutcome::NotFound);

    let result = helpers.inspect("fetchByZip", &json!({ "city": "Paris" }));
    assert!(result.is_structured());

    let audio = helpers.play_sound(&MockAudioFactory::new(), "beep.mp3", false, 2.0);
    assert_eq!(audio.map(|audio| audio.volume()), Some(1.0));

    let dialog = MockDialog::new();
    helpers.report_error(&dialog, "oops");
    assert!(dialog.is_open());

    assert_eq!(
        log.messages(),
        vec![
            "set_visible: element 'panel' has been hidden",
            "set_enabled: element 'submit' has been disabled",
            "set_visible: element 'nope' not found (visibility)",
            r#"01: result from fetchByZip: {"city":"Paris"}"#,
            "report_error: oops",
        ]
    );
}

#[test]
fn config_pretty_print_flag_drives_inspect() -> Result<()> {
    let log = TraceLog::new();
    let config = HelperConfig::default().pretty_print(true);
    let helpers = UiHelpers::with_config(Dom::new(), log.clone(), config)?;

    helpers.inspect("fetch", r#"{"ok":true}"#);
    assert_eq!(log.len(), 2);

    helpers.inspect_with("fetch", r#"{"ok":true}"#, false);
    assert_eq!(log.len(), 3);
    Ok(())
}

#[test]
fn resolve_accepts_ids_and_held_elements() {
    let dom = page();
    let helpers = UiHelpers::new(dom.clone(), TraceLog::new());

    let Some(button) = helpers.resolve("submit") else {
        panic!("submit should resolve");
    };
    assert_eq!(button.tag_name(), "button");
    assert_eq!(helpers.resolve(&button), Some(button.clone()));
    assert_eq!(helpers.resolve("missing"), None);
    assert!(helpers.sink().is_empty());
}

#[test]
fn config_can_be_replaced() -> Result<()> {
    let dom = page();
    let mut helpers = UiHelpers::new(dom.clone(), TraceLog::new());
    helpers.set_config(HelperConfig::default().hidden_class("hidden"))?;

    helpers.set_visible(Target::from("panel"), false);
    assert!(
        helpers
            .document()
            .element_by_id("panel")
            .is_some_and(|panel| panel.has_class("hidden"))
    );
    assert_eq!(helpers.config().hidden_class, "hidden");
    Ok(())
}

#[test]
fn invalid_markers_are_rejected_before_any_toggle() {
    let config = HelperConfig::default().hidden_class("is hidden");
    let Err(err) = UiHelpers::with_config(page(), TraceLog::new(), config.clone()) else {
        panic!("a multi-token marker must be rejected");
    };
    assert_eq!(err.kind(), ErrorKind::Config);

    let mut helpers = UiHelpers::new(page(), TraceLog::new());
    assert!(helpers.set_config(config).is_err());
    assert!(helpers.set_config(HelperConfig::default().disabled_class("")).is_err());
    assert_eq!(helpers.config(), &HelperConfig::default());

    helpers.set_visible("panel", false);
    helpers.set_visible("panel", true);
    assert!(
        helpers
            .document()
            .element_by_id("panel")
            .is_some_and(|panel| panel.class_name() == "card")
    );
}

#[test]
fn recording_bundle_sizes_its_log_from_config() -> Result<()> {
    let config = HelperConfig::default().log_limit(2);
    let helpers = UiHelpers::recording(page(), config)?;

    helpers.set_visible("panel", false);
    helpers.set_enabled("submit", false);
    helpers.set_visible("link", false);

    assert_eq!(
        helpers.sink().messages(),
        vec![
            "set_enabled: element 'submit' has been disabled",
            "set_visible: element 'link' has been hidden",
        ]
    );
    assert!(UiHelpers::recording(page(), HelperConfig::default().log_limit(0)).is_err());
    Ok(())
}
