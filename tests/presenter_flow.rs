//! End-to-end flows: Dock state, dispatch through an output channel, and the
//! Display state rebuilt from the dispatched location.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tempfile::tempdir;

use hymn_presenter::display::DisplaySession;
use hymn_presenter::output::{TerminalWindowHost, WindowError, WindowRegistry};
use hymn_presenter::options::{Align, FontSize, Theme, ViewMode};
use hymn_presenter::{
    DisplayRequest, DisplayState, DockApp, DockState, NamedWindow, OutputChannel,
    PresentationOptions, Song, WindowHost,
};

fn collection() -> Vec<Song> {
    serde_json::from_str(
        r#"[
            {"number": 1, "yoruba": ["Ogo ni fun Baba"], "english": ["Glory to the Father"]},
            {"number": "7", "status": "reserved"},
            {"number": 12, "yoruba": ["Oluwa l'Oluso", "Emi ki yio se alaini", "O mu mi dubule"],
             "english": ["The Lord is my shepherd", "I shall not want", "He makes me lie down",
                         "He leads me", "He restores my soul"]},
            {"number": 120, "yoruba": ["Jesu olugbala"], "english": ["Jesus saviour"]}
        ]"#,
    )
    .unwrap()
}

#[derive(Clone, Default)]
struct Recorder(Rc<RefCell<Vec<String>>>);

impl OutputChannel for Recorder {
    fn send(&mut self, request: &DisplayRequest) {
        self.0.borrow_mut().push(request.to_url("/display"));
    }
}

fn press(app: &mut DockApp, code: KeyCode) {
    app.handle_key_event(KeyEvent::new(code, KeyModifiers::NONE))
        .unwrap();
}

#[test]
fn filter_is_the_matching_subset_and_resets_selection() {
    let mut state = DockState::new(PresentationOptions::default());
    state.set_songs(collection());

    state.set_query("12");
    let first: Vec<i64> = state.filtered().filter_map(|song| song.number.value()).collect();
    assert_eq!(first, vec![12, 120]);

    state.move_selection(1);
    assert_eq!(state.selected_index(), 1);

    state.set_query("");
    assert_eq!(state.filtered_len(), 4);
    assert_eq!(state.selected_index(), 0);

    state.move_selection(2);
    state.set_query("12");
    let again: Vec<i64> = state.filtered().filter_map(|song| song.number.value()).collect();
    assert_eq!(again, first);
    assert_eq!(state.selected_index(), 0);

    state.set_query("SHEPHERD");
    let by_text: Vec<i64> = state.filtered().filter_map(|song| song.number.value()).collect();
    assert_eq!(by_text, vec![12]);
}

#[test]
fn uneven_languages_page_to_the_longer_side() {
    let songs = collection();
    let request = DisplayRequest::from_url("/display?number=12&slide=4");
    assert_eq!(songs[2].slide_count(), 5);
    match DisplayState::resolve(&request, &songs) {
        DisplayState::Ready { slide, .. } => {
            assert_eq!(slide.primary, "");
            assert_eq!(slide.secondary, "He restores my soul");
        }
        other => panic!("unexpected state {other:?}"),
    }
}

#[test]
fn dispatched_location_rebuilds_the_dock_state() {
    let recorder = Recorder::default();
    let options = PresentationOptions {
        theme: Theme::Dark,
        ..PresentationOptions::default()
    };
    let mut app = DockApp::new(options, Box::new(recorder.clone()));
    app.state_mut().set_songs(collection());
    app.state_mut().set_query("12");

    press(&mut app, KeyCode::Right);
    press(&mut app, KeyCode::Right);

    let sent = recorder.0.borrow();
    assert_eq!(sent.len(), 2);
    let url = sent.last().unwrap();
    assert!(url.starts_with("/display?number=12&theme=dark&view=both"));

    let request = DisplayRequest::from_url(url);
    assert_eq!(request.number, Some(12));
    assert_eq!(request.slide, 2);
    assert_eq!(request.options.theme, Theme::Dark);
    assert_eq!(request.options.view, ViewMode::Both);
    assert_eq!(request.options.font_size, FontSize::Medium);
    assert_eq!(request.options.align, Align::Center);
    assert_eq!(request.options.bg_image, "");

    let session = DisplaySession::with_songs(url, &collection());
    match session.state() {
        DisplayState::Ready { slide, .. } => assert_eq!(slide.secondary, "He makes me lie down"),
        other => panic!("unexpected state {other:?}"),
    }
}

#[test]
fn reserved_hymn_ignores_view_and_slide() {
    let songs = collection();
    for location in [
        "?number=7",
        "?number=7&view=secondary&slide=3",
        "?number=7&view=primary&slide=0&theme=light",
    ] {
        let session = DisplaySession::with_songs(location, &songs);
        assert_eq!(session.state(), &DisplayState::Reserved { number: 7 });
    }
}

#[test]
fn missing_number_never_leaves_loading() {
    let songs = collection();
    for location in ["", "?theme=dark", "?number=abc", "?number=0"] {
        let session = DisplaySession::with_songs(location, &songs);
        assert_eq!(session.state(), &DisplayState::Loading);
    }
}

/// A window table that tracks how many windows were ever created.
#[derive(Default)]
struct CountingHost {
    open: HashMap<String, String>,
    created: usize,
}

impl WindowHost for CountingHost {
    type Window = String;

    fn find(&mut self, name: &str) -> Option<String> {
        self.open.contains_key(name).then(|| name.to_string())
    }

    fn open(&mut self, name: &str, url: &str) -> Result<String, WindowError> {
        self.created += 1;
        self.open.insert(name.to_string(), url.to_string());
        Ok(name.to_string())
    }

    fn navigate(&mut self, window: &String, url: &str) -> Result<(), WindowError> {
        self.open.insert(window.clone(), url.to_string());
        Ok(())
    }
}

#[test]
fn repeated_dispatch_reuses_one_window_until_closed() {
    let mut channel = NamedWindow::new(CountingHost::default(), "hymns_display", "/display");
    let request = DisplayRequest {
        number: Some(1),
        ..DisplayRequest::default()
    };

    for slide in 0..4 {
        channel.send(&DisplayRequest {
            slide,
            ..request.clone()
        });
    }
    assert_eq!(channel.host().created, 1);
    assert!(channel.host().open["hymns_display"].ends_with("slide=3"));

    channel.host_mut().open.clear();
    channel.send(&request);
    channel.send(&request);
    assert_eq!(channel.host().created, 2);
}

#[test]
fn terminal_host_reuses_a_live_display_from_an_earlier_session() {
    let dir = tempdir().unwrap();
    let registry = WindowRegistry::new(dir.path());
    registry
        .write_location("hymns_display", "/display?number=1")
        .unwrap();
    registry.touch_heartbeat("hymns_display").unwrap();

    // A launcher that cannot exist: any attempt to open fails.
    let host = TerminalWindowHost::new(
        registry.clone(),
        vec!["/nonexistent/launcher".to_string()],
        "/nonexistent/hymn-presenter".into(),
    );
    let mut channel = NamedWindow::new(host, "hymns_display", "/display");
    channel.send(&DisplayRequest {
        number: Some(12),
        slide: 1,
        ..DisplayRequest::default()
    });

    let location = registry.read_location("hymns_display").unwrap().unwrap();
    assert_eq!(location.generation, 2);
    assert!(location.url.starts_with("/display?number=12"));
    assert!(location.url.ends_with("slide=1"));
}
