//! In-memory audio and dialog hosts.
//!
//! Playback settlement is queued rather than run inside `play()`, the way a
//! browser resolves the play promise on a later turn of the event loop. Call
//! [`MockAudioFactory::run_pending`] to deliver it.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::fmt;
use std::rc::{Rc, Weak};

use crate::host::{AudioFactory, ModalDialog, PlaybackResult, Playable};

/// How the mock host answers `play()`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PlaybackScript {
    #[default]
    Resolve,
    /// Reject with the given message, e.g. an autoplay policy block.
    Reject(String),
}

type Settlement = Box<dyn FnOnce()>;

#[derive(Default)]
struct FactoryState {
    script: PlaybackScript,
    created: Vec<MockAudio>,
    pending: VecDeque<Settlement>,
}

#[derive(Clone, Default)]
pub struct MockAudioFactory {
    state: Rc<RefCell<FactoryState>>,
}

impl MockAudioFactory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_script(script: PlaybackScript) -> Self {
        let factory = Self::new();
        factory.set_script(script);
        factory
    }

    /// Applies to `play()` calls made after this point.
    pub fn set_script(&self, script: PlaybackScript) {
        self.state.borrow_mut().script = script;
    }

    pub fn created(&self) -> Vec<MockAudio> {
        self.state.borrow().created.clone()
    }

    pub fn pending_count(&self) -> usize {
        self.state.borrow().pending.len()
    }

    /// Delivers queued settlements, including any queued while running.
    /// Returns how many ran.
    pub fn run_pending(&self) -> usize {
        let mut ran = 0;
        loop {
            let next = self.state.borrow_mut().pending.pop_front();
            let Some(settle) = next else {
                return ran;
            };
            settle();
            ran += 1;
        }
    }
}

impl fmt::Debug for MockAudioFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("MockAudioFactory")
            .field("script", &state.script)
            .field("created", &state.created.len())
            .field("pending", &state.pending.len())
            .finish()
    }
}

impl AudioFactory for MockAudioFactory {
    type Handle = MockAudio;

    fn create(&self, src: &str) -> MockAudio {
        let audio = MockAudio {
            state: Rc::new(RefCell::new(AudioState {
                src: src.to_string(),
                looping: false,
                volume: 1.0,
                current_time: 0.0,
                playing: false,
            })),
            factory: Rc::downgrade(&self.state),
        };
        self.state.borrow_mut().created.push(audio.clone());
        audio
    }
}

#[derive(Debug)]
struct AudioState {
    src: String,
    looping: bool,
    volume: f64,
    current_time: f64,
    playing: bool,
}

#[derive(Clone)]
pub struct MockAudio {
    state: Rc<RefCell<AudioState>>,
    factory: Weak<RefCell<FactoryState>>,
}

impl MockAudio {
    pub fn src(&self) -> String {
        self.state.borrow().src.clone()
    }

    pub fn is_playing(&self) -> bool {
        self.state.borrow().playing
    }

    pub fn current_time(&self) -> f64 {
        self.state.borrow().current_time
    }

    /// Moves the play head, as if part of the resource had already played.
    pub fn seek(&self, seconds: f64) {
        self.state.borrow_mut().current_time = seconds;
    }
}

impl fmt::Debug for MockAudio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.state.borrow(), f)
    }
}

impl Playable for MockAudio {
    fn set_loop(&self, looping: bool) {
        self.state.borrow_mut().looping = looping;
    }

    fn looping(&self) -> bool {
        self.state.borrow().looping
    }

    fn set_volume(&self, volume: f64) {
        self.state.borrow_mut().volume = volume;
    }

    fn volume(&self) -> f64 {
        self.state.borrow().volume
    }

    fn rewind(&self) {
        self.state.borrow_mut().current_time = 0.0;
    }

    fn play(&self, on_settled: Box<dyn FnOnce(PlaybackResult)>) {
        let Some(factory) = self.factory.upgrade() else {
            return;
        };
        let outcome = match &factory.borrow().script {
            PlaybackScript::Resolve => Ok(()),
            PlaybackScript::Reject(message) => Err(message.clone()),
        };
        let audio = Rc::clone(&self.state);
        factory.borrow_mut().pending.push_back(Box::new(move || {
            if outcome.is_ok() {
                audio.borrow_mut().playing = true;
            }
            on_settled(outcome);
        }));
    }

    fn pause(&self) {
        self.state.borrow_mut().playing = false;
    }
}

#[derive(Debug, Default)]
struct DialogState {
    title: String,
    body_html: String,
    open: bool,
    shown: usize,
}

/// A modal dialog that records what it was asked to display.
#[derive(Debug, Clone, Default)]
pub struct MockDialog {
    state: Rc<RefCell<DialogState>>,
}

impl MockDialog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(&self) -> String {
        self.state.borrow().title.clone()
    }

    pub fn body_html(&self) -> String {
        self.state.borrow().body_html.clone()
    }

    pub fn is_open(&self) -> bool {
        self.state.borrow().open
    }

    /// Number of times the dialog was shown.
    pub fn shown(&self) -> usize {
        self.state.borrow().shown
    }
}

impl ModalDialog for MockDialog {
    fn set_title(&self, title: &str) {
        self.state.borrow_mut().title = title.to_string();
    }

    fn set_body_html(&self, html: &str) {
        self.state.borrow_mut().body_html = html.to_string();
    }

    fn show_modal(&self) {
        let mut state = self.state.borrow_mut();
        state.open = true;
        state.shown += 1;
    }

    fn close(&self) {
        self.state.borrow_mut().open = false;
    }
}
