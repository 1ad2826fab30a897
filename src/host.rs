//! Collaborator traits for the host page.
//!
//! Helpers never own the document, the audio subsystem or the dialog widget.
//! They reach them only through these traits, which take `&self` because host
//! handles behave like shared references into a live page.

/// A live element handle.
pub trait Element {
    /// The element's identifier, if it has a non-empty one.
    fn id(&self) -> Option<String>;

    fn has_class(&self, class_name: &str) -> bool;

    fn add_class(&self, class_name: &str);

    fn remove_class(&self, class_name: &str);

    /// Current value of the native `disabled` attribute, or `None` when the
    /// element does not expose one.
    fn disabled(&self) -> Option<bool>;

    /// Writes the native `disabled` attribute. Returns `false` without
    /// touching anything when the element does not expose one.
    fn set_disabled(&self, disabled: bool) -> bool;
}

/// Identifier lookup against the host document. Must be read-only.
pub trait Document {
    type Element: Element + Clone;

    fn element_by_id(&self, id: &str) -> Option<Self::Element>;
}

/// Settlement of an asynchronous `play()` request. The error carries the
/// host's rejection message.
pub type PlaybackResult = std::result::Result<(), String>;

/// A playable audio resource. Once handed to the caller, pausing and
/// stopping are the caller's business.
pub trait Playable {
    fn set_loop(&self, looping: bool);

    fn looping(&self) -> bool;

    /// Assigns the volume. Callers clamp to `[0, 1]` first.
    fn set_volume(&self, volume: f64);

    fn volume(&self) -> f64;

    /// Seeks back to the start of the resource.
    fn rewind(&self);

    /// Starts playback. `on_settled` runs later, once the host has accepted
    /// or rejected the request; it must not be awaited.
    fn play(&self, on_settled: Box<dyn FnOnce(PlaybackResult)>);

    fn pause(&self);
}

pub trait AudioFactory {
    type Handle: Playable;

    fn create(&self, src: &str) -> Self::Handle;
}

/// The modal dialog used to surface caught errors.
pub trait ModalDialog {
    fn set_title(&self, title: &str);

    fn set_body_html(&self, html: &str);

    fn show_modal(&self);

    fn close(&self);
}
