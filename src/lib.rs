//! Small UI helpers for student-built interactive pages.
//!
//! The crate covers four jobs the pages keep repeating:
//!
//! - showing and hiding elements, enabling and disabling controls
//!   ([`set_state`], [`set_visible`], [`set_enabled`]),
//! - logging fetch results in raw and classified form ([`inspect`]),
//! - starting audio cues without blocking ([`play_sound`]),
//! - reporting caught errors in a modal dialog ([`report_error`]).
//!
//! The host page is reached only through the traits in [`host`]. The [`dom`]
//! and [`mock`] modules provide in-memory hosts so everything runs headless.
//! Nothing here returns an error to the caller: failures become diagnostic
//! lines on a [`DiagnosticSink`] plus a well-defined fallback value.

use thiserror::Error;

pub mod config;
pub mod dom;
mod format;
pub mod helpers;
pub mod host;
pub mod inspect;
pub mod logging;
pub mod mock;
pub mod modal;
pub mod resolve;
pub mod sink;
pub mod sound;
pub mod toggle;

pub use config::HelperConfig;
pub use dom::{Dom, DomElement};
pub use helpers::UiHelpers;
pub use host::{AudioFactory, Document, Element, ModalDialog, PlaybackResult, Playable};
#[allow(deprecated)]
pub use inspect::display_result;
pub use inspect::{Inspection, inspect};
pub use logging::{LogConfig, LogFormat, init_logging};
pub use mock::{MockAudio, MockAudioFactory, MockDialog, PlaybackScript};
pub use modal::{ModalContent, close_modal, open_modal, report_error};
pub use resolve::{Target, resolve};
pub use sink::{DiagnosticLine, DiagnosticSink, Severity, TraceLog, TracingSink};
pub use sound::{clamp_volume, play_sound};
pub use toggle::{ToggleKind, ToggleOutcome, set_enabled, set_state, set_visible};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("element '{target}' not found ({kind})")]
    TargetNotFound { target: String, kind: ToggleKind },
    #[error("failed to play \"{src}\": {message}")]
    ResourceUnavailable { src: String, message: String },
    #[error("no audio source provided")]
    MissingSource,
    #[error("invalid config: {0}")]
    InvalidConfig(String),
}

/// Coarse failure taxonomy, one entry per way a helper can degrade.
///
/// Decode and format failures only show up through
/// [`Inspection::failure`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    TargetNotFound,
    DecodeFailure,
    FormatFailure,
    ResourceUnavailable,
    Config,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::TargetNotFound { .. } => ErrorKind::TargetNotFound,
            Self::ResourceUnavailable { .. } | Self::MissingSource => {
                ErrorKind::ResourceUnavailable
            }
            Self::InvalidConfig(_) => ErrorKind::Config,
        }
    }
}
