//! Idempotent visibility and enablement toggles.

use std::fmt;

use crate::config::{
    DEFAULT_DISABLED_CLASS, DEFAULT_HIDDEN_CLASS, HelperConfig, is_single_class,
};
use crate::host::{Document, Element};
use crate::resolve::{Target, element_label, resolve};
use crate::sink::DiagnosticSink;
use crate::{Error, ErrorKind};

/// The binary UI-state axis a toggle acts on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToggleKind {
    /// Shown or hidden, carried by the hidden-class marker.
    Visibility,
    /// Enabled or disabled, carried by the disabled-class marker and, when
    /// the element has one, the native `disabled` attribute.
    Enablement,
}

impl ToggleKind {
    /// Human-readable state for `desired`.
    pub fn state_name(self, desired: bool) -> &'static str {
        match (self, desired) {
            (Self::Visibility, true) => "shown",
            (Self::Visibility, false) => "hidden",
            (Self::Enablement, true) => "enabled",
            (Self::Enablement, false) => "disabled",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Visibility => "set_visible",
            Self::Enablement => "set_enabled",
        }
    }

    /// The configured marker, or the default one when the configured value
    /// is not a single class token and could never be removed again.
    fn marker(self, config: &HelperConfig) -> &str {
        let (configured, fallback) = match self {
            Self::Visibility => (config.hidden_class.as_str(), DEFAULT_HIDDEN_CLASS),
            Self::Enablement => (config.disabled_class.as_str(), DEFAULT_DISABLED_CLASS),
        };
        if is_single_class(configured) {
            configured
        } else {
            fallback
        }
    }
}

impl fmt::Display for ToggleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Visibility => f.write_str("visibility"),
            Self::Enablement => f.write_str("enablement"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToggleOutcome {
    Applied,
    NotFound,
}

impl ToggleOutcome {
    pub fn is_applied(self) -> bool {
        self == Self::Applied
    }

    pub fn failure(self) -> Option<ErrorKind> {
        match self {
            Self::Applied => None,
            Self::NotFound => Some(ErrorKind::TargetNotFound),
        }
    }
}

/// Puts `target` into the `desired` state along `kind`.
///
/// An unresolved target logs a warning and changes nothing. A resolved one is
/// always written and always logged, even when it already was in the desired
/// state.
pub fn set_state<D, S>(
    document: &D,
    sink: &S,
    config: &HelperConfig,
    target: &Target<D::Element>,
    kind: ToggleKind,
    desired: bool,
) -> ToggleOutcome
where
    D: Document + ?Sized,
    S: DiagnosticSink + ?Sized,
{
    let Some(element) = resolve(document, target) else {
        let err = Error::TargetNotFound {
            target: target.describe(),
            kind,
        };
        sink.warn(kind.label(), err.to_string());
        return ToggleOutcome::NotFound;
    };

    apply(&element, config, kind, desired);
    sink.info(
        kind.label(),
        format!(
            "element '{}' has been {}",
            element_label(&element),
            kind.state_name(desired)
        ),
    );
    ToggleOutcome::Applied
}

fn apply<E>(element: &E, config: &HelperConfig, kind: ToggleKind, desired: bool)
where
    E: Element + ?Sized,
{
    let marker = kind.marker(config);
    // Markers flag the off state: present iff `desired` is false.
    if desired {
        element.remove_class(marker);
    } else {
        element.add_class(marker);
    }
    if kind == ToggleKind::Enablement {
        element.set_disabled(!desired);
    }
}

/// Shows (`true`) or hides (`false`) `target`.
pub fn set_visible<D, S>(
    document: &D,
    sink: &S,
    config: &HelperConfig,
    target: &Target<D::Element>,
    visible: bool,
) -> ToggleOutcome
where
    D: Document + ?Sized,
    S: DiagnosticSink + ?Sized,
{
    set_state(document, sink, config, target, ToggleKind::Visibility, visible)
}

/// Enables (`true`) or disables (`false`) `target`.
pub fn set_enabled<D, S>(
    document: &D,
    sink: &S,
    config: &HelperConfig,
    target: &Target<D::Element>,
    enabled: bool,
) -> ToggleOutcome
where
    D: Document + ?Sized,
    S: DiagnosticSink + ?Sized,
{
    set_state(document, sink, config, target, ToggleKind::Enablement, enabled)
}
