//! One object bundling a page's document, diagnostic sink and config, so
//! every page shares the same helpers instead of carrying its own copies.

use std::fmt::Debug;

use serde::Serialize;

use crate::Result;
use crate::config::HelperConfig;
use crate::host::{AudioFactory, Document, ModalDialog};
use crate::inspect::{Inspection, inspect};
use crate::modal::{ModalContent, report_error};
use crate::resolve::{Target, resolve};
use crate::sink::{DiagnosticSink, TraceLog};
use crate::sound::play_sound;
use crate::toggle::{ToggleKind, ToggleOutcome, set_state};

#[derive(Debug, Clone)]
pub struct UiHelpers<D, S> {
    document: D,
    sink: S,
    config: HelperConfig,
}

impl<D, S> UiHelpers<D, S>
where
    D: Document,
    S: DiagnosticSink,
{
    pub fn new(document: D, sink: S) -> Self {
        Self {
            document,
            sink,
            config: HelperConfig::default(),
        }
    }

    /// Fails with [`Error::InvalidConfig`](crate::Error::InvalidConfig) when
    /// `config` does not pass [`HelperConfig::validate`].
    pub fn with_config(document: D, sink: S, config: HelperConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            document,
            sink,
            config,
        })
    }

    pub fn document(&self) -> &D {
        &self.document
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn config(&self) -> &HelperConfig {
        &self.config
    }

    /// Replaces the config; an invalid one is rejected and the current one
    /// kept.
    pub fn set_config(&mut self, config: HelperConfig) -> Result<()> {
        config.validate()?;
        self.config = config;
        Ok(())
    }

    pub fn resolve(&self, target: impl Into<Target<D::Element>>) -> Option<D::Element> {
        resolve(&self.document, &target.into())
    }

    pub fn set_state(
        &self,
        target: impl Into<Target<D::Element>>,
        kind: ToggleKind,
        desired: bool,
    ) -> ToggleOutcome {
        set_state(
            &self.document,
            &self.sink,
            &self.config,
            &target.into(),
            kind,
            desired,
        )
    }

    pub fn set_visible(
        &self,
        target: impl Into<Target<D::Element>>,
        visible: bool,
    ) -> ToggleOutcome {
        self.set_state(target, ToggleKind::Visibility, visible)
    }

    pub fn set_enabled(
        &self,
        target: impl Into<Target<D::Element>>,
        enabled: bool,
    ) -> ToggleOutcome {
        self.set_state(target, ToggleKind::Enablement, enabled)
    }

    /// Inspects `value` using the configured `pretty_print` flag.
    pub fn inspect<T>(&self, label: &str, value: &T) -> Inspection
    where
        T: Serialize + Debug + ?Sized,
    {
        inspect(&self.sink, label, value, self.config.pretty_print)
    }

    pub fn inspect_with<T>(&self, label: &str, value: &T, pretty_print: bool) -> Inspection
    where
        T: Serialize + Debug + ?Sized,
    {
        inspect(&self.sink, label, value, pretty_print)
    }

    pub fn report_error<M>(&self, dialog: &M, note: &str) -> ModalContent
    where
        M: ModalDialog + ?Sized,
    {
        report_error(dialog, &self.sink, note)
    }
}

impl<D: Document> UiHelpers<D, TraceLog> {
    /// Bundles `document` with a fresh [`TraceLog`] sized by
    /// `config.log_limit`.
    pub fn recording(document: D, config: HelperConfig) -> Result<Self> {
        let sink = TraceLog::from_config(&config)?;
        Self::with_config(document, sink, config)
    }
}

impl<D, S> UiHelpers<D, S>
where
    D: Document,
    S: DiagnosticSink + Clone + 'static,
{
    pub fn play_sound<F>(
        &self,
        factory: &F,
        src: &str,
        looping: bool,
        volume: f64,
    ) -> Option<F::Handle>
    where
        F: AudioFactory + ?Sized,
    {
        play_sound(factory, &self.sink, src, looping, volume)
    }
}
