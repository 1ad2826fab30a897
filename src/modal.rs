//! Error reporting through a modal dialog.
//!
//! The dialog's title and body travel in a [`ModalContent`] value from the
//! reporting call site to [`open_modal`]; nothing is parked in shared state
//! between the two.

use crate::format::escape_html_text;
use crate::host::ModalDialog;
use crate::sink::DiagnosticSink;

const LABEL: &str = "report_error";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModalContent {
    pub title: String,
    /// Trusted HTML fragment for the dialog body.
    pub body_html: String,
}

impl ModalContent {
    pub fn new(title: impl Into<String>, body_html: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body_html: body_html.into(),
        }
    }

    /// Standard "something went wrong" content. `note` is escaped before it
    /// is embedded.
    pub fn error(note: &str) -> Self {
        Self::new(
            "Error",
            format!(
                "An error has occurred. Please try again<br>Error message:<br>\
                 <span class=\"error-message\">{}</span>",
                escape_html_text(note)
            ),
        )
    }
}

pub fn open_modal<M>(dialog: &M, content: &ModalContent)
where
    M: ModalDialog + ?Sized,
{
    dialog.set_title(&content.title);
    dialog.set_body_html(&content.body_html);
    dialog.show_modal();
}

/// Logs `note` on the error channel and shows it in `dialog`.
pub fn report_error<M, S>(dialog: &M, sink: &S, note: &str) -> ModalContent
where
    M: ModalDialog + ?Sized,
    S: DiagnosticSink + ?Sized,
{
    sink.error(LABEL, note.to_string());
    let content = ModalContent::error(note);
    open_modal(dialog, &content);
    content
}

/// Closes `dialog`, then lets the page restore its interface.
pub fn close_modal<M>(dialog: &M, reset: impl FnOnce())
where
    M: ModalDialog + ?Sized,
{
    dialog.close();
    reset();
}
