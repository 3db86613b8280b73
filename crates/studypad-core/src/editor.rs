//! Capability traits the editing core depends on.
//!
//! The reconciliation controller never touches presentation directly. The
//! host wraps its real editing widget and surrounding chrome in these traits
//! and forwards content-change notifications into the session itself, so the
//! core can be driven from tests without any rendering surface.

/// The opaque editable-document widget, seen only through its content.
pub trait EditorSurface: Send + Sync {
    /// Returns the widget's live content as serialized rich-document markup.
    fn content(&self) -> String;

    /// Replaces the widget's content wholesale.
    fn set_content(&self, html: &str);

    /// Inserts a reference to `url` at the widget's current cursor position.
    fn insert_image(&self, url: &str);
}

/// Presentation chrome around the editor: title, status line, toasts, and
/// the blocking leave-confirmation prompt.
pub trait EditorChrome: Send + Sync {
    fn set_title(&self, title: &str);

    fn set_save_status(&self, status: &str);

    fn toast(&self, message: &str);

    /// Asks the user whether to leave despite unsaved changes.
    ///
    /// Unlike the platform unload path this prompt can reliably wait for an
    /// answer before navigation proceeds. Returns true to leave anyway.
    fn confirm_discard(&self) -> bool;
}

/// Observer for session-wide authentication events.
pub trait AuthEvents: Send + Sync {
    /// The remote rejected our credentials; the stored token has been
    /// cleared and the user must be routed back to the login surface.
    fn session_expired(&self);
}
