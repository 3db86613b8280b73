//! The per-document editing session.
//!
//! `EditorSession` is the reconciliation state machine between the local
//! draft cache and the server copy of one document. It decides draft versus
//! server precedence on load, tracks dirty state, and governs when the
//! buffer is flushed to the server and cleared.
//!
//! The session assumes single-threaded cooperative scheduling: edits arrive
//! strictly in the order the editing surface emits them, and the only
//! suspension points are the backend calls. Racing flush attempts (manual
//! save versus flush-on-exit) share one code path with no mutual exclusion;
//! the last one to complete decides the dirty flag.

use std::sync::Arc;
use studypad_core::StudypadError;
use studypad_core::backend::NotesBackend;
use studypad_core::draft::DraftStore;
use studypad_core::editor::{EditorChrome, EditorSurface};

/// Upper bound for inline image uploads, enforced locally before any
/// network traffic.
pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

/// Coarse session state. The dirty flag is tracked separately: it is set by
/// the first local edit and reset only by a successful flush, independent
/// of whether the draft buffer is currently populated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Initial content not yet established.
    Loading,
    /// Editable; flushes may be triggered.
    Ready,
    /// A flush is in flight.
    Flushing,
}

/// One editing session for one document id.
pub struct EditorSession {
    doc_id: String,
    title: Option<String>,
    state: SessionState,
    dirty: bool,
    backend: Arc<dyn NotesBackend>,
    drafts: Arc<dyn DraftStore>,
    surface: Arc<dyn EditorSurface>,
    chrome: Arc<dyn EditorChrome>,
}

impl std::fmt::Debug for EditorSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EditorSession")
            .field("doc_id", &self.doc_id)
            .field("title", &self.title)
            .field("state", &self.state)
            .field("dirty", &self.dirty)
            .finish_non_exhaustive()
    }
}

impl EditorSession {
    /// Starts a session for `doc_id`.
    ///
    /// The id comes from navigation parameters and is immutable for the
    /// session's lifetime. A missing or empty id is unrecoverable:
    /// construction fails and no session exists.
    pub fn start(
        doc_id: Option<String>,
        backend: Arc<dyn NotesBackend>,
        drafts: Arc<dyn DraftStore>,
        surface: Arc<dyn EditorSurface>,
        chrome: Arc<dyn EditorChrome>,
    ) -> Result<Self, StudypadError> {
        let doc_id = doc_id
            .filter(|id| !id.is_empty())
            .ok_or(StudypadError::MissingDocumentId)?;
        Ok(Self {
            doc_id,
            title: None,
            state: SessionState::Loading,
            dirty: false,
            backend,
            drafts,
            surface,
            chrome,
        })
    }

    /// Establishes the initial editor content.
    ///
    /// A buffered draft takes precedence: it is adopted immediately and the
    /// server snapshot is fetched only for the title, never overwriting the
    /// draft. Without a draft the server content is adopted. A failed fetch
    /// is surfaced but does not block editing whatever content is already
    /// present; the session still becomes `Ready`.
    pub async fn load(&mut self) -> Result<(), StudypadError> {
        let draft = self.drafts.read(&self.doc_id);
        if let Some(notes) = &draft {
            self.surface.set_content(notes);
            self.chrome.set_save_status("Recovered unsaved draft");
            tracing::debug!(doc_id = %self.doc_id, "recovered local draft");
        }

        let result = match self.backend.fetch_document(&self.doc_id).await {
            Ok(snapshot) => {
                self.chrome.set_title(&snapshot.title);
                if draft.is_none() {
                    self.surface.set_content(&snapshot.notes);
                }
                self.title = Some(snapshot.title);
                self.chrome.set_save_status("Editor ready");
                Ok(())
            }
            Err(e) => {
                tracing::warn!(doc_id = %self.doc_id, error = %e, "initial fetch failed");
                self.chrome.toast("Could not load subtopic");
                Err(StudypadError::LoadFailed(e.to_string()))
            }
        };

        self.state = SessionState::Ready;
        result
    }

    /// Handles a content-change notification from the editing surface.
    ///
    /// Unconditional full-content overwrite of the draft buffer
    /// (last-edit-wins within the session) plus the dirty flag.
    pub fn note_edited(&mut self, html: &str) {
        self.drafts.write(&self.doc_id, html);
        self.dirty = true;
        self.chrome.set_save_status("Changes saved locally");
    }

    /// Flushes the pending buffer to the server.
    ///
    /// The payload is the draft entry when present, else the surface's live
    /// content (covers a save requested before any change notification has
    /// fired). On success the draft entry and the dirty flag are cleared
    /// together; on failure both are left untouched and the next save
    /// re-attempts with the same payload-selection rule. Never retries on
    /// its own.
    pub async fn save(&mut self) -> Result<(), StudypadError> {
        let payload = self
            .drafts
            .read(&self.doc_id)
            .unwrap_or_else(|| self.surface.content());

        self.state = SessionState::Flushing;
        let result = self.backend.update_notes(&self.doc_id, &payload).await;
        self.state = SessionState::Ready;

        match result {
            Ok(()) => {
                // Cleared as a pair: no observer may see one without the other.
                self.drafts.clear(&self.doc_id);
                self.dirty = false;
                self.chrome.set_save_status("Saved to server");
                self.chrome.toast("Notes saved to server");
                Ok(())
            }
            Err(e) => {
                tracing::warn!(doc_id = %self.doc_id, error = %e, "flush failed");
                self.chrome.set_save_status("Save failed");
                self.chrome.toast("Failed to save to server");
                Err(e)
            }
        }
    }

    /// Best-effort flush when the session is being torn down by the
    /// platform (page unload).
    ///
    /// There is no completion guarantee: the platform may proceed before
    /// the flush finishes, and losing that race is accepted because the
    /// draft buffer remains as a safety net on return.
    pub async fn flush_on_exit(&mut self) {
        if !self.dirty {
            return;
        }
        if let Err(e) = self.save().await {
            tracing::warn!(doc_id = %self.doc_id, error = %e, "best-effort exit flush failed");
        }
    }

    /// Explicit "back" navigation guard.
    ///
    /// Unlike the unload path this can reliably wait for the user: with
    /// unsaved changes a blocking confirmation decides whether navigation
    /// proceeds. Returns false when the user cancels.
    pub fn request_back(&self) -> bool {
        if self.dirty && !self.chrome.confirm_discard() {
            return false;
        }
        true
    }

    /// Uploads a picked image and inserts its locator at the cursor.
    ///
    /// Files over the size ceiling are rejected locally without contacting
    /// the server. Upload failures surface the server-provided message or
    /// a generic fallback.
    pub async fn attach_image(
        &self,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<(), StudypadError> {
        if bytes.len() > MAX_IMAGE_BYTES {
            self.chrome.toast("Image too large (max 5MB)");
            return Err(StudypadError::validation("Image too large (max 5MB)"));
        }

        match self.backend.upload_image(file_name, bytes).await {
            Ok(image) => {
                self.surface.insert_image(&image.url);
                self.chrome.toast("Image uploaded");
                Ok(())
            }
            Err(e) => {
                self.chrome.toast(&e.to_string());
                Err(e)
            }
        }
    }

    pub fn doc_id(&self) -> &str {
        &self.doc_id
    }

    /// Title from the server snapshot; never drafted or mutated locally.
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use studypad_core::draft::MemoryDraftStore;
    use studypad_core::model::{DocumentSnapshot, UploadedImage};

    struct FakeBackend {
        snapshot: Mutex<Result<DocumentSnapshot, StudypadError>>,
        update_result: Mutex<Result<(), StudypadError>>,
        updates: Mutex<Vec<(String, String)>>,
        image_result: Mutex<Result<UploadedImage, StudypadError>>,
        image_calls: AtomicUsize,
        /// When set, fetches echo back the most recently stored notes.
        echo_updates: bool,
    }

    impl FakeBackend {
        fn new() -> Self {
            Self {
                snapshot: Mutex::new(Ok(DocumentSnapshot {
                    title: "Thermal Model".into(),
                    notes: "<p>v1</p>".into(),
                })),
                update_result: Mutex::new(Ok(())),
                updates: Mutex::new(Vec::new()),
                image_result: Mutex::new(Ok(UploadedImage {
                    url: "https://cdn.example/img-1.png".into(),
                })),
                image_calls: AtomicUsize::new(0),
                echo_updates: false,
            }
        }

        fn failing_fetch() -> Self {
            let backend = Self::new();
            *backend.snapshot.lock().unwrap() =
                Err(StudypadError::api(500, "Internal Server Error"));
            backend
        }

        fn updates(&self) -> Vec<(String, String)> {
            self.updates.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl NotesBackend for FakeBackend {
        async fn fetch_document(
            &self,
            _doc_id: &str,
        ) -> Result<DocumentSnapshot, StudypadError> {
            if self.echo_updates {
                if let Some((_, notes)) = self.updates.lock().unwrap().last() {
                    return Ok(DocumentSnapshot {
                        title: "Thermal Model".into(),
                        notes: notes.clone(),
                    });
                }
            }
            self.snapshot.lock().unwrap().clone()
        }

        async fn update_notes(&self, doc_id: &str, notes: &str) -> Result<(), StudypadError> {
            let result = self.update_result.lock().unwrap().clone();
            if result.is_ok() {
                self.updates
                    .lock()
                    .unwrap()
                    .push((doc_id.to_string(), notes.to_string()));
            }
            result
        }

        async fn upload_image(
            &self,
            _file_name: &str,
            _bytes: Vec<u8>,
        ) -> Result<UploadedImage, StudypadError> {
            self.image_calls.fetch_add(1, Ordering::SeqCst);
            self.image_result.lock().unwrap().clone()
        }
    }

    #[derive(Default)]
    struct FakeSurface {
        content: Mutex<String>,
        images: Mutex<Vec<String>>,
    }

    impl EditorSurface for FakeSurface {
        fn content(&self) -> String {
            self.content.lock().unwrap().clone()
        }

        fn set_content(&self, html: &str) {
            *self.content.lock().unwrap() = html.to_string();
        }

        fn insert_image(&self, url: &str) {
            self.images.lock().unwrap().push(url.to_string());
            self.content
                .lock()
                .unwrap()
                .push_str(&format!("<img src=\"{url}\">"));
        }
    }

    struct FakeChrome {
        statuses: Mutex<Vec<String>>,
        toasts: Mutex<Vec<String>>,
        allow_discard: bool,
        confirm_calls: AtomicUsize,
    }

    impl FakeChrome {
        fn new() -> Self {
            Self {
                statuses: Mutex::new(Vec::new()),
                toasts: Mutex::new(Vec::new()),
                allow_discard: true,
                confirm_calls: AtomicUsize::new(0),
            }
        }

        fn refusing_discard() -> Self {
            Self {
                allow_discard: false,
                ..Self::new()
            }
        }

        fn statuses(&self) -> Vec<String> {
            self.statuses.lock().unwrap().clone()
        }

        fn toasts(&self) -> Vec<String> {
            self.toasts.lock().unwrap().clone()
        }
    }

    impl EditorChrome for FakeChrome {
        fn set_title(&self, _title: &str) {}

        fn set_save_status(&self, status: &str) {
            self.statuses.lock().unwrap().push(status.to_string());
        }

        fn toast(&self, message: &str) {
            self.toasts.lock().unwrap().push(message.to_string());
        }

        fn confirm_discard(&self) -> bool {
            self.confirm_calls.fetch_add(1, Ordering::SeqCst);
            self.allow_discard
        }
    }

    struct Harness {
        backend: Arc<FakeBackend>,
        drafts: Arc<MemoryDraftStore>,
        surface: Arc<FakeSurface>,
        chrome: Arc<FakeChrome>,
    }

    impl Harness {
        fn new(backend: FakeBackend, chrome: FakeChrome) -> Self {
            Self {
                backend: Arc::new(backend),
                drafts: Arc::new(MemoryDraftStore::new()),
                surface: Arc::new(FakeSurface::default()),
                chrome: Arc::new(chrome),
            }
        }

        fn session(&self, doc_id: &str) -> EditorSession {
            EditorSession::start(
                Some(doc_id.to_string()),
                self.backend.clone(),
                self.drafts.clone(),
                self.surface.clone(),
                self.chrome.clone(),
            )
            .unwrap()
        }
    }

    #[test]
    fn missing_doc_id_is_unrecoverable() {
        let h = Harness::new(FakeBackend::new(), FakeChrome::new());
        let err = EditorSession::start(
            None,
            h.backend.clone(),
            h.drafts.clone(),
            h.surface.clone(),
            h.chrome.clone(),
        )
        .unwrap_err();
        assert!(matches!(err, StudypadError::MissingDocumentId));

        let err = EditorSession::start(
            Some(String::new()),
            h.backend,
            h.drafts,
            h.surface,
            h.chrome,
        )
        .unwrap_err();
        assert!(matches!(err, StudypadError::MissingDocumentId));
    }

    #[tokio::test]
    async fn load_without_draft_adopts_server_content() {
        let h = Harness::new(FakeBackend::new(), FakeChrome::new());
        let mut session = h.session("42");

        session.load().await.unwrap();

        assert_eq!(h.surface.content(), "<p>v1</p>");
        assert_eq!(session.title(), Some("Thermal Model"));
        assert_eq!(session.state(), SessionState::Ready);
        assert!(!session.is_dirty());
    }

    #[tokio::test]
    async fn load_with_draft_keeps_draft_over_server_content() {
        let h = Harness::new(FakeBackend::new(), FakeChrome::new());
        h.drafts.write("42", "<p>unsaved local work</p>");
        let mut session = h.session("42");

        session.load().await.unwrap();

        // Server content ignored for the body, used only for the title.
        assert_eq!(h.surface.content(), "<p>unsaved local work</p>");
        assert_eq!(session.title(), Some("Thermal Model"));
        assert!(
            h.chrome
                .statuses()
                .contains(&"Recovered unsaved draft".to_string())
        );
        // Recovery alone does not mark the session dirty.
        assert!(!session.is_dirty());
    }

    #[tokio::test]
    async fn load_failure_leaves_session_editable() {
        let h = Harness::new(FakeBackend::failing_fetch(), FakeChrome::new());
        h.drafts.write("42", "<p>draft</p>");
        let mut session = h.session("42");

        let err = session.load().await.unwrap_err();
        assert!(err.is_load_failed());
        assert_eq!(session.state(), SessionState::Ready);
        assert_eq!(h.surface.content(), "<p>draft</p>");
        assert!(
            h.chrome
                .toasts()
                .contains(&"Could not load subtopic".to_string())
        );

        // Editing continues on whatever content is present.
        session.note_edited("<p>draft continued</p>");
        assert!(session.is_dirty());
    }

    #[tokio::test]
    async fn images_still_attach_after_a_failed_load() {
        let h = Harness::new(FakeBackend::failing_fetch(), FakeChrome::new());
        h.drafts.write("42", "<p>draft</p>");
        let mut session = h.session("42");
        let _ = session.load().await;

        // The draft is the baseline, so attaching stays safe.
        session
            .attach_image("fig.png", vec![0u8; 1024])
            .await
            .unwrap();

        assert_eq!(h.backend.image_calls.load(Ordering::SeqCst), 1);
        assert_eq!(
            *h.surface.images.lock().unwrap(),
            vec!["https://cdn.example/img-1.png".to_string()]
        );
        assert_eq!(
            h.surface.content(),
            "<p>draft</p><img src=\"https://cdn.example/img-1.png\">"
        );
    }

    #[tokio::test]
    async fn every_edit_overwrites_the_draft_entry() {
        let h = Harness::new(FakeBackend::new(), FakeChrome::new());
        let mut session = h.session("42");
        session.load().await.unwrap();

        for edit in ["<p>e1</p>", "<p>e2</p>", "<p>e3</p>"] {
            session.note_edited(edit);
            assert_eq!(h.drafts.read("42"), Some(edit.to_string()));
        }
        assert!(session.is_dirty());
    }

    #[tokio::test]
    async fn successful_flush_clears_draft_and_dirty_flag() {
        let h = Harness::new(FakeBackend::new(), FakeChrome::new());
        let mut session = h.session("42");
        session.load().await.unwrap();

        session.note_edited("<p>v1 revised</p>");
        session.save().await.unwrap();

        assert_eq!(
            h.backend.updates(),
            vec![("42".to_string(), "<p>v1 revised</p>".to_string())]
        );
        assert!(h.drafts.read("42").is_none());
        assert!(!session.is_dirty());
        assert_eq!(session.state(), SessionState::Ready);
        assert!(
            h.chrome
                .statuses()
                .contains(&"Saved to server".to_string())
        );
    }

    #[tokio::test]
    async fn failed_flush_leaves_draft_and_dirty_flag_untouched() {
        let backend = FakeBackend::new();
        *backend.update_result.lock().unwrap() =
            Err(StudypadError::transport("connection reset"));
        let h = Harness::new(backend, FakeChrome::new());
        let mut session = h.session("42");
        session.load().await.unwrap();

        session.note_edited("<p>keep me</p>");
        let err = session.save().await.unwrap_err();
        assert!(err.is_transport());

        assert_eq!(h.drafts.read("42"), Some("<p>keep me</p>".to_string()));
        assert!(session.is_dirty());
        assert!(h.chrome.statuses().contains(&"Save failed".to_string()));

        // A later save re-attempts with the same payload-selection rule.
        *h.backend.update_result.lock().unwrap() = Ok(());
        session.save().await.unwrap();
        assert!(h.drafts.read("42").is_none());
        assert!(!session.is_dirty());
    }

    #[tokio::test]
    async fn flush_without_draft_uses_live_surface_content() {
        let h = Harness::new(FakeBackend::new(), FakeChrome::new());
        let mut session = h.session("42");
        session.load().await.unwrap();

        // Content diverged without a change notification ever firing.
        h.surface.set_content("<p>typed before any event</p>");
        session.save().await.unwrap();

        assert_eq!(
            h.backend.updates(),
            vec![(
                "42".to_string(),
                "<p>typed before any event</p>".to_string()
            )]
        );
    }

    #[tokio::test]
    async fn saved_content_round_trips_through_a_new_session() {
        let backend = FakeBackend {
            echo_updates: true,
            ..FakeBackend::new()
        };
        let h = Harness::new(backend, FakeChrome::new());

        let mut first = h.session("42");
        first.load().await.unwrap();
        first.note_edited("<p>final form</p>");
        first.save().await.unwrap();

        let mut second = h.session("42");
        second.load().await.unwrap();
        assert_eq!(h.surface.content(), "<p>final form</p>");
        assert!(!second.is_dirty());
    }

    #[tokio::test]
    async fn edit_save_scenario_for_document_42() {
        // No draft; server returns title "Thermal Model" and notes <p>v1</p>.
        let h = Harness::new(FakeBackend::new(), FakeChrome::new());
        let mut session = h.session("42");
        session.load().await.unwrap();
        assert_eq!(h.surface.content(), "<p>v1</p>");

        session.note_edited("<p>v1 revised</p>");
        assert_eq!(h.drafts.read("42"), Some("<p>v1 revised</p>".to_string()));

        session.save().await.unwrap();
        assert!(h.drafts.read("42").is_none());
        assert!(!session.is_dirty());
    }

    #[tokio::test]
    async fn oversized_image_is_rejected_before_any_network_call() {
        let h = Harness::new(FakeBackend::new(), FakeChrome::new());
        let mut session = h.session("42");
        session.load().await.unwrap();

        let err = session
            .attach_image("big.png", vec![0u8; 6 * 1024 * 1024])
            .await
            .unwrap_err();
        assert!(err.is_validation());
        assert_eq!(h.backend.image_calls.load(Ordering::SeqCst), 0);
        assert!(h.surface.images.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn accepted_image_upload_inserts_the_locator() {
        let h = Harness::new(FakeBackend::new(), FakeChrome::new());
        let mut session = h.session("42");
        session.load().await.unwrap();

        session
            .attach_image("small.png", vec![0u8; 2 * 1024 * 1024])
            .await
            .unwrap();

        assert_eq!(h.backend.image_calls.load(Ordering::SeqCst), 1);
        assert_eq!(
            *h.surface.images.lock().unwrap(),
            vec!["https://cdn.example/img-1.png".to_string()]
        );
    }

    #[tokio::test]
    async fn failed_image_upload_surfaces_the_server_message() {
        let backend = FakeBackend::new();
        *backend.image_result.lock().unwrap() =
            Err(StudypadError::validation("Unsupported image format"));
        let h = Harness::new(backend, FakeChrome::new());
        let mut session = h.session("42");
        session.load().await.unwrap();

        let err = session
            .attach_image("weird.tiff", vec![0u8; 64])
            .await
            .unwrap_err();
        assert!(err.is_validation());
        assert!(
            h.chrome
                .toasts()
                .contains(&"Unsupported image format".to_string())
        );
        assert!(h.surface.images.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn back_navigation_blocks_on_declined_confirmation() {
        let h = Harness::new(FakeBackend::new(), FakeChrome::refusing_discard());
        let mut session = h.session("42");
        session.load().await.unwrap();

        // Clean session leaves without asking.
        assert!(session.request_back());
        assert_eq!(h.chrome.confirm_calls.load(Ordering::SeqCst), 0);

        session.note_edited("<p>dirty</p>");
        assert!(!session.request_back());
        assert_eq!(h.chrome.confirm_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn exit_flush_is_best_effort() {
        // Failure is swallowed: the unload path has no completion guarantee
        // and must not be asserted to always succeed. The draft stays put
        // as the safety net for the next session.
        let backend = FakeBackend::new();
        *backend.update_result.lock().unwrap() = Err(StudypadError::transport("gone"));
        let h = Harness::new(backend, FakeChrome::new());
        let mut session = h.session("42");
        session.load().await.unwrap();

        session.note_edited("<p>almost lost</p>");
        session.flush_on_exit().await;
        assert_eq!(h.drafts.read("42"), Some("<p>almost lost</p>".to_string()));
        assert!(session.is_dirty());
    }

    #[tokio::test]
    async fn exit_flush_skips_clean_sessions() {
        let h = Harness::new(FakeBackend::new(), FakeChrome::new());
        let mut session = h.session("42");
        session.load().await.unwrap();

        session.flush_on_exit().await;
        assert!(h.backend.updates().is_empty());
    }

    #[tokio::test]
    async fn exit_flush_pushes_dirty_work() {
        let h = Harness::new(FakeBackend::new(), FakeChrome::new());
        let mut session = h.session("42");
        session.load().await.unwrap();

        session.note_edited("<p>leaving now</p>");
        session.flush_on_exit().await;

        assert_eq!(
            h.backend.updates(),
            vec![("42".to_string(), "<p>leaving now</p>".to_string())]
        );
        assert!(!session.is_dirty());
    }
}
