use std::cell::{Cell, RefCell};
use std::rc::Rc;

use url::Url;

use marimo_embed_core::editor_url::build_editor_url;
use marimo_embed_core::proxy::probe_editor_service;

use crate::host::{ConnectionSettings, DocumentContext, EditorFrame};

pub(crate) const SERVICE_UNREACHABLE_HELP: &str = "\
The marimo editor service is not responding. Please check that:\n\
  - the marimo package is installed in the server environment\n\
  - the marimo proxy package is installed alongside it\n\
  - the server was restarted after installing both packages";

pub(crate) const LOAD_FAILED_HELP: &str = "\
The marimo editor failed to load. Things to check:\n\
  - the notebook's file path is valid\n\
  - the marimo proxy is running at the configured server URL\n\
  - the web view's developer console, for further details";

/// Lifecycle state of an embedded editor view.
///
/// Transitions only move forward (`Initializing` → `Loading` → `Displayed`
/// → `Failed`), except that a later failure may overwrite an earlier one's
/// message. Once `Failed`, a view never returns to `Displayed`; recovery
/// is closing and reopening the document, which builds a fresh view.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewState {
    Initializing,
    Loading { url: Url },
    Displayed { url: Url },
    Failed { message: String },
}

impl ViewState {
    fn rank(&self) -> u8 {
        match self {
            ViewState::Initializing => 0,
            ViewState::Loading { .. } => 1,
            ViewState::Displayed { .. } => 2,
            ViewState::Failed { .. } => 3,
        }
    }
}

/// What the document window shows for the current state: the embedded
/// frame or a diagnostic message, never both.
#[derive(Debug, Clone, PartialEq)]
pub enum Surface {
    Frame { url: Option<Url> },
    Diagnostic { message: String },
}

/// Minimal lifecycle interface the host drives on a document window's
/// content.
pub trait ViewLifecycle {
    /// Called when the content is attached to its window. The embedded
    /// editor has no attach work of its own; the default no-op is the
    /// intended implementation.
    fn on_attach(&self) {}
    /// Called when the content is detached; same contract as `on_attach`.
    fn on_detach(&self) {}
    /// Called when the window resizes. The frame tracks its container, so
    /// the default no-op is the intended implementation here too.
    fn on_resize(&self, _width: i32, _height: i32) {}
    /// Release the content's resources. Idempotent.
    fn dispose(&self);
}

/// Drives one document's embedded marimo editor: probe the proxy, build
/// the editor URL, load it into the frame, and fall back to a diagnostic
/// surface when anything goes wrong.
///
/// Single-threaded: state lives in `Rc`/`RefCell`/`Cell` and all
/// async steps are suspension points on the host's event loop, so
/// `initialize` must run on a local (non-`Send`) executor. Each view
/// exclusively owns its frame and its connection-settings snapshot.
pub struct EmbeddedEditorView {
    context: Rc<DocumentContext>,
    frame: Rc<dyn EditorFrame>,
    settings: Rc<dyn ConnectionSettings>,
    state: RefCell<ViewState>,
    disposed: Cell<bool>,
}

impl EmbeddedEditorView {
    pub fn new(
        context: Rc<DocumentContext>,
        frame: Rc<dyn EditorFrame>,
        settings: Rc<dyn ConnectionSettings>,
    ) -> Self {
        EmbeddedEditorView {
            context,
            frame,
            settings,
            state: RefCell::new(ViewState::Initializing),
            disposed: Cell::new(false),
        }
    }

    pub fn context(&self) -> &DocumentContext {
        &self.context
    }

    pub fn state(&self) -> ViewState {
        self.state.borrow().clone()
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed.get()
    }

    /// The single surface visible for the current state.
    pub fn surface(&self) -> Surface {
        match &*self.state.borrow() {
            ViewState::Initializing => Surface::Frame { url: None },
            ViewState::Loading { url } | ViewState::Displayed { url } => Surface::Frame {
                url: Some(url.clone()),
            },
            ViewState::Failed { message } => Surface::Diagnostic {
                message: message.clone(),
            },
        }
    }

    /// Read the connection settings, probe the editor service, build the
    /// notebook's editor URL, and point the frame at it. The probe always
    /// completes before URL construction and frame load begin.
    ///
    /// Every failure degrades to the `Failed` state; nothing propagates to
    /// the host's window lifecycle.
    pub async fn initialize(&self) {
        let connection = match self.settings.server_connection() {
            Ok(connection) => connection,
            Err(e) => {
                self.fail(format!(
                    "Failed to read server connection settings: {}",
                    e
                ));
                return;
            }
        };

        if !probe_editor_service(&connection.base_url).await {
            self.fail(SERVICE_UNREACHABLE_HELP.to_string());
            return;
        }

        let url = match build_editor_url(&connection.base_url, &self.context.path) {
            Ok(url) => url,
            Err(e) => {
                self.fail(format!("{}\n\n{}", LOAD_FAILED_HELP, e));
                return;
            }
        };

        if self.disposed.get() {
            return;
        }
        if self.transition(ViewState::Loading { url: url.clone() }) {
            self.frame.navigate(&url);
        }
    }

    /// Host signal: the frame finished loading its document.
    pub fn frame_load_finished(&self) {
        if self.disposed.get() {
            return;
        }
        let url = match &*self.state.borrow() {
            ViewState::Loading { url } => url.clone(),
            _ => return,
        };
        self.transition(ViewState::Displayed { url });
    }

    /// Host signal: the frame reported a load-level error.
    pub fn frame_load_failed(&self, error: &str) {
        if self.disposed.get() {
            return;
        }
        self.fail(format!("{}\n\nLoad error: {}", LOAD_FAILED_HELP, error));
    }

    fn fail(&self, message: String) {
        log::warn!(
            "Embedded editor for {} failed: {}",
            self.context.local_path,
            message
        );
        self.transition(ViewState::Failed { message });
    }

    /// Apply `next` if the state machine allows it. Transitions only move
    /// forward; the one exception is `Failed` → `Failed`, where a later
    /// failure overwrites the earlier message.
    fn transition(&self, next: ViewState) -> bool {
        let mut state = self.state.borrow_mut();
        let failed_overwrite = matches!(
            (&*state, &next),
            (ViewState::Failed { .. }, ViewState::Failed { .. })
        );
        if next.rank() > state.rank() || failed_overwrite {
            *state = next;
            true
        } else {
            false
        }
    }
}

impl ViewLifecycle for EmbeddedEditorView {
    fn dispose(&self) {
        if self.disposed.replace(true) {
            return;
        }
        // Clearing the target stops any in-flight load and releases the
        // embedded surface's resources.
        self.frame.clear();
    }
}
