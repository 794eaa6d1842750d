use std::path::Path;
use std::rc::Rc;

use uuid::Uuid;

use marimo_embed_core::filetype::MARIMO_FILE_TYPE;

use crate::host::{ConnectionSettings, DocumentContext, DocumentViewFactory, FrameFactory};
use crate::view::EmbeddedEditorView;

/// Name the view factory registers under; the open command addresses the
/// factory through the host's document manager by this name.
pub const FACTORY_NAME: &str = "Marimo Editor";

/// The host's generic document window: a document handle paired with a
/// content view, tagged with the marimo icon so the window is
/// distinguishable from plain text views.
pub struct DocumentWindow {
    pub id: Uuid,
    pub title: String,
    pub icon: &'static str,
    pub view: Rc<EmbeddedEditorView>,
}

/// Produces one `DocumentWindow` per open request.
///
/// Pure construction: every call builds a fresh frame and a fresh view;
/// nothing is cached or reused across calls. The host drives the returned
/// view's `initialize` once the window is attached.
pub struct EditorViewFactory {
    frames: Rc<dyn FrameFactory>,
    settings: Rc<dyn ConnectionSettings>,
}

impl EditorViewFactory {
    pub fn new(frames: Rc<dyn FrameFactory>, settings: Rc<dyn ConnectionSettings>) -> Self {
        EditorViewFactory { frames, settings }
    }
}

impl DocumentViewFactory for EditorViewFactory {
    fn factory_name(&self) -> &'static str {
        FACTORY_NAME
    }

    fn file_type(&self) -> &'static str {
        MARIMO_FILE_TYPE.name
    }

    fn create(&self, context: Rc<DocumentContext>) -> DocumentWindow {
        let frame = self.frames.create_frame();
        let view = Rc::new(EmbeddedEditorView::new(
            context.clone(),
            frame,
            self.settings.clone(),
        ));
        DocumentWindow {
            id: Uuid::new_v4(),
            title: window_title(&context.local_path),
            icon: MARIMO_FILE_TYPE.icon,
            view,
        }
    }
}

fn window_title(local_path: &str) -> String {
    Path::new(local_path)
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| local_path.to_string())
}
