//! Capabilities the host application provides to the extension.
//!
//! The host's widget and registry hierarchy is consumed through these
//! narrow traits instead of a base-class hierarchy: registration code gets
//! the registries as explicit parameters, and every trait here has an
//! obvious test fake.

use std::rc::Rc;

use url::Url;

use marimo_embed_core::connection::ServerConnection;
use marimo_embed_core::filetype::FileTypeDescriptor;

use crate::factory::DocumentWindow;

/// Handle to one open document. Owned by the host; the extension holds a
/// shared reference for the lifetime of the document's view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentContext {
    /// Stable filesystem path, addressed through the proxy.
    pub path: String,
    /// Workspace-relative path used for display.
    pub local_path: String,
}

/// Navigation surface the embedded editor loads into, backed by the host's
/// web view widget.
pub trait EditorFrame {
    /// Point the frame at `url` and start loading it.
    fn navigate(&self, url: &Url);
    /// Drop the navigation target, stopping any in-flight load and
    /// releasing the embedded surface's resources.
    fn clear(&self);
}

/// Produces a fresh frame for each document window.
pub trait FrameFactory {
    fn create_frame(&self) -> Rc<dyn EditorFrame>;
}

/// Supplies the host's server connection configuration.
pub trait ConnectionSettings {
    fn server_connection(&self) -> Result<ServerConnection, String>;
}

/// Produces a windowed view for a document of the factory's file type.
pub trait DocumentViewFactory {
    /// Name the factory is addressed by in the host's document manager.
    fn factory_name(&self) -> &'static str;
    /// File-type name the factory handles.
    fn file_type(&self) -> &'static str;
    fn create(&self, context: Rc<DocumentContext>) -> DocumentWindow;
}

/// The host's document-type registry.
pub trait DocumentTypeRegistry {
    fn register_file_type(&mut self, file_type: &'static FileTypeDescriptor);
    /// Register `factory` as the default handler for its file type.
    fn register_view_factory(&mut self, factory: Rc<dyn DocumentViewFactory>);
}

/// The host's generic document-open mechanism.
pub trait DocumentManager {
    fn open_with_factory(&self, path: &str, factory_name: &str);
}

/// Handler invoked when a registered command runs, with the optional
/// explicit path argument the invoker supplied.
pub type CommandHandler = Rc<dyn Fn(Option<&str>)>;

/// The host's command registry (palette, keybindings).
pub trait CommandRegistry {
    fn register_command(&mut self, id: &'static str, label: &'static str, handler: CommandHandler);
}

/// The host's context-menu registry. Entries are scoped by a selector
/// matching tagged file-browser items and invoke a registered command.
pub trait ContextMenuRegistry {
    fn add_item(&mut self, selector: &'static str, command_id: &'static str);
}

/// Current selection in the host's file browser.
pub trait FileBrowser {
    fn selected_path(&self) -> Option<String>;
}
