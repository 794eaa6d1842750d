//! One-shot registration of the marimo integration against the host's
//! registries, called once during application bootstrap.

use std::rc::Rc;

use marimo_embed_core::convert::{convert_notebook, ConvertDirection};
use marimo_embed_core::filetype::{
    is_marimo_path, is_notebook_path, MARIMO_EXTENSION, MARIMO_FILE_TYPE, NOTEBOOK_EXTENSION,
};

use crate::factory::{EditorViewFactory, FACTORY_NAME};
use crate::host::{
    CommandHandler, CommandRegistry, ConnectionSettings, ContextMenuRegistry, DocumentManager,
    DocumentTypeRegistry, FileBrowser, FrameFactory,
};

/// Open a marimo notebook through the embedded editor. Takes an optional
/// path argument; without one, the file browser's selection is used.
pub const OPEN_COMMAND: &str = "marimo:open-editor";
/// Convert a Jupyter notebook to marimo format.
pub const CONVERT_TO_MARIMO_COMMAND: &str = "marimo:convert-to-marimo";
/// Export a marimo notebook back to Jupyter format.
pub const CONVERT_TO_NOTEBOOK_COMMAND: &str = "marimo:convert-to-notebook";

/// Selector matching file-browser items tagged with the marimo file type.
pub const MARIMO_ITEM_SELECTOR: &str = "file-browser-item[file-type=\"marimo\"]";
/// Selector matching Jupyter notebook items in the file browser.
pub const NOTEBOOK_ITEM_SELECTOR: &str = "file-browser-item[file-type=\"notebook\"]";

/// Host capabilities the registered commands and factories keep using
/// after activation. Bundled so `activate` doesn't take eight parameters.
pub struct HostServices {
    pub documents: Rc<dyn DocumentManager>,
    pub file_browser: Rc<dyn FileBrowser>,
    pub frames: Rc<dyn FrameFactory>,
    pub settings: Rc<dyn ConnectionSettings>,
}

/// Register the marimo file type, its view factory, the open and convert
/// commands, and the file-browser context-menu entries.
///
/// The registries arrive as explicit parameters so registration stays
/// testable in isolation; nothing here touches process-wide state. The
/// conversion commands spawn onto the host's tokio runtime, which must be
/// current when they are invoked.
pub fn activate(
    document_types: &mut dyn DocumentTypeRegistry,
    commands: &mut dyn CommandRegistry,
    context_menu: &mut dyn ContextMenuRegistry,
    services: HostServices,
) {
    document_types.register_file_type(&MARIMO_FILE_TYPE);
    document_types.register_view_factory(Rc::new(EditorViewFactory::new(
        services.frames.clone(),
        services.settings.clone(),
    )));

    commands.register_command(
        OPEN_COMMAND,
        "Open in Marimo Editor",
        open_command_handler(services.documents.clone(), services.file_browser.clone()),
    );
    context_menu.add_item(MARIMO_ITEM_SELECTOR, OPEN_COMMAND);

    commands.register_command(
        CONVERT_TO_MARIMO_COMMAND,
        "Convert Notebook to Marimo",
        convert_command_handler(services.file_browser.clone(), ConvertDirection::ToMarimo),
    );
    commands.register_command(
        CONVERT_TO_NOTEBOOK_COMMAND,
        "Export Marimo Notebook to Jupyter",
        convert_command_handler(services.file_browser.clone(), ConvertDirection::FromMarimo),
    );
    context_menu.add_item(NOTEBOOK_ITEM_SELECTOR, CONVERT_TO_MARIMO_COMMAND);
    context_menu.add_item(MARIMO_ITEM_SELECTOR, CONVERT_TO_NOTEBOOK_COMMAND);

    log::info!("marimo notebook integration activated");
}

fn resolve_target(
    command: &str,
    path: Option<&str>,
    file_browser: &Rc<dyn FileBrowser>,
) -> Option<String> {
    let target = path
        .map(str::to_string)
        .or_else(|| file_browser.selected_path());
    if target.is_none() {
        log::warn!(
            "No target for {}: no path given and nothing selected in the file browser",
            command
        );
    }
    target
}

fn open_command_handler(
    documents: Rc<dyn DocumentManager>,
    file_browser: Rc<dyn FileBrowser>,
) -> CommandHandler {
    Rc::new(move |path: Option<&str>| {
        let target = match resolve_target(OPEN_COMMAND, path, &file_browser) {
            Some(target) => target,
            None => return,
        };
        if !is_marimo_path(&target) {
            log::warn!(
                "Refusing to open {} with the marimo editor: not a {} file",
                target,
                MARIMO_EXTENSION
            );
            return;
        }
        documents.open_with_factory(&target, FACTORY_NAME);
    })
}

fn convert_command_handler(
    file_browser: Rc<dyn FileBrowser>,
    direction: ConvertDirection,
) -> CommandHandler {
    let command = match direction {
        ConvertDirection::ToMarimo => CONVERT_TO_MARIMO_COMMAND,
        ConvertDirection::FromMarimo => CONVERT_TO_NOTEBOOK_COMMAND,
    };
    Rc::new(move |path: Option<&str>| {
        let target = match resolve_target(command, path, &file_browser) {
            Some(target) => target,
            None => return,
        };
        let expected = match direction {
            ConvertDirection::ToMarimo => {
                if !is_notebook_path(&target) {
                    Some(NOTEBOOK_EXTENSION)
                } else {
                    None
                }
            }
            ConvertDirection::FromMarimo => {
                if !is_marimo_path(&target) {
                    Some(MARIMO_EXTENSION)
                } else {
                    None
                }
            }
        };
        if let Some(expected) = expected {
            log::warn!(
                "Skipping {} for {}: not a {} file",
                command,
                target,
                expected
            );
            return;
        }
        tokio::spawn(async move {
            match convert_notebook(&target, direction).await {
                Ok(output) => log::info!("Conversion finished: {}", output),
                Err(e) => log::error!("Conversion failed for {}: {}", target, e),
            }
        });
    })
}
