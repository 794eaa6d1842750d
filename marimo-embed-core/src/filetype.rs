/// Static description of a file type handled by the embedded marimo editor.
///
/// Created once at activation and handed to the host's document-type
/// registry; never mutated afterwards.
#[derive(Debug, Clone, Copy)]
pub struct FileTypeDescriptor {
    /// Registry key the view factory is bound to.
    pub name: &'static str,
    /// Human-readable name shown in the host's "open with" UI.
    pub display_name: &'static str,
    pub mime_type: &'static str,
    pub extensions: &'static [&'static str],
    /// Icon name resolved by the host's icon theme.
    pub icon: &'static str,
}

/// The two-part extension marking a marimo notebook. Matched as a literal
/// suffix: `Path::extension()` only sees the final `.py` part.
pub const MARIMO_EXTENSION: &str = ".mo.py";

/// Extension of a Jupyter notebook, the conversion counterpart.
pub const NOTEBOOK_EXTENSION: &str = ".ipynb";

pub const MARIMO_FILE_TYPE: FileTypeDescriptor = FileTypeDescriptor {
    name: "marimo",
    display_name: "Marimo Notebook",
    mime_type: "text/x-python",
    extensions: &[MARIMO_EXTENSION],
    icon: "marimo-notebook",
};

/// Whether `path` names a marimo notebook.
pub fn is_marimo_path(path: &str) -> bool {
    path.ends_with(MARIMO_EXTENSION)
}

/// Whether `path` names a Jupyter notebook.
pub fn is_notebook_path(path: &str) -> bool {
    path.ends_with(NOTEBOOK_EXTENSION)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn marimo_path_matches_full_suffix() {
        assert!(is_marimo_path("/home/user/notebook.mo.py"));
        assert!(is_marimo_path("relative/dir/analysis.mo.py"));
    }

    #[test]
    fn plain_python_file_does_not_match() {
        assert!(!is_marimo_path("/home/user/script.py"));
        assert!(!is_marimo_path("/home/user/mo.py.txt"));
    }

    #[test]
    fn suffix_match_is_case_sensitive() {
        assert!(!is_marimo_path("/home/user/notebook.MO.PY"));
    }

    #[test]
    fn notebook_path_matches_ipynb_only() {
        assert!(is_notebook_path("/data/report.ipynb"));
        assert!(!is_notebook_path("/data/report.mo.py"));
    }

    #[test]
    fn descriptor_lists_the_marimo_extension() {
        assert_eq!(MARIMO_FILE_TYPE.extensions, &[MARIMO_EXTENSION]);
        assert_eq!(MARIMO_FILE_TYPE.mime_type, "text/x-python");
    }
}
