use std::path::Path;
use std::time::Duration;

use tokio::process::Command;
use tokio::time::timeout;

use crate::filetype::{MARIMO_EXTENSION, NOTEBOOK_EXTENSION};

const CONVERT_TIMEOUT: Duration = Duration::from_secs(30);

/// Direction of a notebook format conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConvertDirection {
    /// `.ipynb` → `.mo.py` via `marimo convert`.
    ToMarimo,
    /// `.mo.py` → `.ipynb` via `marimo export ipynb`.
    FromMarimo,
}

/// Validate a path before handing it to the marimo CLI.
///
/// Rejects empty paths and any component starting with `-`, which the CLI
/// would otherwise interpret as an option. This is a targeted guard, not
/// general path validation; the host already controls which paths reach
/// the extension.
pub fn validate_cli_path(path: &str) -> Result<(), String> {
    if path.is_empty() {
        return Err("Path cannot be empty".to_string());
    }
    for component in Path::new(path).components() {
        if component.as_os_str().to_string_lossy().starts_with('-') {
            return Err(format!(
                "Path components starting with '-' are not allowed: {}",
                path
            ));
        }
    }
    Ok(())
}

/// Derive the output path for a conversion, checking the source extension.
pub fn conversion_output_path(source: &str, direction: ConvertDirection) -> Result<String, String> {
    match direction {
        ConvertDirection::ToMarimo => source
            .strip_suffix(NOTEBOOK_EXTENSION)
            .map(|stem| format!("{}{}", stem, MARIMO_EXTENSION))
            .ok_or_else(|| {
                format!(
                    "Source must be a {} file for conversion to marimo: {}",
                    NOTEBOOK_EXTENSION, source
                )
            }),
        ConvertDirection::FromMarimo => source
            .strip_suffix(MARIMO_EXTENSION)
            .map(|stem| format!("{}{}", stem, NOTEBOOK_EXTENSION))
            .ok_or_else(|| {
                format!(
                    "Source must be a {} file for export to a notebook: {}",
                    MARIMO_EXTENSION, source
                )
            }),
    }
}

/// Convert a notebook between Jupyter and marimo formats by invoking the
/// `marimo` CLI. Returns the output path on success.
pub async fn convert_notebook(
    source_path: &str,
    direction: ConvertDirection,
) -> Result<String, String> {
    validate_cli_path(source_path)?;
    let output_path = conversion_output_path(source_path, direction)?;

    if !Path::new(source_path).is_file() {
        return Err(format!("Source file not found: {}", source_path));
    }

    let mut command = Command::new("marimo");
    match direction {
        ConvertDirection::ToMarimo => {
            command.args(["convert", source_path, "-o", output_path.as_str()]);
        }
        ConvertDirection::FromMarimo => {
            command.args(["export", "ipynb", source_path, "-o", output_path.as_str()]);
        }
    }
    command.kill_on_drop(true);

    let output = match timeout(CONVERT_TIMEOUT, command.output()).await {
        Err(_) => {
            return Err(format!(
                "Conversion timed out after {} seconds",
                CONVERT_TIMEOUT.as_secs()
            ))
        }
        Ok(Err(e)) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err("marimo CLI not found. Please ensure marimo is installed.".to_string())
        }
        Ok(Err(e)) => return Err(format!("Failed to run marimo: {}", e)),
        Ok(Ok(output)) => output,
    };

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        let message = stderr.trim();
        if message.is_empty() {
            return Err("Conversion failed: unknown conversion error".to_string());
        }
        return Err(format!("Conversion failed: {}", message));
    }

    log::info!("Converted {} -> {}", source_path, output_path);
    Ok(output_path)
}
