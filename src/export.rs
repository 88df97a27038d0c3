//! Exporting conversion results as files.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::ascii::ConversionResult;

/// Export file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    /// Plain text
    #[default]
    Txt,
    /// Standalone HTML document
    Html,
    /// SVG document
    Svg,
    /// All three renderings as JSON
    Json,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Txt => "txt",
            ExportFormat::Html => "html",
            ExportFormat::Svg => "svg",
            ExportFormat::Json => "json",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            ExportFormat::Txt => "text/plain",
            ExportFormat::Html => "text/html",
            ExportFormat::Svg => "image/svg+xml",
            ExportFormat::Json => "application/json",
        }
    }

    /// Guess the format from a file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|e| e.to_str())
            .and_then(|e| e.parse().ok())
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "txt" | "text" => Ok(ExportFormat::Txt),
            "html" | "htm" => Ok(ExportFormat::Html),
            "svg" => Ok(ExportFormat::Svg),
            "json" => Ok(ExportFormat::Json),
            other => Err(format!("Unknown export format '{}'", other)),
        }
    }
}

/// Errors that can occur while exporting.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("Failed to write export file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize result: {0}")]
    Json(#[from] serde_json::Error),
}

/// Wrap an HTML fragment in a standalone document.
pub fn html_document(markup: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <title>ASCII Art</title>
  <style>
    body {{
      margin: 0;
      padding: 20px;
      background: #f9fafb;
      font-family: monospace;
    }}
    pre {{
      margin: 0;
      padding: 0;
      line-height: 1;
    }}
  </style>
</head>
<body>
  {}
</body>
</html>"#,
        markup
    )
}

/// Render the file contents for `format`.
pub fn render(result: &ConversionResult, format: ExportFormat) -> Result<String, ExportError> {
    Ok(match format {
        ExportFormat::Txt => result.text.clone(),
        ExportFormat::Html => html_document(&result.markup),
        ExportFormat::Svg => result.vector.clone(),
        ExportFormat::Json => serde_json::to_string_pretty(result)?,
    })
}

/// Default export file name, `ascii-art-{millis}.{ext}`.
pub fn default_file_name(format: ExportFormat, timestamp_millis: u128) -> String {
    format!("ascii-art-{}.{}", timestamp_millis, format.extension())
}

/// Milliseconds since the Unix epoch, for [`default_file_name`].
pub fn now_millis() -> u128 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0)
}

/// Write `result` as `format` to `path`.
///
/// If `path` is an existing directory, a default file name is generated
/// inside it. Parent directories are created as needed.
///
/// # Returns
/// The path actually written.
pub fn write(
    result: &ConversionResult,
    format: ExportFormat,
    path: &Path,
) -> Result<PathBuf, ExportError> {
    let dest = if path.is_dir() {
        path.join(default_file_name(format, now_millis()))
    } else {
        path.to_path_buf()
    };

    if let Some(parent) = dest.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let contents = render(result, format)?;
    std::fs::write(&dest, contents)?;
    log::info!("Exported {} to {}", format, dest.display());
    Ok(dest)
}
