use std::path::PathBuf;
use std::process::{Command, Stdio};

use super::backend::{ClipboardBackend, ClipboardError, ClipboardPayload};

/// Wayland clipboard backend using wl-clipboard tools
/// Requires wl-paste and wl-copy to be installed
pub struct WaylandBackend;

/// What to fetch, given the MIME types the clipboard offers
#[derive(Debug, PartialEq, Eq)]
enum Offer<'a> {
    Nothing,
    Image(&'a str),
    UriList,
    Text,
    Other(&'a str),
}

impl WaylandBackend {
    /// Create a new Wayland clipboard backend
    pub fn new() -> Result<Self, ClipboardError> {
        // Verify both halves of wl-clipboard are available
        for tool in ["wl-paste", "wl-copy"] {
            Command::new(tool)
                .arg("--version")
                .stdout(Stdio::null())
                .stderr(Stdio::null())
                .status()
                .map_err(|e| {
                    ClipboardError::Unavailable(format!(
                        "{tool} not found ({e}). Install wl-clipboard package"
                    ))
                })?;
        }

        log::debug!("WaylandBackend initialized successfully");
        Ok(WaylandBackend)
    }

    /// MIME types currently offered, empty when nothing is copied
    fn list_types(&self) -> Result<Vec<String>, ClipboardError> {
        let output = Command::new("wl-paste")
            .arg("--list-types")
            .stdin(Stdio::null())
            .output()
            .map_err(|e| ClipboardError::Command {
                command: "wl-paste",
                message: e.to_string(),
            })?;

        // wl-paste exits non-zero with "Nothing is copied" on an empty clipboard
        if !output.status.success() {
            log::debug!(
                "wl-paste --list-types: {}",
                String::from_utf8_lossy(&output.stderr).trim()
            );
            return Ok(Vec::new());
        }

        Ok(String::from_utf8_lossy(&output.stdout)
            .lines()
            .map(|line| line.trim().to_string())
            .filter(|line| !line.is_empty())
            .collect())
    }

    fn fetch(&self, mime_type: &str) -> Result<Vec<u8>, ClipboardError> {
        let output = Command::new("wl-paste")
            .arg("--no-newline")
            .arg("--type")
            .arg(mime_type)
            .stdin(Stdio::null())
            .output()
            .map_err(|e| ClipboardError::Command {
                command: "wl-paste",
                message: e.to_string(),
            })?;

        if !output.status.success() {
            return Err(ClipboardError::Command {
                command: "wl-paste",
                message: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        log::debug!("Read {} bytes of {} from clipboard", output.stdout.len(), mime_type);
        Ok(output.stdout)
    }
}

/// Pick the most useful offer. Images win over file lists, file lists over text.
fn choose_offer(types: &[String]) -> Offer<'_> {
    if types.is_empty() {
        return Offer::Nothing;
    }
    // Prefer PNG when several image encodings are offered
    if let Some(png) = types.iter().find(|t| t.as_str() == "image/png") {
        return Offer::Image(png);
    }
    if let Some(image) = types.iter().find(|t| t.starts_with("image/")) {
        return Offer::Image(image);
    }
    if types.iter().any(|t| t == "text/uri-list") {
        return Offer::UriList;
    }
    if types
        .iter()
        .any(|t| t.starts_with("text/") || t == "UTF8_STRING" || t == "STRING" || t == "TEXT")
    {
        return Offer::Text;
    }
    Offer::Other(&types[0])
}

/// Local file paths from a `text/uri-list` body
/// Comment lines and non-file URIs are skipped
fn parse_uri_list(body: &str) -> Vec<PathBuf> {
    body.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|uri| {
            let rest = uri.strip_prefix("file://")?;
            // file://localhost/path and file:///path are both local
            let rest = rest.strip_prefix("localhost").unwrap_or(rest);
            match urlencoding::decode(rest) {
                Ok(decoded) => Some(PathBuf::from(decoded.into_owned())),
                Err(e) => {
                    log::debug!("Skipping undecodable URI {}: {}", uri, e);
                    None
                }
            }
        })
        .collect()
}

impl ClipboardBackend for WaylandBackend {
    fn read(&mut self) -> Result<ClipboardPayload, ClipboardError> {
        let types = self.list_types()?;
        log::debug!("Clipboard offers {:?}", types);

        match choose_offer(&types) {
            Offer::Nothing | Offer::Text => Ok(ClipboardPayload::Empty),
            Offer::Image(mime_type) => {
                let data = self.fetch(mime_type)?;
                let image = image::load_from_memory(&data)?;
                Ok(ClipboardPayload::Image(image))
            }
            Offer::UriList => {
                let data = self.fetch("text/uri-list")?;
                let files = parse_uri_list(&String::from_utf8_lossy(&data));
                if files.is_empty() {
                    Ok(ClipboardPayload::Unsupported("non-file URI list".to_string()))
                } else {
                    Ok(ClipboardPayload::Files(files))
                }
            }
            Offer::Other(mime_type) => Ok(ClipboardPayload::Unsupported(mime_type.to_string())),
        }
    }

    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        let status = Command::new("wl-copy")
            .arg("--type")
            .arg("text/plain")
            .arg(text)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map_err(|e| ClipboardError::Command {
                command: "wl-copy",
                message: e.to_string(),
            })?;

        if !status.success() {
            return Err(ClipboardError::Command {
                command: "wl-copy",
                message: format!("exited with {}", status),
            });
        }

        log::debug!("Wrote {} bytes text to clipboard", text.len());
        Ok(())
    }

    fn name(&self) -> &'static str {
        "Wayland"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn types(list: &[&str]) -> Vec<String> {
        list.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn test_choose_offer_prefers_png() {
        let offered = types(&["text/plain", "image/jpeg", "image/png"]);
        assert_eq!(choose_offer(&offered), Offer::Image("image/png"));

        let offered = types(&["image/bmp", "text/uri-list"]);
        assert_eq!(choose_offer(&offered), Offer::Image("image/bmp"));
    }

    #[test]
    fn test_choose_offer_file_list_and_text() {
        let offered = types(&["x-special/gnome-copied-files", "text/uri-list", "text/plain"]);
        assert_eq!(choose_offer(&offered), Offer::UriList);

        let offered = types(&["UTF8_STRING", "text/plain;charset=utf-8"]);
        assert_eq!(choose_offer(&offered), Offer::Text);

        assert_eq!(choose_offer(&[]), Offer::Nothing);

        let offered = types(&["application/x-kde-cutselection"]);
        assert_eq!(
            choose_offer(&offered),
            Offer::Other("application/x-kde-cutselection")
        );
    }

    #[test]
    fn test_parse_uri_list() {
        let body = "# copied by nautilus\r\n\
                    file:///home/me/Pictures/shot%201.png\r\n\
                    file://localhost/tmp/b.png\r\n\
                    https://example.com/c.png\r\n\
                    \r\n";
        assert_eq!(
            parse_uri_list(body),
            vec![
                PathBuf::from("/home/me/Pictures/shot 1.png"),
                PathBuf::from("/tmp/b.png"),
            ]
        );
    }
}
