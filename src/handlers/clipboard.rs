use anyhow::{Context, Result, anyhow};
use std::io::Write;
use std::process::{Command, Stdio};

/// Tools tried in order: Wayland first, then X11
const CLIPBOARD_TOOLS: [(&str, &[&str]); 3] = [
    ("wl-copy", &[]),
    ("xclip", &["-selection", "clipboard"]),
    ("pbcopy", &[]),
];

/// Copies `text` to the system clipboard through an external tool
pub fn copy_to_clipboard(text: &str) -> Result<()> {
    for (program, args) in CLIPBOARD_TOOLS {
        let child = Command::new(program)
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn();

        let Ok(mut child) = child else {
            continue;
        };

        child
            .stdin
            .take()
            .context("Clipboard tool has no stdin")?
            .write_all(text.as_bytes())
            .context("Failed to write to clipboard tool")?;

        let status = child.wait().context("Clipboard tool did not finish")?;
        if status.success() {
            return Ok(());
        }
        return Err(anyhow!("{} exited with {}", program, status));
    }

    Err(anyhow!(
        "Clipboard tools not available (wl-copy, xclip or pbcopy)"
    ))
}
