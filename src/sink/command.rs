// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Clipboard backed by a platform copy command
//!
//! `write` blocks until the tool exits; callers on the async runtime go
//! through [`LocalSink`](super::LocalSink), which runs it on the blocking pool.

use std::io::Write;
use std::process::{Command, Stdio};

use super::Clipboard;
use crate::error::{Error, Result};

/// Pipes text into an external copy tool (`pbcopy`, `wl-copy`, `xclip`)
#[derive(Debug, Clone)]
pub struct CommandClipboard {
    program: String,
    args: Vec<String>,
}

impl CommandClipboard {
    /// Use an explicit program and arguments
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    /// Pick the usual tool for the current platform
    pub fn detect() -> Self {
        if cfg!(target_os = "macos") {
            Self::new("pbcopy", vec![])
        } else if std::env::var_os("WAYLAND_DISPLAY").is_some() {
            Self::new("wl-copy", vec![])
        } else {
            Self::new(
                "xclip",
                vec!["-selection".to_string(), "clipboard".to_string()],
            )
        }
    }

    /// Program that will be spawned
    pub fn program(&self) -> &str {
        &self.program
    }
}

impl Clipboard for CommandClipboard {
    fn write(&self, text: &str) -> Result<()> {
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| Error::sink("clipboard", format!("{}: {}", self.program, e)))?;

        // The child is reaped on every path, including a failed write.
        let written = match child.stdin.take() {
            Some(mut stdin) => stdin.write_all(text.as_bytes()),
            None => Ok(()),
        };

        let status = child
            .wait()
            .map_err(|e| Error::sink("clipboard", e.to_string()))?;
        written.map_err(|e| Error::sink("clipboard", e.to_string()))?;

        if status.success() {
            Ok(())
        } else {
            Err(Error::sink(
                "clipboard",
                format!("{} exited with {}", self.program, status),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_program_is_sink_error() {
        let clipboard = CommandClipboard::new("tokenrelay-no-such-copy-tool", vec![]);
        let err = clipboard.write("abc").unwrap_err();
        assert!(matches!(err, Error::Sink { sink: "clipboard", .. }));
    }

    #[cfg(unix)]
    #[test]
    fn test_failing_program_is_reaped_and_reported() {
        let clipboard = CommandClipboard::new(
            "sh",
            vec!["-c".to_string(), "exit 3".to_string()],
        );
        let err = clipboard.write(&"x".repeat(1 << 20)).unwrap_err();
        assert!(matches!(err, Error::Sink { sink: "clipboard", .. }));
    }

    #[cfg(unix)]
    #[test]
    fn test_copy_program_receives_text() {
        let clipboard = CommandClipboard::new(
            "sh",
            vec!["-c".to_string(), "cat > /dev/null".to_string()],
        );
        assert!(clipboard.write("Bearer abc").is_ok());
    }
}
