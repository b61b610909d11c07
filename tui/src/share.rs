//! Platform backends for the share adapter.

use dailyquote_core::share::{Clipboard, ShareOutcome, ShareTarget};
use dailyquote_core::{Error, Result};
use std::io::Write;
use std::process::{Command, Stdio};

/// Exit status a share command uses to signal the user dismissed it
const CANCELLED_EXIT_CODE: i32 = 130;

/// Terminals have no share sheet
pub struct NoNativeShare;

impl ShareTarget for NoNativeShare {
    fn share(&self, _title: &str, _body: &str) -> Result<ShareOutcome> {
        Err(Error::ShareUnavailable)
    }
}

/// Share through an external program. The body goes to its stdin and the
/// title to `DAILYQUOTE_SHARE_TITLE`.
pub struct CommandShare {
    program: String,
    args: Vec<String>,
}

impl CommandShare {
    pub fn new(command: &[String]) -> Option<Self> {
        let (program, args) = command.split_first()?;
        Some(Self {
            program: program.clone(),
            args: args.to_vec(),
        })
    }
}

impl ShareTarget for CommandShare {
    fn share(&self, title: &str, body: &str) -> Result<ShareOutcome> {
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .env("DAILYQUOTE_SHARE_TITLE", title)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| match e.kind() {
                std::io::ErrorKind::NotFound => Error::ShareUnavailable,
                _ => Error::Share(format!("failed to start {}: {e}", self.program)),
            })?;

        // A program may exit without reading its input; the exit status decides
        let written = match child.stdin.take() {
            Some(mut stdin) => match stdin.write_all(body.as_bytes()) {
                Err(e) if e.kind() == std::io::ErrorKind::BrokenPipe => Ok(()),
                other => other,
            },
            None => Ok(()),
        };

        let status = child.wait()?;
        written?;
        match status.code() {
            Some(0) => Ok(ShareOutcome::Shared),
            Some(CANCELLED_EXIT_CODE) => Ok(ShareOutcome::Cancelled),
            _ => Err(Error::Share(format!("{} exited with {status}", self.program))),
        }
    }
}

/// System clipboard. The handle is kept alive so X11/Wayland selections
/// stay owned after `set_text` returns.
#[cfg(feature = "clipboard")]
#[derive(Default)]
pub struct SystemClipboard {
    handle: std::cell::RefCell<Option<arboard::Clipboard>>,
}

#[cfg(feature = "clipboard")]
impl Clipboard for SystemClipboard {
    fn set_text(&self, text: &str) -> Result<()> {
        let mut handle = self.handle.borrow_mut();
        if handle.is_none() {
            *handle = Some(arboard::Clipboard::new().map_err(|e| Error::Clipboard(e.to_string()))?);
        }
        match handle.as_mut() {
            Some(clipboard) => clipboard
                .set_text(text.to_string())
                .map_err(|e| Error::Clipboard(e.to_string())),
            None => Err(Error::Clipboard("clipboard unavailable".to_string())),
        }
    }
}

#[cfg(not(feature = "clipboard"))]
#[derive(Default)]
pub struct SystemClipboard;

#[cfg(not(feature = "clipboard"))]
impl Clipboard for SystemClipboard {
    fn set_text(&self, _text: &str) -> Result<()> {
        Err(Error::Clipboard("built without clipboard support".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn command(parts: &[&str]) -> CommandShare {
        let parts: Vec<String> = parts.iter().map(|s| s.to_string()).collect();
        CommandShare::new(&parts).unwrap()
    }

    #[test]
    fn test_no_native_share() {
        assert!(matches!(NoNativeShare.share("t", "b"), Err(Error::ShareUnavailable)));
    }

    #[test]
    fn test_empty_command() {
        assert!(CommandShare::new(&[]).is_none());
    }

    #[test]
    fn test_missing_program_is_unavailable() {
        let share = command(&["dailyquote-no-such-share-program"]);
        assert!(matches!(share.share("t", "b"), Err(Error::ShareUnavailable)));
    }

    #[cfg(unix)]
    #[test]
    fn test_command_exit_codes() {
        assert_eq!(command(&["cat"]).share("t", "body").unwrap(), ShareOutcome::Shared);
        assert_eq!(
            command(&["sh", "-c", "cat >/dev/null; exit 130"]).share("t", "body").unwrap(),
            ShareOutcome::Cancelled
        );
        assert!(matches!(
            command(&["sh", "-c", "cat >/dev/null; exit 1"]).share("t", "body"),
            Err(Error::Share(_))
        ));
    }

    #[cfg(unix)]
    #[test]
    fn test_command_ignoring_stdin_is_shared() {
        let body = "x".repeat(1 << 20);
        assert_eq!(command(&["true"]).share("Share Quote", &body).unwrap(), ShareOutcome::Shared);
        assert!(matches!(command(&["false"]).share("Share Quote", &body), Err(Error::Share(_))));
    }

    #[cfg(unix)]
    #[test]
    fn test_command_receives_title_and_body() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("shared.txt");
        let script = format!(
            "printf '%s|' \"$DAILYQUOTE_SHARE_TITLE\" > '{0}'; cat >> '{0}'",
            out.display()
        );
        command(&["sh", "-c", &script]).share("Share Quote", "\"Hi\" — Me").unwrap();
        assert_eq!(std::fs::read_to_string(&out).unwrap(), "Share Quote|\"Hi\" — Me");
    }
}
