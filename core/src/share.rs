//! Share adapter: formats a quote and hands it to the platform.

use tracing::{debug, warn};

use crate::models::Quote;
use crate::{Error, Result};

pub const SHARE_TITLE: &str = "Share Quote";

/// Result of a share attempt that did not fail
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShareOutcome {
    /// Handed to the native share surface
    Shared,
    /// The user dismissed the share sheet
    Cancelled,
    /// Native sharing failed; the text went to the clipboard instead
    Copied,
}

/// Native share surface
pub trait ShareTarget {
    /// `Ok(Cancelled)` for user cancellation, `Err(ShareUnavailable)` when
    /// there is no share surface at all
    fn share(&self, title: &str, body: &str) -> Result<ShareOutcome>;
}

pub trait Clipboard {
    fn set_text(&self, text: &str) -> Result<()>;
}

/// Author name without a parenthetical source annotation
pub fn author_name(author: &str) -> String {
    let trimmed = author.trim();
    if trimmed.is_empty() {
        return "Unknown".to_string();
    }

    let cleaned = match (trimmed.find(" ("), trimmed.rfind(')')) {
        (Some(start), Some(end)) if end > start => {
            format!("{}{}", &trimmed[..start], &trimmed[end + 1..])
        }
        _ => trimmed.to_string(),
    };
    cleaned.trim().to_string()
}

/// `"<text>" — <author>`
pub fn share_message(quote: &Quote) -> String {
    format!("\"{}\" \u{2014} {}", quote.text, author_name(&quote.author))
}

pub struct ShareAdapter {
    target: Box<dyn ShareTarget>,
    clipboard: Box<dyn Clipboard>,
}

impl ShareAdapter {
    pub fn new(target: Box<dyn ShareTarget>, clipboard: Box<dyn Clipboard>) -> Self {
        Self { target, clipboard }
    }

    /// Share via the native surface, falling back to the clipboard
    pub fn share_quote(&self, quote: &Quote) -> Result<ShareOutcome> {
        self.share_text(&share_message(quote))
    }

    pub fn share_text(&self, body: &str) -> Result<ShareOutcome> {
        match self.target.share(SHARE_TITLE, body) {
            Ok(outcome) => {
                debug!(?outcome, "share finished");
                Ok(outcome)
            }
            Err(err) => {
                if !matches!(err, Error::ShareUnavailable) {
                    warn!(%err, "native share failed, copying to clipboard");
                }
                self.clipboard.set_text(body).map_err(|e| match e {
                    Error::Clipboard(_) => e,
                    other => Error::Clipboard(other.to_string()),
                })?;
                Ok(ShareOutcome::Copied)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    struct FakeTarget(fn() -> Result<ShareOutcome>, Rc<RefCell<Vec<(String, String)>>>);

    impl ShareTarget for FakeTarget {
        fn share(&self, title: &str, body: &str) -> Result<ShareOutcome> {
            self.1.borrow_mut().push((title.to_string(), body.to_string()));
            (self.0)()
        }
    }

    struct FakeClipboard {
        fail: bool,
        contents: Rc<RefCell<Option<String>>>,
    }

    impl Clipboard for FakeClipboard {
        fn set_text(&self, text: &str) -> Result<()> {
            if self.fail {
                return Err(Error::Clipboard("no display".to_string()));
            }
            *self.contents.borrow_mut() = Some(text.to_string());
            Ok(())
        }
    }

    fn adapter(
        result: fn() -> Result<ShareOutcome>,
        clipboard_fails: bool,
    ) -> (ShareAdapter, Rc<RefCell<Vec<(String, String)>>>, Rc<RefCell<Option<String>>>) {
        let shared = Rc::new(RefCell::new(Vec::new()));
        let copied = Rc::new(RefCell::new(None));
        let adapter = ShareAdapter::new(
            Box::new(FakeTarget(result, shared.clone())),
            Box::new(FakeClipboard {
                fail: clipboard_fails,
                contents: copied.clone(),
            }),
        );
        (adapter, shared, copied)
    }

    #[test]
    fn test_share_message() {
        let quote = Quote::new("1", "Hello", "X (Y)");
        assert_eq!(share_message(&quote), "\"Hello\" — X");
    }

    #[test]
    fn test_author_name() {
        assert_eq!(author_name("Mark Twain (attributed)"), "Mark Twain");
        assert_eq!(author_name("Steve Jobs"), "Steve Jobs");
        assert_eq!(author_name("  "), "Unknown");
        assert_eq!(author_name("Plato (The Republic) "), "Plato");
        assert_eq!(author_name("Smiley :)"), "Smiley :)");
    }

    #[test]
    fn test_native_share() {
        let (adapter, shared, copied) = adapter(|| Ok(ShareOutcome::Shared), false);
        let outcome = adapter.share_quote(&Quote::new("1", "Hello", "X (Y)")).unwrap();

        assert_eq!(outcome, ShareOutcome::Shared);
        assert_eq!(
            shared.borrow().as_slice(),
            &[(SHARE_TITLE.to_string(), "\"Hello\" — X".to_string())]
        );
        assert!(copied.borrow().is_none());
    }

    #[test]
    fn test_cancel_is_not_an_error() {
        let (adapter, _shared, copied) = adapter(|| Ok(ShareOutcome::Cancelled), false);
        let outcome = adapter.share_quote(&Quote::new("1", "Hello", "X")).unwrap();
        assert_eq!(outcome, ShareOutcome::Cancelled);
        assert!(copied.borrow().is_none());
    }

    #[test]
    fn test_unavailable_falls_back_to_clipboard() {
        let (adapter, _shared, copied) = adapter(|| Err(Error::ShareUnavailable), false);
        let outcome = adapter.share_quote(&Quote::new("1", "Hello", "X (Y)")).unwrap();
        assert_eq!(outcome, ShareOutcome::Copied);
        assert_eq!(copied.borrow().as_deref(), Some("\"Hello\" — X"));
    }

    #[test]
    fn test_share_failure_falls_back_to_clipboard() {
        let (adapter, _shared, copied) = adapter(|| Err(Error::Share("exit status 1".into())), false);
        assert_eq!(adapter.share_text("body").unwrap(), ShareOutcome::Copied);
        assert_eq!(copied.borrow().as_deref(), Some("body"));
    }

    #[test]
    fn test_clipboard_failure_is_reported() {
        let (adapter, _shared, _copied) = adapter(|| Err(Error::ShareUnavailable), true);
        let err = adapter.share_text("body").unwrap_err();
        assert!(matches!(err, Error::Clipboard(_)));
    }
}
