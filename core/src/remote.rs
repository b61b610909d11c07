//! Remote quote provider (ZenQuotes).

use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

use crate::models::Quote;
use crate::{Error, Result};

pub const DEFAULT_BASE_URL: &str = "https://zenquotes.io/api";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Source of quotes fetched over the network. No retries: a failure is
/// reported to the caller as-is.
pub trait QuoteProvider {
    fn fetch_random(&self) -> Result<Quote>;

    /// Several random quotes, fetched one after another
    fn fetch_many(&self, limit: usize) -> Result<Vec<Quote>> {
        (0..limit).map(|_| self.fetch_random()).collect()
    }

    fn search(&self, keyword: &str) -> Result<Vec<Quote>>;
}

/// Record shape returned by the ZenQuotes API
#[derive(Debug, Deserialize)]
struct ZenQuote {
    q: String,
    a: String,
}

/// Strip the trailing `", type..."` classification some authors carry
pub fn clean_remote_author(author: &str) -> String {
    match author.find(", type") {
        Some(idx) if author.len() > idx + ", type".len() => author[..idx].to_string(),
        _ => author.to_string(),
    }
}

fn to_quote(raw: ZenQuote) -> Quote {
    Quote::with_generated_id(raw.q, clean_remote_author(&raw.a))
}

/// Parse a ZenQuotes array payload
pub fn parse_quotes(body: &str) -> Result<Vec<Quote>> {
    let raw: Vec<ZenQuote> = serde_json::from_str(body)
        .map_err(|e| Error::Network(format!("unexpected payload: {e}")))?;
    Ok(raw.into_iter().map(to_quote).collect())
}

/// Parse a ZenQuotes `/random` payload: an array holding one record
pub fn parse_random(body: &str) -> Result<Quote> {
    parse_quotes(body)?
        .into_iter()
        .next()
        .ok_or_else(|| Error::Network("unexpected payload: empty quote list".to_string()))
}

/// Blocking HTTP client for the ZenQuotes API
pub struct ZenQuotesClient {
    agent: ureq::Agent,
    base_url: String,
}

impl ZenQuotesClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        let agent = ureq::AgentBuilder::new().timeout(timeout).build();
        Self {
            agent,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn get(&self, path: &str, query: Option<(&str, &str)>) -> Result<String> {
        let url = format!("{}{}", self.base_url, path);
        debug!(%url, "fetching quotes");

        let mut request = self.agent.get(&url).set("User-Agent", "dailyquote");
        if let Some((key, value)) = query {
            request = request.query(key, value);
        }

        let resp = request
            .call()
            .map_err(|e| Error::Network(format!("failed to fetch {url}: {e}")))?;
        resp.into_string()
            .map_err(|e| Error::Network(format!("failed to read response body: {e}")))
    }
}

impl Default for ZenQuotesClient {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL, DEFAULT_TIMEOUT)
    }
}

impl QuoteProvider for ZenQuotesClient {
    fn fetch_random(&self) -> Result<Quote> {
        parse_random(&self.get("/random", None)?)
    }

    fn search(&self, keyword: &str) -> Result<Vec<Quote>> {
        parse_quotes(&self.get("/quotes", Some(("query", keyword)))?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    /// Serves numbered quotes and fails on the `fail_on`-th call
    struct FlakyProvider {
        calls: Cell<usize>,
        fail_on: usize,
    }

    impl QuoteProvider for FlakyProvider {
        fn fetch_random(&self) -> Result<Quote> {
            let call = self.calls.get() + 1;
            self.calls.set(call);
            if call == self.fail_on {
                return Err(Error::Network("connection reset".to_string()));
            }
            Ok(Quote::new(call.to_string(), "text", "author"))
        }

        fn search(&self, _keyword: &str) -> Result<Vec<Quote>> {
            Ok(Vec::new())
        }
    }

    #[test]
    fn test_parse_random() {
        let body = r#"[{"q":"Act as if what you do makes a difference.","a":"William James","h":"<blockquote>...</blockquote>"}]"#;
        let quote = parse_random(body).unwrap();
        assert_eq!(quote.text, "Act as if what you do makes a difference.");
        assert_eq!(quote.author, "William James");
        assert!(!quote.id.is_empty());
    }

    #[test]
    fn test_author_suffix_stripped() {
        assert_eq!(clean_remote_author("Lao Tzu, type.fbuebot"), "Lao Tzu");
        assert_eq!(clean_remote_author("Lao Tzu"), "Lao Tzu");
        assert_eq!(clean_remote_author("Someone, type"), "Someone, type");
    }

    #[test]
    fn test_unexpected_payloads() {
        assert!(matches!(parse_random("[]"), Err(Error::Network(_))));
        assert!(matches!(parse_random(r#"{"q":"x","a":"y"}"#), Err(Error::Network(_))));
        assert!(matches!(parse_random(r#"[{"text":"x"}]"#), Err(Error::Network(_))));
        assert!(matches!(parse_random("<html>rate limited</html>"), Err(Error::Network(_))));
    }

    #[test]
    fn test_parse_search_results() {
        let body = r#"[{"q":"One","a":"A"},{"q":"Two","a":"B, type.x"}]"#;
        let quotes = parse_quotes(body).unwrap();
        assert_eq!(quotes.len(), 2);
        assert_eq!(quotes[1].author, "B");
        assert_ne!(quotes[0].id, quotes[1].id);
    }

    #[test]
    fn test_fetch_many_stops_at_first_failure() {
        let provider = FlakyProvider { calls: Cell::new(0), fail_on: 3 };
        assert!(matches!(provider.fetch_many(5), Err(Error::Network(_))));
        assert_eq!(provider.calls.get(), 3);

        let provider = FlakyProvider { calls: Cell::new(0), fail_on: 0 };
        let quotes = provider.fetch_many(4).unwrap();
        let ids: Vec<&str> = quotes.iter().map(|q| q.id.as_str()).collect();
        assert_eq!(ids, ["1", "2", "3", "4"]);

        assert!(provider.fetch_many(0).unwrap().is_empty());
        assert_eq!(provider.calls.get(), 4);
    }

    #[test]
    fn test_unreachable_host_is_network_error() {
        let client = ZenQuotesClient::new("http://127.0.0.1:9", Duration::from_millis(500));
        assert!(matches!(client.fetch_random(), Err(Error::Network(_))));
    }

    #[test]
    fn test_base_url_trailing_slash() {
        let client = ZenQuotesClient::new("https://example.com/api/", DEFAULT_TIMEOUT);
        assert_eq!(client.base_url, "https://example.com/api");
    }
}
