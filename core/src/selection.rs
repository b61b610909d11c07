//! Picks the quote currently on screen.

use rand::Rng;
use tracing::debug;

use crate::models::Quote;
use crate::remote::QuoteProvider;
use crate::storage::FavoritesStore;
use crate::{Error, Result};

/// Uniform choice over the corpus by index
pub fn pick_random<'a, R: Rng>(corpus: &'a [Quote], rng: &mut R) -> Result<&'a Quote> {
    if corpus.is_empty() {
        return Err(Error::InvalidInput("cannot pick from an empty corpus".to_string()));
    }
    Ok(&corpus[rng.gen_range(0..corpus.len())])
}

/// The current quote and whether it is favorited
pub struct QuoteSelection {
    corpus: Vec<Quote>,
    provider: Option<Box<dyn QuoteProvider>>,
    current: Option<Quote>,
    current_is_favorite: bool,
}

impl QuoteSelection {
    /// Select from a local corpus
    pub fn local(corpus: Vec<Quote>) -> Self {
        Self {
            corpus,
            provider: None,
            current: None,
            current_is_favorite: false,
        }
    }

    /// Select from a remote provider
    pub fn remote(provider: Box<dyn QuoteProvider>) -> Self {
        Self {
            corpus: Vec::new(),
            provider: Some(provider),
            current: None,
            current_is_favorite: false,
        }
    }

    pub fn is_remote(&self) -> bool {
        self.provider.is_some()
    }

    pub fn current(&self) -> Option<&Quote> {
        self.current.as_ref()
    }

    pub fn current_is_favorite(&self) -> bool {
        self.current_is_favorite
    }

    /// Draw a new quote. On failure the current quote is left as it was.
    pub fn next(&mut self, store: &FavoritesStore) -> Result<&Quote> {
        let quote = match &self.provider {
            Some(provider) => provider.fetch_random()?,
            None => pick_random(&self.corpus, &mut rand::thread_rng())?.clone(),
        };
        debug!(id = %quote.id, remote = self.is_remote(), "selected quote");
        self.show(quote, store);
        self.current.as_ref().ok_or_else(|| Error::InvalidInput("no quote selected".to_string()))
    }

    /// Display a specific quote
    pub fn show(&mut self, quote: Quote, store: &FavoritesStore) {
        self.current_is_favorite = store.is_favorite(&quote.id);
        self.current = Some(quote);
    }

    /// Re-query the favorited flag, e.g. after a mutation or on focus
    pub fn refresh_favorite(&mut self, store: &FavoritesStore) -> bool {
        self.current_is_favorite = self
            .current
            .as_ref()
            .map(|q| store.is_favorite(&q.id))
            .unwrap_or(false);
        self.current_is_favorite
    }
}
