//! Built-in quote collection.

use std::collections::HashSet;

use crate::models::Quote;
use crate::{Error, Result};

const QUOTES: &[(&str, &str, &str)] = &[
    ("1", "The only way to do great work is to love what you do.", "Steve Jobs"),
    ("2", "Life is what happens when you're busy making other plans.", "John Lennon"),
    ("3", "The future belongs to those who believe in the beauty of their dreams.", "Eleanor Roosevelt"),
    ("4", "It is during our darkest moments that we must focus to see the light.", "Aristotle"),
    ("5", "Believe you can and you're halfway there.", "Theodore Roosevelt"),
    ("6", "The only impossible journey is the one you never begin.", "Tony Robbins"),
    ("7", "In the middle of difficulty lies opportunity.", "Albert Einstein"),
    ("8", "Success is not final, failure is not fatal: it is the courage to continue that counts.", "Winston Churchill"),
    ("9", "The best time to plant a tree was 20 years ago. The second best time is now.", "Chinese Proverb"),
    ("10", "Your time is limited, don't waste it living someone else's life.", "Steve Jobs"),
    ("11", "The way to get started is to quit talking and begin doing.", "Walt Disney"),
    ("12", "Don't watch the clock; do what it does. Keep going.", "Sam Levenson"),
    ("13", "The only limit to our realization of tomorrow will be our doubts of today.", "Franklin D. Roosevelt"),
    ("14", "Everything you've ever wanted is on the other side of fear.", "George Addair"),
    ("15", "What we think, we become.", "Buddha"),
    ("16", "The mind is everything. What you think you become.", "Buddha"),
    ("17", "Strive not to be a success, but rather to be of value.", "Albert Einstein"),
    ("18", "Great minds discuss ideas; average minds discuss events; small minds discuss people.", "Eleanor Roosevelt"),
    ("19", "I have not failed. I've just found 10,000 ways that won't work.", "Thomas Edison"),
    ("20", "The only person you are destined to become is the person you decide to be.", "Ralph Waldo Emerson"),
];

/// The built-in corpus, in id order
pub fn default_corpus() -> Vec<Quote> {
    QUOTES
        .iter()
        .map(|(id, text, author)| Quote::new(*id, *text, *author))
        .collect()
}

/// Check that a corpus is usable for selection: non-empty with unique ids
pub fn validate_corpus(corpus: &[Quote]) -> Result<()> {
    if corpus.is_empty() {
        return Err(Error::InvalidInput("quote corpus is empty".to_string()));
    }

    let mut seen = HashSet::new();
    for quote in corpus {
        if !seen.insert(quote.id.as_str()) {
            return Err(Error::InvalidInput(format!("duplicate quote id: {}", quote.id)));
        }
    }
    Ok(())
}
