// Example: Basic usage of the dailyquote-core library
use std::fs;

use dailyquote_core::badge::{BadgeMode, FavoritesBadge};
use dailyquote_core::corpus::default_corpus;
use dailyquote_core::selection::QuoteSelection;
use dailyquote_core::share::share_message;
use dailyquote_core::storage::{FavoritesStore, SqliteStore};
use dailyquote_core::Error;

fn main() -> anyhow::Result<()> {
    let db_path = "basic_usage_dailyquote.db";
    fs::remove_file(db_path).ok(); // Clean up previous run

    println!("--- Basic Usage of dailyquote-core ---");

    // ========== Open Storage ==========
    println!("\n1. Opening favorites store...");
    let store = FavoritesStore::new(SqliteStore::open(db_path)?);
    let mut badge = FavoritesBadge::attach(&store, BadgeMode::Push);
    println!("   ✓ Store opened, badge shows {}", badge.count());

    // ========== Pick Quotes ==========
    println!("\n2. Picking a random quote...");
    let mut selection = QuoteSelection::local(default_corpus());
    let quote = selection.next(&store)?.clone();
    println!("   {}", share_message(&quote));

    // ========== Favorites ==========
    println!("\n3. Favoriting...");
    store.add(&quote)?;
    selection.refresh_favorite(&store);
    println!("   ✓ Favorited {} (badge: {})", quote.id, badge.sync(&store));

    match store.add(&quote) {
        Err(Error::AlreadyFavorited(id)) => println!("   ✓ Second add rejected for {}", id),
        other => println!("   ✗ Unexpected result: {:?}", other.map(|r| r.quote.id)),
    }

    for extra in default_corpus().iter().filter(|q| q.id != quote.id).take(2) {
        store.add(extra)?;
    }
    println!("   ✓ {} favorites, newest first:", badge.sync(&store));
    for record in store.list_recent() {
        println!(
            "     - [{}] {}",
            record.favorited_at_datetime().format("%Y-%m-%d %H:%M:%S"),
            share_message(&record.quote)
        );
    }

    // ========== Remove & Clear ==========
    println!("\n4. Removing and clearing...");
    store.remove(&quote.id)?;
    store.remove(&quote.id)?; // absent ids are a no-op
    println!("   ✓ Removed {} (badge: {})", quote.id, badge.sync(&store));

    store.clear()?;
    println!("   ✓ Cleared (badge: {})", badge.sync(&store));

    fs::remove_file(db_path).ok();
    Ok(())
}
