//! Undo / Redo
//!
//! This example edits a small document whose sections live behind `Arc`,
//! then walks back and forth through its history.
//!
//! Key concepts:
//! - `Arc::make_mut` copies only the section an update touches
//! - The history manager is wired in purely through lifecycle hooks
//! - A new edit after an undo discards the redo branch
//!
//! Run with: cargo run --example undo_redo

use immutable_context::{HistoryManager, ImmutableContainer};
use std::sync::Arc;

#[derive(Clone, Debug, PartialEq)]
struct Document {
    title: Arc<String>,
    paragraphs: Arc<Vec<String>>,
}

fn show(doc: &Document) {
    println!("  render: {:?} ({} paragraphs)", doc.title, doc.paragraphs.len());
}

fn main() {
    tracing_subscriber::fmt().init();

    println!("=== Undo/Redo Example ===\n");

    let initial = Document {
        title: Arc::new("Notes".to_string()),
        paragraphs: Arc::new(vec!["first".to_string()]),
    };

    let history = HistoryManager::new();
    let container = ImmutableContainer::new(initial.clone(), history.hooks());
    container.bind(initial.clone(), show);

    container.apply(|doc| Arc::make_mut(&mut doc.paragraphs).push("second".to_string()));
    container.apply(|doc| Arc::make_mut(&mut doc.title).push_str(" (draft)"));

    let latest = container.state().expect("container holds a document");
    let previous = history.snapshot()[1].clone();
    assert!(Arc::ptr_eq(&latest.paragraphs, &previous.paragraphs));
    println!("  ✓ Untouched paragraphs are shared between versions\n");

    println!("Undo twice:");
    history.undo();
    history.undo();
    assert_eq!(container.state(), Some(initial));
    assert_eq!(history.index(), 0);

    println!("\nRedo once:");
    history.redo();
    assert_eq!(history.index(), 1);

    println!("\nNew edit discards the redo branch:");
    container.apply(|doc| Arc::make_mut(&mut doc.paragraphs).clear());
    assert_eq!(history.history_size(), 3);
    assert!(!history.can_redo());
    println!("  ✓ history size {}, index {}", history.history_size(), history.index());

    println!("\n=== Example Complete ===");
}
