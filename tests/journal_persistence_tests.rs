//! Durability tests for the journal repository over file-backed storage.
//!
//! A "process restart" is simulated by dropping every handle and building a
//! fresh repository over the same data directory.

use std::collections::HashSet;
use std::sync::Arc;
use stellium::journal::{JournalEntry, JournalRepository};
use stellium::storage::FileStore;
use tempfile::tempdir;

async fn repository_over(dir: &std::path::Path) -> JournalRepository {
    let store = FileStore::open(dir).await.expect("open file store");
    JournalRepository::new(Arc::new(store))
}

#[tokio::test]
async fn entries_survive_a_restart() {
    let dir = tempdir().unwrap();

    let first = JournalEntry::new("Walked along the river.", Some("peaceful".to_string()));
    let second = JournalEntry::new("Too much coffee.", None);

    {
        let repo = repository_over(dir.path()).await;
        repo.save(&first).await.unwrap();
        repo.save(&second).await.unwrap();
    }

    // Fresh repository, same storage.
    let repo = repository_over(dir.path()).await;
    let listed = repo.list().await;

    assert_eq!(listed.len(), 2);
    let ids: HashSet<&str> = listed.iter().map(|e| e.id.as_str()).collect();
    assert!(ids.contains(first.id.as_str()));
    assert!(ids.contains(second.id.as_str()));

    // Field-exact equality, order-insensitive.
    for saved in [&first, &second] {
        let found = listed.iter().find(|e| e.id == saved.id).unwrap();
        assert_eq!(found, saved);
    }
}

#[tokio::test]
async fn updates_survive_a_restart() {
    let dir = tempdir().unwrap();
    let entry = JournalEntry::new("Draft thoughts", None);

    {
        let repo = repository_over(dir.path()).await;
        repo.save(&entry).await.unwrap();
        assert!(repo
            .update(&entry.id, "Settled thoughts", Some("resolved"))
            .await
            .unwrap());
    }

    let repo = repository_over(dir.path()).await;
    let listed = repo.list().await;
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].content, "Settled thoughts");
    assert_eq!(listed[0].mood.as_deref(), Some("resolved"));
    assert_eq!(listed[0].created_at, entry.created_at);
    assert!(listed[0].updated_at > entry.updated_at);
}

#[tokio::test]
async fn corrupted_file_heals_to_empty_and_absent() {
    let dir = tempdir().unwrap();

    // Write garbage where the entry array lives.
    let entries_file = dir.path().join("journal_entries.json");
    tokio::fs::write(&entries_file, "{\"oops\": not even json")
        .await
        .unwrap();

    let repo = repository_over(dir.path()).await;
    assert!(repo.list().await.is_empty());

    // The corrupted key was cleared, not left to fail again.
    assert!(!entries_file.exists());

    // The repository is fully usable afterwards.
    let entry = JournalEntry::new("Fresh start", None);
    repo.save(&entry).await.unwrap();
    assert_eq!(repo.list().await, vec![entry]);
}

#[tokio::test]
async fn clear_all_removes_the_backing_file() {
    let dir = tempdir().unwrap();
    let repo = repository_over(dir.path()).await;

    repo.save(&JournalEntry::new("Ephemeral", None)).await.unwrap();
    assert!(dir.path().join("journal_entries.json").exists());

    repo.clear_all().await.unwrap();
    assert!(!dir.path().join("journal_entries.json").exists());
}
