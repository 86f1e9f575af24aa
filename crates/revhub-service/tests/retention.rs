//! Integration tests for revision caps and age-based sweeps.

mod helpers;

use std::time::Duration;

use chrono::{Duration as ChronoDuration, Utc};

use helpers::TestServices;
use revhub_core::config::retention::RetentionConfig;
use revhub_core::types::AssetKind;
use revhub_database::RevisionRepository;
use revhub_entity::revision::Revision;

fn capped(max_revisions_per_file: i64) -> TestServices {
    TestServices::with_retention(RetentionConfig {
        max_revisions_per_file,
        max_age_days: 90,
    })
}

/// Save a run of revisions whose content grows one line per step,
/// pausing between saves so their timestamps are strictly ordered.
async fn save_growing(t: &TestServices, lines: &[&str]) -> Vec<Revision> {
    let mut content = String::new();
    let mut saved = Vec::new();
    for (i, line) in lines.iter().enumerate() {
        if i > 0 {
            content.push('\n');
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        content.push_str(line);
        saved.push(t.save(AssetKind::Script, &content).await);
    }
    saved
}

#[tokio::test]
async fn test_cap_keeps_only_the_newest_revisions() {
    let t = capped(5);
    save_growing(&t, &["a", "b", "c", "d", "e", "f", "g", "h"]).await;

    assert_eq!(t.repo.count(AssetKind::Script).await.unwrap(), 5);
    assert_eq!(
        t.repo.sequence_bounds(AssetKind::Script).await.unwrap(),
        Some((4, 8))
    );

    // The new chain base was rewritten as a snapshot, so the survivors
    // replay without the pruned revisions.
    let chain = t.repo.find_chain(AssetKind::Script, 4).await.unwrap();
    assert_eq!(chain.len(), 1);
    assert!(!chain[0].is_diff);
    assert_eq!(chain[0].payload, "a\nb\nc\nd");

    assert_eq!(
        t.revisions.reconstruct(AssetKind::Script, 8).await.unwrap(),
        "a\nb\nc\nd\ne\nf\ng\nh"
    );
}

#[tokio::test]
async fn test_cap_enforcement_is_a_noop_under_the_cap() {
    let t = capped(5);
    save_growing(&t, &["a", "b", "c"]).await;

    let deleted = t
        .retention
        .enforce_revision_cap(AssetKind::Script)
        .await
        .unwrap();
    assert_eq!(deleted, 0);
    assert_eq!(t.repo.count(AssetKind::Script).await.unwrap(), 3);
}

#[tokio::test]
async fn test_sweep_promotes_the_oldest_survivor() {
    let t = TestServices::new();
    let saved = save_growing(&t, &["a", "b", "c", "d"]).await;

    let deleted = t.retention.sweep_before(saved[2].created_at).await;
    assert_eq!(deleted, 2);

    assert_eq!(
        t.repo.sequence_bounds(AssetKind::Script).await.unwrap(),
        Some((3, 4))
    );
    let survivor = t.repo.find_by_id(saved[2].id).await.unwrap().unwrap();
    assert!(!survivor.is_diff);
    assert_eq!(survivor.payload, "a\nb\nc");
    assert_eq!(
        t.revisions.reconstruct(AssetKind::Script, 4).await.unwrap(),
        "a\nb\nc\nd"
    );
}

#[tokio::test]
async fn test_sweep_removes_a_fully_expired_history() {
    let t = TestServices::new();
    save_growing(&t, &["a", "b"]).await;

    let deleted = t.retention.sweep_before(Utc::now() + ChronoDuration::days(1)).await;

    assert_eq!(deleted, 2);
    assert_eq!(t.repo.count(AssetKind::Script).await.unwrap(), 0);
    assert!(
        t.repo
            .sequence_bounds(AssetKind::Script)
            .await
            .unwrap()
            .is_none()
    );
}

#[tokio::test]
async fn test_sweep_with_nothing_expired_is_a_noop() {
    let t = TestServices::new();
    save_growing(&t, &["a", "b", "c"]).await;

    let deleted = t.retention.sweep_before(Utc::now() - ChronoDuration::days(1)).await;

    assert_eq!(deleted, 0);
    assert_eq!(t.repo.count(AssetKind::Script).await.unwrap(), 3);
    assert_eq!(
        t.repo.sequence_bounds(AssetKind::Script).await.unwrap(),
        Some((1, 3))
    );
}

#[tokio::test]
async fn test_sweep_handles_each_file_separately() {
    let t = TestServices::new();
    t.save(AssetKind::Script, "old script").await;
    tokio::time::sleep(Duration::from_millis(5)).await;
    let cutoff = Utc::now();
    tokio::time::sleep(Duration::from_millis(5)).await;
    t.save(AssetKind::Stylesheet, "fresh styles").await;

    let deleted = t.retention.sweep_before(cutoff).await;

    assert_eq!(deleted, 1);
    assert_eq!(t.repo.count(AssetKind::Script).await.unwrap(), 0);
    assert_eq!(t.repo.count(AssetKind::Stylesheet).await.unwrap(), 1);
}
