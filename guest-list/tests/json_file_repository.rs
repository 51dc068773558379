//! The guest list against a real JSON file.

#![allow(clippy::unwrap_used)]

use guest_list::mocks::RecordingNotifier;
use guest_list::repositories::JsonFileGuestRepository;
use guest_list::{Guest, GuestList, GuestListConfig, GuestRepository};
use guest_list_runtime::RetryPolicy;
use guest_list_testing::test_clock;

#[tokio::test]
async fn changes_survive_a_restart() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("party").join("guests.json");
    let config = GuestListConfig::default()
        .with_data_file(&path)
        .with_retry(RetryPolicy::none());

    let list = GuestList::new(
        JsonFileGuestRepository::new(&path),
        RecordingNotifier::new(),
        test_clock(),
        &config,
    );
    list.load_guests().await.unwrap();
    list.add_guest(Guest::new("  zoe@example.com ", 2)).await.unwrap();
    list.add_guest(Guest::new("adam@example.com", 3)).await.unwrap();
    list.dispose();

    let reopened = GuestList::new(
        JsonFileGuestRepository::new(&path),
        RecordingNotifier::new(),
        test_clock(),
        &config,
    );
    reopened.load_guests().await.unwrap();

    assert_eq!(
        reopened.guests().await,
        vec![
            Guest::new("zoe@example.com", 2),
            Guest::new("adam@example.com", 3)
        ]
    );
    assert_eq!(reopened.total_tickets().await, 5);
}

#[tokio::test]
async fn reset_removes_the_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("guests.json");
    let repo = JsonFileGuestRepository::new(&path);
    repo.save(&[Guest::new("a@example.com", 1)]).await.unwrap();
    assert!(path.exists());

    let list = GuestList::new(
        repo,
        RecordingNotifier::new(),
        test_clock(),
        &GuestListConfig::default().with_retry(RetryPolicy::none()),
    );
    list.load_guests().await.unwrap();
    list.reset_guest_list().await.unwrap();

    assert!(!path.exists());
    assert!(list.guests().await.is_empty());
}

#[tokio::test]
async fn corrupt_file_fails_to_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("guests.json");
    std::fs::write(&path, "not json").unwrap();

    let list = GuestList::new(
        JsonFileGuestRepository::new(&path),
        RecordingNotifier::new(),
        test_clock(),
        &GuestListConfig::default().with_retry(RetryPolicy::none()),
    );

    assert!(list.load_guests().await.is_err());
    assert!(list.guests().await.is_empty());
}
