//! Commands issued through several handles at once.

#![allow(clippy::unwrap_used)]

use guest_list::mocks::{MockGuestRepository, RecordingNotifier};
use guest_list::{
    Guest, GuestList, GuestListConfig, GuestListError, GuestListState, LoadStatus, NoticeLevel,
    DEFAULT_CAPACITY,
};
use guest_list_runtime::RetryPolicy;
use guest_list_testing::{FixedClock, test_clock};
use std::time::Duration;

type TestList = GuestList<RecordingNotifier, FixedClock>;

fn list_with(repo: &MockGuestRepository, guests: Vec<Guest>) -> (TestList, RecordingNotifier) {
    let notifier = RecordingNotifier::new();
    let list = GuestList::with_state(
        GuestListState::with_guests(DEFAULT_CAPACITY, guests),
        repo.clone(),
        notifier.clone(),
        test_clock(),
        RetryPolicy::none(),
    );
    (list, notifier)
}

#[tokio::test]
async fn each_caller_gets_its_own_result() {
    let repo = MockGuestRepository::new();
    repo.delay_saves(Duration::from_millis(30));
    let (list, notifier) = list_with(&repo, Vec::new());

    let valid = list.clone();
    let invalid = list.clone();
    let (saved, rejected) = tokio::join!(
        valid.add_guest(Guest::new("a@example.com", 2)),
        invalid.add_guest(Guest::new("not-an-email", 1)),
    );

    assert_eq!(saved, Ok(()));
    assert!(matches!(rejected, Err(GuestListError::InvalidEmail { .. })));
    assert_eq!(repo.stored(), vec![Guest::new("a@example.com", 2)]);
    assert_eq!(notifier.count(NoticeLevel::Success), 1);
    assert_eq!(notifier.count(NoticeLevel::Error), 1);
}

#[tokio::test]
async fn failed_save_is_not_reported_to_a_concurrent_rejection() {
    let repo = MockGuestRepository::new();
    repo.fail_saves(true);
    repo.delay_saves(Duration::from_millis(30));
    let (list, _) = list_with(&repo, Vec::new());

    let first = list.clone();
    let second = list.clone();
    let (unsaved, missing) = tokio::join!(
        first.add_guest(Guest::new("a@example.com", 2)),
        second.remove_guest(7),
    );

    assert!(matches!(unsaved, Err(GuestListError::PersistenceFailure { .. })));
    assert_eq!(missing, Err(GuestListError::GuestNotFound { index: 7 }));
}

#[tokio::test]
async fn add_during_load_is_rejected() {
    let stored = vec![Guest::new("a@example.com", 1)];
    let repo = MockGuestRepository::with_guests(stored.clone());
    let (list, _) = list_with(&repo, Vec::new());

    let loader = list.clone();
    let adder = list.clone();
    let (loaded, added) = tokio::join!(
        loader.load_guests(),
        adder.add_guest(Guest::new("b@example.com", 2)),
    );

    assert_eq!(loaded, Ok(()));
    assert_eq!(added, Err(GuestListError::LoadInProgress));
    assert_eq!(list.guests().await, stored);
    assert_eq!(repo.stored(), stored);
    assert_eq!(repo.save_attempts(), 0);

    // Once loaded, the same add goes through
    list.add_guest(Guest::new("b@example.com", 2)).await.unwrap();
    assert_eq!(repo.stored(), list.guests().await);
}

#[tokio::test]
async fn add_before_load_leaves_memory_matching_storage() {
    let repo = MockGuestRepository::with_guests(vec![Guest::new("a@example.com", 1)]);
    let (list, _) = list_with(&repo, Vec::new());

    let adder = list.clone();
    let loader = list.clone();
    let (added, loaded) = tokio::join!(
        adder.add_guest(Guest::new("b@example.com", 2)),
        loader.load_guests(),
    );

    assert_eq!(added, Ok(()));
    assert_eq!(loaded, Ok(()));
    assert_eq!(list.guests().await, repo.stored());
    assert_eq!(list.snapshot().await.load_status, LoadStatus::Loaded);
    assert!(!list.snapshot().await.unsaved_changes);
}

#[tokio::test]
async fn full_notice_survives_a_removal_before_the_save_lands() {
    let repo = MockGuestRepository::new();
    repo.delay_saves(Duration::from_millis(20));
    let (list, notifier) = list_with(
        &repo,
        vec![
            Guest::new("guest1@example.com", 10),
            Guest::new("guest2@example.com", 8),
        ],
    );

    let adder = list.clone();
    let remover = list.clone();
    let (added, removed) = tokio::join!(
        adder.add_guest(Guest::new("last@example.com", 2)),
        remover.remove_guest(0),
    );
    added.unwrap();
    removed.unwrap();

    assert!(!list.is_event_full().await);
    assert_eq!(notifier.count(NoticeLevel::Info), 1);
    assert_eq!(notifier.count(NoticeLevel::Success), 2);
}
