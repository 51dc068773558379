//! End-to-end guest list scenarios through the `GuestList` facade.

#![allow(clippy::unwrap_used)]

use guest_list::mocks::{MockGuestRepository, RecordingNotifier};
use guest_list::{
    ErrorKind, Guest, GuestList, GuestListConfig, GuestListError, GuestListState, LoadStatus,
    NoticeLevel, DEFAULT_CAPACITY,
};
use guest_list_runtime::RetryPolicy;
use guest_list_testing::{FixedClock, test_clock};

type TestList = GuestList<RecordingNotifier, FixedClock>;

fn config() -> GuestListConfig {
    GuestListConfig::default().with_retry(RetryPolicy::none())
}

fn guests(entries: &[(&str, u32)]) -> Vec<Guest> {
    entries
        .iter()
        .map(|(email, tickets)| Guest::new(*email, *tickets))
        .collect()
}

fn seeded(entries: &[(&str, u32)]) -> (TestList, MockGuestRepository, RecordingNotifier) {
    let repo = MockGuestRepository::with_guests(guests(entries));
    let notifier = RecordingNotifier::new();
    let list = GuestList::with_state(
        GuestListState::with_guests(DEFAULT_CAPACITY, guests(entries)),
        repo.clone(),
        notifier.clone(),
        test_clock(),
        RetryPolicy::none(),
    );
    (list, repo, notifier)
}

#[tokio::test]
async fn load_computes_totals() {
    let repo = MockGuestRepository::with_guests(guests(&[
        ("test1@example.com", 3),
        ("test2@example.com", 2),
    ]));
    let list = GuestList::new(repo, RecordingNotifier::new(), test_clock(), &config());

    list.load_guests().await.unwrap();

    assert_eq!(list.total_tickets().await, 5);
    assert!(!list.is_event_full().await);
    assert_eq!(list.snapshot().await.load_status, LoadStatus::Loaded);
}

#[tokio::test]
async fn eighteen_tickets_is_not_full_and_overfill_is_rejected() {
    let (list, repo, _) = seeded(&[("g1@example.com", 10), ("g2@example.com", 8)]);
    assert!(!list.is_event_full().await);

    let result = list.add_guest(Guest::new("g3@example.com", 5)).await;

    assert_eq!(
        result.map_err(|e| e.kind()),
        Err(ErrorKind::CapacityExceeded)
    );
    assert_eq!(list.total_tickets().await, 18);
    assert_eq!(repo.save_attempts(), 0);
}

#[tokio::test]
async fn twenty_three_seeded_tickets_is_full() {
    let (list, _, _) = seeded(&[
        ("g1@example.com", 10),
        ("g2@example.com", 8),
        ("g3@example.com", 5),
    ]);

    assert_eq!(list.total_tickets().await, 23);
    assert!(list.is_event_full().await);
    assert_eq!(list.remaining_tickets().await, 0);
}

#[tokio::test]
async fn appending_up_to_eighteen_is_not_full() {
    let (list, repo, notifier) = seeded(&[("g1@example.com", 10), ("g2@example.com", 5)]);

    list.add_guest(Guest::new("g3@example.com", 3)).await.unwrap();

    assert_eq!(list.total_tickets().await, 18);
    assert!(!list.is_event_full().await);
    assert_eq!(repo.stored().len(), 3);
    assert_eq!(notifier.count(NoticeLevel::Info), 0);
}

#[tokio::test]
async fn duplicate_email_ignores_case() {
    let (list, _, notifier) = seeded(&[("existing@example.com", 2)]);

    let result = list.add_guest(Guest::new("EXISTING@example.com", 1)).await;

    assert!(matches!(result, Err(GuestListError::DuplicateEmail { .. })));
    assert_eq!(list.guests().await, guests(&[("existing@example.com", 2)]));
    assert_eq!(notifier.count(NoticeLevel::Error), 1);
}

#[tokio::test]
async fn full_event_blocks_adding() {
    let (list, repo, _) = seeded(&[("g1@example.com", 10), ("g2@example.com", 10)]);

    assert!(!list.can_add_guest().await);
    let result = list.add_guest(Guest::new("g3@example.com", 1)).await;

    assert_eq!(
        result.map_err(|e| e.kind()),
        Err(ErrorKind::CapacityExceeded)
    );
    assert_eq!(list.guests().await.len(), 2);
    assert_eq!(repo.save_attempts(), 0);
}

#[tokio::test]
async fn editing_own_entry_keeps_email() {
    let (list, repo, notifier) = seeded(&[("existing@example.com", 2)]);

    list.update_guest(0, Guest::new("existing@example.com", 4))
        .await
        .unwrap();

    assert_eq!(list.guests().await, guests(&[("existing@example.com", 4)]));
    assert_eq!(repo.stored(), guests(&[("existing@example.com", 4)]));
    assert_eq!(
        notifier.last().map(|n| n.message),
        Some("Guest existing@example.com updated".to_string())
    );
}

#[tokio::test]
async fn editing_a_full_event_is_still_allowed() {
    let (list, _, _) = seeded(&[("g1@example.com", 10), ("g2@example.com", 10)]);

    list.update_guest(1, Guest::new("g2@example.com", 6))
        .await
        .unwrap();

    assert_eq!(list.total_tickets().await, 16);
    assert!(list.can_add_guest().await);
}

#[tokio::test]
async fn remove_then_reset() {
    let (list, repo, notifier) = seeded(&[("a@example.com", 1), ("b@example.com", 2)]);

    list.remove_guest(0).await.unwrap();
    assert_eq!(repo.stored(), guests(&[("b@example.com", 2)]));

    list.reset_guest_list().await.unwrap();
    assert!(list.guests().await.is_empty());
    assert!(repo.stored().is_empty());
    assert_eq!(repo.reset_calls(), 1);
    assert_eq!(notifier.count(NoticeLevel::Success), 2);
}
