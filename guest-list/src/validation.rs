//! Candidate validation.
//!
//! Checks run in a fixed order and stop at the first failure: position,
//! capacity gate for adds, email, tickets, duplicate email, capacity.

use crate::error::{GuestListError, Result};
use crate::types::{Guest, GuestListState};
use regex::Regex;
use std::sync::LazyLock;

/// Something, an `@`, something, a dot, something; no whitespace anywhere.
const EMAIL_PATTERN: &str = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";

#[allow(clippy::expect_used)] // constant pattern
static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(EMAIL_PATTERN).expect("email pattern is valid"));

/// Whether `email` (after trimming) looks like an email address
#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    let email = email.trim();
    !email.is_empty() && EMAIL_RE.is_match(email)
}

/// Parse a ticket count typed by a user
///
/// Only a plain positive integer is accepted.
///
/// # Errors
///
/// Returns [`GuestListError::InvalidTicketCount`] for zero, negative,
/// fractional or non-numeric input.
pub fn parse_ticket_count(input: &str) -> Result<u32> {
    let trimmed = input.trim();
    let invalid = || GuestListError::InvalidTicketCount {
        input: input.to_string(),
    };

    if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }

    match trimmed.parse::<u32>() {
        Ok(0) | Err(_) => Err(invalid()),
        Ok(tickets) => Ok(tickets),
    }
}

/// Validate `candidate` against `state`
///
/// `editing_index` names the guest being replaced, if any. On success returns
/// the guest to store, with its email trimmed.
///
/// # Errors
///
/// - [`GuestListError::GuestNotFound`]: `editing_index` is out of range
/// - [`GuestListError::CapacityExceeded`]: adding while the event is full, or
///   the change would exceed capacity
/// - [`GuestListError::InvalidEmail`]: empty or malformed email
/// - [`GuestListError::InvalidTicketCount`]: zero tickets
/// - [`GuestListError::DuplicateEmail`]: another guest has the same email, ignoring case
pub fn check_candidate(
    state: &GuestListState,
    candidate: &Guest,
    editing_index: Option<usize>,
) -> Result<Guest> {
    let replaced = match editing_index {
        Some(index) => Some(
            state
                .guests
                .get(index)
                .ok_or(GuestListError::GuestNotFound { index })?,
        ),
        None => None,
    };

    if replaced.is_none() && state.is_event_full() {
        return Err(GuestListError::CapacityExceeded {
            requested: candidate.tickets,
            remaining: 0,
            capacity: state.capacity,
        });
    }

    if !is_valid_email(&candidate.email) {
        return Err(GuestListError::InvalidEmail {
            email: candidate.email.clone(),
        });
    }

    if candidate.tickets == 0 {
        return Err(GuestListError::InvalidTicketCount {
            input: candidate.tickets.to_string(),
        });
    }

    let key = candidate.key();
    let duplicate = state
        .guests
        .iter()
        .enumerate()
        .any(|(index, guest)| Some(index) != editing_index && guest.key() == key);
    if duplicate {
        return Err(GuestListError::DuplicateEmail {
            email: candidate.email.trim().to_string(),
        });
    }

    let others = state
        .total_tickets()
        .saturating_sub(replaced.map_or(0, |guest| u64::from(guest.tickets)));
    let remaining = u64::from(state.capacity).saturating_sub(others);
    if u64::from(candidate.tickets) > remaining {
        let remaining = u32::try_from(remaining).unwrap_or(state.capacity);
        return Err(GuestListError::CapacityExceeded {
            requested: candidate.tickets,
            remaining,
            capacity: state.capacity,
        });
    }

    Ok(Guest::new(candidate.email.trim(), candidate.tickets))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::types::DEFAULT_CAPACITY;

    fn state_with(guests: &[(&str, u32)]) -> GuestListState {
        GuestListState::with_guests(
            DEFAULT_CAPACITY,
            guests
                .iter()
                .map(|(email, tickets)| Guest::new(*email, *tickets))
                .collect(),
        )
    }

    fn kind_of(result: Result<Guest>) -> Option<ErrorKind> {
        result.err().map(|e| e.kind())
    }

    #[test]
    fn accepts_ordinary_emails() {
        for email in ["a@example.com", "first.last+tag@sub.example.co.uk", " padded@example.com "] {
            assert!(is_valid_email(email), "{email} should be valid");
        }
    }

    #[test]
    fn rejects_malformed_emails() {
        for email in ["", "   ", "plain", "no-at.example.com", "a@b", "a@@b.com", "a b@c.com", "@example.com"] {
            assert!(!is_valid_email(email), "{email:?} should be invalid");
        }
    }

    #[test]
    fn ticket_parsing_accepts_positive_integers() {
        assert_eq!(parse_ticket_count("3").ok(), Some(3));
        assert_eq!(parse_ticket_count(" 12 ").ok(), Some(12));
    }

    #[test]
    fn ticket_parsing_rejects_everything_else() {
        for input in ["0", "-1", "2.5", "abc", "", "+3", "99999999999"] {
            assert!(
                matches!(
                    parse_ticket_count(input),
                    Err(GuestListError::InvalidTicketCount { .. })
                ),
                "{input:?} should be rejected"
            );
        }
    }

    #[test]
    fn valid_add_is_trimmed() {
        let state = state_with(&[("a@example.com", 2)]);
        let guest = check_candidate(&state, &Guest::new("  b@example.com ", 3), None);
        assert_eq!(guest.ok(), Some(Guest::new("b@example.com", 3)));
    }

    #[test]
    fn duplicate_email_ignores_case() {
        let state = state_with(&[("existing@example.com", 2)]);
        let result = check_candidate(&state, &Guest::new("EXISTING@example.com", 1), None);
        assert_eq!(kind_of(result), Some(ErrorKind::DuplicateEmail));
    }

    #[test]
    fn self_edit_keeps_its_email() {
        let state = state_with(&[("existing@example.com", 2), ("another@example.com", 3)]);
        let result = check_candidate(&state, &Guest::new("existing@example.com", 4), Some(0));
        assert_eq!(result.ok(), Some(Guest::new("existing@example.com", 4)));
    }

    #[test]
    fn edit_cannot_take_another_guests_email() {
        let state = state_with(&[("existing@example.com", 2), ("another@example.com", 3)]);
        let result = check_candidate(&state, &Guest::new("Another@example.com", 3), Some(0));
        assert_eq!(kind_of(result), Some(ErrorKind::DuplicateEmail));
    }

    #[test]
    fn add_beyond_capacity_is_rejected() {
        let state = state_with(&[("guest1@example.com", 10), ("guest2@example.com", 8)]);
        let result = check_candidate(&state, &Guest::new("newguest@example.com", 5), None);
        assert_eq!(
            result.err(),
            Some(GuestListError::CapacityExceeded {
                requested: 5,
                remaining: 2,
                capacity: 20,
            })
        );
    }

    #[test]
    fn add_up_to_capacity_is_allowed() {
        let state = state_with(&[("guest1@example.com", 10), ("guest2@example.com", 8)]);
        let result = check_candidate(&state, &Guest::new("newguest@example.com", 2), None);
        assert!(result.is_ok());
    }

    #[test]
    fn add_is_blocked_when_full() {
        let state = state_with(&[("guest1@example.com", 10), ("guest2@example.com", 10)]);
        // Blocked before the email is even looked at
        let result = check_candidate(&state, &Guest::new("not an email", 1), None);
        assert_eq!(kind_of(result), Some(ErrorKind::CapacityExceeded));
    }

    #[test]
    fn edit_allowed_when_full_if_total_does_not_grow() {
        let state = state_with(&[("guest1@example.com", 10), ("guest2@example.com", 10)]);
        let smaller = check_candidate(&state, &Guest::new("guest1@example.com", 7), Some(0));
        assert!(smaller.is_ok());
        let same = check_candidate(&state, &Guest::new("renamed@example.com", 10), Some(1));
        assert!(same.is_ok());
        let larger = check_candidate(&state, &Guest::new("guest1@example.com", 11), Some(0));
        assert_eq!(kind_of(larger), Some(ErrorKind::CapacityExceeded));
    }

    #[test]
    fn edit_over_huge_seeded_counts_is_rejected() {
        let state = GuestListState::with_guests(
            DEFAULT_CAPACITY,
            vec![
                Guest::new("a@example.com", u32::MAX),
                Guest::new("b@example.com", u32::MAX),
            ],
        );
        // Without the other guest's tickets the list is still far over capacity
        let result = check_candidate(&state, &Guest::new("a@example.com", 1), Some(0));
        assert_eq!(
            result.err(),
            Some(GuestListError::CapacityExceeded {
                requested: 1,
                remaining: 0,
                capacity: 20,
            })
        );
    }

    #[test]
    fn edit_out_of_range_is_not_found() {
        let state = state_with(&[("a@example.com", 1)]);
        let result = check_candidate(&state, &Guest::new("a@example.com", 1), Some(3));
        assert_eq!(result.err(), Some(GuestListError::GuestNotFound { index: 3 }));
    }

    #[test]
    fn validation_order_email_before_tickets() {
        let state = GuestListState::default();
        let result = check_candidate(&state, &Guest::new("", 0), None);
        assert_eq!(kind_of(result), Some(ErrorKind::InvalidEmail));
        let result = check_candidate(&state, &Guest::new("a@example.com", 0), None);
        assert_eq!(kind_of(result), Some(ErrorKind::InvalidTicketCount));
    }
}
