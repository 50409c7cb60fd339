//! Property-based tests for the state machine
//!
//! These tests verify key invariants hold across all possible inputs.

use super::transition::*;
use super::*;
use proptest::prelude::*;

// ============================================================================
// Arbitrary Generators
// ============================================================================

fn arb_dialog_state() -> impl Strategy<Value = DialogState> {
    prop_oneof![
        Just(DialogState::Menu),
        Just(DialogState::AddNote),
        Just(DialogState::NotesList),
    ]
}

/// Sessions that respect the field lifecycle: a draft title only exists in
/// `AddNote`, an open note only in `NotesList`
fn arb_session() -> impl Strategy<Value = Session> {
    (
        arb_dialog_state(),
        proptest::option::of("[A-Z][a-z]{0,8}"),
        proptest::option::of("[A-Z][a-z]{0,8}"),
        0usize..10,
    )
        .prop_map(|(state, title, open, page_number)| Session {
            state,
            draft_title: title.filter(|_| state == DialogState::AddNote),
            draft_note_open: open.filter(|_| state == DialogState::NotesList),
            page_number,
        })
}

fn arb_action() -> impl Strategy<Value = Action> {
    prop_oneof![
        Just(Action::List),
        Just(Action::Add),
        Just(Action::Cancel),
        Just(Action::Back),
        Just(Action::Delete),
        "[A-Z][a-z]{0,8}".prop_map(|title| Action::Open { title }),
        (0usize..10).prop_map(|page| Action::PageChanged { page }),
    ]
}

fn arb_event() -> impl Strategy<Value = Event> {
    prop_oneof![
        Just(Event::Start),
        ("[ a-zA-Z,]{0,20}", proptest::option::of(0i64..1000))
            .prop_map(|(text, message_id)| Event::Text { text, message_id }),
        arb_action().prop_map(Event::Button),
    ]
}

// ============================================================================
// Invariants
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// Field lifecycle survives any sequence of events
    #[test]
    fn prop_draft_fields_tied_to_state(
        session in arb_session(),
        events in proptest::collection::vec(arb_event(), 1..30)
    ) {
        let mut session = session;
        for event in events {
            if let Ok(result) = transition(&session, event) {
                session = result.new_session;
            }
            if session.draft_note_open.is_some() {
                prop_assert_eq!(session.state, DialogState::NotesList);
            }
            if session.draft_title.is_some() {
                prop_assert_eq!(session.state, DialogState::AddNote);
            }
        }
    }

    /// Rejected events never produce effects, and `Start` is always accepted
    #[test]
    fn prop_start_always_returns_to_menu(session in arb_session()) {
        let result = transition(&session, Event::Start).unwrap();
        prop_assert_eq!(result.new_session, Session::menu());
        prop_assert!(result.effects.is_empty());
    }

    /// Only the second capture step and delete touch the store
    #[test]
    fn prop_storage_effects_only_from_capture_and_delete(
        session in arb_session(),
        event in arb_event()
    ) {
        if let Ok(result) = transition(&session, event.clone()) {
            let storage: Vec<_> = result.effects.iter().filter(|e| e.is_storage()).collect();
            if !storage.is_empty() {
                prop_assert_eq!(storage.len(), 1);
                match storage[0] {
                    Effect::PutNote { title, .. } => {
                        prop_assert!(session.is_awaiting_body());
                        prop_assert_eq!(Some(title), session.draft_title.as_ref());
                        let is_text = matches!(event, Event::Text { .. });
                        prop_assert!(is_text, "capture must come from a text event");
                    }
                    Effect::DeleteNote { title } => {
                        prop_assert_eq!(Some(title), session.draft_note_open.as_ref());
                        prop_assert_eq!(event, Event::Button(Action::Delete));
                    }
                    _ => unreachable!(),
                }
            }
        }
    }

    /// Text outside `AddNote` is never accepted
    #[test]
    fn prop_text_ignored_outside_add_note(
        session in arb_session(),
        text in "[ a-zA-Z]{1,20}"
    ) {
        prop_assume!(session.state != DialogState::AddNote);
        let result = transition(&session, Event::Text { text, message_id: None });
        prop_assert!(result.is_err());
    }
}
