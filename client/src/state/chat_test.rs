use super::*;
use wire::models::ConversationPair;

const NOW: &str = "2024-05-01T10:00:00Z";

fn existing() -> ChatState {
    ChatState::new("conv-1", Some(7), NOW)
}

fn detail_with_pair() -> ConversationDetail {
    ConversationDetail {
        title: Some("Oven manual".to_owned()),
        device_id: Some(9),
        pairs: Some(vec![ConversationPair {
            id: 4,
            request: "How do I clean it?".to_owned(),
            response: "Use pyrolysis.".to_owned(),
            created_time: NOW.to_owned(),
            images: Some(vec![1]),
        }]),
    }
}

// =============================================================
// Construction + load
// =============================================================

#[test]
fn new_route_starts_with_welcome_and_title() {
    let state = ChatState::new(NEW_CONVERSATION_ID, None, NOW);
    assert!(state.is_new());
    assert!(!state.loading);
    assert_eq!(state.title, NEW_CONVERSATION_TITLE);
    assert_eq!(state.messages.len(), 1);
    assert_eq!(state.messages[0].content, WELCOME_TEXT);
}

#[test]
fn existing_route_loads_pairs_after_welcome() {
    let mut state = existing();
    assert!(state.loading);
    state.load_detail(&detail_with_pair());
    let ids: Vec<_> = state.messages.iter().map(|m| m.id.as_str()).collect();
    assert_eq!(ids, [WELCOME_ID, "req-4", "res-4"]);
    assert_eq!(state.title, "Oven manual");
    assert_eq!(state.device_id, Some(9));
    assert!(!state.loading);
}

#[test]
fn reloading_detail_does_not_duplicate_messages() {
    let mut state = existing();
    state.load_detail(&detail_with_pair());
    state.load_detail(&detail_with_pair());
    assert_eq!(state.messages.len(), 3);
}

// =============================================================
// Send flow
// =============================================================

#[test]
fn blank_input_is_ignored() {
    let mut state = existing();
    assert_eq!(state.begin_send("   ", true, NOW), None);
    assert_eq!(state.messages.len(), 1);
}

#[test]
fn send_on_new_route_plans_conversation_creation() {
    let mut state = ChatState::new(NEW_CONVERSATION_ID, Some(3), NOW);
    let plan = state.begin_send(" reset? ", true, NOW).expect("plan");
    assert_eq!(plan, SendPlan::CreateConversation { device_id: Some(3), query: "reset?".to_owned() });
    assert_eq!(state.messages.last().map(|m| m.sender), Some(Sender::User));
    assert!(state.sending);
}

#[test]
fn send_on_existing_route_asks_rag_with_conversation_when_signed_in() {
    let mut state = existing();
    let Some(SendPlan::Ask(request)) = state.begin_send("q", true, NOW) else {
        panic!("expected rag plan");
    };
    assert_eq!(request.conversation_id.as_deref(), Some("conv-1"));
    assert_eq!(request.device_id, Some(7));
}

#[test]
fn send_without_token_omits_conversation_id() {
    let mut state = existing();
    let Some(SendPlan::Ask(request)) = state.begin_send("q", false, NOW) else {
        panic!("expected rag plan");
    };
    assert_eq!(request.conversation_id, None);
}

#[test]
fn second_send_while_in_flight_is_ignored() {
    let mut state = existing();
    assert!(state.begin_send("one", true, NOW).is_some());
    assert!(state.begin_send("two", true, NOW).is_none());
    assert_eq!(state.messages.len(), 2);
}

#[test]
fn answer_is_appended_and_send_completes() {
    let mut state = existing();
    state.begin_send("q", true, NOW);
    state.finish_answer(
        RagAnswer { pair_id: 12, response: "a".to_owned(), images_ids: Some(vec![5, 6]) },
        NOW,
    );
    let last = state.messages.last().expect("answer");
    assert!(last.is_ai());
    assert_eq!(last.images_ids, vec![5, 6]);
    assert!(!state.sending);
}

#[test]
fn failure_keeps_user_message_and_sets_notice() {
    let mut state = existing();
    state.begin_send("q", true, NOW);
    state.fail_send("Failed to get response", &ApiError::Transport("offline".to_owned()));
    assert_eq!(state.messages.len(), 2);
    assert!(!state.sending);
    assert!(state.notice.as_deref().is_some_and(|n| n.contains("offline")));
}

#[test]
fn copy_reports_success_only_when_the_write_resolved() {
    let mut state = existing();
    state.copy_finished(Ok(()));
    assert_eq!(state.notice.as_deref(), Some("Copied to clipboard."));

    state.copy_finished(Err("NotAllowedError".to_owned()));
    assert_eq!(state.notice.as_deref(), Some("Copy failed: NotAllowedError"));
}

#[test]
fn local_message_ids_are_unique() {
    let mut state = existing();
    state.begin_send("a", true, NOW);
    state.finish_answer(RagAnswer { pair_id: 1, response: "x".to_owned(), images_ids: None }, NOW);
    state.begin_send("b", true, NOW);
    assert_ne!(state.messages[1].id, state.messages[3].id);
}

// =============================================================
// First-message hand-off
// =============================================================

#[test]
fn first_message_is_consumed_exactly_once() {
    let mut state = existing();
    assert_eq!(state.take_first_message(Some("hello")), Some("hello".to_owned()));
    assert_eq!(state.take_first_message(Some("hello")), None);
}

#[test]
fn first_message_ignored_on_new_route_or_blank() {
    let mut fresh = ChatState::new(NEW_CONVERSATION_ID, None, NOW);
    assert_eq!(fresh.take_first_message(Some("hello")), None);
    let mut state = existing();
    assert_eq!(state.take_first_message(Some("  ")), None);
    assert_eq!(state.take_first_message(None), None);
    assert_eq!(state.take_first_message(Some("later")), Some("later".to_owned()));
}

// =============================================================
// Notes
// =============================================================

#[test]
fn note_title_is_preceding_user_question() {
    let mut state = existing();
    state.load_detail(&detail_with_pair());
    assert_eq!(state.note_title_for("res-4"), "How do I clean it?");
    assert_eq!(state.note_title_for("req-4"), "How do I clean it?");
}

#[test]
fn note_title_without_question_is_untitled() {
    let state = existing();
    assert_eq!(state.note_title_for(WELCOME_ID), UNTITLED_NOTE);
    assert_eq!(state.note_title_for("missing"), UNTITLED_NOTE);
}

#[test]
fn pair_ids_are_read_from_ai_messages() {
    let loaded = Message::ai("res-4", "a", NOW, Vec::new());
    let fresh = Message::ai("12", "a", NOW, Vec::new());
    let unstored = Message::ai("-1", "a", NOW, Vec::new());
    let user = Message::user("req-4", "q", NOW);
    assert_eq!(pair_id_of(&loaded), Some(4));
    assert_eq!(pair_id_of(&fresh), Some(12));
    assert_eq!(pair_id_of(&unstored), None);
    assert_eq!(pair_id_of(&user), None);
    assert_eq!(pair_id_of(&Message::ai(WELCOME_ID, "hi", NOW, Vec::new())), None);
}
