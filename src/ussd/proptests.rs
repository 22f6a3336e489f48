//! Property-based tests for menu navigation
//!
//! These tests verify key invariants hold across arbitrary dialed paths.

use super::*;
use crate::ai_bridge::AiQueryBridge;
use crate::llm::testing::FixedAnswerService;
use proptest::prelude::*;

// ============================================================================
// Arbitrary Generators
// ============================================================================

/// Tokens the menu knows about, mixed with free text and junk
fn arb_token() -> impl Strategy<Value = String> {
    prop_oneof![
        3 => (0u8..=5).prop_map(|d| d.to_string()),
        1 => "[a-z]{1,8}",
        1 => "[0-9]{2,3}",
        1 => Just(String::new()),
    ]
}

fn arb_tokens() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(arb_token(), 0..6)
}

fn arb_dialed() -> impl Strategy<Value = String> {
    arb_tokens().prop_map(|tokens| tokens.join("*"))
}

fn arb_nonempty_tokens() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("[a-zA-Z0-9 #]{1,6}", 1..8)
}

fn engine() -> UssdEngine {
    UssdEngine::new(
        Arc::new(MenuTree::mamapesa().unwrap()),
        Arc::new(AiQueryBridge::new(Some(Arc::new(FixedAnswerService("Cassava"))))),
    )
}

fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap()
}

// ============================================================================
// Parser Properties
// ============================================================================

proptest! {
    #[test]
    fn parse_then_join_round_trips(tokens in arb_nonempty_tokens()) {
        let dialed = tokens.join("*");
        let parsed = TokenSequence::parse(&dialed);
        prop_assert_eq!(parsed.as_slice(), tokens.as_slice());
        prop_assert_eq!(parsed.to_dialed(), dialed);
    }

    #[test]
    fn parse_is_deterministic(dialed in ".{0,40}") {
        prop_assert_eq!(TokenSequence::parse(&dialed), TokenSequence::parse(&dialed));
    }

    #[test]
    fn token_count_matches_separators(dialed in "[0-9*]{1,20}") {
        let expected = dialed.matches('*').count() + 1;
        prop_assert_eq!(TokenSequence::parse(&dialed).len(), expected);
    }
}

// ============================================================================
// Resolver Properties
// ============================================================================

proptest! {
    #[test]
    fn resolution_is_deterministic(dialed in arb_dialed()) {
        let tree = MenuTree::mamapesa().unwrap();
        let tokens = TokenSequence::parse(&dialed);
        prop_assert_eq!(resolve(&tree, &tokens), resolve(&tree, &tokens));
    }

    #[test]
    fn chat_absorbs_everything_after_it(rest in prop::collection::vec("[a-z0-9]{0,6}", 1..6)) {
        let tree = MenuTree::mamapesa().unwrap();
        let dialed = format!("3*{}", rest.join("*"));
        let state = resolve(&tree, &TokenSequence::parse(&dialed));
        match state {
            ResolvedState::Node { node, query: Some(query) } => {
                prop_assert_eq!(node.kind(), NodeKind::ChatGateway);
                prop_assert_eq!(query, rest.join(" "));
            }
            other => prop_assert!(false, "expected chat query, got {:?}", other),
        }
    }

    #[test]
    fn unknown_first_token_is_invalid(first in "[6-9a-z]{1,3}", rest in arb_tokens()) {
        let tree = MenuTree::mamapesa().unwrap();
        let mut tokens = vec![first];
        tokens.extend(rest);
        let state = resolve(&tree, &TokenSequence::parse(&tokens.join("*")));
        prop_assert_eq!(state, ResolvedState::InvalidToken);
    }

    #[test]
    fn query_payload_only_on_chat(dialed in arb_dialed()) {
        let tree = MenuTree::mamapesa().unwrap();
        if let ResolvedState::Node { node, query: Some(_) } =
            resolve(&tree, &TokenSequence::parse(&dialed))
        {
            prop_assert_eq!(node.kind(), NodeKind::ChatGateway);
            prop_assert!(dialed.starts_with("3*"));
        }
    }

    #[test]
    fn back_is_never_a_resting_node(dialed in arb_dialed()) {
        let tree = MenuTree::mamapesa().unwrap();
        let state = resolve(&tree, &TokenSequence::parse(&dialed));
        let rests_on_back = matches!(state, ResolvedState::Node { node, .. } if node.kind() == NodeKind::Back);
        prop_assert!(!rests_on_back);
    }
}

// ============================================================================
// Response Properties
// ============================================================================

proptest! {
    #[test]
    fn every_path_yields_a_wire_response(dialed in arb_dialed()) {
        let engine = engine();
        let envelope = runtime().block_on(engine.respond(&dialed));
        let wire = envelope.to_string();
        prop_assert!(wire.starts_with("CON ") || wire.starts_with("END "));
    }

    #[test]
    fn responses_are_deterministic(dialed in arb_dialed()) {
        let engine = engine();
        let rt = runtime();
        let first = rt.block_on(engine.respond(&dialed));
        let second = rt.block_on(engine.respond(&dialed));
        prop_assert_eq!(first, second);
    }

    #[test]
    fn chat_questions_end_with_the_answer(question in prop::collection::vec("[a-z]{1,6}", 1..5)) {
        let engine = engine();
        let dialed = format!("3*{}", question.join("*"));
        let envelope = runtime().block_on(engine.respond(&dialed));
        prop_assert_eq!(envelope, ResponseEnvelope::end("Cassava"));
    }

    #[test]
    fn invalid_paths_terminate(dialed in arb_dialed()) {
        let tree = MenuTree::mamapesa().unwrap();
        let state = resolve(&tree, &TokenSequence::parse(&dialed));
        if state == ResolvedState::InvalidToken {
            prop_assert_eq!(
                render(&state, &tree),
                Rendered::Ready(ResponseEnvelope::end(render::INVALID_INPUT))
            );
        }
    }
}
