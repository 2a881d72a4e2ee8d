// ABOUTME: Tests for LLM types - serialization, deserialization, helpers.
// ABOUTME: Verifies JSON format and response inspection helpers.

use super::*;

#[test]
fn test_role_serialization() {
    assert_eq!(serde_json::to_string(&Role::User).unwrap(), "\"user\"");
    assert_eq!(
        serde_json::to_string(&Role::Assistant).unwrap(),
        "\"assistant\""
    );
}

#[test]
fn test_content_block_tool_use_deserialization() {
    let json = r#"{
        "type": "tool_use",
        "id": "123",
        "name": "read_pdf_content",
        "input": {"file_path": "x.pdf"}
    }"#;
    let block: ContentBlock = serde_json::from_str(json).unwrap();
    match block {
        ContentBlock::ToolUse { id, name, input } => {
            assert_eq!(id, "123");
            assert_eq!(name, "read_pdf_content");
            assert_eq!(input["file_path"], "x.pdf");
        }
        _ => panic!("Expected ToolUse"),
    }
}

#[test]
fn test_message_first_text() {
    let msg = Message::user("Analyze physics_2024.pdf");
    assert_eq!(msg.role, Role::User);
    assert_eq!(msg.first_text(), Some("Analyze physics_2024.pdf"));

    let empty = Message {
        role: Role::User,
        content: vec![],
    };
    assert_eq!(empty.first_text(), None);
}

#[test]
fn test_request_builder() {
    let req = Request::new("gemini-2.5-flash")
        .message(Message::user("Hi"))
        .system("You are helpful")
        .max_tokens(2048)
        .temperature(0.7)
        .top_p(0.95)
        .top_k(40);

    assert_eq!(req.model, "gemini-2.5-flash");
    assert_eq!(req.prompt(), Some("Hi"));
    assert_eq!(req.system, Some("You are helpful".to_string()));
    assert_eq!(req.max_tokens, Some(2048));
    assert_eq!(req.temperature, Some(0.7));
    assert_eq!(req.top_p, Some(0.95));
    assert_eq!(req.top_k, Some(40));
    assert!(req.tools.is_empty());
}

#[test]
fn test_response_first_tool_use_wins_over_text() {
    let response = Response {
        id: "123".to_string(),
        content: vec![
            ContentBlock::text("I'll read that file"),
            ContentBlock::tool_use("read_pdf_content", serde_json::json!({"file_path": "a.pdf"})),
            ContentBlock::tool_use("analyze_statistics", serde_json::json!({})),
        ],
        stop_reason: StopReason::ToolUse,
        model: "gemini-2.5-pro".to_string(),
        usage: Usage::default(),
    };

    let (name, input) = response.first_tool_use().unwrap();
    assert_eq!(name, "read_pdf_content");
    assert_eq!(input["file_path"], "a.pdf");
    assert_eq!(response.first_text(), Some("I'll read that file"));
}

#[test]
fn test_response_first_text_only_takes_first_part() {
    let response = Response {
        id: "1".to_string(),
        content: vec![ContentBlock::text("first"), ContentBlock::text("second")],
        stop_reason: StopReason::EndTurn,
        model: "gemini-2.5-pro".to_string(),
        usage: Usage::default(),
    };

    assert!(response.first_tool_use().is_none());
    assert_eq!(response.first_text(), Some("first"));
}

#[test]
fn test_stop_reason_serialization() {
    assert_eq!(
        serde_json::to_string(&StopReason::EndTurn).unwrap(),
        "\"end_turn\""
    );
    assert_eq!(
        serde_json::to_string(&StopReason::ToolUse).unwrap(),
        "\"tool_use\""
    );
}
