// ABOUTME: Tests for ToolResult - constructors, error shape, JSON text.
// ABOUTME: Verifies the result structure the agent serializes.

use super::*;

#[test]
fn test_json_result() {
    let result = ToolResult::json(serde_json::json!({"filename": "x.pdf"}));
    assert_eq!(result.value["filename"], "x.pdf");
    assert!(!result.is_error);
}

#[test]
fn test_error_result_shape() {
    let result = ToolResult::error("Tool foo not found");
    assert!(result.is_error);
    assert_eq!(result.value, serde_json::json!({"error": "Tool foo not found"}));
}

#[test]
fn test_to_json_string_is_compact() {
    let result = ToolResult::json(serde_json::json!({"a": 1, "b": [1, 2]}));
    assert_eq!(result.to_json_string().unwrap(), r#"{"a":1,"b":[1,2]}"#);
}

#[test]
fn test_from_serialize() {
    #[derive(serde::Serialize)]
    struct Chart {
        chart_type: &'static str,
        success: bool,
    }

    let result = ToolResult::from_serialize(&Chart {
        chart_type: "bar",
        success: true,
    })
    .unwrap();
    assert_eq!(result.value["chart_type"], "bar");
    assert_eq!(result.value["success"], true);
}

#[test]
fn test_default() {
    let result = ToolResult::default();
    assert!(result.value.is_null());
    assert!(!result.is_error);
}
