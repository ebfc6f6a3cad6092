//! Parsing of planner and replanner responses.
//!
//! Models return JSON in several near-equivalent shapes; these functions
//! accept all of them and reduce each to raw step strings, leaving tag
//! validation to [`validate_steps`](super::validation::validate_steps).
//!
//! Accepted plan shapes:
//! - `{"steps": [...]}`, `{"plan": [...]}`, `{"actions": [...]}`
//! - `{"diagnosticPlan": {"steps": [...]}}`
//! - a bare array
//!
//! Step entries may be strings or objects carrying `step`, `description`
//! or `action`.

use serde_json::Value;

/// Decoded replanner response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplanReply {
    Response(String),
    Steps(Vec<String>),
}

/// Extract the JSON value embedded in a model response.
///
/// Tries, in order: the whole text, a fenced ` ```json ` (or bare ` ``` `)
/// block, and the span from the first `{` to the last `}`.
pub fn extract_json(text: &str) -> Option<Value> {
    let text = text.trim();
    if let Ok(value) = serde_json::from_str::<Value>(text) {
        return Some(value);
    }

    if let Some(block) = fenced_block(text)
        && let Ok(value) = serde_json::from_str::<Value>(block)
    {
        return Some(value);
    }

    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end <= start {
        return None;
    }
    serde_json::from_str::<Value>(&text[start..=end]).ok()
}

fn fenced_block(text: &str) -> Option<&str> {
    let open = text.find("```")?;
    let after_fence = &text[open + 3..];
    let body_start = after_fence.find('\n')? + 1;
    let body = &after_fence[body_start..];
    let close = body.find("```")?;
    Some(body[..close].trim())
}

/// Parse planner output into raw step strings.
///
/// Returns `None` if no step list can be found.
pub fn parse_plan_steps(text: &str) -> Option<Vec<String>> {
    let json = extract_json(text)?;
    steps_from_value(&json)
}

fn steps_from_value(json: &Value) -> Option<Vec<String>> {
    let list = match json {
        Value::Array(items) => items,
        Value::Object(map) => ["steps", "plan", "actions"]
            .iter()
            .find_map(|key| map.get(*key).and_then(Value::as_array))
            .or_else(|| {
                map.get("diagnosticPlan")
                    .and_then(|p| p.get("steps"))
                    .and_then(Value::as_array)
            })?,
        _ => return None,
    };
    Some(list.iter().filter_map(step_text).collect())
}

fn step_text(entry: &Value) -> Option<String> {
    match entry {
        Value::String(s) => Some(s.clone()),
        Value::Object(map) => ["step", "description", "action"]
            .iter()
            .find_map(|key| map.get(*key).and_then(Value::as_str))
            .map(str::to_string)
            .or_else(|| Some(entry.to_string())),
        Value::Null => None,
        other => Some(other.to_string()),
    }
}

/// Parse replanner output.
///
/// Accepts `{"action": {"response": ...}}`, `{"action": {"steps": [...]}}`
/// and the same keys without the `action` wrapper.
pub fn parse_replan_response(text: &str) -> Option<ReplanReply> {
    let json = extract_json(text)?;
    let action = json.get("action").unwrap_or(&json);

    if let Some(response) = action.get("response").and_then(Value::as_str) {
        return Some(ReplanReply::Response(response.to_string()));
    }
    if action.get("steps").is_some() || action.get("plan").is_some() {
        return steps_from_value(action).map(ReplanReply::Steps);
    }
    None
}
