// ABOUTME: AnalyzeStatisticsTool - frequency distributions over tagged questions
// ABOUTME: by topic and Bloom's level, plus the lower/higher-order split.

use async_trait::async_trait;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::tool::{Tool, ToolResult};

const LOWER_ORDER: [&str; 2] = ["remember", "understand"];
const HIGHER_ORDER: [&str; 4] = ["apply", "analyze", "evaluate", "create"];
const TOP_TOPICS: usize = 5;

/// Counts of lower-order and higher-order questions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CognitiveComplexity {
    pub lower_order: u64,
    pub higher_order: u64,
}

/// Statistics over a set of tagged questions.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuestionStatistics {
    pub total_questions: usize,
    /// Topic -> count, in first-seen order.
    pub topic_distribution: Map<String, Value>,
    /// Bloom's level -> count, in first-seen order.
    pub bloom_distribution: Map<String, Value>,
    /// Up to five `[topic, count]` pairs, most frequent first.
    pub top_topics: Vec<(String, u64)>,
    pub cognitive_complexity: CognitiveComplexity,
}

/// Compute statistics from a JSON string, a list of questions, or an
/// object holding a `questions` list.
///
/// Entries that are not objects are skipped but still counted in
/// `total_questions`.
pub fn compute_statistics(data: &Value) -> Result<QuestionStatistics, StatisticsError> {
    let questions: &[Value] = match data {
        Value::String(text) => {
            let parsed: Value = serde_json::from_str(text).map_err(StatisticsError::Parse)?;
            return match parsed {
                Value::String(_) => Err(StatisticsError::InvalidFormat),
                other => compute_statistics(&other),
            };
        }
        Value::Array(items) => items.as_slice(),
        Value::Object(obj) => match obj.get("questions") {
            Some(Value::Array(items)) => items.as_slice(),
            None => &[],
            Some(_) => return Err(StatisticsError::InvalidFormat),
        },
        _ => return Err(StatisticsError::InvalidFormat),
    };

    let mut topics = Vec::new();
    let mut levels = Vec::new();
    for question in questions.iter().filter_map(Value::as_object) {
        topics.push(field_label(question, "topic"));
        levels.push(field_label(question, "bloom_level"));
    }

    let topic_counts = tally(&topics);
    let bloom_counts = tally(&levels);

    let mut top_topics = topic_counts.clone();
    top_topics.sort_by(|a, b| b.1.cmp(&a.1));
    top_topics.truncate(TOP_TOPICS);

    let count_where = |group: &[&str]| -> u64 {
        bloom_counts
            .iter()
            .filter(|(level, _)| group.contains(&level.to_lowercase().as_str()))
            .map(|(_, n)| n)
            .sum()
    };
    let cognitive_complexity = CognitiveComplexity {
        lower_order: count_where(&LOWER_ORDER),
        higher_order: count_where(&HIGHER_ORDER),
    };

    Ok(QuestionStatistics {
        total_questions: questions.len(),
        topic_distribution: to_map(&topic_counts),
        bloom_distribution: to_map(&bloom_counts),
        top_topics,
        cognitive_complexity,
    })
}

/// Why statistics could not be computed.
#[derive(Debug, thiserror::Error)]
pub enum StatisticsError {
    #[error("Failed to analyze statistics: {0}")]
    Parse(#[source] serde_json::Error),

    #[error("Invalid input format")]
    InvalidFormat,
}

fn field_label(question: &Map<String, Value>, field: &str) -> String {
    match question.get(field) {
        Some(Value::String(s)) => s.clone(),
        None | Some(Value::Null) => "Unknown".to_string(),
        Some(other) => other.to_string(),
    }
}

/// Occurrence counts in first-seen order.
fn tally(items: &[String]) -> Vec<(String, u64)> {
    let mut counts: Vec<(String, u64)> = Vec::new();
    for item in items {
        match counts.iter_mut().find(|(k, _)| k == item) {
            Some((_, n)) => *n += 1,
            None => counts.push((item.clone(), 1)),
        }
    }
    counts
}

fn to_map(counts: &[(String, u64)]) -> Map<String, Value> {
    counts
        .iter()
        .map(|(k, n)| (k.clone(), Value::from(*n)))
        .collect()
}

/// Tool exposing `compute_statistics` to the model.
pub struct AnalyzeStatisticsTool;

#[async_trait]
impl Tool for AnalyzeStatisticsTool {
    fn name(&self) -> &str {
        "analyze_statistics"
    }

    fn description(&self) -> &str {
        "Analyze statistical patterns in tagged exam questions: topic and Bloom's level \
         frequencies, top topics, and the lower/higher-order cognitive split."
    }

    fn schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "questions_data": {
                    "type": "string",
                    "description": "JSON list of {topic, bloom_level} records, or an object with a 'questions' list"
                }
            },
            "required": ["questions_data"]
        })
    }

    async fn execute(&self, params: Value) -> Result<ToolResult, anyhow::Error> {
        let data = params.get("questions_data").cloned().unwrap_or(Value::Null);
        match compute_statistics(&data) {
            Ok(stats) => Ok(ToolResult::from_serialize(&stats)?),
            Err(e) => Ok(ToolResult::error(e.to_string())),
        }
    }
}
