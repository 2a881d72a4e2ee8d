// ABOUTME: The three pipeline stages under the profiler root: taxonomist,
// ABOUTME: trend spotter, and strategist.

use crate::agent::{Agent, suppress_output};
use crate::config::ProfilerConfig;

pub const TAXONOMIST: &str = "taxonomist";
pub const TREND_SPOTTER: &str = "trend_spotter";
pub const STRATEGIST: &str = "strategist";

pub const TAGGED_QUESTIONS_KEY: &str = "tagged_questions";
pub const TREND_REPORT_KEY: &str = "trend_report";
pub const FINAL_STUDY_PLAN_KEY: &str = "final_study_plan";

/// Tags every question with a topic and Bloom's level. Output hidden.
pub fn taxonomist(config: &ProfilerConfig) -> Agent {
    Agent::new(TAXONOMIST, &config.classifier_model)
        .description("Classifies educational questions by topic and cognitive difficulty.")
        .instruction(
            "For every exam question provided, output tags for 'Topic' and 'Blooms Level' \
             (Remember, Understand, Apply, Analyze). Do NOT answer the question.",
        )
        .output_key(TAGGED_QUESTIONS_KEY)
        .after_agent_callback(suppress_output)
}

/// Turns tagged questions into a shift report. Output hidden.
pub fn trend_spotter(config: &ProfilerConfig) -> Agent {
    Agent::new(TREND_SPOTTER, &config.analyzer_model)
        .description("Analyzes statistical shifts in exam data over time.")
        .instruction(
            "Analyze the tagged questions to find Frequency Shifts and Cognitive Shifts. \
             Output a 'Shift Report'.",
        )
        .output_key(TREND_REPORT_KEY)
        .after_agent_callback(suppress_output)
}

/// Writes the study plan the student sees.
pub fn strategist(config: &ProfilerConfig) -> Agent {
    Agent::new(STRATEGIST, &config.analyzer_model)
        .description("Generates actionable study plans.")
        .instruction(
            "Based on the Trend Report, tell the student EXACTLY what to study. \
             Create a Hit List, Safe Zone, and Drop List.",
        )
        .output_key(FINAL_STUDY_PLAN_KEY)
}
