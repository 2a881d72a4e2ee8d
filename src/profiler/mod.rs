// ABOUTME: Professor-profiler pipeline - the root orchestrator that ingests
// ABOUTME: exam PDFs and hands off to the classification and planning stages.

mod sub_agents;

pub use sub_agents::{
    FINAL_STUDY_PLAN_KEY, STRATEGIST, TAGGED_QUESTIONS_KEY, TAXONOMIST, TREND_REPORT_KEY,
    TREND_SPOTTER, strategist, taxonomist, trend_spotter,
};

use crate::agent::Agent;
use crate::config::ProfilerConfig;
use crate::tools::ReadPdfTool;

pub const ROOT_AGENT: &str = "professor_profiler_agent";

/// Build the full pipeline: the root on the analyzer model with the PDF
/// reader, followed by taxonomist, trend spotter, and strategist.
///
/// The instruction is stamped with the local time at build.
pub fn build_profiler_agent(config: &ProfilerConfig) -> Agent {
    let now = chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.6f");

    Agent::new(ROOT_AGENT, &config.analyzer_model)
        .description(
            "Main orchestrator. Ingests PDFs, classifies questions, finds trends, and creates study plans.",
        )
        .instruction(format!(
            "Workflow: 1. Ingest PDF. 2. Classify via taxonomist. 3. Analyze via trend_spotter. \
             4. Recommend via strategist. Current date: {now}"
        ))
        .tool(ReadPdfTool::new(config.paths.clone()))
        .sub_agents([taxonomist(config), trend_spotter(config), strategist(config)])
}
