// ABOUTME: Built-in tools for exam analysis.
// ABOUTME: PDF ingestion, question statistics, charting, and exam-set helpers.

mod chart;
mod exams;
mod read_pdf;
mod statistics;

pub use chart::{ChartType, Distributions, VisualizeTrendsTool, render as render_chart};
pub use exams::{CompareExamsTool, ExamSummary, ListExamsTool};
pub use read_pdf::{PdfDocument, ReadPdfTool};
pub use statistics::{
    AnalyzeStatisticsTool, CognitiveComplexity, QuestionStatistics, StatisticsError,
    compute_statistics,
};
