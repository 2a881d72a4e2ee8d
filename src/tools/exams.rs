// ABOUTME: Exam-set tools - compare several exam PDFs side by side and
// ABOUTME: list the PDFs waiting in the input directory.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use super::read_pdf::ReadPdfTool;
use crate::config::PathConfig;
use crate::tool::{Tool, ToolResult};

/// Per-exam summary in a comparison.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExamSummary {
    /// Base name of the PDF, whatever path the caller passed.
    pub file: String,
    pub page_count: usize,
    pub content_length: usize,
}

/// Tool that reads several exams and reports their size.
#[derive(Debug, Clone)]
pub struct CompareExamsTool {
    reader: ReadPdfTool,
}

impl CompareExamsTool {
    pub fn new(paths: PathConfig) -> Self {
        Self {
            reader: ReadPdfTool::new(paths),
        }
    }

    /// Summaries for every exam that could be read. Unreadable files are
    /// skipped.
    pub fn compare(&self, exam_files: &[String]) -> Vec<ExamSummary> {
        exam_files
            .iter()
            .filter_map(|file| match self.reader.read(file) {
                Ok(doc) => Some(ExamSummary {
                    content_length: doc.content.chars().count(),
                    page_count: doc.page_count,
                    file: doc.filename,
                }),
                Err(message) => {
                    warn!(file = %file, error = %message, "skipping exam");
                    None
                }
            })
            .collect()
    }
}

#[async_trait]
impl Tool for CompareExamsTool {
    fn name(&self) -> &str {
        "compare_exams"
    }

    fn description(&self) -> &str {
        "Read several exam PDFs and summarize each one for cross-year comparison."
    }

    fn schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "exam_files": {
                    "type": "array",
                    "items": {"type": "string"},
                    "description": "PDF paths to compare"
                }
            },
            "required": ["exam_files"]
        })
    }

    async fn execute(&self, params: Value) -> Result<ToolResult, anyhow::Error> {
        #[derive(Deserialize)]
        struct Params {
            #[serde(default)]
            exam_files: Vec<String>,
        }
        let params: Params = match serde_json::from_value(params) {
            Ok(p) => p,
            Err(e) => return Ok(ToolResult::error(format!("Invalid parameters: {e}"))),
        };
        if params.exam_files.is_empty() {
            return Ok(ToolResult::error("No exam files provided"));
        }

        let this = self.clone();
        let analyzed = tokio::task::spawn_blocking(move || this.compare(&params.exam_files)).await?;

        Ok(ToolResult::json(serde_json::json!({
            "total_exams": analyzed.len(),
            "exams_analyzed": analyzed,
            "message": format!("Successfully compared {} exams", analyzed.len()),
        })))
    }
}

/// Tool listing the PDFs in the input directory.
#[derive(Debug, Clone)]
pub struct ListExamsTool {
    paths: PathConfig,
}

impl ListExamsTool {
    pub fn new(paths: PathConfig) -> Self {
        Self { paths }
    }
}

#[async_trait]
impl Tool for ListExamsTool {
    fn name(&self) -> &str {
        "list_available_exams"
    }

    fn description(&self) -> &str {
        "List the exam PDFs available in the input folder."
    }

    fn schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {}
        })
    }

    async fn execute(&self, _params: Value) -> Result<ToolResult, anyhow::Error> {
        let files = match self.paths.list_input_files("pdf") {
            Ok(files) => files,
            Err(e) => return Ok(ToolResult::error(format!("Failed to list files: {e}"))),
        };

        let names: Vec<String> = files
            .iter()
            .filter_map(|p| p.file_name())
            .map(|n| n.to_string_lossy().into_owned())
            .collect();
        let paths: Vec<String> = files.iter().map(|p| p.display().to_string()).collect();

        Ok(ToolResult::json(serde_json::json!({
            "count": names.len(),
            "files": names,
            "paths": paths,
            "message": format!(
                "Found {} PDF file(s) in {} directory",
                files.len(),
                self.paths.input_dir.display()
            ),
        })))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::read_pdf::tests::write_sample_pdf;
    use serde_json::json;
    use tempfile::TempDir;

    fn paths_in(dir: &TempDir) -> PathConfig {
        let paths = PathConfig::rooted_at(dir.path());
        paths.ensure_directories().unwrap();
        paths
    }

    #[tokio::test]
    async fn test_compare_skips_unreadable_exams() {
        let dir = TempDir::new().unwrap();
        let paths = paths_in(&dir);
        write_sample_pdf(&paths.input_path("2023.pdf"), "Q1. State Newton's laws.");
        write_sample_pdf(&paths.input_path("2024.pdf"), "Q1. Derive F = ma.");

        let result = CompareExamsTool::new(paths)
            .execute(json!({"exam_files": ["2023.pdf", "missing.pdf", "2024.pdf"]}))
            .await
            .unwrap();

        assert!(!result.is_error);
        assert_eq!(result.value["total_exams"], 2);
        assert_eq!(result.value["message"], "Successfully compared 2 exams");
        let analyzed = result.value["exams_analyzed"].as_array().unwrap();
        assert_eq!(analyzed[0]["file"], "2023.pdf");
        assert_eq!(analyzed[1]["file"], "2024.pdf");
        assert_eq!(analyzed[0]["page_count"], 1);
        assert!(analyzed[0]["content_length"].as_u64().unwrap() > 0);
    }

    #[tokio::test]
    async fn test_compare_reports_base_names() {
        let dir = TempDir::new().unwrap();
        let paths = paths_in(&dir);
        let exam = paths.input_path("2023.pdf");
        write_sample_pdf(&exam, "Q1. Define momentum.");

        let result = CompareExamsTool::new(paths)
            .execute(json!({"exam_files": [exam.to_str().unwrap()]}))
            .await
            .unwrap();

        assert_eq!(result.value["exams_analyzed"][0]["file"], "2023.pdf");
    }

    #[tokio::test]
    async fn test_compare_requires_files() {
        let dir = TempDir::new().unwrap();
        let result = CompareExamsTool::new(paths_in(&dir))
            .execute(json!({"exam_files": []}))
            .await
            .unwrap();

        assert_eq!(result.value, json!({"error": "No exam files provided"}));
    }

    #[tokio::test]
    async fn test_list_available_exams() {
        let dir = TempDir::new().unwrap();
        let paths = paths_in(&dir);
        std::fs::write(paths.input_path("b.pdf"), "x").unwrap();
        std::fs::write(paths.input_path("a.pdf"), "x").unwrap();
        std::fs::write(paths.input_path("notes.txt"), "x").unwrap();

        let result = ListExamsTool::new(paths).execute(json!({})).await.unwrap();

        assert_eq!(result.value["count"], 2);
        assert_eq!(result.value["files"], json!(["a.pdf", "b.pdf"]));
        assert_eq!(result.value["paths"].as_array().unwrap().len(), 2);
        let message = result.value["message"].as_str().unwrap();
        assert!(message.starts_with("Found 2 PDF file(s) in "));
        assert!(message.ends_with(" directory"));
    }

    #[tokio::test]
    async fn test_list_empty_input_dir() {
        let dir = TempDir::new().unwrap();
        let result = ListExamsTool::new(paths_in(&dir)).execute(json!({})).await.unwrap();

        assert!(!result.is_error);
        assert_eq!(result.value["count"], 0);
    }
}
