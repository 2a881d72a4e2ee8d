// ABOUTME: ReadPdfTool - extracts page-delimited text from an exam PDF.
// ABOUTME: Bare file names are looked up in the configured input directory.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::PathConfig;
use crate::tool::{Tool, ToolResult};

/// Text extracted from one PDF.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PdfDocument {
    pub filename: String,
    /// `\n--- Page N ---\n<text>` for every page.
    pub content: String,
    pub page_count: usize,
    pub file_path: String,
}

/// Tool for reading exam PDFs.
#[derive(Debug, Clone)]
pub struct ReadPdfTool {
    paths: PathConfig,
}

impl ReadPdfTool {
    pub fn new(paths: PathConfig) -> Self {
        Self { paths }
    }

    /// Resolve and extract `file_path`, reporting failures as error
    /// messages.
    pub fn read(&self, file_path: &str) -> Result<PdfDocument, String> {
        let path = self.resolve(file_path)?;
        extract(&path).map_err(|e| format!("Failed to read PDF: {e}"))
    }

    fn resolve(&self, file_path: &str) -> Result<PathBuf, String> {
        let path = Path::new(file_path);
        if !path.is_absolute() && !path.exists() {
            let candidate = self.paths.input_path(file_path);
            if candidate.exists() {
                return Ok(candidate);
            }
            return Err(format!(
                "File not found: {file_path}. Please place exam PDFs in the '{}' folder.",
                self.paths.input_dir.display()
            ));
        }
        if !path.exists() {
            return Err(format!("File not found: {file_path}"));
        }
        Ok(path.to_path_buf())
    }
}

fn extract(path: &Path) -> Result<PdfDocument, lopdf::Error> {
    let doc = lopdf::Document::load(path)?;
    let pages = doc.get_pages();

    let mut content = String::new();
    for &page_number in pages.keys() {
        let text = doc.extract_text(&[page_number])?;
        content.push_str(&format!("\n--- Page {page_number} ---\n{text}"));
    }
    debug!(path = %path.display(), pages = pages.len(), "extracted PDF text");

    Ok(PdfDocument {
        filename: path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default(),
        content,
        page_count: pages.len(),
        file_path: path.display().to_string(),
    })
}

#[async_trait]
impl Tool for ReadPdfTool {
    fn name(&self) -> &str {
        "read_pdf_content"
    }

    fn description(&self) -> &str {
        "Extract text content from an exam PDF. Accepts a path relative to the input folder or an absolute path."
    }

    fn schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "file_path": {
                    "type": "string",
                    "description": "Path to the PDF file"
                }
            },
            "required": ["file_path"]
        })
    }

    async fn execute(&self, params: serde_json::Value) -> Result<ToolResult, anyhow::Error> {
        #[derive(Deserialize)]
        struct Params {
            file_path: String,
        }
        let params: Params = match serde_json::from_value(params) {
            Ok(p) => p,
            Err(e) => return Ok(ToolResult::error(format!("Invalid parameters: {e}"))),
        };

        match self.read(&params.file_path) {
            Ok(doc) => Ok(ToolResult::from_serialize(&doc)?),
            Err(message) => Ok(ToolResult::error(message)),
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use lopdf::content::{Content, Operation};
    use lopdf::{Document, Object, Stream, dictionary};
    use tempfile::TempDir;

    /// Write a one-page PDF with a single line of text.
    pub(crate) fn write_sample_pdf(path: &Path, text: &str) {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Courier",
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! { "F1" => font_id },
        });
        let content = Content {
            operations: vec![
                Operation::new("BT", vec![]),
                Operation::new("Tf", vec!["F1".into(), 24.into()]),
                Operation::new("Td", vec![72.into(), 720.into()]),
                Operation::new("Tj", vec![Object::string_literal(text)]),
                Operation::new("ET", vec![]),
            ],
        };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "Resources" => resources_id,
        });
        let pages = dictionary! {
            "Type" => "Pages",
            "Kids" => vec![page_id.into()],
            "Count" => 1,
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
        };
        doc.objects.insert(pages_id, Object::Dictionary(pages));
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);
        doc.save(path).unwrap();
    }

    fn tool_in(dir: &TempDir) -> ReadPdfTool {
        let paths = PathConfig::rooted_at(dir.path());
        paths.ensure_directories().unwrap();
        ReadPdfTool::new(paths)
    }

    #[tokio::test]
    async fn test_reads_pdf_from_input_dir() {
        let dir = TempDir::new().unwrap();
        let tool = tool_in(&dir);
        write_sample_pdf(&dir.path().join("input").join("physics_2024.pdf"), "Q1. Define inertia.");

        let result = tool
            .execute(serde_json::json!({"file_path": "physics_2024.pdf"}))
            .await
            .unwrap();

        assert!(!result.is_error, "{:?}", result.value);
        assert_eq!(result.value["filename"], "physics_2024.pdf");
        assert_eq!(result.value["page_count"], 1);
        assert!(result.value["content"].as_str().unwrap().starts_with("\n--- Page 1 ---\n"));
        assert!(result.value["file_path"].as_str().unwrap().ends_with("physics_2024.pdf"));
    }

    #[tokio::test]
    async fn test_missing_relative_file_mentions_input_folder() {
        let dir = TempDir::new().unwrap();
        let tool = tool_in(&dir);

        let result = tool
            .execute(serde_json::json!({"file_path": "nowhere.pdf"}))
            .await
            .unwrap();

        assert!(result.is_error);
        let message = result.value["error"].as_str().unwrap();
        assert!(message.starts_with("File not found: nowhere.pdf. Please place exam PDFs"));
    }

    #[tokio::test]
    async fn test_missing_absolute_file() {
        let dir = TempDir::new().unwrap();
        let tool = tool_in(&dir);
        let missing = dir.path().join("gone.pdf");

        let result = tool
            .execute(serde_json::json!({"file_path": missing.to_str().unwrap()}))
            .await
            .unwrap();

        assert_eq!(
            result.value["error"],
            format!("File not found: {}", missing.display())
        );
    }

    #[tokio::test]
    async fn test_unreadable_pdf() {
        let dir = TempDir::new().unwrap();
        let tool = tool_in(&dir);
        let fake = dir.path().join("input").join("mock.pdf");
        std::fs::write(&fake, "mock").unwrap();

        let result = tool
            .execute(serde_json::json!({"file_path": fake.to_str().unwrap()}))
            .await
            .unwrap();

        assert!(result.is_error);
        assert!(result.value["error"].as_str().unwrap().starts_with("Failed to read PDF:"));
    }

    #[tokio::test]
    async fn test_missing_parameter() {
        let dir = TempDir::new().unwrap();
        let result = tool_in(&dir).execute(serde_json::json!({})).await.unwrap();
        assert!(result.is_error);
    }
}
