// ABOUTME: Integration tests driving the profiler pipeline end to end through
// ABOUTME: the runner, with a scripted backend in place of the model API.

use std::collections::VecDeque;
use std::path::Path;
use std::sync::{Arc, Mutex};

use exam_profiler::prelude::*;
use exam_profiler::profiler::{FINAL_STUDY_PLAN_KEY, TAGGED_QUESTIONS_KEY, TREND_REPORT_KEY};
use futures::StreamExt;
use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, Stream, dictionary};
use serde_json::json;
use tempfile::TempDir;

const APP: &str = "professor_profiler";

/// Backend double replaying responses in call order.
struct ScriptedClient {
    responses: Mutex<VecDeque<Response>>,
    requests: Mutex<Vec<Request>>,
}

impl ScriptedClient {
    fn new(responses: Vec<Response>) -> Arc<Self> {
        Arc::new(Self {
            responses: Mutex::new(responses.into()),
            requests: Mutex::new(Vec::new()),
        })
    }

    fn requests(&self) -> Vec<Request> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl LlmClient for ScriptedClient {
    async fn create_message(&self, req: &Request) -> Result<Response, LlmError> {
        self.requests.lock().unwrap().push(req.clone());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| LlmError::Api {
                status: 500,
                message: "script exhausted".into(),
            })
    }

    fn supports_model(&self, model: &str) -> bool {
        model.starts_with("gemini-")
    }
}

fn write_exam_pdf(path: &Path, text: &str) {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font_id },
    });
    let content = Content {
        operations: vec![
            Operation::new("BT", vec![]),
            Operation::new("Tf", vec!["F1".into(), 12.into()]),
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
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => vec![page_id.into()],
            "Count" => 1,
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc.save(path).unwrap();
}

struct Fixture {
    _dir: TempDir,
    client: Arc<ScriptedClient>,
    runner: Runner,
    sessions: InMemorySessionService,
}

fn fixture(responses: Vec<Response>) -> Fixture {
    let dir = TempDir::new().unwrap();
    let config = ProfilerConfig {
        paths: PathConfig::rooted_at(dir.path()),
        ..ProfilerConfig::default()
    };
    config.paths.ensure_directories().unwrap();
    write_exam_pdf(
        &config.paths.input_path("physics_2024.pdf"),
        "Q1. A ball is dropped from 20 m. How long until it lands?",
    );

    let client = ScriptedClient::new(responses);
    let mut agent = build_profiler_agent(&config);
    agent.initialize(client.clone()).unwrap();

    let sessions = InMemorySessionService::new();
    let runner = Runner::new(APP, Arc::new(agent), sessions.clone());
    Fixture {
        _dir: dir,
        client,
        runner,
        sessions,
    }
}

fn pipeline_script() -> Vec<Response> {
    vec![
        Response::from_tool_call(
            "gemini-2.5-pro",
            "read_pdf_content",
            json!({"file_path": "physics_2024.pdf"}),
        ),
        Response::from_text("gemini-2.5-flash", "Q1: Topic=Kinematics, Blooms=Apply"),
        Response::from_text("gemini-2.5-pro", "Shift Report: kinematics rising"),
        Response::from_text("gemini-2.5-pro", "Hit List: kinematics. Safe Zone: optics. Drop List: none."),
    ]
}

#[tokio::test]
async fn test_full_pipeline_yields_single_final_event() {
    let fx = fixture(pipeline_script());
    fx.sessions.create_session(APP, "student", Some("s1")).await;

    let events: Vec<_> = fx
        .runner
        .run("student", "s1", Message::user("Analyze physics_2024.pdf"))
        .collect()
        .await;

    assert_eq!(events.len(), 1);
    let event = events.into_iter().next().unwrap().unwrap();
    assert!(event.is_final_response());
    assert_eq!(event.author, "professor_profiler_agent");
    assert!(event.error.is_none());

    // Suppressed stages stay out of the transcript; the strategist shows.
    assert!(event.text.starts_with("[professor_profiler_agent Initial Response]\n{"));
    assert!(event.text.contains("\"filename\":\"physics_2024.pdf\""));
    assert!(event.text.contains("--- Page 1 ---"));
    assert!(!event.text.contains("[taxonomist Response]"));
    assert!(!event.text.contains("[trend_spotter Response]"));
    assert!(event.text.ends_with(
        "\n\n[strategist Response]\nHit List: kinematics. Safe Zone: optics. Drop List: none."
    ));
}

#[tokio::test]
async fn test_stage_outputs_flow_through_context() {
    let fx = fixture(pipeline_script());
    let mut state = Context::new();
    state.insert("course", "PHYS 101");
    fx.sessions
        .create_session_with_state(APP, "student", Some("s1"), state)
        .await;

    let _ = fx
        .runner
        .run("student", "s1", Message::user("Analyze physics_2024.pdf"))
        .collect::<Vec<_>>()
        .await;

    let requests = fx.client.requests();
    assert_eq!(requests.len(), 4);
    let models: Vec<_> = requests.iter().map(|r| r.model.as_str()).collect();
    assert_eq!(
        models,
        vec!["gemini-2.5-pro", "gemini-2.5-flash", "gemini-2.5-pro", "gemini-2.5-pro"]
    );

    let root_prompt = requests[0].prompt().unwrap();
    assert_eq!(
        root_prompt,
        "Analyze physics_2024.pdf\n\nContext:\n- course: PHYS 101\n"
    );
    assert_eq!(requests[0].tools.len(), 1);
    assert!(requests[1].tools.is_empty());

    // Every stage is prompted with the root's initial response.
    for request in &requests[1..] {
        assert!(request.prompt().unwrap().starts_with("{\"filename\":\"physics_2024.pdf\""));
    }
    let spotter_prompt = requests[2].prompt().unwrap();
    assert!(spotter_prompt.contains(&format!(
        "- {TAGGED_QUESTIONS_KEY}: Q1: Topic=Kinematics, Blooms=Apply\n"
    )));
    let strategist_prompt = requests[3].prompt().unwrap();
    assert!(strategist_prompt.contains(&format!(
        "- {TREND_REPORT_KEY}: Shift Report: kinematics rising\n"
    )));
    assert!(!strategist_prompt.contains(FINAL_STUDY_PLAN_KEY));

    // Each invocation works on its own copy of the session state.
    let session = fx.sessions.get_session(APP, "student", "s1").await.unwrap();
    assert_eq!(session.state.len(), 1);
    assert_eq!(session.state.get_str("course"), Some("PHYS 101"));
}

#[tokio::test]
async fn test_unknown_session_fails_without_calling_backend() {
    let fx = fixture(pipeline_script());

    let mut stream = fx.runner.run("student", "missing", Message::user("hello"));
    let first = stream.next().await.unwrap();

    assert!(matches!(
        first,
        Err(RunnerError::SessionNotFound { ref session, .. }) if session == "missing"
    ));
    assert!(stream.next().await.is_none());
    assert!(fx.client.requests().is_empty());
}

#[tokio::test]
async fn test_message_without_text_is_rejected() {
    let fx = fixture(pipeline_script());
    fx.sessions.create_session(APP, "student", Some("s1")).await;

    let message = Message {
        role: Role::User,
        content: vec![ContentBlock::tool_use("read_pdf_content", json!({}))],
    };
    let events: Vec<_> = fx.runner.run("student", "s1", message).collect().await;

    assert_eq!(events.len(), 1);
    assert!(matches!(events[0], Err(RunnerError::EmptyMessage)));
    assert!(fx.client.requests().is_empty());
}

#[tokio::test]
async fn test_stream_is_lazy() {
    let fx = fixture(pipeline_script());
    fx.sessions.create_session(APP, "student", Some("s1")).await;

    let stream = fx.runner.run("student", "s1", Message::user("hello"));
    assert!(fx.client.requests().is_empty());
    drop(stream);
    assert!(fx.client.requests().is_empty());
}

#[tokio::test]
async fn test_backend_failure_surfaces_in_final_event() {
    let fx = fixture(Vec::new());
    fx.sessions.create_session(APP, "student", Some("s1")).await;

    let events: Vec<_> = fx
        .runner
        .run("student", "s1", Message::user("Analyze physics_2024.pdf"))
        .collect()
        .await;

    let event = events.into_iter().next().unwrap().unwrap();
    assert!(event.is_final_response());
    assert_eq!(event.text, "");
    assert_eq!(event.error.as_deref(), Some("API error (500): script exhausted"));
    // Sub-agents never ran.
    assert_eq!(fx.client.requests().len(), 1);
}

#[tokio::test]
async fn test_missing_exam_is_reported_to_the_pipeline() {
    let fx = fixture(vec![
        Response::from_tool_call(
            "gemini-2.5-pro",
            "read_pdf_content",
            json!({"file_path": "chemistry_2019.pdf"}),
        ),
        Response::from_text("gemini-2.5-flash", "no questions"),
        Response::from_text("gemini-2.5-pro", "no shifts"),
        Response::from_text("gemini-2.5-pro", "Upload the exam first."),
    ]);
    fx.sessions.create_session(APP, "student", Some("s1")).await;

    let events: Vec<_> = fx
        .runner
        .run("student", "s1", Message::user("Analyze chemistry_2019.pdf"))
        .collect()
        .await;

    let event = events.into_iter().next().unwrap().unwrap();
    assert!(event.error.is_none());
    assert!(event.text.contains("File not found: chemistry_2019.pdf. Please place exam PDFs"));
}

#[tokio::test]
async fn test_tools_compose_statistics_into_chart() {
    let dir = TempDir::new().unwrap();
    let paths = PathConfig::rooted_at(dir.path());

    let stats = AnalyzeStatisticsTool
        .execute(json!({"questions_data": json!([
            {"topic": "Kinematics", "bloom_level": "Apply"},
            {"topic": "Kinematics", "bloom_level": "Remember"},
            {"topic": "Optics", "bloom_level": "Analyze"}
        ]).to_string()}))
        .await
        .unwrap();
    assert!(!stats.is_error);
    assert_eq!(stats.value["cognitive_complexity"]["higher_order"], 2);

    let chart = VisualizeTrendsTool::new(paths.clone())
        .execute(json!({"statistics": stats.to_json_string().unwrap(), "chart_type": "pie"}))
        .await
        .unwrap();
    assert!(!chart.is_error, "{:?}", chart.value);
    assert!(paths.charts_dir().join("trends_chart.svg").exists());
}
