//! AI assistance for tasks and notebooks, backed by a local Ollama model.
//!
//! Entities are rendered in a compact, token-oriented object notation
//! (`TASK_OBJECT { .. }`, `NOTEBOOK_OBJECT { .. }`) and wrapped in a fixed
//! prompt naming the action and the JSON shape the model has to answer with.
//! The model's reply is parsed back into a JSON object; a reply that is not
//! one is reported together with the raw text.

use crate::error::{DomainErrorKind, Error, ExternalErrorKind};
use crate::gateway::ollama::OllamaClient;
use crate::notebooks::NotebookWithPages;
use crate::{tasks, Id};
use entity_api::notebook;
use log::*;
use sea_orm::DatabaseConnection;
use serde_json::{json, Value};
use std::fmt::{self, Write};

const PREVIEW_CHARS: usize = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    EnhanceTask,
    SuggestBreakdown,
    AnalyzeNotebook,
    GeneratePageIdeas,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::EnhanceTask => "enhance_task",
            Action::SuggestBreakdown => "suggest_breakdown",
            Action::AnalyzeNotebook => "analyze_notebook",
            Action::GeneratePageIdeas => "generate_page_ideas",
        }
    }

    fn request(&self) -> &'static str {
        match self {
            Action::EnhanceTask => {
                "Analyze this task and suggest improvements for better productivity"
            }
            Action::SuggestBreakdown => "Break down this task into smaller, actionable subtasks",
            Action::AnalyzeNotebook => {
                "Analyze this notebook and provide insights, topics, and suggestions"
            }
            Action::GeneratePageIdeas => {
                "Based on the existing pages, suggest new page ideas that would complement this notebook"
            }
        }
    }

    fn response_format(&self) -> &'static str {
        match self {
            Action::EnhanceTask => {
                r#"{"title": "...", "description": "...", "priority": "...", "quadrant": "...", "tags": [...], "suggestions": "..."}"#
            }
            Action::SuggestBreakdown => {
                r#"{"subtasks": [{"title": "...", "description": "...", "priority": "..."}], "reasoning": "..."}"#
            }
            Action::AnalyzeNotebook => {
                r#"{"summary": "...", "topics": [...], "suggestions": [...], "key_insights": [...]}"#
            }
            Action::GeneratePageIdeas => {
                r#"{"ideas": [{"title": "...", "description": "...", "relevance": "..."}]}"#
            }
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Asks the model to improve a task. Returns `{"enhanced": .., "original": ..}`.
pub async fn enhance_task(client: &OllamaClient, task: tasks::Model) -> Result<Value, Error> {
    let enhanced = run(client, Action::EnhanceTask, &task_to_toon(&task)).await?;
    Ok(json!({ "enhanced": enhanced, "original": task }))
}

pub async fn suggest_breakdown(client: &OllamaClient, task: &tasks::Model) -> Result<Value, Error> {
    run(client, Action::SuggestBreakdown, &task_to_toon(task)).await
}

pub async fn analyze_notebook(
    db: &DatabaseConnection,
    client: &OllamaClient,
    notebook_id: Id,
) -> Result<Value, Error> {
    let notebook = notebook::find_by_id(db, notebook_id).await?;
    run(client, Action::AnalyzeNotebook, &notebook_to_toon(&notebook)).await
}

pub async fn generate_page_ideas(
    db: &DatabaseConnection,
    client: &OllamaClient,
    notebook_id: Id,
) -> Result<Value, Error> {
    let notebook = notebook::find_by_id(db, notebook_id).await?;
    run(client, Action::GeneratePageIdeas, &notebook_to_toon(&notebook)).await
}

async fn run(client: &OllamaClient, action: Action, toon: &str) -> Result<Value, Error> {
    info!("Running AI action {action} with model {}", client.model());
    let reply = client.generate(&build_prompt(action, toon)).await?;
    parse_reply(&reply)
}

pub fn task_to_toon(task: &tasks::Model) -> String {
    let mut toon = String::from("TASK_OBJECT {\n");
    // Writing into a String cannot fail
    let _ = writeln!(toon, "  title: \"{}\"", task.title);
    let _ = writeln!(toon, "  description: \"{}\"", task.description);
    let _ = writeln!(toon, "  priority: {}", task.priority);
    let _ = writeln!(toon, "  status: {}", task.status);
    let _ = writeln!(toon, "  quadrant: {}", task.quadrant);
    if let Some(due_date) = &task.due_date {
        let _ = writeln!(toon, "  due_date: \"{}\"", due_date.format("%Y-%m-%d"));
    }
    if !task.tags.is_empty() {
        let _ = writeln!(toon, "  tags: {}", task.tags);
    }
    toon.push('}');
    toon
}

pub fn notebook_to_toon(notebook_with_pages: &NotebookWithPages) -> String {
    let NotebookWithPages { notebook, pages } = notebook_with_pages;

    let mut toon = String::from("NOTEBOOK_OBJECT {\n");
    let _ = writeln!(toon, "  name: \"{}\"", notebook.name);
    let _ = writeln!(toon, "  tags: {}", notebook.tags);
    let _ = writeln!(toon, "  is_pinned: {}", notebook.is_pinned);
    let _ = writeln!(toon, "  page_count: {}", pages.len());

    if !pages.is_empty() {
        toon.push_str("  pages: [\n");
        for (index, page) in pages.iter().enumerate() {
            let _ = writeln!(toon, "    PAGE_{} {{", index + 1);
            let _ = writeln!(toon, "      title: \"{}\"", page.title);
            let _ = writeln!(toon, "      content_preview: \"{}\"", preview(&page.content));
            toon.push_str("    }\n");
        }
        toon.push_str("  ]\n");
    }

    toon.push('}');
    toon
}

fn preview(content: &str) -> String {
    match content.char_indices().nth(PREVIEW_CHARS) {
        Some((cut, _)) => format!("{}...", &content[..cut]),
        None => content.to_owned(),
    }
}

pub fn build_prompt(action: Action, toon: &str) -> String {
    format!(
        "You are Tonish AI Assistant, specialized in task management and productivity.\n\
         Action requested: {action}\n\n\
         Input data in TOON format:\n\
         {toon}\n\n\
         Additional context:\n  \
         request: {request}\n\n\
         Please respond with valid JSON only. No markdown, no explanation.\n\
         Response format: {format}",
        request = action.request(),
        format = action.response_format(),
    )
}

/// Extracts the JSON object from a model reply, tolerating a surrounding
/// markdown code fence.
pub fn parse_reply(reply: &str) -> Result<Value, Error> {
    let trimmed = reply.trim();
    let unfenced = trimmed.strip_prefix("```json").unwrap_or(trimmed);
    let unfenced = unfenced.strip_prefix("```").unwrap_or(unfenced);
    let unfenced = unfenced.strip_suffix("```").unwrap_or(unfenced).trim();

    match serde_json::from_str::<serde_json::Map<String, Value>>(unfenced) {
        Ok(object) => Ok(Value::Object(object)),
        Err(err) => {
            warn!("Model reply is not a JSON object: {err}");
            Err(Error {
                source: Some(Box::new(err)),
                error_kind: DomainErrorKind::External(ExternalErrorKind::InvalidResponse(
                    reply.to_owned(),
                )),
            })
        }
    }
}

/// Reports whether the model server is reachable.
pub async fn health(client: &OllamaClient) -> Result<(), Error> {
    client.health_check().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{notebooks, pages, priority::Priority, task_status::TaskStatus};
    use chrono::{TimeZone, Utc};
    use clap::Parser;
    use mockito::{Matcher, Server};
    use service::config::Config;

    fn task() -> tasks::Model {
        let mut task: tasks::Model =
            serde_json::from_value(json!({"title": "Write report"})).unwrap();
        task.description = "Quarterly numbers".to_owned();
        task.priority = Priority::High;
        task.status = TaskStatus::InProgress;
        task.quadrant = "urgent-important".to_owned();
        task
    }

    fn notebook(pages: Vec<pages::Model>) -> NotebookWithPages {
        let now = Utc::now();
        NotebookWithPages::new(
            notebooks::Model {
                id: 1,
                name: "Research".to_owned(),
                tags: r#"["work"]"#.to_owned(),
                is_pinned: true,
                created_at: now.into(),
                updated_at: now.into(),
                user_id: 0,
            },
            pages,
        )
    }

    fn page(title: &str, content: &str) -> pages::Model {
        let now = Utc::now();
        pages::Model {
            id: 1,
            notebook_id: 1,
            title: title.to_owned(),
            content: content.to_owned(),
            tags: String::new(),
            is_pinned: false,
            created_at: now.into(),
            updated_at: now.into(),
        }
    }

    #[test]
    fn task_toon_lists_fields_and_skips_empty_optionals() {
        assert_eq!(
            task_to_toon(&task()),
            "TASK_OBJECT {\n  title: \"Write report\"\n  description: \"Quarterly numbers\"\n  \
             priority: high\n  status: in-progress\n  quadrant: urgent-important\n}"
        );
    }

    #[test]
    fn task_toon_includes_due_date_and_tags_when_present() {
        let mut task = task();
        task.due_date = Some(Utc.with_ymd_and_hms(2025, 3, 9, 15, 30, 0).unwrap().into());
        task.tags = r#"["finance"]"#.to_owned();

        let toon = task_to_toon(&task);

        assert!(toon.contains("  due_date: \"2025-03-09\"\n"));
        assert!(toon.ends_with("  tags: [\"finance\"]\n}"));
    }

    #[test]
    fn notebook_toon_truncates_long_page_content() {
        let long = "x".repeat(250);
        let toon = notebook_to_toon(&notebook(vec![page("Intro", "short"), page("Dump", &long)]));

        assert!(toon.starts_with("NOTEBOOK_OBJECT {\n  name: \"Research\"\n"));
        assert!(toon.contains("  is_pinned: true\n  page_count: 2\n  pages: [\n"));
        assert!(toon.contains("    PAGE_1 {\n      title: \"Intro\"\n      content_preview: \"short\"\n"));
        assert!(toon.contains(&format!("      content_preview: \"{}...\"\n", "x".repeat(200))));
    }

    #[test]
    fn notebook_toon_without_pages_has_no_page_list() {
        let toon = notebook_to_toon(&notebook(Vec::new()));
        assert!(toon.ends_with("  page_count: 0\n}"));
    }

    #[test]
    fn preview_counts_characters_not_bytes() {
        let accented = "é".repeat(201);
        assert_eq!(preview(&accented), format!("{}...", "é".repeat(200)));
    }

    #[test]
    fn prompt_names_the_action_and_response_shape() {
        let prompt = build_prompt(Action::SuggestBreakdown, "TASK_OBJECT {\n}");

        assert!(prompt.starts_with(
            "You are Tonish AI Assistant, specialized in task management and productivity.\n\
             Action requested: suggest_breakdown\n\nInput data in TOON format:\nTASK_OBJECT {\n}\n\n"
        ));
        assert!(prompt.contains(
            "Additional context:\n  request: Break down this task into smaller, actionable subtasks\n\n"
        ));
        assert!(prompt.ends_with(r#"Response format: {"subtasks": [{"title": "...", "description": "...", "priority": "..."}], "reasoning": "..."}"#));
    }

    #[test]
    fn parse_reply_accepts_fenced_json() {
        let parsed = parse_reply("  ```json\n{\"summary\": \"ok\"}\n```  ").unwrap();
        assert_eq!(parsed, json!({"summary": "ok"}));

        let parsed = parse_reply("```\n{\"ideas\": []}\n```").unwrap();
        assert_eq!(parsed, json!({"ideas": []}));
    }

    #[test]
    fn parse_reply_keeps_the_raw_text_on_failure() {
        let err = parse_reply("Sure! Here are some ideas").unwrap_err();
        assert_eq!(
            err.error_kind,
            DomainErrorKind::External(ExternalErrorKind::InvalidResponse(
                "Sure! Here are some ideas".to_owned()
            ))
        );

        // arrays are valid JSON but not an object
        assert!(parse_reply("[1, 2]").is_err());
    }

    #[tokio::test]
    async fn enhance_task_returns_enhanced_and_original() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/api/generate")
            .match_body(Matcher::Regex("Action requested: enhance_task".to_owned()))
            .with_status(200)
            .with_body(
                json!({"response": "```json\n{\"title\": \"Write Q3 report\"}\n```"}).to_string(),
            )
            .create_async()
            .await;
        let config = Config::try_parse_from(["tonish"])
            .unwrap()
            .set_ollama_url(server.url());
        let client = OllamaClient::new(&config).unwrap();

        let result = enhance_task(&client, task()).await.unwrap();

        assert_eq!(result["enhanced"]["title"], "Write Q3 report");
        assert_eq!(result["original"]["title"], "Write report");
    }
}
