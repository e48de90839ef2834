#![allow(dead_code)]

use std::collections::HashMap;
use std::io::Write;
use std::process::{Command, Output, Stdio};
use std::sync::Arc;

use axum::Router;
use axum::extract::State;
use axum::http::{StatusCode, Uri, header};
use axum::response::{IntoResponse, Response};
use serde_json::{Value, json};
use tempfile::TempDir;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use pokejournal::MemorySource;
use pokejournal::catalog::{CatalogItem, MoveInfo, NamedResource};
use pokejournal::config::API_URL_ENV;
use pokejournal::detail::DetailRecord;
use pokejournal::render::{FilterControl, Presenter, TooltipAnchor};

// ============================================================================
// Binary runner
// ============================================================================

/// Helper struct to run pokejournal commands in an isolated temp directory
pub struct DexTest {
    pub temp_dir: TempDir,
    api_url: Option<String>,
}

impl DexTest {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        DexTest {
            temp_dir,
            api_url: None,
        }
    }

    /// Point every command at `api_url` through the environment override
    pub fn with_api(mut self, api_url: &str) -> Self {
        self.api_url = Some(api_url.to_string());
        self
    }

    fn command(&self, args: &[&str]) -> Command {
        let mut command = Command::new(env!("CARGO_BIN_EXE_pokejournal"));
        command
            .args(args)
            .current_dir(self.temp_dir.path())
            .env_remove(API_URL_ENV)
            .env_remove("RUST_LOG");
        if let Some(url) = &self.api_url {
            command.env(API_URL_ENV, url);
        }
        command
    }

    pub fn run(&self, args: &[&str]) -> Output {
        self.command(args)
            .output()
            .expect("Failed to execute pokejournal command")
    }

    /// Run with `input` piped to stdin, then closed
    pub fn run_with_stdin(&self, args: &[&str], input: &[u8]) -> Output {
        let mut child = self
            .command(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .expect("Failed to spawn pokejournal command");
        child
            .stdin
            .take()
            .expect("stdin is piped")
            .write_all(input)
            .expect("Failed to write stdin");
        child
            .wait_with_output()
            .expect("Failed to wait for pokejournal command")
    }

    pub fn run_success(&self, args: &[&str]) -> String {
        let output = self.run(args);
        if !output.status.success() {
            panic!(
                "Command {:?} failed with status {:?}\nstdout: {}\nstderr: {}",
                args,
                output.status,
                String::from_utf8_lossy(&output.stdout),
                String::from_utf8_lossy(&output.stderr)
            );
        }
        String::from_utf8_lossy(&output.stdout).to_string()
    }

    pub fn run_failure(&self, args: &[&str]) -> String {
        let output = self.run(args);
        assert!(
            !output.status.success(),
            "Expected command {:?} to fail, but it succeeded",
            args
        );
        String::from_utf8_lossy(&output.stderr).to_string()
    }

    pub fn write_config(&self, content: &str) {
        let dir = self.temp_dir.path().join(".pokejournal");
        std::fs::create_dir_all(&dir).expect("Failed to create .pokejournal directory");
        std::fs::write(dir.join("config.yaml"), content).expect("Failed to write config");
    }

    pub fn read_config(&self) -> String {
        std::fs::read_to_string(self.temp_dir.path().join(".pokejournal").join("config.yaml"))
            .expect("Failed to read config")
    }
}

// ============================================================================
// Fixtures
// ============================================================================

/// Item JSON in the shape the remote API serves
pub fn item_json(base: &str, id: u32, name: &str, types: &[&str], moves: &[(&str, u32)]) -> Value {
    json!({
        "id": id,
        "name": name,
        "height": 7,
        "weight": 69,
        "types": types.iter().enumerate().map(|(i, t)| json!({
            "slot": i + 1,
            "type": {"name": t, "url": format!("{base}type/{t}/")}
        })).collect::<Vec<_>>(),
        "stats": [
            {"base_stat": 45, "effort": 0, "stat": {"name": "hp", "url": ""}},
            {"base_stat": 49, "effort": 0, "stat": {"name": "attack", "url": ""}}
        ],
        "abilities": [
            {"ability": {"name": "overgrow", "url": format!("{base}ability/overgrow/")}, "is_hidden": false, "slot": 1}
        ],
        "moves": moves.iter().map(|(m, level)| json!({
            "move": {"name": m, "url": format!("{base}move/{m}/")},
            "version_group_details": [
                {"level_learned_at": level, "move_learn_method": {"name": "level-up", "url": ""}, "version_group": {"name": "red-blue", "url": ""}}
            ]
        })).collect::<Vec<_>>(),
        "sprites": {
            "front_default": format!("{base}sprites/{id}.png"),
            "other": {"official-artwork": {"front_default": null}}
        }
    })
}

/// An item addressed like [`MemorySource`] records, with level-up `moves`
pub fn item_with_moves(id: u32, name: &str, types: &[&str], moves: &[(&str, u32)]) -> CatalogItem {
    serde_json::from_value(item_json(MemorySource::BASE, id, name, types, moves))
        .expect("fixture item deserializes")
}

pub fn item(id: u32, name: &str, types: &[&str]) -> CatalogItem {
    item_with_moves(id, name, types, &[])
}

pub fn move_info(name: &str, power: Option<u32>, class: &str) -> MoveInfo {
    MoveInfo {
        name: name.to_string(),
        power,
        accuracy: Some(100),
        pp: Some(25),
        type_ref: Some(NamedResource::new("normal", "")),
        damage_class: Some(NamedResource::new(class, "")),
        effect_entries: Vec::new(),
    }
}

// ============================================================================
// Recording presenter
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum Shown {
    Cleared,
    Appended(Vec<u32>),
    LoadMore(bool),
    ListView,
    Detail(String),
    Summary(String),
    Tooltip(TooltipAnchor, String),
    TooltipHidden,
    Filter(FilterControl, bool),
    Notice(String),
}

/// Presenter that remembers every call
#[derive(Debug, Default)]
pub struct RecordingPresenter {
    pub shown: Vec<Shown>,
}

impl RecordingPresenter {
    /// Ids appended since the last clear
    pub fn listed(&self) -> Vec<u32> {
        let start = self
            .shown
            .iter()
            .rposition(|s| *s == Shown::Cleared)
            .map_or(0, |i| i + 1);
        self.shown[start..]
            .iter()
            .filter_map(|s| match s {
                Shown::Appended(ids) => Some(ids.clone()),
                _ => None,
            })
            .flatten()
            .collect()
    }

    pub fn load_more(&self) -> Option<bool> {
        self.shown.iter().rev().find_map(|s| match s {
            Shown::LoadMore(visible) => Some(*visible),
            _ => None,
        })
    }

    pub fn last_detail(&self) -> Option<&str> {
        self.shown.iter().rev().find_map(|s| match s {
            Shown::Detail(name) => Some(name.as_str()),
            _ => None,
        })
    }

    pub fn notices(&self) -> Vec<&str> {
        self.shown
            .iter()
            .filter_map(|s| match s {
                Shown::Notice(text) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn last(&self) -> Option<&Shown> {
        self.shown.last()
    }
}

impl Presenter for RecordingPresenter {
    fn clear_list(&mut self) {
        self.shown.push(Shown::Cleared);
    }

    fn append_list(&mut self, items: &[&CatalogItem]) {
        self.shown
            .push(Shown::Appended(items.iter().map(|i| i.id).collect()));
    }

    fn set_load_more(&mut self, visible: bool) {
        self.shown.push(Shown::LoadMore(visible));
    }

    fn show_list_view(&mut self) {
        self.shown.push(Shown::ListView);
    }

    fn show_detail(&mut self, record: &DetailRecord) {
        self.shown.push(Shown::Detail(record.item.name.clone()));
    }

    fn show_summary(&mut self, item: &CatalogItem) {
        self.shown.push(Shown::Summary(item.name.clone()));
    }

    fn show_tooltip(&mut self, anchor: TooltipAnchor, text: &str) {
        self.shown.push(Shown::Tooltip(anchor, text.to_string()));
    }

    fn hide_tooltip(&mut self) {
        self.shown.push(Shown::TooltipHidden);
    }

    fn set_filter_active(&mut self, control: &FilterControl, active: bool) {
        self.shown.push(Shown::Filter(control.clone(), active));
    }

    fn notice(&mut self, message: &str) {
        self.shown.push(Shown::Notice(message.to_string()));
    }
}

// ============================================================================
// Stub HTTP API
// ============================================================================

type Routes = HashMap<String, (u16, String)>;

const NOT_FOUND_BODY: &str = r#"{"detail":"Not found."}"#;

/// HTTP API answering GETs from a fixed route table.
///
/// Routes are keyed by path and query (`/api/v2/pokemon?offset=0&limit=1`).
/// Unknown routes answer 404. The server task is aborted on drop.
pub struct StubApi {
    pub base_url: String,
    server: JoinHandle<()>,
}

async fn serve_route(State(routes): State<Arc<Routes>>, uri: Uri) -> Response {
    let key = uri
        .path_and_query()
        .map_or_else(|| uri.path(), |target| target.as_str());
    let (status, body) = routes
        .get(key)
        .cloned()
        .unwrap_or_else(|| (404, NOT_FOUND_BODY.to_string()));
    let status = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, [(header::CONTENT_TYPE, "application/json")], body).into_response()
}

impl StubApi {
    /// Bind an ephemeral port and serve `routes(base_url)` on a spawned task
    pub async fn start<F>(routes: F) -> Self
    where
        F: FnOnce(&str) -> Routes,
    {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind stub server");
        let port = listener.local_addr().expect("bound address").port();
        let base_url = format!("http://127.0.0.1:{port}/api/v2/");

        let app = Router::new()
            .fallback(serve_route)
            .with_state(Arc::new(routes(&base_url)));
        let server = tokio::spawn(async move {
            axum::serve(listener, app).await.expect("stub server failed");
        });

        StubApi { base_url, server }
    }

    /// Route key for `path` below the API base
    pub fn route(path: &str) -> String {
        format!("/api/v2/{path}")
    }
}

impl Drop for StubApi {
    fn drop(&mut self) {
        self.server.abort();
    }
}
