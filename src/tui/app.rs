use crate::error::QueryError;
use crate::query::{Operation, ProcessRunner, QuerySession, Runner, Selection};
use crate::tui::list::SelectableList;
use crate::utils::AppConfig;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Status shown for any failed query
pub const QUERY_FAILED: &str = "cscope query failed";

/// What the minibuffer is asking for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
    Query(Operation),
    Directory,
}

impl PromptKind {
    pub fn label(self) -> &'static str {
        match self {
            PromptKind::Query(op) => op.prompt(),
            PromptKind::Directory => "Symbol File Directory: ",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub kind: PromptKind,
    pub input: String,
}

/// Follow-up the event loop has to carry out
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    None,
    Open(Selection),
}

/// Application state
pub struct App<R: Runner = ProcessRunner> {
    session: QuerySession<R>,
    pub editor: String,
    /// Result pane below the editor view (true) or beside it (false)
    pub split_horizontal: bool,
    pub results_visible: bool,
    pub list: SelectableList,
    pub prompt: Option<Prompt>,
    pub status_message: String,
    pub preview_content: Option<String>,
    /// Path of the currently previewed file
    pub preview_path: Option<PathBuf>,
    pub preview_scroll: usize,
}

impl App<ProcessRunner> {
    pub fn new(config: &AppConfig) -> Self {
        let session = QuerySession::new(config.tool.clone(), config.database_file.clone());
        Self::with_session(session, config)
    }
}

impl<R: Runner> App<R> {
    pub fn with_session(session: QuerySession<R>, config: &AppConfig) -> Self {
        let mut app = Self {
            session,
            editor: config.effective_editor(),
            split_horizontal: config.split_horizontal,
            results_visible: false,
            list: SelectableList::default(),
            prompt: None,
            status_message: "F12: set symbol directory, F2: find symbol, F3: find definition"
                .to_string(),
            preview_content: None,
            preview_path: None,
            preview_scroll: 0,
        };

        if let Some(ref dir) = config.index_directory {
            app.set_index_directory(dir);
        }

        app
    }

    pub fn session(&self) -> &QuerySession<R> {
        &self.session
    }

    pub fn index_directory(&self) -> Option<&Path> {
        self.session.index_directory()
    }

    pub fn open_prompt(&mut self, kind: PromptKind) {
        self.prompt = Some(Prompt {
            kind,
            input: String::new(),
        });
    }

    pub fn cancel_prompt(&mut self) {
        self.prompt = None;
    }

    pub fn prompt_push(&mut self, c: char) {
        if let Some(ref mut prompt) = self.prompt {
            prompt.input.push(c);
        }
    }

    pub fn prompt_pop(&mut self) {
        if let Some(ref mut prompt) = self.prompt {
            prompt.input.pop();
        }
    }

    /// Delete word backward from the prompt input (Ctrl+w)
    pub fn prompt_delete_word(&mut self) {
        if let Some(ref mut prompt) = self.prompt {
            let trimmed = prompt.input.trim_end_matches(' ').len();
            prompt.input.truncate(trimmed);
            let word_start = prompt.input.rfind(' ').map(|i| i + 1).unwrap_or(0);
            prompt.input.truncate(word_start);
        }
    }

    /// Close the prompt and act on its input
    pub fn submit_prompt(&mut self) {
        let Some(Prompt { kind, input }) = self.prompt.take() else {
            return;
        };

        match kind {
            PromptKind::Directory => self.set_index_directory(&input),
            PromptKind::Query(_) if input.is_empty() => {
                self.status_message = "No symbol given".to_string();
            }
            PromptKind::Query(op) => self.run_query(op, &input),
        }
    }

    pub fn set_index_directory(&mut self, candidate: &str) {
        self.status_message = match self.session.set_index_directory(candidate) {
            Ok(dir) => format!("Symbol directory: {}", dir.display()),
            Err(e) => e.to_string(),
        };
    }

    /// Run a query and show its results. On failure the pane keeps showing
    /// whatever the previous query returned.
    pub fn run_query(&mut self, operation: Operation, symbol: &str) {
        match self.session.execute_query(operation, symbol) {
            Ok(results) => {
                let count = results.len();
                self.status_message = format!(
                    "{} {} for {} '{}'",
                    count,
                    if count == 1 { "match" } else { "matches" },
                    operation,
                    symbol
                );
                self.list.reset(count);
                self.results_visible = true;
                self.update_preview();
            }
            Err(QueryError::NoIndexDirectory) => {
                self.status_message = format!("{QUERY_FAILED}: no symbol directory (F12)");
            }
            Err(_) => {
                self.status_message = QUERY_FAILED.to_string();
            }
        }
    }

    /// Hide the result pane; the results themselves are kept
    pub fn close_results(&mut self) {
        self.results_visible = false;
    }

    /// Location of the highlighted record, if the pane is showing one
    pub fn select_current(&self) -> Action {
        if !self.results_visible {
            return Action::None;
        }
        self.list
            .selected()
            .and_then(|i| self.session.select_record(i))
            .map_or(Action::None, Action::Open)
    }

    pub fn select_next(&mut self) {
        self.list.select_next();
        self.update_preview();
    }

    pub fn select_prev(&mut self) {
        self.list.select_prev();
        self.update_preview();
    }

    pub fn select_page_down(&mut self) {
        self.list.select_page_down();
        self.update_preview();
    }

    pub fn select_page_up(&mut self) {
        self.list.select_page_up();
        self.update_preview();
    }

    pub fn select_first(&mut self) {
        self.list.select_first();
        self.update_preview();
    }

    pub fn select_last(&mut self) {
        self.list.select_last();
        self.update_preview();
    }

    pub fn update_preview(&mut self) {
        let selection = self
            .list
            .selected()
            .and_then(|i| self.session.select_record(i));

        match selection {
            Some(sel) => {
                if self.preview_path.as_ref() != Some(&sel.path) {
                    self.preview_content = std::fs::read_to_string(&sel.path)
                        .ok()
                        .map(|s| expand_tabs(&s));
                }
                // Scroll to show the match
                self.preview_scroll = (sel.line as usize).saturating_sub(5);
                self.preview_path = Some(sel.path);
            }
            None => {
                self.preview_content = None;
                self.preview_path = None;
            }
        }
    }

    pub fn selected_line(&self) -> Option<u32> {
        self.list
            .selected()
            .and_then(|i| self.session.records().get(i))
            .map(|r| r.line)
    }
}

/// Build the command that opens `selection` in `editor`.
///
/// `editor` may carry its own arguments (`"emacs -nw"`); `+<line>` and the
/// path are appended, which vi, emacs, nano and their relatives accept.
pub fn editor_command(editor: &str, selection: &Selection) -> Option<Command> {
    let mut parts = editor.split_whitespace();
    let mut cmd = Command::new(parts.next()?);
    cmd.args(parts)
        .arg(format!("+{}", selection.line))
        .arg(&selection.path);
    Some(cmd)
}

/// Expand tabs to spaces with a tab width of 4.
/// This ensures consistent rendering in the terminal where tab stops vary.
fn expand_tabs(s: &str) -> String {
    const TAB_WIDTH: usize = 4;

    let mut result = String::with_capacity(s.len());
    let mut column = 0;

    for c in s.chars() {
        match c {
            '\t' => {
                let spaces = TAB_WIDTH - (column % TAB_WIDTH);
                result.extend(std::iter::repeat_n(' ', spaces));
                column += spaces;
            }
            '\n' | '\r' => {
                result.push(c);
                column = 0;
            }
            _ => {
                result.push(c);
                column += 1;
            }
        }
    }

    result
}
