use std::path::Path;

use ratatui::layout::Rect;
use ratatui::widgets::TableState;
use tokio::task::JoinHandle;

use crate::api::StudioClient;
use crate::config::Config;
use crate::form::{self, ScriptFile, VideoForm};
use crate::login::{AuthTab, LoginScreen};
use crate::notify::{NotificationSink, Toast, Toasts};
use crate::project::{Project, ProjectStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Page {
    Overview,
    #[default]
    Create,
    Projects,
}

impl Page {
    pub fn all() -> [Page; 3] {
        [Page::Overview, Page::Create, Page::Projects]
    }

    pub fn label(&self) -> &'static str {
        match self {
            Page::Overview => "Dashboard",
            Page::Create => "Create Video",
            Page::Projects => "Projects",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Editing,
}

/// Focusable rows of the create form, top to bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormField {
    #[default]
    Source,
    Content,
    Style,
    Language,
    Voice,
    VisualStyle,
    Submit,
}

impl FormField {
    const ORDER: [FormField; 7] = [
        FormField::Source,
        FormField::Content,
        FormField::Style,
        FormField::Language,
        FormField::Voice,
        FormField::VisualStyle,
        FormField::Submit,
    ];

    pub fn next(self) -> Self {
        let i = Self::ORDER.iter().position(|f| *f == self).unwrap_or(0);
        Self::ORDER[(i + 1) % Self::ORDER.len()]
    }

    pub fn prev(self) -> Self {
        let i = Self::ORDER.iter().position(|f| *f == self).unwrap_or(0);
        Self::ORDER[(i + Self::ORDER.len() - 1) % Self::ORDER.len()]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CreateFocus {
    #[default]
    Form,
    Preview,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PreviewTab {
    #[default]
    Script,
    Audio,
    Visual,
    Video,
}

impl PreviewTab {
    pub fn all() -> [PreviewTab; 4] {
        [
            PreviewTab::Script,
            PreviewTab::Audio,
            PreviewTab::Visual,
            PreviewTab::Video,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            PreviewTab::Script => "Script",
            PreviewTab::Audio => "Audio",
            PreviewTab::Visual => "Visual",
            PreviewTab::Video => "Video",
        }
    }

    pub fn next(self) -> Self {
        let all = Self::all();
        let i = all.iter().position(|t| *t == self).unwrap_or(0);
        all[(i + 1) % all.len()]
    }

    pub fn prev(self) -> Self {
        let all = Self::all();
        let i = all.iter().position(|t| *t == self).unwrap_or(0);
        all[(i + all.len() - 1) % all.len()]
    }
}

/// Which mocked auth flow is in flight, so its completion can route to the
/// right follow-up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthAction {
    SignIn,
    Register,
    Forgot,
}

pub struct App {
    // Core state
    pub should_quit: bool,
    pub page: Page,
    pub show_login: bool,
    pub input_mode: InputMode,

    // Create page
    pub form: VideoForm,
    pub form_focus: FormField,
    pub create_focus: CreateFocus,
    pub show_file_picker: bool,
    pub file_input: String,
    pub preview_tab: PreviewTab,
    pub preview_scroll: u16,
    pub current_project: Option<Project>,
    /// Busy flag owned here, not by the form; it gates the submit control.
    pub is_generating: bool,
    pub is_refreshing: bool,

    // Projects page
    pub projects: ProjectStore,
    pub project_search: String,
    pub project_page: usize,
    pub table_state: TableState,
    pub detail_project: Option<Project>,

    // Account screen
    pub login: LoginScreen,
    pub auth_busy: bool,
    auth_action: Option<AuthAction>,

    // Notifications
    pub toasts: Toasts,

    // In-flight work, applied by drain_tasks on the event loop
    pub fetch_task: Option<JoinHandle<anyhow::Result<String>>>,
    pub generate_task: Option<JoinHandle<anyhow::Result<Project>>>,
    pub auth_task: Option<JoinHandle<anyhow::Result<()>>>,
    pub refresh_task: Option<JoinHandle<anyhow::Result<()>>>,

    pub api: StudioClient,
    pub config: Config,
    pub animation_frame: u8,

    // Panel areas for mouse hit-testing (updated during render)
    pub sidebar_area: Option<Rect>,
    pub form_area: Option<Rect>,
    pub preview_area: Option<Rect>,
    pub table_area: Option<Rect>,
}

impl App {
    pub fn new(config: Config) -> Self {
        let mut table_state = TableState::default();
        table_state.select(Some(0));

        Self {
            should_quit: false,
            page: Page::default(),
            show_login: false,
            input_mode: InputMode::Normal,

            form: VideoForm::new(config.form_options()),
            form_focus: FormField::default(),
            create_focus: CreateFocus::default(),
            show_file_picker: false,
            file_input: String::new(),
            preview_tab: PreviewTab::default(),
            preview_scroll: 0,
            current_project: None,
            is_generating: false,
            is_refreshing: false,

            projects: ProjectStore::with_mock_data(),
            project_search: String::new(),
            project_page: 1,
            table_state,
            detail_project: None,

            login: LoginScreen::default(),
            auth_busy: false,
            auth_action: None,

            toasts: Toasts::new(),

            fetch_task: None,
            generate_task: None,
            auth_task: None,
            refresh_task: None,

            api: StudioClient::new(),
            config,
            animation_frame: 0,

            sidebar_area: None,
            form_area: None,
            preview_area: None,
            table_area: None,
        }
    }

    pub fn busy(&self) -> bool {
        self.is_generating
            || self.is_refreshing
            || self.auth_busy
            || self.fetch_task.is_some()
    }

    /// Tick animation frame (called by the Tick event); also ages toasts.
    pub fn tick(&mut self) {
        if self.busy() {
            self.animation_frame = (self.animation_frame + 1) % 3;
        }
        self.toasts.tick();
    }

    pub fn select_page(&mut self, page: Page) {
        self.page = page;
        self.input_mode = InputMode::Normal;
    }

    // ── Create page ────────────────────────────────────────────────────

    /// Start the remote fetch for the URL draft. No-op while a fetch is in
    /// flight or the URL is empty or malformed.
    pub fn start_fetch(&mut self) {
        if !self.form.begin_fetch() {
            return;
        }
        let api = self.api.clone();
        let url = self.form.script_url.clone();
        tracing::info!(url = %url, "fetching remote script");
        self.fetch_task = Some(tokio::spawn(async move { api.fetch_script(&url).await }));
    }

    /// Validate and submit the form. The busy flag gates re-entry while a
    /// generation request is pending.
    pub fn submit_form(&mut self) {
        if self.is_generating {
            return;
        }
        let mut submitted = None;
        form::submit(&mut self.form, &mut self.toasts, |payload| {
            submitted = Some(payload)
        });
        if let Some(payload) = submitted {
            let api = self.api.clone();
            self.is_generating = true;
            self.generate_task = Some(tokio::spawn(async move { api.generate(payload).await }));
        }
    }

    pub fn open_file_picker(&mut self) {
        self.show_file_picker = true;
        self.input_mode = InputMode::Editing;
    }

    pub fn close_file_picker(&mut self) {
        self.show_file_picker = false;
        self.input_mode = InputMode::Normal;
    }

    /// Resolve the typed path into a file draft. The extension hint in the
    /// picker is advisory; validation re-checks type and size either way.
    pub fn choose_file(&mut self) {
        let path = self.file_input.trim().to_string();
        if path.is_empty() {
            return;
        }
        match ScriptFile::from_path(Path::new(&path)) {
            Ok(file) => {
                let name = file.name.clone();
                self.form.select_file(file);
                self.toasts.notify(Toast::new(
                    "File selected",
                    format!("File \"{name}\" selected"),
                ));
                self.close_file_picker();
            }
            Err(err) => {
                tracing::warn!("file selection failed: {err:#}");
                self.toasts
                    .notify(Toast::destructive("Error", "Could not read the selected file"));
            }
        }
    }

    pub fn refresh_preview(&mut self) {
        if self.is_refreshing {
            return;
        }
        let Some(project) = &self.current_project else {
            return;
        };
        let api = self.api.clone();
        let id = project.id.clone();
        self.is_refreshing = true;
        self.refresh_task = Some(tokio::spawn(async move { api.refresh_preview(&id).await }));
    }

    // ── Projects page ──────────────────────────────────────────────────

    pub fn visible_projects(&self) -> Vec<&Project> {
        self.projects.page(&self.project_search, self.project_page)
    }

    pub fn selected_project(&self) -> Option<&Project> {
        let row = self.table_state.selected()?;
        self.visible_projects().get(row).copied()
    }

    pub fn project_row_down(&mut self) {
        let len = self.visible_projects().len();
        if len > 0 {
            let i = self.table_state.selected().unwrap_or(0);
            self.table_state.select(Some((i + 1).min(len - 1)));
        }
    }

    pub fn project_row_up(&mut self) {
        let i = self.table_state.selected().unwrap_or(0);
        self.table_state.select(Some(i.saturating_sub(1)));
    }

    pub fn project_next_page(&mut self) {
        let total = self.projects.total_pages(&self.project_search);
        if self.project_page < total {
            self.project_page += 1;
            self.table_state.select(Some(0));
        }
    }

    pub fn project_prev_page(&mut self) {
        if self.project_page > 1 {
            self.project_page -= 1;
            self.table_state.select(Some(0));
        }
    }

    /// The search box filters live; the page resets so results start from
    /// the first window.
    pub fn project_search_changed(&mut self) {
        self.project_page = 1;
        self.table_state.select(Some(0));
    }

    pub fn edit_project(&mut self) {
        if let Some(project) = self.selected_project() {
            let topic = project.topic.clone();
            self.toasts.notify(Toast::new(
                "Edit Project",
                format!("Navigating to edit project: {topic}"),
            ));
        }
    }

    pub fn export_project(&mut self) {
        let Some(project) = self.selected_project() else {
            return;
        };
        // Export only makes sense once the video exists.
        if project.status != crate::project::ProjectStatus::Completed {
            return;
        }
        let topic = project.topic.clone();
        self.toasts.notify(Toast::new(
            "Exporting to YouTube...",
            format!("Project: {topic} is being exported"),
        ));
    }

    // ── Account screen ─────────────────────────────────────────────────

    pub fn open_login(&mut self) {
        self.show_login = true;
        self.input_mode = InputMode::Editing;
    }

    pub fn close_login(&mut self) {
        self.show_login = false;
        self.input_mode = InputMode::Normal;
    }

    /// Validate the active auth tab and start the mocked auth round-trip.
    pub fn submit_auth(&mut self) {
        if self.auth_busy {
            return;
        }
        if !self.login.validate_active() {
            return;
        }
        let action = match self.login.tab {
            AuthTab::Login => AuthAction::SignIn,
            AuthTab::Register => AuthAction::Register,
            AuthTab::Forgot => AuthAction::Forgot,
        };
        let email = match action {
            AuthAction::SignIn => self.login.login_email.clone(),
            AuthAction::Register => self.login.register_email.clone(),
            AuthAction::Forgot => self.login.forgot_email.clone(),
        };
        let api = self.api.clone();
        self.auth_busy = true;
        self.auth_action = Some(action);
        self.auth_task = Some(tokio::spawn(async move { api.authenticate(&email).await }));
    }

    // ── Task completion ────────────────────────────────────────────────

    /// Apply finished background work. Runs on the event loop, so every
    /// state mutation stays single-threaded.
    pub async fn drain_tasks(&mut self) {
        if let Some(task) = self.fetch_task.take_if(|t| t.is_finished()) {
            match task.await {
                Ok(Ok(text)) => self.form.fetch_succeeded(text),
                Ok(Err(err)) => {
                    tracing::warn!("script fetch failed: {err:#}");
                    self.form.fetch_failed();
                    self.toasts
                        .notify(Toast::destructive("Error", "Failed to fetch script from URL"));
                }
                Err(err) => {
                    tracing::error!("fetch task died: {err}");
                    self.form.fetch_failed();
                    self.toasts
                        .notify(Toast::destructive("Error", "Failed to fetch script from URL"));
                }
            }
        }

        if let Some(task) = self.generate_task.take_if(|t| t.is_finished()) {
            self.is_generating = false;
            match task.await {
                Ok(Ok(project)) => {
                    tracing::info!(id = %project.id, "generation request accepted");
                    self.projects.insert_front(project.clone());
                    self.current_project = Some(project);
                    self.preview_scroll = 0;
                }
                Ok(Err(err)) => tracing::error!("generation request failed: {err:#}"),
                Err(err) => tracing::error!("generation task died: {err}"),
            }
        }

        if let Some(task) = self.auth_task.take_if(|t| t.is_finished()) {
            self.auth_busy = false;
            let action = self.auth_action.take();
            match (task.await, action) {
                (Ok(Ok(())), Some(AuthAction::SignIn)) => {
                    self.toasts
                        .notify(Toast::new("Success", "You have successfully logged in"));
                    self.close_login();
                }
                (Ok(Ok(())), Some(AuthAction::Register)) => {
                    self.toasts
                        .notify(Toast::new("Success", "Your account has been created"));
                    self.login.register_succeeded();
                }
                (Ok(Ok(())), Some(AuthAction::Forgot)) => {
                    self.toasts.notify(Toast::new(
                        "Success",
                        "Password reset instructions have been sent to your email",
                    ));
                    self.login.forgot_succeeded();
                }
                (outcome, action) => {
                    if let Ok(Err(err)) = outcome {
                        tracing::warn!("auth request failed: {err:#}");
                    }
                    let description = match action {
                        Some(AuthAction::Register) => "Failed to create account",
                        Some(AuthAction::Forgot) => "Failed to send reset instructions",
                        _ => "Invalid email or password",
                    };
                    self.toasts.notify(Toast::destructive("Error", description));
                }
            }
        }

        if let Some(task) = self.refresh_task.take_if(|t| t.is_finished()) {
            self.is_refreshing = false;
            let tab = self.preview_tab.label();
            match task.await {
                Ok(Ok(())) => self
                    .toasts
                    .notify(Toast::new("Refreshed", format!("{tab} has been refreshed"))),
                _ => self
                    .toasts
                    .notify(Toast::destructive("Error", format!("Failed to refresh {tab}"))),
            }
        }
    }

    /// Abort in-flight work on shutdown so nothing outlives the terminal
    /// session.
    pub fn abort_tasks(&mut self) {
        if let Some(task) = self.fetch_task.take() {
            task.abort();
        }
        if let Some(task) = self.generate_task.take() {
            task.abort();
        }
        if let Some(task) = self.auth_task.take() {
            task.abort();
        }
        if let Some(task) = self.refresh_task.take() {
            task.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::{FetchStatus, InputSource};
    use crate::notify::Severity;

    fn app() -> App {
        App::new(Config::new())
    }

    #[tokio::test]
    async fn test_submit_with_invalid_source_never_spawns_generation() {
        let mut app = app();
        app.form.script_text = "ten chars!".to_string();

        app.submit_form();

        assert!(app.generate_task.is_none());
        assert!(!app.is_generating);
        let toasts: Vec<_> = app.toasts.visible().collect();
        assert_eq!(toasts.len(), 1);
        assert_eq!(toasts[0].severity, Severity::Destructive);
    }

    #[tokio::test]
    async fn test_submit_valid_text_flows_into_project_listing() {
        let mut app = app();
        app.form.script_text = "a".repeat(80);

        app.submit_form();
        assert!(app.is_generating);
        // A second submit while pending is a no-op.
        app.submit_form();

        let task = app.generate_task.take().expect("generation spawned");
        let project = task.await.expect("join").expect("generate");
        assert_eq!(project.topic, "a".repeat(80));
    }

    #[tokio::test]
    async fn test_fetch_completion_lands_in_url_draft() {
        let mut app = app();
        app.form.select_source(InputSource::Url);
        app.form.script_url = "https://example.com/doc".to_string();

        // Simulate the loop applying a finished fetch.
        app.form.begin_fetch();
        app.fetch_task = Some(tokio::spawn(async { Ok("fetched text".to_string()) }));
        while app.fetch_task.is_some() {
            app.drain_tasks().await;
            tokio::task::yield_now().await;
        }

        assert_eq!(app.form.fetched_text, "fetched text");
        assert_eq!(app.form.fetch_status, FetchStatus::Done);
    }

    #[tokio::test]
    async fn test_failed_fetch_notifies_and_recovers() {
        let mut app = app();
        app.form.select_source(InputSource::Url);
        app.form.script_url = "https://example.com/doc".to_string();

        app.form.begin_fetch();
        app.fetch_task = Some(tokio::spawn(async { Err(anyhow::anyhow!("boom")) }));
        while app.fetch_task.is_some() {
            app.drain_tasks().await;
            tokio::task::yield_now().await;
        }

        assert_eq!(app.form.fetch_status, FetchStatus::Idle);
        let toasts: Vec<_> = app.toasts.visible().collect();
        assert_eq!(toasts.len(), 1);
        assert_eq!(toasts[0].description, "Failed to fetch script from URL");
    }

    #[test]
    fn test_page_navigation_clamps() {
        let mut app = app();
        assert_eq!(app.project_page, 1);
        app.project_prev_page();
        assert_eq!(app.project_page, 1);
        // Five seed rows fit on one page.
        app.project_next_page();
        assert_eq!(app.project_page, 1);
    }

    #[test]
    fn test_export_requires_completed_status() {
        let mut app = app();
        // Row 1 of the seed data is "DNA Replication", still processing.
        app.table_state.select(Some(1));
        app.export_project();
        assert!(app.toasts.is_empty());

        app.table_state.select(Some(0));
        app.export_project();
        assert_eq!(app.toasts.visible().count(), 1);
    }

    #[test]
    fn test_form_field_cycle_is_total() {
        let mut field = FormField::Source;
        for _ in 0..FormField::ORDER.len() {
            field = field.next();
        }
        assert_eq!(field, FormField::Source);
        assert_eq!(FormField::Source.prev(), FormField::Submit);
    }
}
