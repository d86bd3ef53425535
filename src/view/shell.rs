use std::sync::Arc;

use log::{debug, info};

use crate::api::Backend;
use crate::chat::{AskOutcome, ChatInterface, Key, PLACEHOLDER};
use crate::conf::UiConfig;
use crate::core::InsightError;
use crate::form::{ConnectOutcome, ConnectionForm, Field};
use crate::session::SessionProvider;

use super::render::Renderer;
use super::{Route, Theme};

/// Where the shell writes. Alerts block until the user has seen them.
pub trait Console {
    fn print(&mut self, text: &str);
    fn alert(&mut self, text: &str);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

const HELP: &str = "\
Meta-commands:
  \\help           - Show this help
  \\quit           - Exit
  \\theme          - Toggle light/dark theme
  \\go <path>      - Switch view (/ or /chat)
  \\connect        - Back to the connection form
  \\session        - Show the session id
  \\reset          - Forget the session id
  \\table          - Toggle result format (json/grid)
  \\show           - Redraw the current view

On the connection form each line fills the prompted field; an empty line
keeps the value in brackets. In the chat view each line is a question.";

/// The application behind the terminal: current view, the form and chat
/// state, and the shared backend and session.
pub struct App {
    route: Route,
    renderer: Renderer,
    form: ConnectionForm,
    chat: ChatInterface,
    field_cursor: usize,
    backend: Arc<dyn Backend>,
    session: Arc<SessionProvider>,
}

impl App {
    pub fn new(
        ui: &UiConfig,
        theme: Theme,
        backend: Arc<dyn Backend>,
        session: Arc<SessionProvider>,
    ) -> Self {
        Self {
            route: Route::default(),
            renderer: Renderer::new(theme, ui.color),
            form: ConnectionForm::new(ui.connect_redirect_delay),
            chat: ChatInterface::new(),
            field_cursor: 0,
            backend,
            session,
        }
    }

    pub fn route(&self) -> Route {
        self.route
    }

    pub fn theme(&self) -> Theme {
        self.renderer.theme
    }

    pub fn renderer(&self) -> &Renderer {
        &self.renderer
    }

    pub fn form(&self) -> &ConnectionForm {
        &self.form
    }

    pub fn chat(&self) -> &ChatInterface {
        &self.chat
    }

    fn current_field(&self) -> Field {
        Field::ALL[self.field_cursor.min(Field::ALL.len() - 1)]
    }

    pub fn prompt(&self) -> String {
        match self.route {
            Route::Connect => {
                let field = self.current_field();
                let value = self.form.draft().get(field);
                if value.is_empty() {
                    format!("{}: ", field.label())
                } else if field.is_secret() {
                    format!("{} [{}]: ", field.label(), "*".repeat(value.chars().count()))
                } else {
                    format!("{} [{value}]: ", field.label())
                }
            }
            Route::Chat => format!("{} ❯ ", self.chat.button_label().to_lowercase()),
        }
    }

    /// True while the prompt is collecting a secret.
    pub fn is_secret_prompt(&self) -> bool {
        self.route == Route::Connect && self.current_field().is_secret()
    }

    pub fn navigate(&mut self, route: Route, console: &mut dyn Console) {
        info!("navigating {} -> {}", self.route, route);
        self.route = route;
        self.field_cursor = 0;
        self.show(console);
    }

    pub fn show(&self, console: &mut dyn Console) {
        console.print(&self.renderer.header(self.route));
        match self.route {
            Route::Connect => console.print(&self.renderer.form(&self.form)),
            Route::Chat => {
                let view = self.renderer.chat(&self.chat);
                if view.is_empty() {
                    console.print(PLACEHOLDER);
                } else {
                    console.print(&view);
                }
            }
        }
    }

    pub fn toggle_theme(&mut self) -> Result<Theme, InsightError> {
        let theme = self.renderer.theme.toggled();
        theme.save(self.session.store().as_ref())?;
        self.renderer.theme = theme;
        info!("theme set to {theme}");
        Ok(theme)
    }

    pub async fn handle_line(
        &mut self,
        line: &str,
        console: &mut dyn Console,
    ) -> Result<Flow, InsightError> {
        let trimmed = line.trim();
        if let Some(command) = trimmed.strip_prefix('\\') {
            return self.meta(command, console);
        }
        match self.route {
            Route::Connect => self.connect_input(line, console).await?,
            Route::Chat => self.chat_input(line, console).await?,
        }
        Ok(Flow::Continue)
    }

    fn meta(&mut self, command: &str, console: &mut dyn Console) -> Result<Flow, InsightError> {
        let (name, arg) = command
            .split_once(char::is_whitespace)
            .map(|(n, a)| (n, a.trim()))
            .unwrap_or((command, ""));
        debug!("meta command {name} {arg}");
        match name {
            "quit" | "q" => return Ok(Flow::Quit),
            "help" | "h" | "?" => console.print(HELP),
            "theme" => {
                let theme = self.toggle_theme()?;
                console.print(&format!("Theme: {theme}"));
            }
            "go" => match Route::from_path(arg) {
                Some(route) => self.navigate(route, console),
                None => console.print(&format!("Unknown route: {arg}")),
            },
            "connect" => self.navigate(Route::Connect, console),
            "session" => {
                let id = self.session.peek()?;
                console.print(id.as_deref().unwrap_or("(no session)"));
            }
            "reset" => {
                self.session.clear()?;
                console.print("Session cleared");
            }
            "table" => {
                self.renderer.data_format = self.renderer.data_format.toggled();
                console.print(&format!("Result format: {}", self.renderer.data_format.name()));
            }
            "show" => self.show(console),
            other => console.print(&format!("Unknown command: \\{other}. Try \\help")),
        }
        Ok(Flow::Continue)
    }

    async fn connect_input(
        &mut self,
        line: &str,
        console: &mut dyn Console,
    ) -> Result<(), InsightError> {
        let field = self.current_field();
        let value = if field.is_secret() { line } else { line.trim() };
        if !value.is_empty() {
            self.form.edit(field, value);
        }
        self.field_cursor += 1;
        if self.field_cursor < Field::ALL.len() {
            return Ok(());
        }

        self.field_cursor = 0;
        console.print("Connecting...");
        let outcome = self.form.submit(self.backend.as_ref(), &self.session).await?;
        match outcome {
            ConnectOutcome::Connected { redirect_after } => {
                console.print(&self.renderer.form(&self.form));
                tokio::time::sleep(redirect_after).await;
                self.navigate(Route::Chat, console);
            }
            ConnectOutcome::Failed | ConnectOutcome::Invalid(_) => {
                console.print(&self.renderer.form(&self.form));
            }
            ConnectOutcome::Ignored => {}
        }
        Ok(())
    }

    async fn chat_input(
        &mut self,
        line: &str,
        console: &mut dyn Console,
    ) -> Result<(), InsightError> {
        self.chat.set_question(line);
        if self.chat.can_submit() {
            console.print("Loading...");
        }
        let outcome = self
            .chat
            .handle_key(Key::Enter, self.backend.as_ref(), &self.session)
            .await?;
        match outcome {
            AskOutcome::Answered | AskOutcome::Failed => {
                console.print(&self.renderer.chat(&self.chat));
            }
            AskOutcome::SessionExpired { alert } => {
                console.alert(&alert);
                self.navigate(Route::Connect, console);
            }
            AskOutcome::Skipped => {}
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::api::{ApiError, ConnectResponse};
    use crate::form::{FAILURE_MESSAGE, SUCCESS_MESSAGE};
    use crate::session::{MemoryStore, SESSION_KEY};
    use crate::testutil::{FakeBackend, sample_answer};
    use crate::view::THEME_KEY;

    #[derive(Default)]
    struct Recorder {
        printed: Vec<String>,
        alerts: Vec<String>,
    }

    impl Console for Recorder {
        fn print(&mut self, text: &str) {
            self.printed.push(text.to_string());
        }

        fn alert(&mut self, text: &str) {
            self.alerts.push(text.to_string());
        }
    }

    impl Recorder {
        fn output(&self) -> String {
            self.printed.join("\n")
        }
    }

    fn ui() -> UiConfig {
        UiConfig {
            theme: Theme::Dark,
            color: false,
            connect_redirect_delay: Duration::from_millis(500),
        }
    }

    fn app(backend: FakeBackend) -> (App, Arc<FakeBackend>, Arc<SessionProvider>) {
        let backend = Arc::new(backend);
        let session = Arc::new(SessionProvider::new(Arc::new(MemoryStore::new())));
        let app = App::new(&ui(), Theme::Dark, backend.clone(), session.clone());
        (app, backend, session)
    }

    async fn fill_form(app: &mut App, console: &mut Recorder) {
        for line in ["db.local", "", "admin", "secret", "shop"] {
            app.handle_line(line, console).await.unwrap();
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_successful_connect_moves_to_chat_after_delay() {
        let (mut app, backend, _) = app(FakeBackend::new().with_connect(Ok(ConnectResponse {
            success: true,
            message: None,
        })));
        let mut console = Recorder::default();

        let start = tokio::time::Instant::now();
        fill_form(&mut app, &mut console).await;

        assert!(start.elapsed() >= Duration::from_millis(500));
        assert_eq!(app.route(), Route::Chat);
        assert!(console.output().contains(SUCCESS_MESSAGE));
        assert!(console.output().contains(PLACEHOLDER));

        let sent = backend.connect_requests();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].credentials.port, 5432);
        assert_eq!(sent[0].credentials.password, "secret");
    }

    #[tokio::test]
    async fn test_failed_connect_stays_on_form() {
        let (mut app, _, _) =
            app(FakeBackend::new().with_connect(Err(ApiError::Transport("refused".to_string()))));
        let mut console = Recorder::default();

        fill_form(&mut app, &mut console).await;

        assert_eq!(app.route(), Route::Connect);
        assert!(console.output().contains(FAILURE_MESSAGE));
        assert_eq!(app.prompt(), "HOST [db.local]: ");
    }

    #[tokio::test]
    async fn test_prompts_walk_the_fields() {
        let (mut app, _, _) = app(FakeBackend::new());
        let mut console = Recorder::default();

        assert_eq!(app.prompt(), "HOST: ");
        app.handle_line("db.local", &mut console).await.unwrap();
        assert_eq!(app.prompt(), "PORT [5432]: ");
        app.handle_line("6543", &mut console).await.unwrap();
        app.handle_line("admin", &mut console).await.unwrap();
        assert!(app.is_secret_prompt());
        assert_eq!(app.form().draft().port, "6543");
    }

    #[tokio::test]
    async fn test_session_expiry_returns_to_form() {
        let (mut app, _, session) =
            app(FakeBackend::new().with_ask(Err(ApiError::SessionExpired { error: None })));
        let mut console = Recorder::default();
        session.session_id().unwrap();

        app.handle_line("\\go /chat", &mut console).await.unwrap();
        app.handle_line("top products", &mut console).await.unwrap();

        assert_eq!(app.route(), Route::Connect);
        assert_eq!(
            console.alerts,
            vec!["Your session has expired. Please reconnect your database.".to_string()]
        );
        assert_eq!(session.store().get(SESSION_KEY).unwrap(), None);
    }

    #[tokio::test]
    async fn test_question_renders_answer() {
        let (mut app, backend, _) = app(FakeBackend::new().with_ask(Ok(sample_answer())));
        let mut console = Recorder::default();

        app.handle_line("\\go /chat", &mut console).await.unwrap();
        app.handle_line("   ", &mut console).await.unwrap();
        assert!(backend.ask_requests().is_empty());

        app.handle_line("sales by category", &mut console).await.unwrap();
        let output = console.output();
        assert!(output.contains("Loading..."));
        assert!(output.contains("Generated SQL:"));
        assert!(output.contains("Chart:"));
        assert_eq!(app.prompt(), "ask ❯ ");
    }

    #[tokio::test]
    async fn test_meta_commands() {
        let (mut app, _, session) = app(FakeBackend::new());
        let mut console = Recorder::default();

        app.handle_line("\\theme", &mut console).await.unwrap();
        assert_eq!(app.theme(), Theme::Light);
        assert_eq!(session.store().get(THEME_KEY).unwrap().as_deref(), Some("light"));

        app.handle_line("\\go /admin", &mut console).await.unwrap();
        assert!(console.output().contains("Unknown route: /admin"));
        assert_eq!(app.route(), Route::Connect);

        app.handle_line("\\go /chat", &mut console).await.unwrap();
        app.handle_line("\\go", &mut console).await.unwrap();
        assert!(console.output().ends_with("Unknown route: "));
        assert_eq!(app.route(), Route::Chat);
        app.handle_line("\\go /", &mut console).await.unwrap();

        app.handle_line("\\session", &mut console).await.unwrap();
        assert!(console.output().contains("(no session)"));

        app.handle_line("\\table", &mut console).await.unwrap();
        assert!(console.output().contains("Result format: grid"));

        let flow = app.handle_line("\\quit", &mut console).await.unwrap();
        assert_eq!(flow, Flow::Quit);
    }
}
