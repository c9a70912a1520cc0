use std::error::Error;
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use atty::Stream;
use clap::{Parser, Subcommand};
use nrv_vocab::config::DEFAULT_BASE_URL;
use nrv_vocab::{
    AdvancedScreen, AuthScreen, BasicScreen, Browser, ClientConfig, Control, Element,
    ExportOutcome, Field, FileStorage, HistoryExporter, HistoryScreen, HttpVocabApi, LoginForm,
    MessageKind, Outcome, PageLoad, PrintWindow, RegistrationForm, Route, Screen, ScreenShell,
    SessionContext, VocabApi,
};
use once_cell::sync::Lazy;
use parking_lot::Mutex;
use regex::Regex;
use termimad::{FmtText, MadSkin, terminal_size};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "nrv-vocab",
    about = "Analyze English vocabulary with the nrv backend",
    version
)]
pub struct Cli {
    /// Backend base URL.
    #[arg(long, global = true, env = "NRV_BASE_URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Where the session token and current word are kept between runs.
    #[arg(long, global = true, env = "NRV_STORAGE")]
    storage: Option<PathBuf>,

    /// Answer yes to every confirmation.
    #[arg(short = 'y', long, global = true)]
    yes: bool,

    /// Milliseconds to wait between the print document loading and printing.
    #[arg(long, global = true, default_value_t = 1000)]
    print_delay_ms: u64,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create an account.
    Register {
        #[arg(long)]
        username: String,
        #[arg(long)]
        email: String,
        #[arg(long, env = "NRV_PASSWORD")]
        password: String,
    },
    /// Sign in and store the session.
    Login {
        #[arg(long)]
        username: String,
        #[arg(long, env = "NRV_PASSWORD")]
        password: String,
    },
    /// Show the signed-in user.
    Whoami,
    /// Run the basic analysis for a word.
    Analyze {
        /// English word, letters only.
        word: String,
    },
    /// Run the advanced analysis for the last analyzed word.
    Advanced,
    /// List previously analyzed words.
    History,
    /// Write the history as a printable HTML document.
    Export {
        /// Output file for the document.
        #[arg(short, long)]
        out: PathBuf,
    },
    /// Sign out and forget the local session.
    Logout,
    /// Check that the backend is up.
    Status,
}

impl Cli {
    fn config(&self) -> Result<ClientConfig, nrv_vocab::Error> {
        let storage = self
            .storage
            .clone()
            .unwrap_or_else(ClientConfig::default_storage_path);
        ClientConfig::default()
            .with_base_url(self.base_url.clone())
            .with_storage_path(storage)
            .with_print_settle_delay(Duration::from_millis(self.print_delay_ms))
            .with_assume_yes(self.yes)
            .validated()
    }
}

pub fn run() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    init_tracing();
    let config = cli.config()?;
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(dispatch(cli.command, config))
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

async fn dispatch(command: Command, config: ClientConfig) -> Result<(), Box<dyn Error>> {
    let storage = Arc::new(FileStorage::open(&config.storage_path)?);
    let session = SessionContext::new(storage);
    let api: Arc<dyn VocabApi> = Arc::new(HttpVocabApi::new(config.base_url.as_str())?);
    let export_path = match &command {
        Command::Export { out } => Some(out.clone()),
        _ => None,
    };
    let browser = Arc::new(TerminalBrowser::new(config.assume_yes, export_path));
    let shell = ScreenShell::new(api.clone(), browser.clone(), session);

    let result = match command {
        Command::Register {
            username,
            email,
            password,
        } => {
            let screen = AuthScreen::new(shell);
            finish(
                screen
                    .register(&RegistrationForm::new(username, email, password))
                    .await,
            )
            .map(|_| ())
        }
        Command::Login { username, password } => {
            let mut screen = AuthScreen::new(shell);
            match screen.initialize().await {
                PageLoad::Ready => finish(screen.login(&LoginForm::new(username, password)).await)
                    .map(|_| ()),
                PageLoad::Redirected(_) => {
                    println!("Already signed in.");
                    Ok(())
                }
                load @ PageLoad::Failed(_) => ready(load),
            }
        }
        Command::Whoami => {
            let mut screen = BasicScreen::new(shell);
            ready(screen.initialize().await)
        }
        Command::Analyze { word } => {
            let mut screen = BasicScreen::new(shell);
            ready(screen.initialize().await)?;
            finish(screen.analyze(&word).await).map(|_| ())
        }
        Command::Advanced => {
            let mut screen = AdvancedScreen::new(shell);
            ready(screen.initialize().await)
        }
        Command::History => {
            let mut screen = HistoryScreen::new(shell, HistoryExporter::default());
            ready(screen.initialize().await)
        }
        Command::Export { .. } => {
            let mut screen =
                HistoryScreen::new(shell, HistoryExporter::new(config.print_settle_delay));
            ready(screen.initialize().await)?;
            match screen.export().await {
                ExportOutcome::Printed { .. } => Ok(()),
                ExportOutcome::Empty => Err("no history to export".into()),
                ExportOutcome::PopupBlocked => Err("could not open the output document".into()),
                ExportOutcome::Failed(err) => Err(err.into()),
            }
        }
        Command::Logout => {
            let screen = BasicScreen::new(shell);
            if screen.logout().await {
                println!("Signed out.");
            }
            Ok(())
        }
        Command::Status => {
            let health = api.health().await?;
            println!("{}", serde_json::to_string_pretty(&health)?);
            Ok(())
        }
    };

    if let Some(route) = browser.location() {
        debug!(%route, "final location");
        if route == Route::Login {
            println!("→ {route} (sign in with `nrv-vocab login`)");
        } else {
            println!("→ {route}");
        }
    }
    result
}

fn ready(load: PageLoad) -> Result<(), Box<dyn Error>> {
    match load {
        PageLoad::Ready => Ok(()),
        PageLoad::Redirected(route) => Err(format!("redirected to {route}").into()),
        PageLoad::Failed(err) => Err(err.to_string().into()),
    }
}

fn finish<T>(outcome: Outcome<T>) -> Result<T, Box<dyn Error>> {
    match outcome {
        Outcome::Done(value) => Ok(value),
        Outcome::Invalid(err) => Err(err.to_string().into()),
        Outcome::Failed(err) => Err(err.to_string().into()),
        Outcome::Redirected(route) => Err(format!("redirected to {route}").into()),
    }
}

/// [`Browser`] on a terminal: alerts and messages go to stderr, content to
/// stdout, and the print window is a file.
struct TerminalBrowser {
    assume_yes: bool,
    export_path: Option<PathBuf>,
    location: Mutex<Option<Route>>,
    /// Styled markdown on stdout; plain text when piped.
    styled: bool,
    spinner: bool,
}

impl TerminalBrowser {
    fn new(assume_yes: bool, export_path: Option<PathBuf>) -> Self {
        Self {
            assume_yes,
            export_path,
            location: Mutex::new(None),
            styled: atty::is(Stream::Stdout),
            spinner: atty::is(Stream::Stderr),
        }
    }

    fn location(&self) -> Option<Route> {
        *self.location.lock()
    }

    fn print_panel(&self, heading: Option<&str>, markdown: &str) {
        let body = markdown.trim();
        if body.is_empty() {
            return;
        }
        if let Some(heading) = heading {
            println!("\n[{heading}]");
        }
        if self.styled {
            let (columns, _) = terminal_size();
            let skin = MadSkin::default();
            println!("{}", FmtText::from(&skin, body, Some(columns.max(60) as usize)));
        } else {
            println!("{body}");
        }
    }
}

fn panel_heading(element: Element) -> Option<&'static str> {
    match element {
        Element::AnalysisResult => Some("기본 분석"),
        Element::AdvancedResult => Some("심화 분석"),
        Element::HistoryContent => Some("히스토리"),
        Element::Username | Element::WordTitle => None,
    }
}

impl Browser for TerminalBrowser {
    fn navigate(&self, route: Route) {
        *self.location.lock() = Some(route);
    }

    fn alert(&self, message: &str) {
        eprintln!("! {message}");
    }

    fn confirm(&self, message: &str) -> bool {
        if self.assume_yes {
            eprintln!("{message} [y/N] y");
            return true;
        }
        eprint!("{message} [y/N] ");
        let _ = io::stderr().flush();
        let mut answer = String::new();
        match io::stdin().lock().read_line(&mut answer) {
            Ok(_) => matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"),
            Err(_) => false,
        }
    }

    fn set_text(&self, element: Element, text: &str) {
        match element {
            Element::WordTitle => println!("\n# {text}"),
            _ => println!("{text}"),
        }
    }

    fn set_html(&self, element: Element, html: &str) {
        self.print_panel(panel_heading(element), &html_to_markdown(html));
    }

    fn set_enabled(&self, control: Control, enabled: bool) {
        debug!(?control, enabled, "control state");
    }

    fn set_loading(&self, visible: bool) {
        if visible && self.spinner {
            eprintln!("…");
        }
    }

    fn show_message(&self, message: &str, kind: MessageKind) {
        match kind {
            MessageKind::Error => eprintln!("! {message}"),
            MessageKind::Success => println!("{message}"),
        }
    }

    fn focus(&self, field: Field) {
        debug!(?field, "focus");
    }

    fn set_value(&self, field: Field, value: &str) {
        debug!(?field, value, "field value");
    }

    fn reset_register_form(&self) {
        debug!("registration form reset");
    }

    fn open_window(&self) -> Option<Box<dyn PrintWindow>> {
        let path = self.export_path.clone()?;
        Some(Box::new(FileWindow { path }))
    }
}

/// The export "window": the document lands in a file the user prints.
struct FileWindow {
    path: PathBuf,
}

#[async_trait]
impl PrintWindow for FileWindow {
    fn write(&mut self, document: &str) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(&self.path, document)
    }

    async fn loaded(&mut self) {}

    fn print(&mut self) {
        println!(
            "Printable history written to {} (open it in a browser to print).",
            self.path.display()
        );
    }

    async fn printed(&mut self) {}

    fn close(&mut self) {
        debug!(path = %self.path.display(), "print window closed");
    }
}

static TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]+>").expect("valid tag pattern"));
static BLANK_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n{3,}").expect("valid blank pattern"));

/// Degrades a result fragment to terminal markdown.
fn html_to_markdown(html: &str) -> String {
    let text = html
        .replace("<br>", "\n")
        .replace("<strong>", "**")
        .replace("</strong>", "**")
        .replace("&nbsp;", " ")
        .replace(r#"<h3 class="word-title">"#, "\n## ")
        .replace("<h4>", "\n### ")
        .replace(r#"<span class="timestamp">"#, "\n*")
        .replace("</span>", "*")
        .replace("</h3>", "\n")
        .replace("</h4>", "\n")
        .replace("</div>", "\n");
    let text = TAG.replace_all(&text, "");
    let text = text
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#x27;", "'")
        .replace("&#39;", "'")
        .replace("&amp;", "&");
    BLANK_RUN.replace_all(text.trim(), "\n\n").into_owned()
}
