use super::{Outcome, PageLoad, Screen, ScreenShell};
use crate::api::{HistoryRecord, UserInfo};
use crate::browser::{Control, Element, Route};
use crate::error::Error;
use crate::export::{ExportOutcome, HistoryExporter};
use crate::format::format_analysis;
use crate::messages;
use crate::storage::SessionToken;
use askama::Template;
use async_trait::async_trait;
use tracing::{error, info};

struct ListSection {
    title: &'static str,
    html: String,
}

struct ListItem<'a> {
    index: usize,
    word: &'a str,
    timestamp: &'a str,
    sections: Vec<ListSection>,
}

#[derive(Template)]
#[template(
    source = r#"{% for item in items %}
<div class="history-item" data-index="{{ item.index }}">
    <div class="history-header">
        <h3 class="word-title">{{ item.word }}</h3>
        <span class="timestamp">{{ item.timestamp }}</span>
    </div>
{% for section in item.sections %}
    <div class="analysis-section">
        <h4>{{ section.title }}</h4>
        <div class="analysis-content">{{ section.html|safe }}</div>
    </div>
{% endfor %}
</div>
{% endfor %}"#,
    ext = "html"
)]
struct HistoryList<'a> {
    items: Vec<ListItem<'a>>,
}

/// On-page list view of the history, formatted with the screen formatter.
pub fn render_history_list(records: &[HistoryRecord]) -> Result<String, Error> {
    let items = records
        .iter()
        .enumerate()
        .map(|(index, record)| {
            let mut sections = Vec::with_capacity(2);
            if let Some(text) = record.basic() {
                sections.push(ListSection {
                    title: "기본 분석",
                    html: format_analysis(text),
                });
            }
            if let Some(text) = record.advanced() {
                sections.push(ListSection {
                    title: "심화 분석",
                    html: format_analysis(text),
                });
            }
            ListItem {
                index,
                word: &record.word,
                timestamp: &record.timestamp,
                sections,
            }
        })
        .collect();
    Ok(HistoryList { items }.render()?)
}

fn empty_block() -> String {
    format!(r#"<div class="no-history">{}</div>"#, messages::NO_HISTORY)
}

fn error_block() -> String {
    format!(
        r#"<div class="error-message">{}</div>"#,
        messages::HISTORY_LOAD_ERROR
    )
}

/// `/history`: lists past analyses and exports them for printing.
pub struct HistoryScreen {
    shell: ScreenShell,
    exporter: HistoryExporter,
    token: Option<SessionToken>,
    user: Option<UserInfo>,
    records: Vec<HistoryRecord>,
}

impl HistoryScreen {
    pub fn new(shell: ScreenShell, exporter: HistoryExporter) -> Self {
        Self {
            shell,
            exporter,
            token: None,
            user: None,
            records: Vec::new(),
        }
    }

    pub fn user(&self) -> Option<&UserInfo> {
        self.user.as_ref()
    }

    /// History as last loaded, in server order.
    pub fn records(&self) -> &[HistoryRecord] {
        &self.records
    }

    /// Fetches the history and renders the list view.
    pub async fn load(&mut self) -> Outcome<usize> {
        let Some(token) = self.token.clone().or_else(|| self.shell.gate()) else {
            return Outcome::Redirected(Route::Login);
        };

        self.shell.set_loading(true);
        let result = self.shell.api().history(&token).await;
        self.shell.set_loading(false);

        let browser = self.shell.browser();
        let records = match result {
            Ok(records) => records,
            Err(err) => {
                error!(error = %err, "history load failed");
                browser.set_html(Element::HistoryContent, &error_block());
                return Outcome::Failed(err);
            }
        };

        info!(count = records.len(), "history loaded");
        if records.is_empty() {
            browser.set_html(Element::HistoryContent, &empty_block());
            browser.set_enabled(Control::ExportButton, false);
        } else {
            match render_history_list(&records) {
                Ok(html) => browser.set_html(Element::HistoryContent, &html),
                Err(err) => {
                    error!(error = %err, "history list failed to render");
                    browser.set_html(Element::HistoryContent, &error_block());
                }
            }
            browser.set_enabled(Control::ExportButton, true);
        }
        self.records = records;
        Outcome::Done(self.records.len())
    }

    /// Builds the printable document from the loaded records.
    pub async fn export(&self) -> ExportOutcome {
        let header = self
            .user
            .as_ref()
            .map(|user| messages::header_for(&user.username));
        self.exporter
            .export(self.shell.browser(), &self.records, header.as_deref())
            .await
    }

    pub fn go_to_basic(&self) {
        self.shell.navigate(Route::Basic);
    }
}

#[async_trait]
impl Screen for HistoryScreen {
    fn shell(&self) -> &ScreenShell {
        &self.shell
    }

    async fn initialize(&mut self) -> PageLoad {
        info!("history screen loaded");
        let Some(token) = self.shell.gate() else {
            return PageLoad::Redirected(Route::Login);
        };
        let Some(user) = self.shell.bootstrap(&token).await else {
            return PageLoad::Redirected(Route::Login);
        };
        self.token = Some(token);
        self.user = Some(user);
        self.load().await.into_page_load()
    }
}
