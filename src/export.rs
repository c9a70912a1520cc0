//! Printable export of the analysis history.

use crate::api::HistoryRecord;
use crate::browser::Browser;
use crate::config::DEFAULT_PRINT_SETTLE_DELAY;
use crate::error::Error;
use crate::format::format_for_print;
use crate::messages;
use askama::Template;
use std::time::Duration;
use tracing::{error, info};

const BASIC_HEADING: &str = "🔹 기본 분석";
const ADVANCED_HEADING: &str = "🔸 심화 분석";

struct PrintSection {
    title: &'static str,
    html: String,
}

struct PrintEntry<'a> {
    number: usize,
    word: &'a str,
    timestamp: &'a str,
    sections: Vec<PrintSection>,
    divider: bool,
}

#[derive(Template)]
#[template(
    source = r#"<!DOCTYPE html>
<html lang="ko">
<head>
    <meta charset="UTF-8">
    <title>영단어 분석 히스토리 - {{ header }}</title>
    <style>
        * {
            margin: 0;
            padding: 0;
            box-sizing: border-box;
        }

        body {
            font-family: 'Noto Sans KR', 'Apple SD Gothic Neo', 'Malgun Gothic', Arial, sans-serif;
            font-size: 13px;
            line-height: 1.4;
            color: #333;
            background: white;
            padding: 10px;
        }

        .word-item {
            margin-bottom: 20px;
        }

        .word-header {
            display: flex;
            justify-content: space-between;
            align-items: center;
            margin-bottom: 10px;
            padding-bottom: 5px;
            border-bottom: 1px solid #e1e5e9;
        }

        .word-header h2 {
            font-size: 16px;
            color: #2c3e50;
            margin: 0;
        }

        .date {
            font-size: 11px;
            color: #666;
        }

        .analysis-section {
            margin-bottom: 15px;
        }

        .analysis-section h3 {
            font-size: 13px;
            color: #3498db;
            margin-bottom: 8px;
            padding: 3px 0;
            border-left: 3px solid #3498db;
            padding-left: 8px;
        }

        .content {
            background: #fafbfc;
            padding: 10px;
            border-radius: 4px;
            border-left: 2px solid #ecf0f1;
            font-size: 12px;
            line-height: 1.5;
        }

        .content strong {
            color: #2c3e50;
            font-weight: 600;
        }

        .divider {
            border-top: 2px dashed #ccc;
            margin: 20px 0;
        }

        @media print {
            body {
                padding: 8px;
                font-size: 12px;
            }

            .content {
                font-size: 11px;
                padding: 8px;
            }

            .word-header h2 {
                font-size: 14px;
            }

            .analysis-section h3 {
                font-size: 12px;
            }

            .date {
                font-size: 10px;
            }
        }
    </style>
</head>
<body>
{% for entry in entries %}
    <div class="word-item">
        <div class="word-header">
            <h2>{{ entry.number }}. {{ entry.word }}</h2>
            <span class="date">분석일: {{ entry.timestamp }}</span>
        </div>
{% for section in entry.sections %}
        <div class="analysis-section">
            <h3>{{ section.title }}</h3>
            <div class="content">{{ section.html|safe }}</div>
        </div>
{% endfor %}
{% if entry.divider %}
        <div class="divider"></div>
{% endif %}
    </div>
{% endfor %}
</body>
</html>"#,
    ext = "html"
)]
struct PrintDocument<'a> {
    header: &'a str,
    entries: Vec<PrintEntry<'a>>,
}

/// How an export attempt ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    /// Nothing to export; no window was opened.
    Empty,
    PopupBlocked,
    Failed(String),
    Printed { closed: bool },
}

#[derive(Debug, Clone)]
pub struct HistoryExporter {
    settle_delay: Duration,
}

impl Default for HistoryExporter {
    fn default() -> Self {
        Self::new(DEFAULT_PRINT_SETTLE_DELAY)
    }
}

impl HistoryExporter {
    pub fn new(settle_delay: Duration) -> Self {
        Self { settle_delay }
    }

    /// Renders the standalone print document. Records keep server order and
    /// are numbered from 1.
    pub fn render(&self, records: &[HistoryRecord], header: &str) -> Result<String, Error> {
        let last = records.len().saturating_sub(1);
        let entries = records
            .iter()
            .enumerate()
            .map(|(index, record)| PrintEntry {
                number: index + 1,
                word: &record.word,
                timestamp: &record.timestamp,
                sections: print_sections(record),
                divider: index < last,
            })
            .collect();
        let document = PrintDocument { header, entries };
        Ok(document.render()?)
    }

    /// Opens a print window for `records` and walks it through
    /// write, load, settle, print and the optional close.
    pub async fn export(
        &self,
        browser: &dyn Browser,
        records: &[HistoryRecord],
        header: Option<&str>,
    ) -> ExportOutcome {
        if records.is_empty() {
            browser.alert(messages::NOTHING_TO_EXPORT);
            return ExportOutcome::Empty;
        }

        let Some(mut window) = browser.open_window() else {
            browser.alert(messages::POPUP_BLOCKED);
            return ExportOutcome::PopupBlocked;
        };

        let header = header.unwrap_or(messages::DEFAULT_HEADER);
        let written = self
            .render(records, header)
            .and_then(|document| window.write(&document).map_err(Error::from));
        if let Err(err) = written {
            error!(error = %err, "failed to build print document");
            let message = messages::failure_alert(messages::EXPORT_FAILED, &err.to_string());
            browser.alert(&message);
            return ExportOutcome::Failed(err.to_string());
        }

        window.loaded().await;
        tokio::time::sleep(self.settle_delay).await;
        window.focus();
        window.print();
        info!(records = records.len(), "print dialog opened");

        window.printed().await;
        let closed = browser.confirm(messages::CLOSE_AFTER_PRINT);
        if closed {
            window.close();
        }
        ExportOutcome::Printed { closed }
    }
}

fn print_sections(record: &HistoryRecord) -> Vec<PrintSection> {
    let mut sections = Vec::with_capacity(2);
    if let Some(text) = record.basic() {
        sections.push(PrintSection {
            title: BASIC_HEADING,
            html: format_for_print(text),
        });
    }
    if let Some(text) = record.advanced() {
        sections.push(PrintSection {
            title: ADVANCED_HEADING,
            html: format_for_print(text),
        });
    }
    sections
}
