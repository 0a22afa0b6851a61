use lifeos_core::Widget;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    prelude::Widget as RatatuiWidget,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Gauge, Paragraph},
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CardStatus {
    Live,
    Beta,
    #[default]
    Alpha,
}

impl CardStatus {
    fn color(self) -> Color {
        match self {
            CardStatus::Live => Color::Green,
            CardStatus::Beta => Color::Yellow,
            CardStatus::Alpha => Color::Magenta,
        }
    }

    fn label(self) -> &'static str {
        match self {
            CardStatus::Live => "LIVE",
            CardStatus::Beta => "BETA",
            CardStatus::Alpha => "ALPHA",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardTask {
    pub id: String,
    pub text: String,
    #[serde(default)]
    pub completed: bool,
}

/// Config for a single project card. Progress is 0-100.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProjectCardConfig {
    pub category: String,
    pub status: CardStatus,
    pub progress: f64,
    pub roi: String,
    pub pending_tasks: Vec<CardTask>,
}

impl Default for ProjectCardConfig {
    fn default() -> Self {
        Self {
            category: "General".to_string(),
            status: CardStatus::Alpha,
            progress: 0.0,
            roi: "0%".to_string(),
            pending_tasks: Vec::new(),
        }
    }
}

/// One project's category, release status, progress, ROI, and open tasks.
pub struct ProjectCard {
    config: ProjectCardConfig,
}

impl ProjectCard {
    pub fn new(config: ProjectCardConfig) -> Self {
        Self { config }
    }
}

impl Widget for ProjectCard {
    fn on_config_updated(&mut self, config: &Value) {
        self.config = serde_json::from_value(config.clone()).unwrap_or_default();
    }

    fn render(&mut self, area: Rect, buf: &mut Buffer) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Min(0),
            ])
            .split(area);

        Paragraph::new(Line::from(vec![
            Span::styled(
                self.config.category.clone(),
                Style::default().fg(Color::Gray),
            ),
            Span::from("  "),
            Span::styled(
                self.config.status.label(),
                Style::default()
                    .fg(self.config.status.color())
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("  ROI {}", self.config.roi),
                Style::default().fg(Color::DarkGray),
            ),
        ]))
        .render(chunks[0], buf);

        Gauge::default()
            .gauge_style(Style::default().fg(Color::Cyan))
            .ratio((self.config.progress / 100.0).clamp(0.0, 1.0))
            .label(format!("{:.0}%", self.config.progress))
            .render(chunks[1], buf);

        if chunks[2].height > 0 {
            let lines: Vec<Line> = self
                .config
                .pending_tasks
                .iter()
                .map(|task| {
                    let (mark, color) = if task.completed {
                        ("[x] ", Color::DarkGray)
                    } else {
                        ("[ ] ", Color::White)
                    };
                    Line::from(vec![
                        Span::styled(mark, Style::default().fg(Color::DarkGray)),
                        Span::styled(task.text.clone(), Style::default().fg(color)),
                    ])
                })
                .collect();
            Paragraph::new(lines).render(chunks[2], buf);
        }
    }
}
