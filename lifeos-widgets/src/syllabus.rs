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
#[serde(rename_all = "lowercase")]
pub enum ModuleStatus {
    Completed,
    Current,
    #[default]
    Locked,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyllabusModule {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub status: ModuleStatus,
    #[serde(rename = "type", default)]
    pub kind: String,
}

/// Config for the course syllabus card. Progress is 0-100.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SyllabusConfig {
    pub title: String,
    pub progress: f64,
    pub modules: Vec<SyllabusModule>,
}

/// Course outline: overall progress bar plus lesson list with per-module
/// completed/current/locked markers.
pub struct SyllabusView {
    config: SyllabusConfig,
}

impl SyllabusView {
    pub fn new(config: SyllabusConfig) -> Self {
        Self { config }
    }

    fn module_line(module: &SyllabusModule) -> Line<'static> {
        let (marker, style) = match module.status {
            ModuleStatus::Completed => ("✔ ", Style::default().fg(Color::Green)),
            ModuleStatus::Current => (
                "▶ ",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            ModuleStatus::Locked => ("• ", Style::default().fg(Color::DarkGray)),
        };
        Line::from(vec![
            Span::styled(marker, style),
            Span::styled(module.title.clone(), style),
        ])
    }
}

impl Widget for SyllabusView {
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

        let completed = self
            .config
            .modules
            .iter()
            .filter(|m| m.status == ModuleStatus::Completed)
            .count();
        Paragraph::new(Line::from(vec![
            Span::styled(
                self.config.title.clone(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("  {completed} of {} lessons", self.config.modules.len()),
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
            let lines: Vec<Line> = self.config.modules.iter().map(Self::module_line).collect();
            Paragraph::new(lines).render(chunks[2], buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn module_status_serializes_lowercase() {
        let module: SyllabusModule = serde_json::from_value(json!({
            "id": "m1", "title": "Ownership", "description": "",
            "status": "current", "type": "video"
        }))
        .unwrap();
        assert_eq!(module.status, ModuleStatus::Current);
        assert_eq!(module.kind, "video");
    }

    #[test]
    fn missing_status_defaults_to_locked() {
        let module: SyllabusModule =
            serde_json::from_value(json!({"id": "m1", "title": "Traits"})).unwrap();
        assert_eq!(module.status, ModuleStatus::Locked);
    }
}
