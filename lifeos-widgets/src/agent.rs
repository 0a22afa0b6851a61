use lifeos_core::Widget;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    prelude::Widget as RatatuiWidget,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgentStatus {
    #[default]
    Idle,
    Processing,
    Error,
}

impl AgentStatus {
    fn color(self) -> Color {
        match self {
            AgentStatus::Idle => Color::DarkGray,
            AgentStatus::Processing => Color::Green,
            AgentStatus::Error => Color::Red,
        }
    }

    fn label(self) -> &'static str {
        match self {
            AgentStatus::Idle => "idle",
            AgentStatus::Processing => "processing",
            AgentStatus::Error => "error",
        }
    }
}

/// Config for one AI agent node card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AgentNodeConfig {
    pub name: String,
    pub model: String,
    pub status: AgentStatus,
}

impl Default for AgentNodeConfig {
    fn default() -> Self {
        Self {
            name: "Agent".to_string(),
            model: String::new(),
            status: AgentStatus::Idle,
        }
    }
}

/// Status card for a single background agent.
pub struct AgentNode {
    config: AgentNodeConfig,
}

impl AgentNode {
    pub fn new(config: AgentNodeConfig) -> Self {
        Self { config }
    }
}

impl Widget for AgentNode {
    fn on_config_updated(&mut self, config: &Value) {
        self.config = serde_json::from_value(config.clone()).unwrap_or_default();
    }

    fn render(&mut self, area: Rect, buf: &mut Buffer) {
        let lines = vec![
            Line::from(Span::styled(
                self.config.name.clone(),
                Style::default().fg(Color::White),
            )),
            Line::from(Span::styled(
                self.config.model.clone(),
                Style::default().fg(Color::DarkGray),
            )),
            Line::from(vec![
                Span::styled("● ", Style::default().fg(self.config.status.color())),
                Span::styled(
                    self.config.status.label(),
                    Style::default().fg(self.config.status.color()),
                ),
            ]),
        ];

        Paragraph::new(lines).render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn status_serializes_lowercase() {
        assert_eq!(
            serde_json::to_value(AgentStatus::Processing).unwrap(),
            json!("processing")
        );
        let status: AgentStatus = serde_json::from_value(json!("error")).unwrap();
        assert_eq!(status, AgentStatus::Error);
    }

    #[test]
    fn unknown_status_rejected_so_descriptor_falls_back() {
        let parsed: Result<AgentNodeConfig, _> =
            serde_json::from_value(json!({"name": "a", "model": "m", "status": "sleeping"}));
        assert!(parsed.is_err());
    }
}
