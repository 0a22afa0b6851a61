use lifeos_core::Widget;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    prelude::Widget as RatatuiWidget,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Gauge, Paragraph},
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Config for the projects ecosystem card. Progress is 0-100.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EcosystemConfig {
    pub progress: f64,
    pub project_count: u32,
}

impl Default for EcosystemConfig {
    fn default() -> Self {
        Self {
            progress: 0.0,
            project_count: 0,
        }
    }
}

/// Overall ecosystem progress bar plus the active project count.
pub struct EcosystemOverview {
    config: EcosystemConfig,
}

impl EcosystemOverview {
    pub fn new(config: EcosystemConfig) -> Self {
        Self { config }
    }
}

impl Widget for EcosystemOverview {
    fn on_config_updated(&mut self, config: &Value) {
        self.config = serde_json::from_value(config.clone()).unwrap_or_default();
    }

    fn render(&mut self, area: Rect, buf: &mut Buffer) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Min(0)])
            .split(area);

        let ratio = (self.config.progress / 100.0).clamp(0.0, 1.0);
        Gauge::default()
            .gauge_style(Style::default().fg(Color::Cyan))
            .ratio(ratio)
            .label(format!("{:.0}%", self.config.progress))
            .render(chunks[0], buf);

        if chunks[1].height > 0 {
            Paragraph::new(Line::from(vec![
                Span::styled("Projects: ", Style::default().fg(Color::DarkGray)),
                Span::styled(
                    self.config.project_count.to_string(),
                    Style::default().fg(Color::White),
                ),
            ]))
            .render(chunks[1], buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn config_uses_wire_names() {
        let cfg: EcosystemConfig =
            serde_json::from_value(json!({"progress": 62.5, "projectCount": 7})).unwrap();
        assert_eq!(cfg.progress, 62.5);
        assert_eq!(cfg.project_count, 7);
    }

    #[test]
    fn progress_out_of_range_is_clamped_at_render_time() {
        let cfg = EcosystemConfig {
            progress: 150.0,
            project_count: 1,
        };
        assert_eq!((cfg.progress / 100.0).clamp(0.0, 1.0), 1.0);
    }
}
