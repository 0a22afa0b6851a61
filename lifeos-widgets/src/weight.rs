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

/// Config for the weight tracking card. Weights are in pounds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WeightConfig {
    pub current_weight: f64,
    pub goal_weight: f64,
}

impl Default for WeightConfig {
    fn default() -> Self {
        Self {
            current_weight: 0.0,
            goal_weight: 0.0,
        }
    }
}

/// Current weight against the goal, with a progress bar when losing.
pub struct WeightTracker {
    config: WeightConfig,
}

impl WeightTracker {
    pub fn new(config: WeightConfig) -> Self {
        Self { config }
    }

    fn goal_ratio(&self) -> f64 {
        if self.config.current_weight <= 0.0 {
            return 0.0;
        }
        (self.config.goal_weight / self.config.current_weight).clamp(0.0, 1.0)
    }
}

impl Widget for WeightTracker {
    fn on_config_updated(&mut self, config: &Value) {
        self.config = serde_json::from_value(config.clone()).unwrap_or_default();
    }

    fn render(&mut self, area: Rect, buf: &mut Buffer) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Min(0)])
            .split(area);

        Paragraph::new(Line::from(vec![
            Span::styled(
                format!("{:.1} lbs", self.config.current_weight),
                Style::default().fg(Color::White),
            ),
            Span::styled(
                format!("  goal {:.1}", self.config.goal_weight),
                Style::default().fg(Color::DarkGray),
            ),
        ]))
        .render(chunks[0], buf);

        if chunks[1].height > 0 {
            Gauge::default()
                .gauge_style(Style::default().fg(Color::Magenta))
                .ratio(self.goal_ratio())
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
        let cfg: WeightConfig =
            serde_json::from_value(json!({"currentWeight": 185.5, "goalWeight": 170.0})).unwrap();
        assert_eq!(cfg.current_weight, 185.5);
        assert_eq!(cfg.goal_weight, 170.0);
    }

    #[test]
    fn zero_current_weight_does_not_divide() {
        let tracker = WeightTracker::new(WeightConfig::default());
        assert_eq!(tracker.goal_ratio(), 0.0);
    }
}
