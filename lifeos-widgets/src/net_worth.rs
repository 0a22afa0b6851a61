use lifeos_core::Widget;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    prelude::Widget as RatatuiWidget,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Config for the investments hero card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NetWorthHeroConfig {
    pub total_net_worth: f64,
    pub performance_diff: f64,
}

impl Default for NetWorthHeroConfig {
    fn default() -> Self {
        Self {
            total_net_worth: 0.0,
            performance_diff: 0.0,
        }
    }
}

/// Headline net-worth figure with a colored performance delta.
pub struct NetWorthHero {
    config: NetWorthHeroConfig,
}

impl NetWorthHero {
    pub fn new(config: NetWorthHeroConfig) -> Self {
        Self { config }
    }
}

impl Widget for NetWorthHero {
    fn on_config_updated(&mut self, config: &Value) {
        self.config = serde_json::from_value(config.clone()).unwrap_or_default();
    }

    fn render(&mut self, area: Rect, buf: &mut Buffer) {
        let diff = self.config.performance_diff;
        let diff_color = if diff >= 0.0 { Color::Green } else { Color::Red };
        let sign = if diff >= 0.0 { "+" } else { "" };

        let lines = vec![
            Line::from(Span::styled(
                "Total Net Worth",
                Style::default().fg(Color::DarkGray),
            )),
            Line::from(Span::styled(
                format!("${:.2}", self.config.total_net_worth),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                format!("{}{:.2}% this month", sign, diff),
                Style::default().fg(diff_color),
            )),
        ];

        Paragraph::new(lines).render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn config_uses_wire_names() {
        let cfg: NetWorthHeroConfig =
            serde_json::from_value(json!({"totalNetWorth": 1200.5, "performanceDiff": -3.0}))
                .unwrap();
        assert_eq!(cfg.total_net_worth, 1200.5);
        assert_eq!(cfg.performance_diff, -3.0);
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let cfg: NetWorthHeroConfig = serde_json::from_value(json!({})).unwrap();
        assert_eq!(cfg, NetWorthHeroConfig::default());
    }
}
