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

/// Config for the job stats card. Growth and productivity are percentages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct JobStatsConfig {
    pub salary: f64,
    pub salary_growth: f64,
    pub productivity: f64,
}

impl Default for JobStatsConfig {
    fn default() -> Self {
        Self {
            salary: 0.0,
            salary_growth: 0.0,
            productivity: 0.0,
        }
    }
}

/// Salary, growth, and productivity at a glance.
pub struct JobStats {
    config: JobStatsConfig,
}

impl JobStats {
    pub fn new(config: JobStatsConfig) -> Self {
        Self { config }
    }

    fn stat_line(label: &str, value: String, color: Color) -> Line<'static> {
        Line::from(vec![
            Span::styled(format!("{label}: "), Style::default().fg(Color::DarkGray)),
            Span::styled(value, Style::default().fg(color)),
        ])
    }
}

impl Widget for JobStats {
    fn on_config_updated(&mut self, config: &Value) {
        self.config = serde_json::from_value(config.clone()).unwrap_or_default();
    }

    fn render(&mut self, area: Rect, buf: &mut Buffer) {
        let growth_color = if self.config.salary_growth >= 0.0 {
            Color::Green
        } else {
            Color::Red
        };

        let lines = vec![
            Self::stat_line("Salary", format!("${:.0}", self.config.salary), Color::White),
            Self::stat_line(
                "Growth",
                format!("{:+.1}%", self.config.salary_growth),
                growth_color,
            ),
            Self::stat_line(
                "Productivity",
                format!("{:.0}%", self.config.productivity),
                Color::Cyan,
            ),
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
        let cfg: JobStatsConfig = serde_json::from_value(json!({
            "salary": 95000.0,
            "salaryGrowth": 4.5,
            "productivity": 80.0,
        }))
        .unwrap();
        assert_eq!(cfg.salary, 95000.0);
        assert_eq!(cfg.salary_growth, 4.5);
        assert_eq!(cfg.productivity, 80.0);
    }
}
