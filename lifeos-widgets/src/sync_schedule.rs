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

const DAY_LABELS: [&str; 7] = ["S", "M", "T", "W", "T", "F", "S"];

/// Config for the nightly sync window card. Days are indexed 0 = Sunday.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SyncScheduleConfig {
    pub window_start: String,
    pub window_end: String,
    pub active_days: Vec<u8>,
}

impl Default for SyncScheduleConfig {
    fn default() -> Self {
        Self {
            window_start: "08:00 PM".to_string(),
            window_end: "09:30 PM".to_string(),
            active_days: vec![1, 2, 3, 4, 5],
        }
    }
}

/// Shows the nightly sync window and which weekdays it runs.
pub struct SyncSchedule {
    config: SyncScheduleConfig,
}

impl SyncSchedule {
    pub fn new(config: SyncScheduleConfig) -> Self {
        Self { config }
    }

    fn day_strip(&self) -> Line<'static> {
        let mut spans = Vec::with_capacity(DAY_LABELS.len() * 2);
        for (index, label) in DAY_LABELS.iter().enumerate() {
            let style = if self.config.active_days.contains(&(index as u8)) {
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            spans.push(Span::styled((*label).to_string(), style));
            spans.push(Span::from(" "));
        }
        Line::from(spans)
    }
}

impl Widget for SyncSchedule {
    fn on_config_updated(&mut self, config: &Value) {
        self.config = serde_json::from_value(config.clone()).unwrap_or_default();
    }

    fn render(&mut self, area: Rect, buf: &mut Buffer) {
        let lines = vec![
            Line::from(vec![
                Span::styled("Window: ", Style::default().fg(Color::DarkGray)),
                Span::styled(
                    format!("{} - {}", self.config.window_start, self.config.window_end),
                    Style::default().fg(Color::White),
                ),
            ]),
            self.day_strip(),
        ];

        Paragraph::new(lines).render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn defaults_cover_weekday_evenings() {
        let cfg = SyncScheduleConfig::default();
        assert_eq!(cfg.window_start, "08:00 PM");
        assert_eq!(cfg.window_end, "09:30 PM");
        assert_eq!(cfg.active_days, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn config_uses_wire_names() {
        let cfg: SyncScheduleConfig = serde_json::from_value(json!({
            "windowStart": "06:00 AM",
            "windowEnd": "07:00 AM",
            "activeDays": [0, 6],
        }))
        .unwrap();
        assert_eq!(cfg.active_days, vec![0, 6]);
        assert_eq!(cfg.window_start, "06:00 AM");
    }
}
