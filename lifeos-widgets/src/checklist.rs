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

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChecklistItem {
    pub id: String,
    pub text: String,
    #[serde(default)]
    pub completed: bool,
}

/// Config for the daily checklist card.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ChecklistConfig {
    pub items: Vec<ChecklistItem>,
}

/// Day's checklist with a done count and strike-through completed items.
pub struct DailyChecklist {
    config: ChecklistConfig,
}

impl DailyChecklist {
    pub fn new(config: ChecklistConfig) -> Self {
        Self { config }
    }
}

impl Widget for DailyChecklist {
    fn on_config_updated(&mut self, config: &Value) {
        self.config = serde_json::from_value(config.clone()).unwrap_or_default();
    }

    fn render(&mut self, area: Rect, buf: &mut Buffer) {
        let done = self.config.items.iter().filter(|i| i.completed).count();
        let mut lines = vec![Line::from(Span::styled(
            format!("{done} of {} Done", self.config.items.len()),
            Style::default().fg(Color::Cyan),
        ))];

        for item in &self.config.items {
            let (mark, style) = if item.completed {
                (
                    "[x] ",
                    Style::default()
                        .fg(Color::DarkGray)
                        .add_modifier(Modifier::CROSSED_OUT),
                )
            } else {
                ("[ ] ", Style::default().fg(Color::White))
            };
            lines.push(Line::from(vec![
                Span::styled(mark, Style::default().fg(Color::DarkGray)),
                Span::styled(item.text.clone(), style),
            ]));
        }

        Paragraph::new(lines).render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn config_uses_wire_names() {
        let cfg: ChecklistConfig = serde_json::from_value(json!({
            "items": [
                {"id": "a", "text": "Stretch", "completed": true},
                {"id": "b", "text": "Run 5k"},
            ]
        }))
        .unwrap();
        assert_eq!(cfg.items.len(), 2);
        assert!(cfg.items[0].completed);
        assert!(!cfg.items[1].completed);
    }

    #[test]
    fn empty_config_yields_empty_list() {
        let cfg: ChecklistConfig = serde_json::from_value(json!({})).unwrap();
        assert!(cfg.items.is_empty());
    }
}
