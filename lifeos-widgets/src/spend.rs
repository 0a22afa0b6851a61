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
pub struct SpendCategory {
    pub name: String,
    pub value: f64,
}

/// Config for the spend analyzer card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SpendConfig {
    pub categories: Vec<SpendCategory>,
}

impl Default for SpendConfig {
    fn default() -> Self {
        Self {
            categories: vec![
                SpendCategory {
                    name: "Essential".to_string(),
                    value: 1800.0,
                },
                SpendCategory {
                    name: "Lifestyle".to_string(),
                    value: 600.0,
                },
                SpendCategory {
                    name: "Other".to_string(),
                    value: 120.0,
                },
            ],
        }
    }
}

/// Per-category spending breakdown with a total.
pub struct SpendAnalyzer {
    config: SpendConfig,
}

impl SpendAnalyzer {
    pub fn new(config: SpendConfig) -> Self {
        Self { config }
    }

    fn total(&self) -> f64 {
        self.config.categories.iter().map(|c| c.value).sum()
    }
}

impl Widget for SpendAnalyzer {
    fn on_config_updated(&mut self, config: &Value) {
        self.config = serde_json::from_value(config.clone()).unwrap_or_default();
    }

    fn render(&mut self, area: Rect, buf: &mut Buffer) {
        let mut lines = vec![Line::from(vec![
            Span::styled("Total ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("${:.0}", self.total()),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
        ])];

        for category in &self.config.categories {
            lines.push(Line::from(vec![
                Span::styled(
                    format!("{:<12}", category.name),
                    Style::default().fg(Color::Gray),
                ),
                Span::styled(
                    format!("${:.0}", category.value),
                    Style::default().fg(Color::White),
                ),
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
    fn defaults_carry_the_sample_breakdown() {
        let cfg = SpendConfig::default();
        assert_eq!(cfg.categories.len(), 3);
        assert_eq!(cfg.categories[0].name, "Essential");
        assert_eq!(SpendAnalyzer::new(cfg).total(), 2520.0);
    }

    #[test]
    fn config_uses_wire_names() {
        let cfg: SpendConfig = serde_json::from_value(json!({
            "categories": [{"name": "Rent", "value": 900.0}]
        }))
        .unwrap();
        assert_eq!(cfg.categories.len(), 1);
        assert_eq!(SpendAnalyzer::new(cfg).total(), 900.0);
    }
}
