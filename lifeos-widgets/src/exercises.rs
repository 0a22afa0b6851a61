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

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Exercise {
    pub id: String,
    pub name: String,
    pub sets: u32,
    pub reps: u32,
    /// Kilograms.
    pub weight: f64,
    #[serde(default)]
    pub icon: String,
}

/// Config for the workout plan card.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MoveModifierConfig {
    pub exercises: Vec<Exercise>,
}

/// The day's exercises with sets, reps, and load.
pub struct MoveModifier {
    config: MoveModifierConfig,
}

impl MoveModifier {
    pub fn new(config: MoveModifierConfig) -> Self {
        Self { config }
    }
}

impl Widget for MoveModifier {
    fn on_config_updated(&mut self, config: &Value) {
        self.config = serde_json::from_value(config.clone()).unwrap_or_default();
    }

    fn render(&mut self, area: Rect, buf: &mut Buffer) {
        if self.config.exercises.is_empty() {
            Paragraph::new("No exercises added for today.")
                .style(Style::default().fg(Color::DarkGray))
                .render(area, buf);
            return;
        }

        let lines: Vec<Line> = self
            .config
            .exercises
            .iter()
            .map(|exercise| {
                Line::from(vec![
                    Span::styled(
                        exercise.name.clone(),
                        Style::default().fg(Color::White),
                    ),
                    Span::styled(
                        format!(
                            "  {} Sets x {} Reps • {}kg",
                            exercise.sets, exercise.reps, exercise.weight
                        ),
                        Style::default().fg(Color::DarkGray),
                    ),
                ])
            })
            .collect();

        Paragraph::new(lines).render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn config_uses_wire_names() {
        let cfg: MoveModifierConfig = serde_json::from_value(json!({
            "exercises": [
                {"id": "e1", "name": "Squat", "sets": 3, "reps": 8, "weight": 80.0}
            ]
        }))
        .unwrap();
        assert_eq!(cfg.exercises[0].name, "Squat");
        assert_eq!(cfg.exercises[0].weight, 80.0);
    }
}
