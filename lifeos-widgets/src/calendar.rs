use chrono::{Datelike, Days, Local, NaiveDate};
use crossterm::event::KeyCode;
use lifeos_core::{Event, EventResult, Widget};
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

/// How many days to show either side of the selected one.
const STRIP_RADIUS: u64 = 4;

/// Config for the horizontal calendar strip. The date is `YYYY-MM-DD`;
/// absent or unparseable dates fall back to today.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CalendarConfig {
    pub initial_date: Option<String>,
}

impl CalendarConfig {
    fn resolve(&self) -> NaiveDate {
        self.initial_date
            .as_deref()
            .and_then(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok())
            .unwrap_or_else(|| Local::now().date_naive())
    }
}

/// Scrollable strip of days centered on a selected date. Left/Right move
/// the selection, `t` jumps back to today.
pub struct HorizontalCalendar {
    selected: NaiveDate,
}

impl HorizontalCalendar {
    pub fn new(config: CalendarConfig) -> Self {
        Self {
            selected: config.resolve(),
        }
    }

    pub fn selected(&self) -> NaiveDate {
        self.selected
    }

    fn strip(&self) -> Vec<NaiveDate> {
        let start = self.selected - Days::new(STRIP_RADIUS);
        (0..(STRIP_RADIUS * 2 + 1))
            .map(|offset| start + Days::new(offset))
            .collect()
    }
}

impl Widget for HorizontalCalendar {
    fn on_config_updated(&mut self, config: &Value) {
        let config: CalendarConfig =
            serde_json::from_value(config.clone()).unwrap_or_default();
        self.selected = config.resolve();
    }

    fn on_event(&mut self, event: Event) -> EventResult {
        if let Event::Key(key) = event {
            match key.code {
                KeyCode::Left => {
                    self.selected = self.selected - Days::new(1);
                    return EventResult::Consumed;
                }
                KeyCode::Right => {
                    self.selected = self.selected + Days::new(1);
                    return EventResult::Consumed;
                }
                KeyCode::Char('t') => {
                    self.selected = Local::now().date_naive();
                    return EventResult::Consumed;
                }
                _ => {}
            }
        }
        EventResult::Ignored
    }

    fn render(&mut self, area: Rect, buf: &mut Buffer) {
        let today = Local::now().date_naive();
        let header = Line::from(Span::styled(
            self.selected.format("%B %Y").to_string(),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ));

        let mut spans = Vec::new();
        for date in self.strip() {
            let label = format!("{} {:>2}", date.format("%a"), date.day());
            let style = if date == self.selected {
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else if date == today {
                Style::default().fg(Color::Cyan)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            spans.push(Span::styled(label, style));
            spans.push(Span::from("  "));
        }

        Paragraph::new(vec![header, Line::from(spans)]).render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEvent, KeyModifiers};
    use serde_json::json;

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn initial_date_comes_from_config() {
        let cfg: CalendarConfig =
            serde_json::from_value(json!({"initialDate": "2026-08-15"})).unwrap();
        let widget = HorizontalCalendar::new(cfg);
        assert_eq!(
            widget.selected(),
            NaiveDate::from_ymd_opt(2026, 8, 15).unwrap()
        );
    }

    #[test]
    fn bad_date_falls_back_to_today() {
        let cfg: CalendarConfig =
            serde_json::from_value(json!({"initialDate": "yesterday"})).unwrap();
        let widget = HorizontalCalendar::new(cfg);
        assert_eq!(widget.selected(), Local::now().date_naive());
    }

    #[test]
    fn arrow_keys_move_the_selection() {
        let cfg: CalendarConfig =
            serde_json::from_value(json!({"initialDate": "2026-08-15"})).unwrap();
        let mut widget = HorizontalCalendar::new(cfg);
        assert_eq!(widget.on_event(key(KeyCode::Right)), EventResult::Consumed);
        assert_eq!(
            widget.selected(),
            NaiveDate::from_ymd_opt(2026, 8, 16).unwrap()
        );
        widget.on_event(key(KeyCode::Left));
        widget.on_event(key(KeyCode::Left));
        assert_eq!(
            widget.selected(),
            NaiveDate::from_ymd_opt(2026, 8, 14).unwrap()
        );
    }
}
