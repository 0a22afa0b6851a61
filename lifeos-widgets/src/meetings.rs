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
pub enum MeetingKind {
    Zoom,
    #[default]
    Physical,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Meeting {
    pub id: String,
    pub time: String,
    /// "AM" or "PM".
    pub period: String,
    pub title: String,
    #[serde(rename = "type", default)]
    pub kind: MeetingKind,
    #[serde(default)]
    pub location: String,
}

/// Config for the daily meeting schedule card.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MeetingScheduleConfig {
    pub meetings: Vec<Meeting>,
}

/// Today's meetings in start order, remote ones highlighted.
pub struct MeetingSchedule {
    config: MeetingScheduleConfig,
}

impl MeetingSchedule {
    pub fn new(config: MeetingScheduleConfig) -> Self {
        Self { config }
    }
}

impl Widget for MeetingSchedule {
    fn on_config_updated(&mut self, config: &Value) {
        self.config = serde_json::from_value(config.clone()).unwrap_or_default();
    }

    fn render(&mut self, area: Rect, buf: &mut Buffer) {
        let lines: Vec<Line> = self
            .config
            .meetings
            .iter()
            .map(|meeting| {
                let location_color = match meeting.kind {
                    MeetingKind::Zoom => Color::Cyan,
                    MeetingKind::Physical => Color::DarkGray,
                };
                Line::from(vec![
                    Span::styled(
                        format!("{} {}  ", meeting.time, meeting.period),
                        Style::default().fg(Color::White),
                    ),
                    Span::styled(meeting.title.clone(), Style::default().fg(Color::Gray)),
                    Span::styled(
                        format!("  {}", meeting.location),
                        Style::default().fg(location_color),
                    ),
                ])
            })
            .collect();

        Paragraph::new(lines).render(area, buf);
    }
}
