use crossterm::event::KeyCode;
use lifeos_core::{Event, EventResult, Widget};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    prelude::Widget as RatatuiWidget,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TrackStatus {
    #[serde(rename = "To Do")]
    ToDo,
    #[default]
    #[serde(rename = "In Progress")]
    InProgress,
    Done,
}

impl TrackStatus {
    const ALL: [TrackStatus; 3] = [TrackStatus::ToDo, TrackStatus::InProgress, TrackStatus::Done];

    fn label(self) -> &'static str {
        match self {
            TrackStatus::ToDo => "To Do",
            TrackStatus::InProgress => "In Progress",
            TrackStatus::Done => "Done",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TrackPriority {
    High,
    #[default]
    Medium,
    Low,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackedProject {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub parent_project: String,
    #[serde(default)]
    pub due_date: String,
    #[serde(default)]
    pub priority: TrackPriority,
    #[serde(default)]
    pub status: TrackStatus,
}

/// Config for the project tracking board.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProjectTrackConfig {
    pub projects: Vec<TrackedProject>,
}

/// Kanban-style board filtered by one status tab at a time. Left/Right
/// switch tabs; the In Progress tab is shown first.
pub struct ProjectTrack {
    config: ProjectTrackConfig,
    tab: TrackStatus,
}

impl ProjectTrack {
    pub fn new(config: ProjectTrackConfig) -> Self {
        Self {
            config,
            tab: TrackStatus::InProgress,
        }
    }

    pub fn tab(&self) -> TrackStatus {
        self.tab
    }

    fn shift_tab(&mut self, delta: isize) {
        let current = TrackStatus::ALL
            .iter()
            .position(|&s| s == self.tab)
            .unwrap_or(1);
        let len = TrackStatus::ALL.len() as isize;
        let next = (current as isize + delta).rem_euclid(len);
        self.tab = TrackStatus::ALL[next as usize];
    }
}

impl Widget for ProjectTrack {
    fn on_config_updated(&mut self, config: &Value) {
        self.config = serde_json::from_value(config.clone()).unwrap_or_default();
    }

    fn on_event(&mut self, event: Event) -> EventResult {
        if let Event::Key(key) = event {
            match key.code {
                KeyCode::Left => {
                    self.shift_tab(-1);
                    return EventResult::Consumed;
                }
                KeyCode::Right => {
                    self.shift_tab(1);
                    return EventResult::Consumed;
                }
                _ => {}
            }
        }
        EventResult::Ignored
    }

    fn render(&mut self, area: Rect, buf: &mut Buffer) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Min(0)])
            .split(area);

        let mut tabs = Vec::new();
        for status in TrackStatus::ALL {
            let style = if status == self.tab {
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            tabs.push(Span::styled(status.label(), style));
            tabs.push(Span::from("  "));
        }
        Paragraph::new(Line::from(tabs)).render(chunks[0], buf);

        let filtered: Vec<&TrackedProject> = self
            .config
            .projects
            .iter()
            .filter(|p| p.status == self.tab)
            .collect();

        if chunks[1].height == 0 {
            return;
        }
        if filtered.is_empty() {
            Paragraph::new("No projects in this stage")
                .style(Style::default().fg(Color::DarkGray))
                .render(chunks[1], buf);
            return;
        }

        let lines: Vec<Line> = filtered
            .iter()
            .map(|project| {
                let priority_color = match project.priority {
                    TrackPriority::High => Color::Red,
                    TrackPriority::Medium => Color::Yellow,
                    TrackPriority::Low => Color::DarkGray,
                };
                Line::from(vec![
                    Span::styled(
                        project.title.clone(),
                        Style::default().fg(Color::White),
                    ),
                    Span::styled(
                        format!("  {} • Due {}", project.parent_project, project.due_date),
                        Style::default().fg(Color::DarkGray),
                    ),
                    Span::styled(
                        format!("  {:?}", project.priority),
                        Style::default().fg(priority_color),
                    ),
                ])
            })
            .collect();
        Paragraph::new(lines).render(chunks[1], buf);
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
    fn status_uses_the_spaced_wire_names() {
        let project: TrackedProject = serde_json::from_value(json!({
            "id": "p1", "title": "Port parser", "parentProject": "Compiler",
            "dueDate": "Sep 12", "priority": "High", "status": "To Do"
        }))
        .unwrap();
        assert_eq!(project.status, TrackStatus::ToDo);
        assert_eq!(project.priority, TrackPriority::High);
        assert_eq!(
            serde_json::to_value(TrackStatus::InProgress).unwrap(),
            json!("In Progress")
        );
    }

    #[test]
    fn arrow_keys_cycle_the_tabs() {
        let mut widget = ProjectTrack::new(ProjectTrackConfig::default());
        assert_eq!(widget.tab(), TrackStatus::InProgress);
        widget.on_event(key(KeyCode::Right));
        assert_eq!(widget.tab(), TrackStatus::Done);
        widget.on_event(key(KeyCode::Right));
        assert_eq!(widget.tab(), TrackStatus::ToDo);
        widget.on_event(key(KeyCode::Left));
        assert_eq!(widget.tab(), TrackStatus::Done);
    }
}
