//! Built-in widget implementations for the LifeOS dashboard, plus the
//! registration helper that wires them into a `WidgetRegistry`.

pub mod agent;
pub mod assets;
pub mod calendar;
pub mod checklist;
pub mod ecosystem;
pub mod exercises;
pub mod job_stats;
pub mod meetings;
pub mod net_worth;
pub mod project_card;
pub mod project_track;
pub mod spend;
pub mod syllabus;
pub mod sync_schedule;
pub mod weight;

pub use agent::{AgentNode, AgentNodeConfig, AgentStatus};
pub use assets::{Asset, AssetList, AssetListConfig};
pub use calendar::{CalendarConfig, HorizontalCalendar};
pub use checklist::{ChecklistConfig, ChecklistItem, DailyChecklist};
pub use ecosystem::{EcosystemConfig, EcosystemOverview};
pub use exercises::{Exercise, MoveModifier, MoveModifierConfig};
pub use job_stats::{JobStats, JobStatsConfig};
pub use meetings::{Meeting, MeetingKind, MeetingSchedule, MeetingScheduleConfig};
pub use net_worth::{NetWorthHero, NetWorthHeroConfig};
pub use project_card::{CardStatus, CardTask, ProjectCard, ProjectCardConfig};
pub use project_track::{
    ProjectTrack, ProjectTrackConfig, TrackPriority, TrackStatus, TrackedProject,
};
pub use spend::{SpendAnalyzer, SpendCategory, SpendConfig};
pub use syllabus::{ModuleStatus, SyllabusConfig, SyllabusModule, SyllabusView};
pub use sync_schedule::{SyncSchedule, SyncScheduleConfig};
pub use weight::{WeightConfig, WeightTracker};

use lifeos_core::{GridSpan, WidgetDescriptor, WidgetRegistry};

/// Register every built-in widget type. The hero, ecosystem, and calendar
/// cards span two columns by default; everything else starts at 1x1.
pub fn register_defaults(registry: &mut WidgetRegistry) {
    registry.register("sports-calendar", || {
        WidgetDescriptor::new(HorizontalCalendar::new)
            .with_default_size(GridSpan::Two, GridSpan::One)
    });
    registry.register("sports-checklist", || {
        WidgetDescriptor::new(DailyChecklist::new)
    });
    registry.register("sports-weight", || WidgetDescriptor::new(WeightTracker::new));
    registry.register("sports-move", || WidgetDescriptor::new(MoveModifier::new));
    registry.register("progress-syllabus", || {
        WidgetDescriptor::new(SyllabusView::new)
    });
    registry.register("progress-sync", || WidgetDescriptor::new(SyncSchedule::new));
    registry.register("investments-hero", || {
        WidgetDescriptor::new(NetWorthHero::new).with_default_size(GridSpan::Two, GridSpan::One)
    });
    registry.register("investments-spend", || {
        WidgetDescriptor::new(SpendAnalyzer::new)
    });
    registry.register("investments-assets", || WidgetDescriptor::new(AssetList::new));
    registry.register("ai-agents", || WidgetDescriptor::new(AgentNode::new));
    registry.register("job-stats", || WidgetDescriptor::new(JobStats::new));
    registry.register("job-meetings", || {
        WidgetDescriptor::new(MeetingSchedule::new)
    });
    registry.register("job-track", || WidgetDescriptor::new(ProjectTrack::new));
    registry.register("projects-ecosystem", || {
        WidgetDescriptor::new(EcosystemOverview::new)
            .with_default_size(GridSpan::Two, GridSpan::One)
    });
    registry.register("projects-card", || WidgetDescriptor::new(ProjectCard::new));
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn registry() -> WidgetRegistry {
        let mut registry = WidgetRegistry::new();
        register_defaults(&mut registry);
        registry
    }

    #[test]
    fn all_builtin_types_are_registered() {
        let registry = registry();
        assert_eq!(
            registry.names(),
            vec![
                "ai-agents",
                "investments-assets",
                "investments-hero",
                "investments-spend",
                "job-meetings",
                "job-stats",
                "job-track",
                "progress-sync",
                "progress-syllabus",
                "projects-card",
                "projects-ecosystem",
                "sports-calendar",
                "sports-checklist",
                "sports-move",
                "sports-weight",
            ]
        );
    }

    #[test]
    fn wide_cards_default_to_two_columns() {
        let registry = registry();
        assert_eq!(
            registry.default_size("investments-hero"),
            (GridSpan::Two, GridSpan::One)
        );
        assert_eq!(
            registry.default_size("projects-ecosystem"),
            (GridSpan::Two, GridSpan::One)
        );
        assert_eq!(
            registry.default_size("sports-calendar"),
            (GridSpan::Two, GridSpan::One)
        );
        assert_eq!(
            registry.default_size("job-stats"),
            (GridSpan::One, GridSpan::One)
        );
    }

    #[test]
    fn sync_schedule_default_config_carries_the_window() {
        let registry = registry();
        let config = registry.default_config("progress-sync");
        assert_eq!(config["windowStart"], json!("08:00 PM"));
        assert_eq!(config["windowEnd"], json!("09:30 PM"));
    }

    #[test]
    fn spend_analyzer_default_config_carries_the_breakdown() {
        let registry = registry();
        let config = registry.default_config("investments-spend");
        assert_eq!(config["categories"][0]["name"], json!("Essential"));
        assert_eq!(config["categories"][0]["value"], json!(1800.0));
    }
}
