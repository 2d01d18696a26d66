// src/view/analytics.rs — Static dashboard and analytics content
//
// Display-only data. Nothing here is computed from sessions, and none of it
// takes part in the session machine.

use serde::Serialize;

use crate::assessment::{Competency, Priority};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatTile {
    pub label: &'static str,
    pub value: &'static str,
    pub delta: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActivityItem {
    pub title: &'static str,
    pub detail: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LearningPathCard {
    pub title: &'static str,
    pub description: &'static str,
    pub priority: Priority,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrendPoint {
    pub week: &'static str,
    pub score: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RadarPoint {
    pub axis: &'static str,
    pub value: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistoryRow {
    pub date: &'static str,
    pub persona: &'static str,
    pub scenario: &'static str,
    pub duration: &'static str,
    pub score: u8,
    pub status: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalyticsView {
    pub trend: Vec<TrendPoint>,
    pub radar: Vec<RadarPoint>,
    pub history: Vec<HistoryRow>,
}

/// Sidebar counters: sessions, average score, practice time, achievements.
pub fn quick_stats() -> Vec<StatTile> {
    vec![
        StatTile {
            label: "Sessions Completed",
            value: "24",
            delta: "+3 this week",
        },
        StatTile {
            label: "Average Score",
            value: "86%",
            delta: "+5%",
        },
        StatTile {
            label: "Practice Time",
            value: "12h",
            delta: "+2h this week",
        },
        StatTile {
            label: "Achievements",
            value: "8",
            delta: "2 new",
        },
    ]
}

pub fn recent_activity() -> Vec<ActivityItem> {
    vec![
        ActivityItem {
            title: "Session with Dr. Chen completed",
            detail: "Score: 88% - 2 hours ago",
        },
        ActivityItem {
            title: "New feedback available",
            detail: "Manager review - 1 day ago",
        },
    ]
}

pub fn learning_path() -> Vec<LearningPathCard> {
    vec![
        LearningPathCard {
            title: "Objection Handling",
            description: "Improve your response to clinical objections",
            priority: Priority::High,
        },
        LearningPathCard {
            title: "Value Communication",
            description: "Strengthen economic value discussions",
            priority: Priority::Medium,
        },
        LearningPathCard {
            title: "Advanced Scenarios",
            description: "Ready for complex multi-stakeholder calls",
            priority: Priority::Low,
        },
    ]
}

const TREND: [(&str, u8); 8] = [
    ("W1", 72),
    ("W2", 75),
    ("W3", 78),
    ("W4", 82),
    ("W5", 85),
    ("W6", 83),
    ("W7", 86),
    ("W8", 88),
];

const RADAR: [(Competency, u8); 5] = [
    (Competency::ClinicalKnowledge, 87),
    (Competency::RapportBuilding, 92),
    (Competency::ObjectionHandling, 78),
    (Competency::ValueCommunication, 85),
    (Competency::ComplianceEthics, 95),
];

const HISTORY: [(&str, &str, &str, &str, u8); 5] = [
    ("Jan 8, 2026", "Dr. Chen", "Initial Introduction", "8:24", 88),
    ("Jan 7, 2026", "Dr. Roberts", "Objection Handling", "12:15", 85),
    ("Jan 6, 2026", "Dr. Watson", "Competitor Comparison", "15:42", 78),
    ("Jan 5, 2026", "Dr. Chen", "Contract Negotiation", "11:30", 82),
    ("Jan 4, 2026", "Dr. Roberts", "Initial Introduction", "9:18", 84),
];

/// Eight-week trend, competency radar and recent session history.
pub fn analytics() -> AnalyticsView {
    AnalyticsView {
        trend: TREND
            .iter()
            .map(|&(week, score)| TrendPoint { week, score })
            .collect(),
        radar: RADAR
            .iter()
            .map(|&(c, value)| RadarPoint {
                axis: c.short(),
                value,
            })
            .collect(),
        history: HISTORY
            .iter()
            .map(|&(date, persona, scenario, duration, score)| HistoryRow {
                date,
                persona,
                scenario,
                duration,
                score,
                status: "Completed",
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trend_covers_eight_weeks() {
        let view = analytics();
        assert_eq!(view.trend.len(), 8);
        assert_eq!(view.trend.first().map(|p| p.score), Some(72));
        assert_eq!(view.trend.last().map(|p| p.score), Some(88));
    }

    #[test]
    fn test_history_rows_complete() {
        let view = analytics();
        assert_eq!(view.history.len(), 5);
        assert!(view.history.iter().all(|r| r.status == "Completed"));
        assert!(view.history.iter().all(|r| r.score <= 100));
    }

    #[test]
    fn test_radar_axes() {
        let axes: Vec<&str> = analytics().radar.iter().map(|p| p.axis).collect();
        assert_eq!(
            axes,
            vec!["Clinical", "Rapport", "Objections", "Value", "Compliance"]
        );
    }

    #[test]
    fn test_dashboard_content() {
        assert_eq!(quick_stats().len(), 4);
        assert_eq!(recent_activity().len(), 2);
        let priorities: Vec<Priority> = learning_path().iter().map(|c| c.priority).collect();
        assert_eq!(
            priorities,
            vec![Priority::High, Priority::Medium, Priority::Low]
        );
    }
}
