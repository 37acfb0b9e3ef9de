// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::ValidationError;

/// Days ahead that count as "upcoming" in the timeline view.
pub const UPCOMING_WINDOW_DAYS: i64 = 90;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EventType {
    Vest,
    TradeWindow,
    CancelPeriod,
    TaxDeadline,
    EsppPurchase,
    PerformanceReview,
    BlackoutPeriod,
    AdvisorMeeting,
}

impl std::fmt::Display for EventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            EventType::Vest => "Vest",
            EventType::TradeWindow => "Trade window",
            EventType::CancelPeriod => "Cancel period",
            EventType::TaxDeadline => "Tax deadline",
            EventType::EsppPurchase => "ESPP purchase",
            EventType::PerformanceReview => "Performance review",
            EventType::BlackoutPeriod => "Blackout period",
            EventType::AdvisorMeeting => "Advisor meeting",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineEventRecord {
    pub id: String,
    pub date: DateTime<Utc>,
    #[serde(rename = "type")]
    pub event_type: EventType,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub actionable: bool,
}

/// A dated milestone around the vest: trade windows, deadlines, meetings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "TimelineEventRecord", into = "TimelineEventRecord")]
pub struct TimelineEvent {
    id: String,
    date: DateTime<Utc>,
    event_type: EventType,
    title: String,
    description: String,
    actionable: bool,
}

impl TryFrom<TimelineEventRecord> for TimelineEvent {
    type Error = ValidationError;

    fn try_from(r: TimelineEventRecord) -> Result<Self, Self::Error> {
        if r.id.trim().is_empty() {
            return Err(ValidationError::invalid("id", "must not be empty"));
        }
        if r.title.trim().is_empty() {
            return Err(ValidationError::invalid("title", "must not be empty"));
        }
        Ok(TimelineEvent {
            id: r.id,
            date: r.date,
            event_type: r.event_type,
            title: r.title,
            description: r.description,
            actionable: r.actionable,
        })
    }
}

impl From<TimelineEvent> for TimelineEventRecord {
    fn from(e: TimelineEvent) -> Self {
        TimelineEventRecord {
            id: e.id,
            date: e.date,
            event_type: e.event_type,
            title: e.title,
            description: e.description,
            actionable: e.actionable,
        }
    }
}

impl TimelineEvent {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn date(&self) -> DateTime<Utc> {
        self.date
    }

    pub fn event_type(&self) -> EventType {
        self.event_type
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn actionable(&self) -> bool {
        self.actionable
    }

    /// Whole days from `today` to the event, never negative.
    pub fn days_until(&self, today: NaiveDate) -> i64 {
        (self.date.date_naive() - today).num_days().max(0)
    }

    pub fn is_past(&self, now: DateTime<Utc>) -> bool {
        self.date < now
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineWindows {
    pub upcoming: Vec<TimelineEvent>,
    pub later: Vec<TimelineEvent>,
}

/// Splits events into those due within `window_days` of `now` and those
/// further out, each sorted by date. Past events fall in neither group.
pub fn partition_timeline(
    events: &[TimelineEvent],
    now: DateTime<Utc>,
    window_days: i64,
) -> TimelineWindows {
    let today = now.date_naive();
    let mut sorted: Vec<&TimelineEvent> = events.iter().collect();
    sorted.sort_by_key(|e| e.date);

    let mut windows = TimelineWindows::default();
    for e in sorted {
        let days = e.days_until(today);
        if days > window_days {
            windows.later.push(e.clone());
        } else if !e.is_past(now) {
            windows.upcoming.push(e.clone());
        }
    }
    debug!(
        upcoming = windows.upcoming.len(),
        later = windows.later.len(),
        skipped = events.len() - windows.upcoming.len() - windows.later.len(),
        "partitioned timeline"
    );
    windows
}
