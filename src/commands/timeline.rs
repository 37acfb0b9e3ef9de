// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::VestEvent;
use crate::timeline::{TimelineEvent, TimelineWindows, UPCOMING_WINDOW_DAYS, partition_timeline};
use crate::utils::{as_of, json_flags, maybe_print_json, pretty_table};
use anyhow::Result;
use chrono::{NaiveDate, Utc};

pub fn windows(vest: &VestEvent, today: NaiveDate, window_days: i64) -> TimelineWindows {
    let now = today
        .and_hms_opt(0, 0, 0)
        .map(|t| t.and_utc())
        .unwrap_or_else(Utc::now);
    partition_timeline(vest.timeline_events(), now, window_days)
}

fn rows(events: &[TimelineEvent], today: NaiveDate) -> Vec<Vec<String>> {
    events
        .iter()
        .map(|e| {
            vec![
                e.date().format("%Y-%m-%d").to_string(),
                e.days_until(today).to_string(),
                e.event_type().to_string(),
                e.title().to_string(),
                if e.actionable() { "yes" } else { "" }.to_string(),
            ]
        })
        .collect()
}

pub fn handle(vest: &VestEvent, m: &clap::ArgMatches) -> Result<()> {
    let (json_flag, jsonl_flag) = json_flags(m);
    let today = as_of(m)?;
    let window_days = m
        .get_one::<i64>("window")
        .copied()
        .unwrap_or(UPCOMING_WINDOW_DAYS);
    let w = windows(vest, today, window_days);

    if jsonl_flag {
        let all: Vec<&TimelineEvent> = w.upcoming.iter().chain(w.later.iter()).collect();
        maybe_print_json(false, true, &all)?;
        return Ok(());
    }
    if maybe_print_json(json_flag, false, &w)? {
        return Ok(());
    }
    if w.upcoming.is_empty() && w.later.is_empty() {
        println!("No upcoming timeline events.");
        return Ok(());
    }

    let headers = ["Date", "Days", "Type", "Title", "Action"];
    if !w.upcoming.is_empty() {
        println!("Next {} days", window_days);
        println!("{}", pretty_table(&headers, rows(&w.upcoming, today)));
    }
    if !w.later.is_empty() {
        println!("Later");
        println!("{}", pretty_table(&headers, rows(&w.later, today)));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{SAMPLE_FIXTURE, parse_vest_event};
    use crate::timeline::EventType;

    #[test]
    fn sample_fixture_groups_by_window() {
        let vest = parse_vest_event(SAMPLE_FIXTURE).unwrap();
        let today = NaiveDate::from_ymd_opt(2026, 10, 17).unwrap();
        let w = windows(&vest, today, UPCOMING_WINDOW_DAYS);
        let types: Vec<EventType> = w.upcoming.iter().map(|e| e.event_type()).collect();
        assert_eq!(
            types,
            vec![
                EventType::AdvisorMeeting,
                EventType::BlackoutPeriod,
                EventType::Vest,
                EventType::TradeWindow,
            ]
        );
        assert_eq!(w.later.len(), 1);
        assert_eq!(w.later[0].event_type(), EventType::TaxDeadline);
        assert!(w.upcoming.windows(2).all(|p| p[0].date() <= p[1].date()));
    }

    #[test]
    fn events_drop_out_once_past() {
        let vest = parse_vest_event(SAMPLE_FIXTURE).unwrap();
        let today = NaiveDate::from_ymd_opt(2026, 11, 20).unwrap();
        let w = windows(&vest, today, UPCOMING_WINDOW_DAYS);
        assert!(w.upcoming.iter().all(|e| e.event_type() != EventType::Vest));
        assert_eq!(w.upcoming.len() + w.later.len(), 2);
    }
}
