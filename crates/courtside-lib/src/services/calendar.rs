// ICS schedule feed
// Renders the event list as an iCalendar document so the schedule can be
// subscribed to from phone and desktop calendars.

use chrono::{Duration, NaiveDate, NaiveTime};
use icalendar::{Calendar, Component, Event as IcsEvent, EventLike};

use crate::models::{Event, TeamSettings};

/// Assumed game length for calendar blocks
const GAME_DURATION_MINUTES: i64 = 120;

/// Build an iCalendar document for the full schedule
pub fn schedule_calendar(settings: &TeamSettings, events: &[Event]) -> Calendar {
    let mut calendar = Calendar::new();
    calendar.name(&format!("{} Schedule", settings.home_team_name));

    for event in events {
        let Ok(date) = NaiveDate::parse_from_str(&event.date, "%Y-%m-%d") else {
            log::warn!("[calendar] Skipping event {} with bad date {:?}", event.id, event.date);
            continue;
        };

        let summary = if event.is_home {
            format!("{} vs {}", settings.home_team_name, event.opponent_name)
        } else {
            format!("{} @ {}", settings.home_team_name, event.opponent_name)
        };

        let mut ics = IcsEvent::new();
        ics.uid(&format!("courtside-event-{}", event.id));
        ics.summary(&summary);

        let location = if event.is_home {
            Some(settings.home_location.as_str()).filter(|l| !l.is_empty())
        } else {
            event.location.as_deref()
        };
        if let Some(location) = location {
            ics.location(location);
        }
        if let Some(notes) = event.notes.as_deref() {
            ics.description(notes);
        }

        // Earliest grade-level tip-off; all-day when no time is recorded
        match first_tip_off(event) {
            Some(time) => {
                let start = date.and_time(time);
                ics.starts(start);
                ics.ends(start + Duration::minutes(GAME_DURATION_MINUTES));
            }
            None => {
                ics.all_day(date);
            }
        }

        calendar.push(ics.done());
    }

    calendar.done()
}

fn first_tip_off(event: &Event) -> Option<NaiveTime> {
    [event.time_7th.as_deref(), event.time_8th.as_deref()]
        .into_iter()
        .flatten()
        .filter_map(parse_time)
        .min()
}

fn parse_time(value: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(value, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M:%S"))
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> TeamSettings {
        TeamSettings {
            home_team_name: "Wildcats".to_string(),
            home_location: "12 Gym Rd".to_string(),
            home_logo: None,
        }
    }

    fn event(is_home: bool, time_7th: Option<&str>) -> Event {
        Event {
            id: 7,
            date: "2024-01-10".to_string(),
            opponent_name: "Eagles".to_string(),
            opponent_logo: None,
            is_home,
            location: Some("99 Away Ln".to_string()),
            time_7th: time_7th.map(str::to_string),
            time_8th: None,
            score_7th_home: None,
            score_7th_away: None,
            score_8th_home: None,
            score_8th_away: None,
            notes: Some("Wear white".to_string()),
            is_non_conference: false,
            created_at: String::new(),
        }
    }

    #[test]
    fn test_home_game_renders_vs_and_home_location() {
        let ics = schedule_calendar(&settings(), &[event(true, Some("17:30"))]).to_string();
        assert!(ics.contains("SUMMARY:Wildcats vs Eagles"));
        assert!(ics.contains("LOCATION:12 Gym Rd"));
        assert!(ics.contains("DESCRIPTION:Wear white"));
    }

    #[test]
    fn test_away_game_uses_venue_address() {
        let ics = schedule_calendar(&settings(), &[event(false, None)]).to_string();
        assert!(ics.contains("SUMMARY:Wildcats @ Eagles"));
        assert!(ics.contains("LOCATION:99 Away Ln"));
    }

    #[test]
    fn test_bad_dates_are_skipped() {
        let mut broken = event(true, None);
        broken.date = "next tuesday".to_string();
        let calendar = schedule_calendar(&settings(), &[broken]);
        assert_eq!(calendar.components.len(), 0);
    }
}
