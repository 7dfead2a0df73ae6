use chrono::{DateTime, Duration, Utc};

use crate::models::Event;

/// Keep events dated within `[now, now + days]`, preserving order
pub fn filter_events_by_window(events: Vec<Event>, days: u32, now: DateTime<Utc>) -> Vec<Event> {
    let end = now + Duration::days(i64::from(days));
    let before = events.len();

    let kept: Vec<Event> = events
        .into_iter()
        .filter(|event| event.date >= now && event.date <= end)
        .collect();

    if kept.len() < before {
        tracing::debug!(removed = before - kept.len(), days, "Filtered events outside the window");
    }
    kept
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn event_at(title: &str, date: DateTime<Utc>) -> Event {
        Event {
            title: title.to_string(),
            category: "art".to_string(),
            date,
            location: "Arts District".to_string(),
            url: String::new(),
            description: None,
            latitude: None,
            longitude: None,
        }
    }

    #[test]
    fn test_window_bounds() {
        let now = Utc.with_ymd_and_hms(2026, 10, 18, 12, 0, 0).unwrap();
        let events = vec![
            event_at("past", now - Duration::hours(1)),
            event_at("now", now),
            event_at("soon", now + Duration::days(5)),
            event_at("edge", now + Duration::days(30)),
            event_at("late", now + Duration::days(31)),
        ];

        let kept = filter_events_by_window(events, 30, now);
        let titles: Vec<&str> = kept.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["now", "soon", "edge"]);
    }
}
