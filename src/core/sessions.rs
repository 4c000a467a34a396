use chrono::{DateTime, Timelike, Utc};
use chrono_tz::US::Eastern;
use serde::{Deserialize, Serialize};

/// A daily wall-clock window in US Eastern time, as (hour, minute) pairs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionTime {
    pub name: String,
    pub start: (u32, u32),
    pub end: (u32, u32),
}

impl SessionTime {
    pub fn new(name: &str, start: (u32, u32), end: (u32, u32)) -> Self {
        Self {
            name: name.to_string(),
            start,
            end,
        }
    }

    fn contains(&self, minute_of_day: u32) -> bool {
        let start_min = self.start.0 * 60 + self.start.1;
        let end_min = self.end.0 * 60 + self.end.1;

        if start_min < end_min {
            minute_of_day >= start_min && minute_of_day < end_min
        } else {
            // Wraps midnight
            minute_of_day >= start_min || minute_of_day < end_min
        }
    }
}

pub fn default_sessions() -> Vec<SessionTime> {
    vec![
        SessionTime::new("london", (2, 0), (11, 0)),
        SessionTime::new("new_york", (7, 0), (16, 0)),
    ]
}

/// First configured session covering `utc_now`, if any.
pub fn active_session(sessions: &[SessionTime], utc_now: DateTime<Utc>) -> Option<&SessionTime> {
    let et_now = utc_now.with_timezone(&Eastern);
    let current = et_now.hour() * 60 + et_now.minute();
    sessions.iter().find(|s| s.contains(current))
}
