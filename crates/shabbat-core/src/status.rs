//! Point-in-time status snapshot.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::SECONDS_PER_MINUTE;
use crate::error::Result;
use crate::format::format_duration;
use crate::location::Location;
use crate::sunset::{SpaSunsetProvider, SunsetProvider};
use crate::window::{ShabbatTimes, ShabbatWindowCalculator, anchor_friday};

/// Immutable status at `current_time`. Exactly one of `next_shabbat_start` /
/// `shabbat_end` is set, and the matching minute counter with it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShabbatStatus {
    pub is_shabbat: bool,
    pub current_time: DateTime<Utc>,
    pub next_shabbat_start: Option<DateTime<Utc>>,
    pub shabbat_end: Option<DateTime<Utc>>,
    pub minutes_until_start: Option<u64>,
    pub minutes_until_end: Option<u64>,
}

impl ShabbatStatus {
    fn inside(now: DateTime<Utc>, window: ShabbatTimes) -> Self {
        Self {
            is_shabbat: true,
            current_time: now,
            next_shabbat_start: None,
            shabbat_end: Some(window.havdalah),
            minutes_until_start: None,
            minutes_until_end: Some(whole_minutes_until(now, window.havdalah)),
        }
    }

    fn outside(now: DateTime<Utc>, upcoming: ShabbatTimes) -> Self {
        Self {
            is_shabbat: false,
            current_time: now,
            next_shabbat_start: Some(upcoming.candle_lighting),
            shabbat_end: None,
            minutes_until_start: Some(whole_minutes_until(now, upcoming.candle_lighting)),
            minutes_until_end: None,
        }
    }

    /// Minutes to whichever boundary comes next.
    pub fn minutes_remaining(&self) -> u64 {
        self.minutes_until_end
            .or(self.minutes_until_start)
            .unwrap_or(0)
    }

    /// Human countdown to the next boundary, e.g. "2h 30m".
    pub fn countdown(&self) -> String {
        format_duration(self.minutes_remaining())
    }

    /// The boundary the countdown runs to.
    pub fn next_boundary(&self) -> Option<DateTime<Utc>> {
        self.shabbat_end.or(self.next_shabbat_start)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Floor of whole minutes from `from` to `to`, never negative.
pub fn whole_minutes_until(from: DateTime<Utc>, to: DateTime<Utc>) -> u64 {
    ((to - from).num_seconds().max(0) / SECONDS_PER_MINUTE) as u64
}

impl<P: SunsetProvider> ShabbatWindowCalculator<P> {
    pub fn status(&self, instant: DateTime<Utc>, location: &Location) -> Result<ShabbatStatus> {
        if let Some(window) = self.containing_window(instant, location)? {
            return Ok(ShabbatStatus::inside(instant, window));
        }

        let this_week = self.compute_window(instant, location)?;
        let upcoming = if this_week.havdalah < instant {
            // Saturday evening after Havdalah still anchors to yesterday
            let friday = anchor_friday(location.local_date(instant));
            self.window_for_friday(friday + Duration::days(7), location)?
        } else {
            this_week
        };
        Ok(ShabbatStatus::outside(instant, upcoming))
    }
}

/// Status at `instant` using the astronomical sunset provider.
pub fn get_status(instant: DateTime<Utc>, location: &Location) -> Result<ShabbatStatus> {
    ShabbatWindowCalculator::<SpaSunsetProvider>::default().status(instant, location)
}
