//! Weekly rest-window boundaries and window membership.

use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc, Weekday};
use serde::{Deserialize, Serialize};

use crate::constants::{CANDLE_LIGHTING_OFFSET_MINUTES, HAVDALAH_OFFSET_MINUTES};
use crate::error::Result;
use crate::location::Location;
use crate::sunset::{SpaSunsetProvider, SunsetProvider};

/// Candle-lighting on Friday through Havdalah on Saturday, both inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShabbatTimes {
    pub candle_lighting: DateTime<Utc>,
    pub havdalah: DateTime<Utc>,
}

impl ShabbatTimes {
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.candle_lighting <= instant && instant <= self.havdalah
    }

    pub fn duration(&self) -> Duration {
        self.havdalah - self.candle_lighting
    }
}

/// The Friday a local date belongs to: Friday maps to itself, Saturday to
/// the day before, Sunday through Thursday to the coming Friday.
pub fn anchor_friday(date: NaiveDate) -> NaiveDate {
    match date.weekday() {
        Weekday::Fri => date,
        Weekday::Sat => date - Duration::days(1),
        other => {
            let ahead = (Weekday::Fri.num_days_from_monday() + 7
                - other.num_days_from_monday())
                % 7;
            date + Duration::days(ahead as i64)
        }
    }
}

/// Stateless calculator over an injected sunset source.
#[derive(Debug, Clone, Default)]
pub struct ShabbatWindowCalculator<P = SpaSunsetProvider> {
    provider: P,
}

impl<P: SunsetProvider> ShabbatWindowCalculator<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Window anchored on the Friday of the week containing `reference`,
    /// judged by the local date at `location`.
    pub fn compute_window(
        &self,
        reference: DateTime<Utc>,
        location: &Location,
    ) -> Result<ShabbatTimes> {
        let friday = anchor_friday(location.local_date(reference));
        self.window_for_friday(friday, location)
    }

    pub fn window_for_friday(&self, friday: NaiveDate, location: &Location) -> Result<ShabbatTimes> {
        let friday_sunset = self.provider.sunset(friday, location)?;
        let saturday_sunset = self.provider.sunset(friday + Duration::days(1), location)?;

        Ok(ShabbatTimes {
            candle_lighting: friday_sunset - Duration::minutes(CANDLE_LIGHTING_OFFSET_MINUTES),
            havdalah: saturday_sunset + Duration::minutes(HAVDALAH_OFFSET_MINUTES),
        })
    }

    /// The window holding `instant`, checking this week's window and then the
    /// prior week's.
    pub fn containing_window(
        &self,
        instant: DateTime<Utc>,
        location: &Location,
    ) -> Result<Option<ShabbatTimes>> {
        let current = self.compute_window(instant, location)?;
        if current.contains(instant) {
            return Ok(Some(current));
        }

        let previous = self.compute_window(instant - Duration::days(7), location)?;
        if previous.contains(instant) {
            return Ok(Some(previous));
        }
        Ok(None)
    }

    pub fn is_within_window(&self, instant: DateTime<Utc>, location: &Location) -> Result<bool> {
        Ok(self.containing_window(instant, location)?.is_some())
    }
}
