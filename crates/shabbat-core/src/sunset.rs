//! Sunset providers.
//!
//! The calculator only needs "when does the sun set on this local date here".
//! [`SpaSunsetProvider`] answers with the NREL Solar Position Algorithm;
//! [`FixedSunsetProvider`] answers with a constant wall-clock time so window
//! logic can be tested without solar geometry.

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveTime, TimeZone, Utc};
use solar_positioning::{SunriseResult, spa};

use crate::constants::{DEFAULT_DELTA_T, EARTH_RADIUS_KM, SUNSET_ALTITUDE_DEG};
use crate::error::{Result, ShabbatError};
use crate::location::Location;

pub trait SunsetProvider {
    /// Sunset on the civil `date` (in the location's timezone) as an absolute instant.
    fn sunset(&self, date: NaiveDate, location: &Location) -> Result<DateTime<Utc>>;
}

impl<P: SunsetProvider + ?Sized> SunsetProvider for &P {
    fn sunset(&self, date: NaiveDate, location: &Location) -> Result<DateTime<Utc>> {
        (**self).sunset(date, location)
    }
}

/// Solar altitude of the sun's upper limb at the visible horizon for an
/// observer `elevation` meters up: standard sunset altitude minus the dip.
pub fn sunset_altitude(elevation: f64) -> f64 {
    if elevation <= 0.0 {
        return SUNSET_ALTITUDE_DEG;
    }
    let dip = (EARTH_RADIUS_KM / (EARTH_RADIUS_KM + elevation / 1000.0))
        .acos()
        .to_degrees();
    SUNSET_ALTITUDE_DEG - dip
}

#[derive(Debug, Clone, Copy)]
pub struct SpaSunsetProvider {
    delta_t: f64,
}

impl Default for SpaSunsetProvider {
    fn default() -> Self {
        Self {
            delta_t: DEFAULT_DELTA_T,
        }
    }
}

impl SpaSunsetProvider {
    pub fn new(delta_t: f64) -> Self {
        Self { delta_t }
    }

    pub fn delta_t(&self) -> f64 {
        self.delta_t
    }

    /// The sunset that follows solar transit on UTC date `utc_date`.
    ///
    /// SPA reports event hours within [0, 24) of the UTC date, so a sunset
    /// that belongs after the day's transit but wraps past 24:00 UTC comes
    /// back smaller than the transit hour and is moved forward a day.
    fn sunset_for_utc_date(
        &self,
        utc_date: NaiveDate,
        location: &Location,
    ) -> Result<DateTime<Utc>> {
        let result = spa::sunrise_sunset_utc(
            utc_date.year(),
            utc_date.month(),
            utc_date.day(),
            location.latitude(),
            location.longitude(),
            self.delta_t,
            sunset_altitude(location.elevation()),
        )
        .map_err(|e| ShabbatError::Astronomy(e.to_string()))?;

        let (transit, sunset) = match result {
            SunriseResult::RegularDay {
                transit, sunset, ..
            } => (transit.hours(), sunset.hours()),
            SunriseResult::AllDay { .. } => {
                return Err(ShabbatError::InvalidLocation(format!(
                    "sun does not set at {} on {utc_date} (polar day)",
                    location.name()
                )));
            }
            SunriseResult::AllNight { .. } => {
                return Err(ShabbatError::InvalidLocation(format!(
                    "sun does not rise at {} on {utc_date} (polar night)",
                    location.name()
                )));
            }
        };
        if !transit.is_finite() || !sunset.is_finite() {
            return Err(ShabbatError::Astronomy(format!(
                "non-finite sunset hour for {utc_date}"
            )));
        }
        let hours = if sunset < transit { sunset + 24.0 } else { sunset };

        let midnight = utc_date
            .and_hms_opt(0, 0, 0)
            .ok_or_else(|| ShabbatError::Astronomy(format!("invalid date {utc_date}")))?
            .and_utc();
        let millis = (hours * 3_600_000.0).round() as i64;
        Ok(midnight + Duration::milliseconds(millis))
    }
}

impl SunsetProvider for SpaSunsetProvider {
    fn sunset(&self, date: NaiveDate, location: &Location) -> Result<DateTime<Utc>> {
        // Far from Greenwich the sunset of local date D follows the transit
        // of UTC date D±1.
        for shift in [0, 1, -1] {
            let candidate = self.sunset_for_utc_date(date + Duration::days(shift), location)?;
            if location.local_date(candidate) == date {
                return Ok(candidate);
            }
        }
        Err(ShabbatError::Astronomy(format!(
            "could not place sunset on local date {date} at {}",
            location.name()
        )))
    }
}

/// Sunset at the same local wall-clock time every day.
#[derive(Debug, Clone, Copy)]
pub struct FixedSunsetProvider {
    local_time: NaiveTime,
}

impl FixedSunsetProvider {
    pub fn new(local_time: NaiveTime) -> Self {
        Self { local_time }
    }

    pub fn at(hour: u32, minute: u32) -> Option<Self> {
        NaiveTime::from_hms_opt(hour, minute, 0).map(Self::new)
    }
}

impl SunsetProvider for FixedSunsetProvider {
    fn sunset(&self, date: NaiveDate, location: &Location) -> Result<DateTime<Utc>> {
        location
            .timezone()
            .from_local_datetime(&date.and_time(self.local_time))
            .earliest()
            .map(|dt| dt.with_timezone(&Utc))
            .ok_or_else(|| {
                ShabbatError::Astronomy(format!(
                    "{} {} does not exist in {}",
                    date,
                    self.local_time,
                    location.timezone().name()
                ))
            })
    }
}
