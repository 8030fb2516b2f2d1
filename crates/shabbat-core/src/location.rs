//! Geographic location used as calculator input.

use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::error::{Result, ShabbatError};

/// Immutable observer location. Construct through [`Location::new`] so the
/// coordinate and timezone invariants always hold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawLocation", into = "RawLocation")]
pub struct Location {
    name: String,
    country_code: String,
    latitude: f64,
    longitude: f64,
    elevation: f64,
    timezone: Tz,
}

impl Location {
    pub fn new(
        name: &str,
        country_code: &str,
        latitude: f64,
        longitude: f64,
        elevation: f64,
        timezone: &str,
    ) -> Result<Self> {
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(ShabbatError::InvalidLocation(format!(
                "latitude {latitude} outside [-90, 90]"
            )));
        }
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(ShabbatError::InvalidLocation(format!(
                "longitude {longitude} outside [-180, 180]"
            )));
        }
        if !elevation.is_finite() {
            return Err(ShabbatError::InvalidLocation(format!(
                "elevation {elevation} must be a finite number of meters"
            )));
        }
        let timezone: Tz = timezone.parse().map_err(|e| {
            ShabbatError::InvalidLocation(format!("unknown timezone '{timezone}': {e}"))
        })?;

        Ok(Self {
            name: name.to_string(),
            country_code: country_code.to_string(),
            latitude,
            longitude,
            elevation,
            timezone,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn country_code(&self) -> &str {
        &self.country_code
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Meters above sea level; negative below it.
    pub fn elevation(&self) -> f64 {
        self.elevation
    }

    pub fn timezone(&self) -> Tz {
        self.timezone
    }

    /// Civil date of `instant` at this location.
    pub fn local_date(&self, instant: DateTime<Utc>) -> NaiveDate {
        instant.with_timezone(&self.timezone).date_naive()
    }
}

/// Wire shape for serde; validated on the way in.
#[derive(Serialize, Deserialize)]
struct RawLocation {
    name: String,
    country_code: String,
    latitude: f64,
    longitude: f64,
    #[serde(default)]
    elevation: f64,
    timezone: String,
}

impl TryFrom<RawLocation> for Location {
    type Error = ShabbatError;

    fn try_from(raw: RawLocation) -> Result<Self> {
        Location::new(
            &raw.name,
            &raw.country_code,
            raw.latitude,
            raw.longitude,
            raw.elevation,
            &raw.timezone,
        )
    }
}

impl From<Location> for RawLocation {
    fn from(loc: Location) -> Self {
        RawLocation {
            name: loc.name,
            country_code: loc.country_code,
            latitude: loc.latitude,
            longitude: loc.longitude,
            elevation: loc.elevation,
            timezone: loc.timezone.name().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn tel_aviv() -> Location {
        Location::new("Tel Aviv", "IL", 32.0853, 34.7818, 0.0, "Asia/Jerusalem").unwrap()
    }

    #[test]
    fn test_valid_location() {
        let loc = tel_aviv();
        assert_eq!(loc.name(), "Tel Aviv");
        assert_eq!(loc.country_code(), "IL");
        assert_eq!(loc.timezone(), chrono_tz::Asia::Jerusalem);
    }

    #[test]
    fn test_latitude_out_of_range() {
        let err = Location::new("x", "XX", 90.5, 0.0, 0.0, "UTC").unwrap_err();
        assert!(matches!(err, ShabbatError::InvalidLocation(_)));
        assert!(err.to_string().contains("latitude"));
    }

    #[test]
    fn test_longitude_out_of_range() {
        let err = Location::new("x", "XX", 0.0, -180.01, 0.0, "UTC").unwrap_err();
        assert!(err.to_string().contains("longitude"));
    }

    #[test]
    fn test_nan_rejected() {
        assert!(Location::new("x", "XX", f64::NAN, 0.0, 0.0, "UTC").is_err());
        assert!(Location::new("x", "XX", 0.0, 0.0, f64::INFINITY, "UTC").is_err());
    }

    #[test]
    fn test_below_sea_level_accepted() {
        let loc = Location::new("Ein Bokek", "IL", 31.2, 35.36, -415.0, "Asia/Jerusalem").unwrap();
        assert_eq!(loc.elevation(), -415.0);
    }

    #[test]
    fn test_bounds_inclusive() {
        assert!(Location::new("pole", "AQ", -90.0, 180.0, 0.0, "UTC").is_ok());
    }

    #[test]
    fn test_unknown_timezone() {
        let err = Location::new("x", "XX", 0.0, 0.0, 0.0, "Mars/Olympus").unwrap_err();
        assert!(err.to_string().contains("Mars/Olympus"));
    }

    #[test]
    fn test_local_date_crosses_midnight() {
        let loc = tel_aviv();
        // 22:30 UTC on Thursday is already Friday in Israel (UTC+3 in summer)
        let instant = Utc.with_ymd_and_hms(2024, 6, 20, 22, 30, 0).unwrap();
        assert_eq!(
            loc.local_date(instant),
            NaiveDate::from_ymd_opt(2024, 6, 21).unwrap()
        );
    }

    #[test]
    fn test_serde_roundtrip_validates() {
        let json = serde_json::to_string(&tel_aviv()).unwrap();
        assert!(json.contains("\"timezone\":\"Asia/Jerusalem\""));
        let back: Location = serde_json::from_str(&json).unwrap();
        assert_eq!(back, tel_aviv());

        let bad = json.replace("32.0853", "132.0");
        assert!(serde_json::from_str::<Location>(&bad).is_err());
    }
}
