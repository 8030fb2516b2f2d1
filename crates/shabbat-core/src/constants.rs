/// Candle-lighting precedes Friday sunset by this many minutes.
pub const CANDLE_LIGHTING_OFFSET_MINUTES: i64 = 18;

/// Havdalah follows Saturday sunset by this many minutes.
pub const HAVDALAH_OFFSET_MINUTES: i64 = 42;

/// Apparent solar altitude at sunset in degrees: 34' refraction plus 16' semi-diameter.
pub const SUNSET_ALTITUDE_DEG: f64 = -0.833_333_333_333_333_3;

/// Earth radius used for the horizon dip of an elevated observer (km).
pub const EARTH_RADIUS_KM: f64 = 6356.9;

/// Default ΔT (TT − UT) in seconds for the current decade.
pub const DEFAULT_DELTA_T: f64 = 69.0;

pub const SECONDS_PER_MINUTE: i64 = 60;
pub const MINUTES_PER_HOUR: u64 = 60;
pub const MINUTES_PER_DAY: u64 = 1440;
