//! Shabbat time-window calculator.
//!
//! Computes the weekly rest window (candle-lighting Friday through Havdalah
//! Saturday) from solar sunset at a location, answers whether an instant lies
//! inside it, and renders countdowns and clock times for display.
//!
//! Zero I/O: a stateless function of `(location, instant)`. Sunset comes from
//! an injected [`SunsetProvider`].

pub mod constants;
pub mod error;
pub mod format;
pub mod location;
pub mod lock;
pub mod status;
pub mod sunset;
pub mod time;
pub mod window;

pub use constants::{CANDLE_LIGHTING_OFFSET_MINUTES, DEFAULT_DELTA_T, HAVDALAH_OFFSET_MINUTES};
pub use error::{Result, ShabbatError};
pub use format::{format_clock_time, format_duration};
pub use location::Location;
pub use lock::LockDecision;
pub use status::{ShabbatStatus, get_status, whole_minutes_until};
pub use sunset::{FixedSunsetProvider, SpaSunsetProvider, SunsetProvider};
pub use time::{now, parse_instant, resolve_instant};
pub use window::{ShabbatTimes, ShabbatWindowCalculator, anchor_friday};
