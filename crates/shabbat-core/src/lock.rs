//! Default lock policy: block interactive use while a window is open,
//! and stay open when the window cannot be determined.

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::format::format_clock_time;
use crate::status::ShabbatStatus;

pub const LOCKED_MESSAGE: &str = "Shabbat Shalom. The app is resting until Havdalah.";
pub const UNKNOWN_MESSAGE: &str = "unable to determine Shabbat window";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockDecision {
    pub locked: bool,
    pub message: String,
    /// Local "HH:MM" at which the lock lifts.
    pub reopens_at: Option<String>,
}

impl LockDecision {
    pub fn unlocked() -> Self {
        Self {
            locked: false,
            message: String::new(),
            reopens_at: None,
        }
    }

    pub fn evaluate(status: &Result<ShabbatStatus>, tz: Tz) -> Self {
        match status {
            Ok(s) if s.is_shabbat => Self {
                locked: true,
                message: LOCKED_MESSAGE.to_string(),
                reopens_at: s.shabbat_end.map(|end| format_clock_time(end, tz)),
            },
            Ok(_) => Self::unlocked(),
            Err(_) => Self {
                locked: false,
                message: UNKNOWN_MESSAGE.to_string(),
                reopens_at: None,
            },
        }
    }
}
