use std::fmt;

use chrono::{Datelike, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Customer-facing request reference, `WF-<year>-<six digits>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestNumber(pub String);

const PREFIX: &str = "WF";

impl RequestNumber {
    /// Draw a fresh number for the current calendar year.
    pub fn generate() -> Self {
        let serial = rand::thread_rng().gen_range(100_000..=999_999);
        Self::from_parts(Utc::now().year(), serial)
    }

    pub fn from_parts(year: i32, serial: u32) -> Self {
        Self(format!("{PREFIX}-{year}-{serial:06}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Year and serial, when the reference follows the `WF-<year>-<serial>` layout.
    pub fn parts(&self) -> Option<(i32, u32)> {
        let mut segments = self.0.splitn(3, '-');
        if segments.next()? != PREFIX {
            return None;
        }
        let year = segments.next()?.parse().ok()?;
        let serial = segments.next()?;
        if serial.len() != 6 {
            return None;
        }
        Some((year, serial.parse().ok()?))
    }
}

impl fmt::Display for RequestNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
