use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Invalid;

/// Hour value the device reports for a task slot that was never configured.
pub const UNSET_HOUR: u8 = 255;

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockTime {
    // 0-23, or UNSET_HOUR inside a calendar slot
    #[serde(rename = "heure")]
    pub hour: u8,
    pub minute: u8,
    #[serde(rename = "seconde", default)]
    pub second: u8,
}

impl ClockTime {
    pub fn new(hour: u8, minute: u8, second: u8) -> Result<Self, Invalid> {
        let time = ClockTime {
            hour,
            minute,
            second,
        };
        time.validate()?;
        Ok(time)
    }

    /// Parses the `HH:MM` value of a time input; seconds are always zero.
    pub fn parse_hhmm(input: &str) -> Result<Self, Invalid> {
        let input = input.trim();
        let reject = || Invalid::Time(input.to_owned());

        let (hour, minute) = input.split_once(':').ok_or_else(reject)?;
        let field = |s: &str| -> Result<u8, Invalid> {
            if s.is_empty() || s.len() > 2 || !s.bytes().all(|b| b.is_ascii_digit()) {
                return Err(reject());
            }
            s.parse().map_err(|_| reject())
        };

        ClockTime::new(field(hour)?, field(minute)?, 0).map_err(|_| reject())
    }

    pub fn validate(&self) -> Result<(), Invalid> {
        if self.hour > 23 {
            return Err(Invalid::OutOfRange {
                field: "hour",
                value: self.hour,
            });
        }
        if self.minute > 59 {
            return Err(Invalid::OutOfRange {
                field: "minute",
                value: self.minute,
            });
        }
        if self.second > 59 {
            return Err(Invalid::OutOfRange {
                field: "second",
                value: self.second,
            });
        }
        Ok(())
    }

    pub fn hhmm(&self) -> String {
        format!("{:02}:{:02}", self.hour, self.minute)
    }
}

impl FromStr for ClockTime {
    type Err = Invalid;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ClockTime::parse_hhmm(s)
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}:{:02}", self.hour, self.minute, self.second)
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarDate {
    #[serde(rename = "annee")]
    pub year: i32,
    // 1-12
    #[serde(rename = "mois")]
    pub month: u8,
    // 1-31
    #[serde(rename = "jour")]
    pub day: u8,
}

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct WifiStatus {
    #[serde(rename = "isConnected")]
    pub is_connected: bool,
}

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputState {
    pub state: bool,
}

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct SaveState {
    pub save: bool,
}

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduleEntry {
    #[serde(rename = "allumage")]
    pub on: ClockTime,
    #[serde(rename = "extinction")]
    pub off: ClockTime,
}

impl ScheduleEntry {
    pub fn from_inputs(on: &str, off: &str) -> Result<Self, Invalid> {
        Ok(ScheduleEntry {
            on: on.parse()?,
            off: off.parse()?,
        })
    }

    pub fn is_configured(&self) -> bool {
        self.on.hour != UNSET_HOUR
    }

    /// Checks the entry is fit to be written to the device.
    pub fn validate(&self) -> Result<(), Invalid> {
        if !self.is_configured() || self.off.hour == UNSET_HOUR {
            return Err(Invalid::UnsetSlot);
        }
        self.on.validate()?;
        self.off.validate()
    }
}

/// Output key (`"sortie1"`) to task key (`"tache1"`) to entry, as the device
/// reports them.
pub type CalendarConfigs = BTreeMap<String, BTreeMap<String, ScheduleEntry>>;

#[derive(Serialize, Clone, PartialEq, Eq)]
pub struct WifiCredentials {
    ssid: String,
    password: String,
}

impl WifiCredentials {
    pub const MIN_PASSWORD_LEN: usize = 8;

    pub fn new(ssid: &str, password: &str) -> Result<Self, Invalid> {
        let ssid = ssid.trim();
        let password = password.trim();

        if password.chars().count() < Self::MIN_PASSWORD_LEN {
            return Err(Invalid::PasswordTooShort);
        }
        if ssid.is_empty() || password.is_empty() {
            return Err(Invalid::EmptyConfiguration);
        }

        Ok(WifiCredentials {
            ssid: ssid.to_owned(),
            password: password.to_owned(),
        })
    }

    pub fn ssid(&self) -> &str {
        &self.ssid
    }
}

impl fmt::Debug for WifiCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WifiCredentials")
            .field("ssid", &self.ssid)
            .field("password", &"********")
            .finish()
    }
}
