use serde::{Deserialize, Serialize};

use std::fmt;
use std::str::FromStr;

pub static DEFAULT_ROUTES_URL: &str =
    "https://raw.githubusercontent.com/R0GDEV/R0GDEV/refs/heads/main/stationRoutes.ts";

pub static DEFAULT_ACCENT_COLOR: &str = "#bbf7d0";

pub static PRESET_COLORS: [&str; 9] = [
    "#FFFF00", "#38BDF8", "#60A5FA", "#8C8CD8", "#800080", "#FFFFFF", "#bbf7d0", "#B49B9B",
    "#5BECEC",
];

/// Most adults a single unreserved journey ticket may carry.
pub const MAX_ADULTS: u32 = 4;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Station {
    #[serde(rename = "stationCode")]
    pub code: String,

    #[serde(rename = "stationNameHindi")]
    pub name_hindi: String,

    #[serde(rename = "stationNameEnglish")]
    pub name_english: String,

    #[serde(rename = "stationNameMarathi")]
    pub name_marathi: String,
}

impl Station {
    pub fn new(code: &str, hindi: &str, english: &str, marathi: &str) -> Self {
        Station {
            code: code.to_string(),
            name_hindi: hindi.to_string(),
            name_english: english.to_string(),
            name_marathi: marathi.to_string(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClassKey {
    #[serde(rename = "FIRST")]
    First,
    #[serde(rename = "SECOND")]
    Second,
}

impl ClassKey {
    pub const ALL: [ClassKey; 2] = [ClassKey::First, ClassKey::Second];

    pub fn hindi(self) -> &'static str {
        match self {
            ClassKey::First => "प्रथम",
            ClassKey::Second => "द्वितीय",
        }
    }

    pub fn english(self) -> &'static str {
        match self {
            ClassKey::First => "FIRST",
            ClassKey::Second => "SECOND",
        }
    }

    pub fn short(self) -> &'static str {
        match self {
            ClassKey::First => "प्र श्रे",
            ClassKey::Second => "द्वि श्रे",
        }
    }
}

impl fmt::Display for ClassKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.english())
    }
}

impl FromStr for ClassKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "FIRST" | "1" | "FC" => Ok(ClassKey::First),
            "SECOND" | "2" | "SC" => Ok(ClassKey::Second),
            other => Err(format!("unknown class '{other}', expected first or second")),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct PriceTable {
    #[serde(rename = "FIRST")]
    pub first: f64,

    #[serde(rename = "SECOND")]
    pub second: f64,
}

impl PriceTable {
    pub fn get(&self, class: ClassKey) -> f64 {
        match class {
            ClassKey::First => self.first,
            ClassKey::Second => self.second,
        }
    }
}

/// Fare as it appears in route data: older records carry one number,
/// newer ones a per-class table.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(untagged)]
pub enum Price {
    Flat(f64),
    PerClass(PriceTable),
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Route {
    pub id: u32,
    pub source: Station,
    pub destination: Station,
    pub price: Price,
    pub via: String,
    pub distance: String,

    /// Minutes.
    #[serde(rename = "travelTime")]
    pub travel_time: u32,
}

impl Route {
    /// The same route with source and destination exchanged.
    pub fn swapped(&self) -> Route {
        Route {
            source: self.destination.clone(),
            destination: self.source.clone(),
            ..self.clone()
        }
    }
}

pub fn default_route() -> Route {
    Route {
        id: 1,
        source: Station::new("S", "नवाडे रोड", "NAVADE ROAD", "नवाडे रोड"),
        destination: Station::new("D", "पनवेल", "PANVEL", "पनवेल"),
        price: Price::PerClass(PriceTable {
            first: 25.0,
            second: 5.0,
        }),
        via: "KLMC".to_string(),
        distance: "8 km".to_string(),
        travel_time: 25,
    }
}

/// Fixed text printed on every card.
#[derive(Debug, Clone)]
pub struct CardDetails {
    pub mobile: String,
    pub uts_number: String,
    pub sac: String,
    pub gstin: String,
    pub serial: String,
}

impl Default for CardDetails {
    fn default() -> Self {
        CardDetails {
            mobile: "8591365770".to_string(),
            uts_number: "X0FNDY0089".to_string(),
            sac: "996411".to_string(),
            gstin: "27AAAGM0289C2ZI".to_string(),
            serial: "R18209".to_string(),
        }
    }
}
