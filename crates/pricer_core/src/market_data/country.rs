//! Country codes and their money-market bucket tables.
//!
//! Each supported market quotes its short end through nine named series,
//! one per maturity bucket in [`MATURITY_BUCKET_DAYS`].

use std::fmt;
use std::str::FromStr;

use super::error::MarketDataError;

/// Maturity buckets (calendar days) shared by every country table.
pub const MATURITY_BUCKET_DAYS: [u32; 9] = [1, 7, 30, 60, 90, 180, 270, 365, 455];

const NORWAY_SERIES: [&str; 9] = [
    "NOKONZ=R",
    "OINOKSWD=",
    "OINOK1MD=",
    "OINOK2MD=",
    "OINOK3MD=",
    "OINOK6MD=",
    "NOK9MZ=R",
    "NOK1YZ=R",
    "NOK1Y3MZ=R",
];

const SWEDEN_SERIES: [&str; 9] = [
    "STISEKTNDFI=",
    "STISEK1WDFI=",
    "STISEK1MDFI=",
    "STISEK2MDFI=",
    "STISEK3MDFI=",
    "STISEK6MDFI=",
    "SEK9MZ=R",
    "SEGOV1YZ=R",
    "SEGOV1Y3MZ=R",
];

// The 90-day bucket reads the 9M series; this mirrors the vendor feed layout.
const DENMARK_SERIES: [&str; 9] = [
    "DKKONZ=R",
    "CIDKKSWD=",
    "CIDKK1MD=",
    "DKK2MZ=R",
    "DKK9MZ=R",
    "CIDKK6MD=",
    "DKK9MZ=R",
    "CIDKK1YD=",
    "DKKABQCD1Y3MZ=R",
];

/// Market whose rate table is used for discounting.
///
/// Parsing is case-insensitive and accepts the English name or the
/// ISO 3166 alpha-2 code.
///
/// # Examples
///
/// ```
/// use pricer_core::market_data::Country;
///
/// let c: Country = "norway".parse().unwrap();
/// assert_eq!(c, Country::Norway);
/// assert_eq!(c.series_for_bucket(30), Some("OINOK1MD="));
/// assert!("FINLAND".parse::<Country>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "UPPERCASE"))]
pub enum Country {
    /// Norway (NOK).
    Norway,
    /// Sweden (SEK).
    Sweden,
    /// Denmark (DKK).
    Denmark,
}

impl Country {
    /// All supported countries.
    pub const ALL: [Country; 3] = [Country::Norway, Country::Sweden, Country::Denmark];

    /// Upper-case name as it appears in observation files.
    pub fn name(&self) -> &'static str {
        match self {
            Country::Norway => "NORWAY",
            Country::Sweden => "SWEDEN",
            Country::Denmark => "DENMARK",
        }
    }

    /// Series names in bucket order (aligned with [`MATURITY_BUCKET_DAYS`]).
    pub fn series(&self) -> &'static [&'static str; 9] {
        match self {
            Country::Norway => &NORWAY_SERIES,
            Country::Sweden => &SWEDEN_SERIES,
            Country::Denmark => &DENMARK_SERIES,
        }
    }

    /// Series name quoted for a given bucket, `None` if `days` is not a bucket.
    pub fn series_for_bucket(&self, days: u32) -> Option<&'static str> {
        MATURITY_BUCKET_DAYS
            .iter()
            .position(|&d| d == days)
            .map(|i| self.series()[i])
    }
}

impl fmt::Display for Country {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Country {
    type Err = MarketDataError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "NORWAY" | "NO" => Ok(Country::Norway),
            "SWEDEN" | "SE" => Ok(Country::Sweden),
            "DENMARK" | "DK" => Ok(Country::Denmark),
            _ => Err(MarketDataError::UnknownCountry(s.trim().to_string())),
        }
    }
}
