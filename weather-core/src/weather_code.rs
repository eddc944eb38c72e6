//! WMO weather interpretation codes as reported by Open-Meteo.
//!
//! Description and icon are both projections of [`WeatherCode`], so a code can
//! never end up with a description from one group and an icon from another.

use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WeatherCode {
    ClearSky,
    MainlyClear,
    PartlyCloudy,
    Overcast,
    Fog,
    DepositingRimeFog,
    DrizzleLight,
    DrizzleModerate,
    DrizzleDense,
    FreezingDrizzleLight,
    FreezingDrizzleDense,
    RainSlight,
    RainModerate,
    RainHeavy,
    FreezingRainLight,
    FreezingRainHeavy,
    SnowSlight,
    SnowModerate,
    SnowHeavy,
    SnowGrains,
    RainShowersSlight,
    RainShowersModerate,
    RainShowersViolent,
    SnowShowersSlight,
    SnowShowersHeavy,
    Thunderstorm,
    ThunderstormSlightHail,
    ThunderstormHeavyHail,
    Unknown,
}

impl WeatherCode {
    /// Every known code, in numeric order. `Unknown` is not included.
    pub const fn all() -> &'static [WeatherCode] {
        use WeatherCode::*;
        &[
            ClearSky,
            MainlyClear,
            PartlyCloudy,
            Overcast,
            Fog,
            DepositingRimeFog,
            DrizzleLight,
            DrizzleModerate,
            DrizzleDense,
            FreezingDrizzleLight,
            FreezingDrizzleDense,
            RainSlight,
            RainModerate,
            RainHeavy,
            FreezingRainLight,
            FreezingRainHeavy,
            SnowSlight,
            SnowModerate,
            SnowHeavy,
            SnowGrains,
            RainShowersSlight,
            RainShowersModerate,
            RainShowersViolent,
            SnowShowersSlight,
            SnowShowersHeavy,
            Thunderstorm,
            ThunderstormSlightHail,
            ThunderstormHeavyHail,
        ]
    }

    pub fn from_code(code: i64) -> Self {
        use WeatherCode::*;
        match code {
            0 => ClearSky,
            1 => MainlyClear,
            2 => PartlyCloudy,
            3 => Overcast,
            45 => Fog,
            48 => DepositingRimeFog,
            51 => DrizzleLight,
            53 => DrizzleModerate,
            55 => DrizzleDense,
            56 => FreezingDrizzleLight,
            57 => FreezingDrizzleDense,
            61 => RainSlight,
            63 => RainModerate,
            65 => RainHeavy,
            66 => FreezingRainLight,
            67 => FreezingRainHeavy,
            71 => SnowSlight,
            73 => SnowModerate,
            75 => SnowHeavy,
            77 => SnowGrains,
            80 => RainShowersSlight,
            81 => RainShowersModerate,
            82 => RainShowersViolent,
            85 => SnowShowersSlight,
            86 => SnowShowersHeavy,
            95 => Thunderstorm,
            96 => ThunderstormSlightHail,
            99 => ThunderstormHeavyHail,
            _ => Unknown,
        }
    }

    /// A missing code from the provider is treated like an unrecognised one.
    pub fn from_optional(code: Option<i64>) -> Self {
        code.map_or(WeatherCode::Unknown, WeatherCode::from_code)
    }

    /// Numeric WMO code, `None` for `Unknown`.
    pub fn code(&self) -> Option<i64> {
        use WeatherCode::*;
        let code = match self {
            ClearSky => 0,
            MainlyClear => 1,
            PartlyCloudy => 2,
            Overcast => 3,
            Fog => 45,
            DepositingRimeFog => 48,
            DrizzleLight => 51,
            DrizzleModerate => 53,
            DrizzleDense => 55,
            FreezingDrizzleLight => 56,
            FreezingDrizzleDense => 57,
            RainSlight => 61,
            RainModerate => 63,
            RainHeavy => 65,
            FreezingRainLight => 66,
            FreezingRainHeavy => 67,
            SnowSlight => 71,
            SnowModerate => 73,
            SnowHeavy => 75,
            SnowGrains => 77,
            RainShowersSlight => 80,
            RainShowersModerate => 81,
            RainShowersViolent => 82,
            SnowShowersSlight => 85,
            SnowShowersHeavy => 86,
            Thunderstorm => 95,
            ThunderstormSlightHail => 96,
            ThunderstormHeavyHail => 99,
            Unknown => return None,
        };
        Some(code)
    }

    pub fn description(&self) -> &'static str {
        use WeatherCode::*;
        match self {
            ClearSky => "Clear sky",
            MainlyClear => "Mainly clear",
            PartlyCloudy => "Partly cloudy",
            Overcast => "Overcast",
            Fog => "Fog",
            DepositingRimeFog => "Depositing rime fog",
            DrizzleLight => "Light drizzle",
            DrizzleModerate => "Moderate drizzle",
            DrizzleDense => "Dense drizzle",
            FreezingDrizzleLight => "Light freezing drizzle",
            FreezingDrizzleDense => "Dense freezing drizzle",
            RainSlight => "Slight rain",
            RainModerate => "Moderate rain",
            RainHeavy => "Heavy rain",
            FreezingRainLight => "Light freezing rain",
            FreezingRainHeavy => "Heavy freezing rain",
            SnowSlight => "Slight snowfall",
            SnowModerate => "Moderate snowfall",
            SnowHeavy => "Heavy snowfall",
            SnowGrains => "Snow grains",
            RainShowersSlight => "Slight rain showers",
            RainShowersModerate => "Moderate rain showers",
            RainShowersViolent => "Violent rain showers",
            SnowShowersSlight => "Slight snow showers",
            SnowShowersHeavy => "Heavy snow showers",
            Thunderstorm => "Thunderstorm",
            ThunderstormSlightHail => "Thunderstorm with slight hail",
            ThunderstormHeavyHail => "Thunderstorm with heavy hail",
            Unknown => "Unknown",
        }
    }

    pub fn icon(&self) -> Icon {
        use WeatherCode::*;
        match self {
            ClearSky => Icon::Clear,
            MainlyClear | PartlyCloudy | Overcast => Icon::PartlyCloudy,
            Fog | DepositingRimeFog => Icon::Fog,
            DrizzleLight
            | DrizzleModerate
            | DrizzleDense
            | FreezingDrizzleLight
            | FreezingDrizzleDense
            | RainSlight
            | RainModerate
            | RainHeavy
            | FreezingRainLight
            | FreezingRainHeavy
            | RainShowersSlight
            | RainShowersModerate
            | RainShowersViolent => Icon::Rain,
            SnowSlight | SnowModerate | SnowHeavy | SnowGrains | SnowShowersSlight
            | SnowShowersHeavy => Icon::Snow,
            Thunderstorm | ThunderstormSlightHail | ThunderstormHeavyHail => Icon::Thunderstorm,
            Unknown => Icon::Unknown,
        }
    }
}

impl fmt::Display for WeatherCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// Icon groups used for rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Icon {
    Clear,
    PartlyCloudy,
    Fog,
    Rain,
    Snow,
    Thunderstorm,
    Unknown,
}

impl Icon {
    pub fn file_name(&self) -> &'static str {
        match self {
            Icon::Clear => "clear-day.svg",
            Icon::PartlyCloudy => "partly-cloudy-day.svg",
            Icon::Fog => "fog.svg",
            Icon::Rain => "rain.svg",
            Icon::Snow => "snow.svg",
            Icon::Thunderstorm => "thunderstorms.svg",
            Icon::Unknown => "unknown.svg",
        }
    }

    /// Relative path of the icon asset, e.g. `icons/rain.svg`.
    pub fn asset_path(&self) -> String {
        format!("icons/{}", self.file_name())
    }

    /// Single glyph for terminal output.
    pub fn glyph(&self) -> &'static str {
        match self {
            Icon::Clear => "☀",
            Icon::PartlyCloudy => "⛅",
            Icon::Fog => "🌫",
            Icon::Rain => "🌧",
            Icon::Snow => "❄",
            Icon::Thunderstorm => "⛈",
            Icon::Unknown => "?",
        }
    }
}

/// Description for a raw provider code; `"Unknown"` for anything unlisted.
pub fn describe(code: i64) -> &'static str {
    WeatherCode::from_code(code).description()
}

pub fn icon_for(code: i64) -> Icon {
    WeatherCode::from_code(code).icon()
}
