//! Defines `WeatherSymbol`, the parsed form of MET Norway's `symbol_code` strings,
//! which name both a weather condition and the icon to show for it.

use std::fmt;

/// The weather condition part of a MET Norway symbol code.
///
/// See the [MET Norway weather icon list](https://api.met.no/weatherapi/weathericon/2.0/documentation)
/// for the full set of codes. A code such as `"lightrainshowers_day"` parses into
/// [`Condition::LightRainShowers`] with the [`SymbolVariant::Day`] variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Condition {
    ClearSky,
    Fair,
    PartlyCloudy,
    Cloudy,
    Fog,
    LightRainShowers,
    RainShowers,
    HeavyRainShowers,
    LightRainShowersAndThunder,
    RainShowersAndThunder,
    HeavyRainShowersAndThunder,
    LightSleetShowers,
    SleetShowers,
    HeavySleetShowers,
    LightSleetShowersAndThunder,
    SleetShowersAndThunder,
    HeavySleetShowersAndThunder,
    LightSnowShowers,
    SnowShowers,
    HeavySnowShowers,
    LightSnowShowersAndThunder,
    SnowShowersAndThunder,
    HeavySnowShowersAndThunder,
    LightRain,
    Rain,
    HeavyRain,
    LightRainAndThunder,
    RainAndThunder,
    HeavyRainAndThunder,
    LightSleet,
    Sleet,
    HeavySleet,
    LightSleetAndThunder,
    SleetAndThunder,
    HeavySleetAndThunder,
    LightSnow,
    Snow,
    HeavySnow,
    LightSnowAndThunder,
    SnowAndThunder,
    HeavySnowAndThunder,
}

impl Condition {
    /// Attempts to convert the condition part of a symbol code (without the
    /// `_day`/`_night`/`_polartwilight` suffix) into a `Condition`.
    ///
    /// The provider spells two codes with a doubled "s"
    /// (`lightssleetshowersandthunder`, `lightssnowshowersandthunder`); both the
    /// provider spelling and the regular one are accepted.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use vaderappen::Condition;
    ///
    /// assert_eq!(Condition::from_code("heavyrain"), Some(Condition::HeavyRain));
    /// assert_eq!(
    ///     Condition::from_code("lightssnowshowersandthunder"),
    ///     Some(Condition::LightSnowShowersAndThunder)
    /// );
    /// assert_eq!(Condition::from_code("sandstorm"), None);
    /// ```
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "clearsky" => Some(Condition::ClearSky),
            "fair" => Some(Condition::Fair),
            "partlycloudy" => Some(Condition::PartlyCloudy),
            "cloudy" => Some(Condition::Cloudy),
            "fog" => Some(Condition::Fog),
            "lightrainshowers" => Some(Condition::LightRainShowers),
            "rainshowers" => Some(Condition::RainShowers),
            "heavyrainshowers" => Some(Condition::HeavyRainShowers),
            "lightrainshowersandthunder" => Some(Condition::LightRainShowersAndThunder),
            "rainshowersandthunder" => Some(Condition::RainShowersAndThunder),
            "heavyrainshowersandthunder" => Some(Condition::HeavyRainShowersAndThunder),
            "lightsleetshowers" => Some(Condition::LightSleetShowers),
            "sleetshowers" => Some(Condition::SleetShowers),
            "heavysleetshowers" => Some(Condition::HeavySleetShowers),
            "lightssleetshowersandthunder" | "lightsleetshowersandthunder" => {
                Some(Condition::LightSleetShowersAndThunder)
            }
            "sleetshowersandthunder" => Some(Condition::SleetShowersAndThunder),
            "heavysleetshowersandthunder" => Some(Condition::HeavySleetShowersAndThunder),
            "lightsnowshowers" => Some(Condition::LightSnowShowers),
            "snowshowers" => Some(Condition::SnowShowers),
            "heavysnowshowers" => Some(Condition::HeavySnowShowers),
            "lightssnowshowersandthunder" | "lightsnowshowersandthunder" => {
                Some(Condition::LightSnowShowersAndThunder)
            }
            "snowshowersandthunder" => Some(Condition::SnowShowersAndThunder),
            "heavysnowshowersandthunder" => Some(Condition::HeavySnowShowersAndThunder),
            "lightrain" => Some(Condition::LightRain),
            "rain" => Some(Condition::Rain),
            "heavyrain" => Some(Condition::HeavyRain),
            "lightrainandthunder" => Some(Condition::LightRainAndThunder),
            "rainandthunder" => Some(Condition::RainAndThunder),
            "heavyrainandthunder" => Some(Condition::HeavyRainAndThunder),
            "lightsleet" => Some(Condition::LightSleet),
            "sleet" => Some(Condition::Sleet),
            "heavysleet" => Some(Condition::HeavySleet),
            "lightsleetandthunder" => Some(Condition::LightSleetAndThunder),
            "sleetandthunder" => Some(Condition::SleetAndThunder),
            "heavysleetandthunder" => Some(Condition::HeavySleetAndThunder),
            "lightsnow" => Some(Condition::LightSnow),
            "snow" => Some(Condition::Snow),
            "heavysnow" => Some(Condition::HeavySnow),
            "lightsnowandthunder" => Some(Condition::LightSnowAndThunder),
            "snowandthunder" => Some(Condition::SnowAndThunder),
            "heavysnowandthunder" => Some(Condition::HeavySnowAndThunder),
            _ => None,
        }
    }

    /// The code as the provider spells it, which is also the icon file stem.
    pub fn code(&self) -> &'static str {
        match self {
            Condition::ClearSky => "clearsky",
            Condition::Fair => "fair",
            Condition::PartlyCloudy => "partlycloudy",
            Condition::Cloudy => "cloudy",
            Condition::Fog => "fog",
            Condition::LightRainShowers => "lightrainshowers",
            Condition::RainShowers => "rainshowers",
            Condition::HeavyRainShowers => "heavyrainshowers",
            Condition::LightRainShowersAndThunder => "lightrainshowersandthunder",
            Condition::RainShowersAndThunder => "rainshowersandthunder",
            Condition::HeavyRainShowersAndThunder => "heavyrainshowersandthunder",
            Condition::LightSleetShowers => "lightsleetshowers",
            Condition::SleetShowers => "sleetshowers",
            Condition::HeavySleetShowers => "heavysleetshowers",
            Condition::LightSleetShowersAndThunder => "lightssleetshowersandthunder",
            Condition::SleetShowersAndThunder => "sleetshowersandthunder",
            Condition::HeavySleetShowersAndThunder => "heavysleetshowersandthunder",
            Condition::LightSnowShowers => "lightsnowshowers",
            Condition::SnowShowers => "snowshowers",
            Condition::HeavySnowShowers => "heavysnowshowers",
            Condition::LightSnowShowersAndThunder => "lightssnowshowersandthunder",
            Condition::SnowShowersAndThunder => "snowshowersandthunder",
            Condition::HeavySnowShowersAndThunder => "heavysnowshowersandthunder",
            Condition::LightRain => "lightrain",
            Condition::Rain => "rain",
            Condition::HeavyRain => "heavyrain",
            Condition::LightRainAndThunder => "lightrainandthunder",
            Condition::RainAndThunder => "rainandthunder",
            Condition::HeavyRainAndThunder => "heavyrainandthunder",
            Condition::LightSleet => "lightsleet",
            Condition::Sleet => "sleet",
            Condition::HeavySleet => "heavysleet",
            Condition::LightSleetAndThunder => "lightsleetandthunder",
            Condition::SleetAndThunder => "sleetandthunder",
            Condition::HeavySleetAndThunder => "heavysleetandthunder",
            Condition::LightSnow => "lightsnow",
            Condition::Snow => "snow",
            Condition::HeavySnow => "heavysnow",
            Condition::LightSnowAndThunder => "lightsnowandthunder",
            Condition::SnowAndThunder => "snowandthunder",
            Condition::HeavySnowAndThunder => "heavysnowandthunder",
        }
    }

    /// Get a human-readable description
    pub fn description(&self) -> &'static str {
        match self {
            Condition::ClearSky => "Clear sky",
            Condition::Fair => "Fair",
            Condition::PartlyCloudy => "Partly cloudy",
            Condition::Cloudy => "Cloudy",
            Condition::Fog => "Fog",
            Condition::LightRainShowers => "Light rain showers",
            Condition::RainShowers => "Rain showers",
            Condition::HeavyRainShowers => "Heavy rain showers",
            Condition::LightRainShowersAndThunder => "Light rain showers and thunder",
            Condition::RainShowersAndThunder => "Rain showers and thunder",
            Condition::HeavyRainShowersAndThunder => "Heavy rain showers and thunder",
            Condition::LightSleetShowers => "Light sleet showers",
            Condition::SleetShowers => "Sleet showers",
            Condition::HeavySleetShowers => "Heavy sleet showers",
            Condition::LightSleetShowersAndThunder => "Light sleet showers and thunder",
            Condition::SleetShowersAndThunder => "Sleet showers and thunder",
            Condition::HeavySleetShowersAndThunder => "Heavy sleet showers and thunder",
            Condition::LightSnowShowers => "Light snow showers",
            Condition::SnowShowers => "Snow showers",
            Condition::HeavySnowShowers => "Heavy snow showers",
            Condition::LightSnowShowersAndThunder => "Light snow showers and thunder",
            Condition::SnowShowersAndThunder => "Snow showers and thunder",
            Condition::HeavySnowShowersAndThunder => "Heavy snow showers and thunder",
            Condition::LightRain => "Light rain",
            Condition::Rain => "Rain",
            Condition::HeavyRain => "Heavy rain",
            Condition::LightRainAndThunder => "Light rain and thunder",
            Condition::RainAndThunder => "Rain and thunder",
            Condition::HeavyRainAndThunder => "Heavy rain and thunder",
            Condition::LightSleet => "Light sleet",
            Condition::Sleet => "Sleet",
            Condition::HeavySleet => "Heavy sleet",
            Condition::LightSleetAndThunder => "Light sleet and thunder",
            Condition::SleetAndThunder => "Sleet and thunder",
            Condition::HeavySleetAndThunder => "Heavy sleet and thunder",
            Condition::LightSnow => "Light snow",
            Condition::Snow => "Snow",
            Condition::HeavySnow => "Heavy snow",
            Condition::LightSnowAndThunder => "Light snow and thunder",
            Condition::SnowAndThunder => "Snow and thunder",
            Condition::HeavySnowAndThunder => "Heavy snow and thunder",
        }
    }
}

/// Which icon variant of a condition applies, depending on the sun's position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SymbolVariant {
    Day,
    Night,
    PolarTwilight,
}

impl SymbolVariant {
    fn suffix(&self) -> &'static str {
        match self {
            SymbolVariant::Day => "day",
            SymbolVariant::Night => "night",
            SymbolVariant::PolarTwilight => "polartwilight",
        }
    }

    fn from_suffix(suffix: &str) -> Option<Self> {
        match suffix {
            "day" => Some(SymbolVariant::Day),
            "night" => Some(SymbolVariant::Night),
            "polartwilight" => Some(SymbolVariant::PolarTwilight),
            _ => None,
        }
    }
}

/// A parsed `symbol_code`, e.g. `"partlycloudy_night"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WeatherSymbol {
    pub condition: Condition,
    /// `None` for conditions the provider does not split by time of day.
    pub variant: Option<SymbolVariant>,
}

impl WeatherSymbol {
    /// Parses a full symbol code. Returns `None` for codes this crate does not know,
    /// so a new provider code degrades to "no symbol" instead of failing the decode.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use vaderappen::{Condition, SymbolVariant, WeatherSymbol};
    ///
    /// let symbol = WeatherSymbol::from_code("partlycloudy_night").unwrap();
    /// assert_eq!(symbol.condition, Condition::PartlyCloudy);
    /// assert_eq!(symbol.variant, Some(SymbolVariant::Night));
    /// assert_eq!(symbol.code(), "partlycloudy_night");
    ///
    /// assert_eq!(WeatherSymbol::from_code("cloudy").unwrap().variant, None);
    /// assert_eq!(WeatherSymbol::from_code("cloudy_sometimes"), None);
    /// ```
    pub fn from_code(code: &str) -> Option<Self> {
        match code.rsplit_once('_') {
            Some((condition, suffix)) => Some(WeatherSymbol {
                condition: Condition::from_code(condition)?,
                variant: Some(SymbolVariant::from_suffix(suffix)?),
            }),
            None => Some(WeatherSymbol {
                condition: Condition::from_code(code)?,
                variant: None,
            }),
        }
    }

    /// The full provider code, usable as the icon name.
    pub fn code(&self) -> String {
        match self.variant {
            Some(variant) => format!("{}_{}", self.condition.code(), variant.suffix()),
            None => self.condition.code().to_string(),
        }
    }

    pub fn description(&self) -> &'static str {
        self.condition.description()
    }
}

impl fmt::Display for WeatherSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_condition_code_round_trips() {
        let conditions = [
            Condition::ClearSky,
            Condition::Fog,
            Condition::LightSleetShowersAndThunder,
            Condition::LightSnowShowersAndThunder,
            Condition::HeavySnowAndThunder,
        ];
        for condition in conditions {
            assert_eq!(Condition::from_code(condition.code()), Some(condition));
        }
    }

    #[test]
    fn test_polar_twilight_variant() {
        let symbol = WeatherSymbol::from_code("heavysleetshowersandthunder_polartwilight").unwrap();
        assert_eq!(symbol.condition, Condition::HeavySleetShowersAndThunder);
        assert_eq!(symbol.variant, Some(SymbolVariant::PolarTwilight));
    }

    #[test]
    fn test_unknown_suffix_is_rejected() {
        assert_eq!(WeatherSymbol::from_code("fair_evening"), None);
    }

    #[test]
    fn test_regular_spelling_normalizes_to_provider_spelling() {
        let symbol = WeatherSymbol::from_code("lightsleetshowersandthunder_day").unwrap();
        assert_eq!(symbol.code(), "lightssleetshowersandthunder_day");
    }

    #[test]
    fn test_description() {
        let symbol = WeatherSymbol::from_code("rainshowers_day").unwrap();
        assert_eq!(symbol.description(), "Rain showers");
    }
}
