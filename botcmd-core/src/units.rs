use std::fmt;

/// Temperature unit a reply is rendered in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TemperatureUnit {
    #[default]
    Celsius,
    Fahrenheit,
}

impl TemperatureUnit {
    pub fn convert(self, kelvin: f64) -> f64 {
        match self {
            Self::Celsius => kelvin - 273.15,
            Self::Fahrenheit => kelvin * 9.0 / 5.0 - 459.67,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Self::Celsius => "C",
            Self::Fahrenheit => "F",
        }
    }

    /// Parse a unit selector token ("c" or "f", any case).
    pub fn from_token(token: &str) -> Option<Self> {
        if token.eq_ignore_ascii_case("c") {
            Some(Self::Celsius)
        } else if token.eq_ignore_ascii_case("f") {
            Some(Self::Fahrenheit)
        } else {
            None
        }
    }
}

impl fmt::Display for TemperatureUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Strip a trailing unit token from `args`, defaulting to Celsius when absent.
pub fn split_unit(args: &[String]) -> (TemperatureUnit, &[String]) {
    match args.split_last() {
        Some((last, rest)) => match TemperatureUnit::from_token(last) {
            Some(unit) => (unit, rest),
            None => (TemperatureUnit::default(), args),
        },
        None => (TemperatureUnit::default(), args),
    }
}
