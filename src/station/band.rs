use strum_macros::{EnumIter, EnumString, IntoStaticStr};

/// Frequency band a radar transmits in.
#[derive(Debug, Hash, Clone, Copy, PartialEq, Eq, EnumString, IntoStaticStr, EnumIter)]
pub enum Band {
    /// About 5 cm wavelength.
    C,
    /// About 10 cm wavelength.
    S,
    /// About 3 cm wavelength.
    X,
}

impl Band {
    /// Get a static string representation.
    pub fn as_static_str(self) -> &'static str {
        self.into()
    }

    /// Parse ignoring case and surrounding whitespace, `"s"` and `"S-band"` included.
    pub fn parse_loose(value: &str) -> Option<Self> {
        let value = value.trim().to_uppercase();
        let value = value.trim_end_matches("-BAND").trim_end_matches("BAND").trim();
        value.parse().ok()
    }
}

#[cfg(test)]
mod unit {
    use super::*;

    #[test]
    fn test_parse_loose() {
        assert_eq!(Band::parse_loose("S"), Some(Band::S));
        assert_eq!(Band::parse_loose("c"), Some(Band::C));
        assert_eq!(Band::parse_loose("S-band"), Some(Band::S));
        assert_eq!(Band::parse_loose(""), None);
        assert_eq!(Band::parse_loose("K"), None);
    }
}
