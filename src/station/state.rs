use strum_macros::{EnumIter, EnumString, IntoStaticStr};

/// Australian state and territory abbreviations, as used in the station table.
#[derive(Debug, Hash, Clone, Copy, PartialEq, Eq, EnumString, IntoStaticStr, EnumIter)]
#[allow(missing_docs)]
pub enum State {
    NSW, // New South Wales
    VIC, // Victoria
    QLD, // Queensland
    SA,  // South Australia
    WA,  // Western Australia
    TAS, // Tasmania
    NT,  // Northern Territory
    ACT, // Australian Capital Territory
    // External territories with radars
    IOT, // Indian Ocean Territories (Christmas Island, Cocos)
    NI,  // Norfolk Island
}

impl State {
    /// Get a static string representation.
    pub fn as_static_str(self) -> &'static str {
        self.into()
    }

    /// Parse ignoring case and surrounding whitespace.
    pub fn parse_loose(value: &str) -> Option<Self> {
        value.trim().to_uppercase().parse().ok()
    }
}

/*--------------------------------------------------------------------------------------------------
                                          Unit Tests
--------------------------------------------------------------------------------------------------*/
