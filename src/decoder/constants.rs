use super::pattern::{Pattern, PatternBuilder, PatternError};

pub const PROTOCOL_NAME: &str = "gnx";
pub const HEADER: &str = "$GNX_";
pub const SUBTYPE_LENGTH: usize = 3;
pub const TAGGED_SUBTYPE: &str = "MIF";

/// identifier, [length,] history, device time, device date, fix time, fix
/// date, valid, latitude, hemisphere, longitude, hemisphere
pub static LOCATION_PATTERN: once_cell::sync::Lazy<Result<Pattern, PatternError>> =
    once_cell::sync::Lazy::new(|| {
        PatternBuilder::new()
            .number()
            .text(",")
            .optional(PatternBuilder::new().skip_number().text(","))
            .one_of("01")
            .text(",")
            .digits(2)
            .digits(2)
            .digits(2)
            .text(",")
            .digits(2)
            .digits(2)
            .digits(2)
            .text(",")
            .digits(2)
            .digits(2)
            .digits(2)
            .text(",")
            .digits(2)
            .digits(2)
            .digits(2)
            .text(",")
            .digits(1)
            .text(",")
            .decimal()
            .text(",")
            .one_of("NS")
            .text(",")
            .decimal()
            .text(",")
            .one_of("EW")
            .text(",")
            .compile()
    });

/// Location followed by card validity and the RFID token.
pub static TAGGED_PATTERN: once_cell::sync::Lazy<Result<Pattern, PatternError>> =
    once_cell::sync::Lazy::new(|| {
        let location = once_cell::sync::Lazy::force(&LOCATION_PATTERN)
            .as_ref()
            .map_err(Clone::clone)?;
        PatternBuilder::new()
            .text(HEADER)
            .text(TAGGED_SUBTYPE)
            .text(",")
            .embed(location)
            .one_of("01")
            .text(",")
            .token()
            .text(",")
            .any()
            .compile()
    });

/// Any subtype, Location, then whatever the device appends.
pub static GENERIC_PATTERN: once_cell::sync::Lazy<Result<Pattern, PatternError>> =
    once_cell::sync::Lazy::new(|| {
        let location = once_cell::sync::Lazy::force(&LOCATION_PATTERN)
            .as_ref()
            .map_err(Clone::clone)?;
        PatternBuilder::new()
            .text(HEADER)
            .skip_chars(SUBTYPE_LENGTH)
            .text(",")
            .embed(location)
            .any()
            .compile()
    });

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    Tagged,
    Generic,
}

impl Variant {
    /// Picks the variant from the subtype code that follows the header.
    /// Never fails: anything that is not the tagged code is left for the
    /// generic pattern to accept or reject.
    #[must_use]
    pub fn classify(sentence: &str) -> Variant {
        match sentence.get(HEADER.len()..HEADER.len() + SUBTYPE_LENGTH) {
            Some(TAGGED_SUBTYPE) => Variant::Tagged,
            _ => Variant::Generic,
        }
    }

    pub fn pattern(self) -> Result<&'static Pattern, &'static PatternError> {
        match self {
            Variant::Tagged => once_cell::sync::Lazy::force(&TAGGED_PATTERN).as_ref(),
            Variant::Generic => once_cell::sync::Lazy::force(&GENERIC_PATTERN).as_ref(),
        }
    }
}
