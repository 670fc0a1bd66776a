use super::error::DecodeError;
use super::pattern::MatchedFields;

/// One-pass reader over the captured values of a single match.
///
/// Every read consumes exactly one group, left to right. Reading past the
/// end, or reading a group as a type it cannot hold, means the pattern and
/// the reading code disagree; that surfaces as a [`DecodeError`].
pub struct FieldCursor<'f, 'p, 't> {
    fields: &'f MatchedFields<'p, 't>,
    index: usize,
}

impl<'f, 'p, 't> FieldCursor<'f, 'p, 't> {
    #[must_use]
    pub fn new(fields: &'f MatchedFields<'p, 't>) -> Self {
        FieldCursor { fields, index: 0 }
    }

    pub fn next_string(&mut self) -> Result<&'t str, DecodeError> {
        let (_, value) = self
            .fields
            .get(self.index)
            .ok_or(DecodeError::CursorExhausted {
                consumed: self.index,
            })?;
        self.index += 1;
        Ok(value)
    }

    pub fn next_int(&mut self) -> Result<u32, DecodeError> {
        self.next_parsed("an integer")
    }

    pub fn next_decimal(&mut self) -> Result<f64, DecodeError> {
        self.next_parsed("a decimal")
    }

    /// Reads a decimal degree value followed by its hemisphere letter.
    pub fn next_coordinate(&mut self) -> Result<f64, DecodeError> {
        let degrees = self.next_decimal()?;
        let index = self.index;
        let letter = self.next_string()?;
        match letter {
            "N" | "E" => Ok(degrees),
            "S" | "W" => Ok(-degrees),
            other => Err(self.type_error(index, other, "a hemisphere")),
        }
    }

    pub fn skip(&mut self) -> Result<(), DecodeError> {
        self.next_string().map(|_| ())
    }

    /// Checks that every declared field has been read.
    pub fn finish(self) -> Result<(), DecodeError> {
        let declared = self.fields.len();
        if self.index < declared {
            return Err(DecodeError::UnconsumedFields {
                declared,
                remaining: declared - self.index,
            });
        }
        Ok(())
    }

    fn next_parsed<T: std::str::FromStr>(
        &mut self,
        expected: &'static str,
    ) -> Result<T, DecodeError> {
        let index = self.index;
        let value = self.next_string()?;
        value
            .parse::<T>()
            .map_err(|_| self.type_error(index, value, expected))
    }

    fn type_error(&self, index: usize, value: &str, expected: &'static str) -> DecodeError {
        match self.fields.get(index) {
            Some((slot, _)) => DecodeError::FieldType {
                index,
                slot,
                value: value.to_string(),
                expected,
            },
            None => DecodeError::CursorExhausted { consumed: index },
        }
    }
}
