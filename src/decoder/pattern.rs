/// Kind of value a capture group holds. One slot per capture group, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldSlot {
    Digits(usize),
    Number,
    Decimal,
    OneOf(&'static str),
    Token,
}

impl std::fmt::Display for FieldSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldSlot::Digits(width) => write!(f, "{width} digits"),
            FieldSlot::Number => write!(f, "number"),
            FieldSlot::Decimal => write!(f, "decimal"),
            FieldSlot::OneOf(set) => write!(f, "one of [{set}]"),
            FieldSlot::Token => write!(f, "token"),
        }
    }
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum PatternError {
    #[error("pattern failed to compile: {0}")]
    Regex(#[from] regex::Error),
    #[error("pattern declares {declared} fields but compiles to {groups} capture groups")]
    SlotMismatch { declared: usize, groups: usize },
    #[error("optional section of a pattern must not capture fields")]
    CaptureInOptional,
}

/// Composes a positional field grammar. Capturing primitives append a
/// [`FieldSlot`]; literal and skipping primitives only extend the source.
#[derive(Debug, Default, Clone)]
pub struct PatternBuilder {
    source: String,
    slots: Vec<FieldSlot>,
    capture_in_optional: bool,
}

impl PatternBuilder {
    #[must_use]
    pub fn new() -> Self {
        PatternBuilder::default()
    }

    #[must_use]
    pub fn digits(self, width: usize) -> Self {
        self.capture(&format!("[0-9]{{{width}}}"), FieldSlot::Digits(width))
    }

    #[must_use]
    pub fn number(self) -> Self {
        self.capture("[0-9]+", FieldSlot::Number)
    }

    #[must_use]
    pub fn decimal(self) -> Self {
        self.capture(r"[0-9]+\.[0-9]+", FieldSlot::Decimal)
    }

    #[must_use]
    pub fn one_of(self, set: &'static str) -> Self {
        self.capture(&format!("[{}]", regex::escape(set)), FieldSlot::OneOf(set))
    }

    /// Any run of characters up to the next comma.
    #[must_use]
    pub fn token(self) -> Self {
        self.capture("[^,]+", FieldSlot::Token)
    }

    #[must_use]
    pub fn text(mut self, literal: &str) -> Self {
        self.source.push_str(&regex::escape(literal));
        self
    }

    #[must_use]
    pub fn skip_number(mut self) -> Self {
        self.source.push_str("[0-9]+");
        self
    }

    #[must_use]
    pub fn skip_chars(mut self, count: usize) -> Self {
        self.source.push_str(&format!(".{{{count}}}"));
        self
    }

    #[must_use]
    pub fn optional(mut self, inner: PatternBuilder) -> Self {
        self.capture_in_optional |= !inner.slots.is_empty() || inner.capture_in_optional;
        self.source.push_str(&format!("(?:{})?", inner.source));
        self
    }

    /// Embeds a compiled pattern verbatim; its slots follow the ones already declared.
    #[must_use]
    pub fn embed(mut self, pattern: &Pattern) -> Self {
        self.source.push_str(&pattern.source);
        self.slots.extend_from_slice(&pattern.slots);
        self
    }

    /// Matches and discards the rest of the text.
    #[must_use]
    pub fn any(mut self) -> Self {
        self.source.push_str("(?s:.*)");
        self
    }

    pub fn compile(self) -> Result<Pattern, PatternError> {
        if self.capture_in_optional {
            return Err(PatternError::CaptureInOptional);
        }
        let regex = regex::Regex::new(&format!("^(?:{})$", self.source))?;
        let groups = regex.captures_len() - 1;
        if groups != self.slots.len() {
            return Err(PatternError::SlotMismatch {
                declared: self.slots.len(),
                groups,
            });
        }
        Ok(Pattern {
            regex,
            source: self.source,
            slots: self.slots,
        })
    }

    fn capture(mut self, expression: &str, slot: FieldSlot) -> Self {
        self.source.push('(');
        self.source.push_str(expression);
        self.source.push(')');
        self.slots.push(slot);
        self
    }
}

/// An immutable whole-text matcher.
#[derive(Debug)]
pub struct Pattern {
    regex: regex::Regex,
    source: String,
    slots: Vec<FieldSlot>,
}

impl Pattern {
    #[cfg(test)]
    fn source(&self) -> &str {
        &self.source
    }

    #[must_use]
    pub fn slots(&self) -> &[FieldSlot] {
        &self.slots
    }

    /// Matches the entire `text`, returning the captured values in slot order.
    #[must_use]
    pub fn match_fields<'p, 't>(&'p self, text: &'t str) -> Option<MatchedFields<'p, 't>> {
        let captures = self.regex.captures(text)?;
        // Optional sections never capture, so every group participates in a match.
        let values = captures
            .iter()
            .skip(1)
            .map(|group| group.map_or("", |m| m.as_str()))
            .collect();
        Some(MatchedFields {
            slots: &self.slots,
            values,
        })
    }
}

/// Captured values of one successful match, one per declared slot.
#[derive(Debug)]
pub struct MatchedFields<'p, 't> {
    slots: &'p [FieldSlot],
    values: Vec<&'t str>,
}

impl<'t> MatchedFields<'_, 't> {
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<(FieldSlot, &'t str)> {
        Some((*self.slots.get(index)?, *self.values.get(index)?))
    }
}
