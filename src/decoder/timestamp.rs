/// GNX devices report wall-clock time in India Standard Time.
pub const GNX_UTC_OFFSET_SECONDS: i32 = 5 * 3600 + 30 * 60;

/// Two-digit years are taken to be in this century: 00..=99 -> 2000..=2099.
pub const CENTURY_BASE: i32 = 2000;

/// Assembles a calendar timestamp at a fixed UTC offset from separately
/// reported time and date components.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimestampBuilder {
    offset_seconds: i32,
    year: i32,
    month: u32,
    day: u32,
    hour: u32,
    minute: u32,
    second: u32,
}

impl TimestampBuilder {
    #[must_use]
    pub fn new(offset_seconds: i32) -> Self {
        TimestampBuilder {
            offset_seconds,
            year: 1970,
            month: 1,
            day: 1,
            hour: 0,
            minute: 0,
            second: 0,
        }
    }

    #[must_use]
    pub fn gnx() -> Self {
        TimestampBuilder::new(GNX_UTC_OFFSET_SECONDS)
    }

    #[must_use]
    pub fn time(mut self, hour: u32, minute: u32, second: u32) -> Self {
        self.hour = hour;
        self.minute = minute;
        self.second = second;
        self
    }

    #[must_use]
    pub fn date(mut self, year: u32, month: u32, day: u32) -> Self {
        // Components come from two-digit groups; anything larger is already a full year.
        let year = i32::try_from(year).unwrap_or(i32::MAX);
        self.year = if year < 100 { year + CENTURY_BASE } else { year };
        self.month = month;
        self.day = day;
        self
    }

    /// Date components in the order the device sends them: day, month, year.
    #[must_use]
    pub fn date_reverse(self, day: u32, month: u32, year: u32) -> Self {
        self.date(year, month, day)
    }

    /// Returns `None` when the components do not name a real instant.
    #[must_use]
    pub fn build(&self) -> Option<chrono::DateTime<chrono::FixedOffset>> {
        let offset = chrono::FixedOffset::east_opt(self.offset_seconds)?;
        let naive = chrono::NaiveDate::from_ymd_opt(self.year, self.month, self.day)?
            .and_hms_opt(self.hour, self.minute, self.second)?;
        naive.and_local_timezone(offset).single()
    }
}
