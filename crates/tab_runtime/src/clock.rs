//! Wall-clock snapshots and the clock face's text formatting.

use crate::model::ClockFormat;

/// Refresh cadence of the clock face, in milliseconds.
pub const CLOCK_TICK_MS: u32 = 1_000;

const WEEKDAYS: [&str; 7] = [
    "SUNDAY",
    "MONDAY",
    "TUESDAY",
    "WEDNESDAY",
    "THURSDAY",
    "FRIDAY",
    "SATURDAY",
];

const MONTHS: [&str; 12] = [
    "JAN", "FEB", "MAR", "APR", "MAY", "JUN", "JUL", "AUG", "SEP", "OCT", "NOV", "DEC",
];

/// Local wall-clock snapshot, decoupled from the browser clock for formatting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocalTime {
    /// Hour of day, 0–23.
    pub hours: u32,
    /// Minute of hour, 0–59.
    pub minutes: u32,
    /// Day of week, 0 = Sunday.
    pub weekday: u32,
    /// Month, 0 = January.
    pub month: u32,
    /// Day of month, 1–31.
    pub day: u32,
}

impl LocalTime {
    /// Reads the current local time; on non-browser targets this is a fixed
    /// placeholder since no clock face is rendered there.
    pub fn now() -> Self {
        #[cfg(target_arch = "wasm32")]
        {
            let date = js_sys::Date::new_0();
            Self {
                hours: date.get_hours(),
                minutes: date.get_minutes(),
                weekday: date.get_day(),
                month: date.get_month(),
                day: date.get_date(),
            }
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            Self {
                hours: 0,
                minutes: 0,
                weekday: 0,
                month: 0,
                day: 1,
            }
        }
    }

    /// Hour-group text: unpadded 1–12 in the 12-hour cycle, zero-padded 00–23
    /// in the 24-hour cycle.
    pub fn hour_text(&self, format: ClockFormat) -> String {
        match format {
            ClockFormat::TwelveHour => {
                let hour = self.hours % 12;
                let hour = if hour == 0 { 12 } else { hour };
                hour.to_string()
            }
            ClockFormat::TwentyFourHour => format!("{:02}", self.hours),
        }
    }

    /// Minute-group text, always zero-padded.
    pub fn minute_text(&self) -> String {
        format!("{:02}", self.minutes)
    }

    /// AM/PM marker, or `None` in the 24-hour cycle.
    pub fn meridiem(&self, format: ClockFormat) -> Option<&'static str> {
        match format {
            ClockFormat::TwelveHour => Some(if self.hours < 12 { "AM" } else { "PM" }),
            ClockFormat::TwentyFourHour => None,
        }
    }

    /// Date line such as `MONDAY, JAN 05`.
    pub fn date_text(&self) -> String {
        let weekday = WEEKDAYS
            .get(self.weekday as usize)
            .copied()
            .unwrap_or("SUNDAY");
        let month = MONTHS.get(self.month as usize).copied().unwrap_or("JAN");
        format!("{weekday}, {month} {:02}", self.day)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn at(hours: u32, minutes: u32) -> LocalTime {
        LocalTime {
            hours,
            minutes,
            weekday: 1,
            month: 0,
            day: 5,
        }
    }

    #[test]
    fn twelve_hour_cycle_is_unpadded_with_midnight_and_noon_as_twelve() {
        assert_eq!(at(0, 0).hour_text(ClockFormat::TwelveHour), "12");
        assert_eq!(at(9, 0).hour_text(ClockFormat::TwelveHour), "9");
        assert_eq!(at(12, 0).hour_text(ClockFormat::TwelveHour), "12");
        assert_eq!(at(21, 0).hour_text(ClockFormat::TwelveHour), "9");
    }

    #[test]
    fn twenty_four_hour_cycle_is_zero_padded() {
        assert_eq!(at(0, 0).hour_text(ClockFormat::TwentyFourHour), "00");
        assert_eq!(at(9, 0).hour_text(ClockFormat::TwentyFourHour), "09");
        assert_eq!(at(21, 0).hour_text(ClockFormat::TwentyFourHour), "21");
    }

    #[test]
    fn minutes_are_always_zero_padded() {
        assert_eq!(at(10, 4).minute_text(), "04");
        assert_eq!(at(10, 59).minute_text(), "59");
    }

    #[test]
    fn meridiem_exists_only_in_the_twelve_hour_cycle() {
        assert_eq!(at(0, 0).meridiem(ClockFormat::TwelveHour), Some("AM"));
        assert_eq!(at(11, 59).meridiem(ClockFormat::TwelveHour), Some("AM"));
        assert_eq!(at(12, 0).meridiem(ClockFormat::TwelveHour), Some("PM"));
        assert_eq!(at(23, 0).meridiem(ClockFormat::TwelveHour), Some("PM"));
        assert_eq!(at(23, 0).meridiem(ClockFormat::TwentyFourHour), None);
    }

    #[test]
    fn date_line_is_uppercase_weekday_month_and_padded_day() {
        let time = LocalTime {
            hours: 10,
            minutes: 0,
            weekday: 1,
            month: 0,
            day: 5,
        };
        assert_eq!(time.date_text(), "MONDAY, JAN 05");

        let late = LocalTime {
            hours: 10,
            minutes: 0,
            weekday: 6,
            month: 11,
            day: 31,
        };
        assert_eq!(late.date_text(), "SATURDAY, DEC 31");
    }
}
