// Copyright (C) 2026  Caprica Software Limited
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

use chrono::{DateTime, Local, Utc};

/// Formats the instant a favourite was added as a local calendar date.
///
/// # Examples
///
/// ```ignore
/// let added = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
/// assert_eq!(format_added_date(added), "2024-03-01"); // in UTC
/// ```
pub(crate) fn format_added_date(timestamp: DateTime<Utc>) -> String {
    timestamp.with_timezone(&Local).format("%Y-%m-%d").to_string()
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn added_date_is_a_calendar_date() {
        let added = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        let formatted = format_added_date(added);

        assert_eq!(formatted.len(), 10);
        assert!(formatted.starts_with("2024-0"));
    }
}
