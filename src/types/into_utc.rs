use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};

/// Conversion into a UTC instant.
///
/// The provider only accepts UTC-qualified timestamps, so every instant a
/// caller hands in is normalized through this trait before it is formatted
/// into a request. Naive datetimes are assumed to already be in UTC.
pub trait IntoUtcDateTime {
    fn into_utc(self) -> DateTime<Utc>;
}

impl<Tz: TimeZone> IntoUtcDateTime for DateTime<Tz> {
    fn into_utc(self) -> DateTime<Utc> {
        self.with_timezone(&Utc)
    }
}

impl IntoUtcDateTime for NaiveDateTime {
    fn into_utc(self) -> DateTime<Utc> {
        Utc.from_utc_datetime(&self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    #[test]
    fn offsets_are_normalized_to_utc() {
        let plus_two = FixedOffset::east_opt(2 * 3600).unwrap();
        let local = plus_two.with_ymd_and_hms(2017, 6, 26, 14, 0, 0).unwrap();
        let utc = local.into_utc();
        assert_eq!(utc, Utc.with_ymd_and_hms(2017, 6, 26, 12, 0, 0).unwrap());
    }

    #[test]
    fn naive_datetimes_are_taken_as_utc() {
        let naive = NaiveDateTime::parse_from_str("2017-06-26T12:00:00", "%Y-%m-%dT%H:%M:%S")
            .unwrap();
        assert_eq!(
            naive.into_utc(),
            Utc.with_ymd_and_hms(2017, 6, 26, 12, 0, 0).unwrap()
        );
    }
}
