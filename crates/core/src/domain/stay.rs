use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;

const SECONDS_PER_DAY: i64 = 86_400;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum RangeError {
    #[error("check-out {check_out} must be after check-in {check_in}")]
    InvalidRange { check_in: DateTime<Utc>, check_out: DateTime<Utc> },
}

/// A guest stay as a half-open interval: the check-out instant is not part
/// of the stay, so a guest departing on day D does not occupy day D.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct StayRange {
    check_in: DateTime<Utc>,
    check_out: DateTime<Utc>,
}

impl StayRange {
    pub fn new(check_in: DateTime<Utc>, check_out: DateTime<Utc>) -> Result<Self, RangeError> {
        if check_out <= check_in {
            return Err(RangeError::InvalidRange { check_in, check_out });
        }
        Ok(Self { check_in, check_out })
    }

    pub fn check_in(&self) -> DateTime<Utc> {
        self.check_in
    }

    pub fn check_out(&self) -> DateTime<Utc> {
        self.check_out
    }

    /// Billable nights: whole days rounded up, never less than one.
    /// A sub-day stay still bills a single night.
    pub fn nights(&self) -> u32 {
        let seconds = (self.check_out - self.check_in).num_seconds();
        let nights = (seconds + SECONDS_PER_DAY - 1) / SECONDS_PER_DAY;
        nights.max(1) as u32
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::{RangeError, StayRange};

    fn instant(y: i32, m: u32, d: u32, h: u32) -> chrono::DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, 0, 0).single().expect("valid test instant")
    }

    #[test]
    fn rejects_inverted_and_empty_ranges() {
        let at = instant(2025, 11, 10, 14);
        assert!(matches!(
            StayRange::new(at, at),
            Err(RangeError::InvalidRange { .. })
        ));
        assert!(StayRange::new(at, instant(2025, 11, 9, 14)).is_err());
    }

    #[test]
    fn counts_whole_nights() {
        let stay = StayRange::new(instant(2025, 11, 10, 0), instant(2025, 11, 13, 0))
            .expect("three night stay");
        assert_eq!(stay.nights(), 3);
    }

    #[test]
    fn partial_last_day_rounds_up() {
        let stay = StayRange::new(instant(2025, 11, 10, 14), instant(2025, 11, 13, 10))
            .expect("two and a bit days");
        assert_eq!(stay.nights(), 3);
    }

    #[test]
    fn sub_day_stay_bills_one_night() {
        let stay = StayRange::new(instant(2025, 11, 10, 10), instant(2025, 11, 10, 18))
            .expect("same-day stay");
        assert_eq!(stay.nights(), 1);
    }
}
