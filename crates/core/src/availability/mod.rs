//! Per-day occupancy projection over a set of booking spans.
//!
//! The index is sparse: a day with no contributors carries no entry and is
//! free. Malformed upstream spans are dropped with a structured warning
//! instead of failing the whole projection, because calendar rendering has
//! to survive incomplete booking records.

use std::collections::BTreeMap;

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use tracing::warn;

/// Day-to-contributors lookup built from `[check_in, check_out)` spans.
/// The payload is whatever the caller wants back per day, typically a
/// guest label for tooltips.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OccupancyIndex<P> {
    days: BTreeMap<NaiveDate, Vec<P>>,
}

impl<P: Clone> OccupancyIndex<P> {
    /// Projects each span onto every day it covers, checkout day excluded.
    /// Spans with `check_out <= check_in` are skipped entirely.
    pub fn build<I>(spans: I) -> Self
    where
        I: IntoIterator<Item = (DateTime<Utc>, DateTime<Utc>, P)>,
    {
        let mut days: BTreeMap<NaiveDate, Vec<P>> = BTreeMap::new();
        for (check_in, check_out, payload) in spans {
            if check_out <= check_in {
                warn!(%check_in, %check_out, "skipping booking span with inverted range");
                continue;
            }
            let mut day = check_in.date_naive();
            let departure = check_out.date_naive();
            while day < departure {
                days.entry(day).or_default().push(payload.clone());
                match day.succ_opt() {
                    Some(next) => day = next,
                    None => break,
                }
            }
        }
        Self { days }
    }

    /// [`build`](Self::build) over the wire shape of the upstream booking
    /// list: ISO-8601 date-time text. Unparseable spans are skipped the
    /// same way inverted ones are.
    pub fn from_iso<'a, I>(spans: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str, P)>,
    {
        Self::build(spans.into_iter().filter_map(|(check_in, check_out, payload)| {
            match (parse_instant(check_in), parse_instant(check_out)) {
                (Some(check_in), Some(check_out)) => Some((check_in, check_out, payload)),
                _ => {
                    warn!(check_in, check_out, "skipping booking span with unparseable timestamps");
                    None
                }
            }
        }))
    }

    /// True iff any booking covers `day`.
    pub fn is_booked(&self, day: NaiveDate) -> bool {
        self.days.contains_key(&day)
    }

    /// Contributing payloads for `day` in insertion order; empty for a
    /// free day.
    pub fn contributors(&self, day: NaiveDate) -> &[P] {
        self.days.get(&day).map_or(&[], Vec::as_slice)
    }

    /// Booked days in calendar order.
    pub fn booked_days(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.days.keys().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}

fn parse_instant(text: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(text).ok().map(|instant| instant.with_timezone(&Utc))
}

/// Every day of the month in order, or `None` for an out-of-range month.
pub fn days_in_month(year: i32, month: u32) -> Option<Vec<NaiveDate>> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next_first = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };

    let mut days = Vec::with_capacity(31);
    let mut day = first;
    while day < next_first {
        days.push(day);
        day = day.succ_opt()?;
    }
    Some(days)
}

/// Leading blank cells before day 1 in a Monday-first month grid. The
/// convention is fixed here so callers never hand-adjust it.
pub fn first_weekday_offset(year: i32, month: u32) -> Option<u32> {
    NaiveDate::from_ymd_opt(year, month, 1).map(|first| first.weekday().num_days_from_monday())
}
