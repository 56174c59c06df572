// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Date/time converters based on 100 ns ticks.
//!
//! Instants are counted from 0001-01-01T00:00:00 and limited to the range
//! ending at 9999-12-31T23:59:59.9999999.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, TimeDelta, TimeZone};

use crate::convert::ValueConverter;
use crate::error::{Error, Result};
use crate::ser::{Reader, Writer};

const TICKS_PER_SECOND: i64 = 10_000_000;
const NANOS_PER_TICK: i64 = 100;

/// Ticks at 9999-12-31T23:59:59.9999999.
const MAX_TICKS: i64 = 3_155_378_975_999_999_999;

/// Largest offset magnitude accepted, in seconds (14 hours).
const MAX_OFFSET_SECONDS: i64 = 14 * 3600;

fn epoch() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(1, 1, 1)
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .unwrap_or(NaiveDateTime::MIN)
}

fn delta_to_ticks(delta: TimeDelta) -> Option<i64> {
    delta
        .num_seconds()
        .checked_mul(TICKS_PER_SECOND)?
        .checked_add(i64::from(delta.subsec_nanos()) / NANOS_PER_TICK)
}

fn ticks_to_delta(ticks: i64) -> Option<TimeDelta> {
    let seconds = TimeDelta::try_seconds(ticks / TICKS_PER_SECOND)?;
    seconds.checked_add(&TimeDelta::nanoseconds((ticks % TICKS_PER_SECOND) * NANOS_PER_TICK))
}

fn instant_to_ticks(instant: NaiveDateTime) -> Result<i64> {
    delta_to_ticks(instant - epoch())
        .filter(|ticks| (0..=MAX_TICKS).contains(ticks))
        .ok_or_else(|| Error::invalid_value(format!("{instant} is outside 0001-01-01..=9999-12-31")))
}

fn ticks_to_instant(ticks: i64, r: &Reader<'_>) -> Result<NaiveDateTime> {
    if !(0..=MAX_TICKS).contains(&ticks) {
        return Err(r.invalid("date/time", format!("tick count {ticks} out of range")));
    }
    ticks_to_delta(ticks)
        .and_then(|delta| epoch().checked_add_signed(delta))
        .ok_or_else(|| r.invalid("date/time", format!("tick count {ticks} out of range")))
}

/// Instant as an i64 tick count.
#[derive(Debug, Default, Clone, Copy)]
pub struct DateTimeConverter;

impl ValueConverter<NaiveDateTime> for DateTimeConverter {
    fn write(&self, value: &NaiveDateTime, w: &mut Writer<'_>) -> Result<()> {
        w.write_i64(instant_to_ticks(*value)?);
        Ok(())
    }

    fn read(&self, r: &mut Reader<'_>) -> Result<NaiveDateTime> {
        let ticks = r.read_i64()?;
        ticks_to_instant(ticks, r)
    }
}

/// Signed duration as an i64 tick count; sub-tick precision is truncated.
#[derive(Debug, Default, Clone, Copy)]
pub struct TimeSpanConverter;

impl ValueConverter<TimeDelta> for TimeSpanConverter {
    fn write(&self, value: &TimeDelta, w: &mut Writer<'_>) -> Result<()> {
        let ticks = delta_to_ticks(*value)
            .ok_or_else(|| Error::invalid_value(format!("{value} overflows an i64 tick count")))?;
        w.write_i64(ticks);
        Ok(())
    }

    fn read(&self, r: &mut Reader<'_>) -> Result<TimeDelta> {
        let ticks = r.read_i64()?;
        ticks_to_delta(ticks).ok_or_else(|| r.invalid("time span", format!("{ticks} ticks")))
    }
}

/// Local clock ticks followed by offset ticks.
#[derive(Debug, Default, Clone, Copy)]
pub struct DateTimeOffsetConverter;

impl ValueConverter<DateTime<FixedOffset>> for DateTimeOffsetConverter {
    fn write(&self, value: &DateTime<FixedOffset>, w: &mut Writer<'_>) -> Result<()> {
        let local = instant_to_ticks(value.naive_local())?;
        let offset = i64::from(value.offset().local_minus_utc()) * TICKS_PER_SECOND;
        w.write_i64(local);
        w.write_i64(offset);
        Ok(())
    }

    fn read(&self, r: &mut Reader<'_>) -> Result<DateTime<FixedOffset>> {
        let local = r.read_i64()?;
        let local = ticks_to_instant(local, r)?;
        let offset_ticks = r.read_i64()?;
        if offset_ticks % TICKS_PER_SECOND != 0
            || (offset_ticks / TICKS_PER_SECOND).abs() > MAX_OFFSET_SECONDS
        {
            return Err(r.invalid("utc offset", format!("{offset_ticks} ticks")));
        }
        let offset = i32::try_from(offset_ticks / TICKS_PER_SECOND)
            .ok()
            .and_then(FixedOffset::east_opt)
            .ok_or_else(|| r.invalid("utc offset", format!("{offset_ticks} ticks")))?;
        offset
            .from_local_datetime(&local)
            .single()
            .ok_or_else(|| r.invalid("date/time offset", format!("{local} {offset}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn epoch_is_zero_ticks() {
        assert_eq!(instant_to_ticks(epoch()).expect("epoch ticks"), 0);
    }

    #[test]
    fn unix_epoch_matches_known_tick_count() {
        let unix = NaiveDate::from_ymd_opt(1970, 1, 1)
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .expect("valid date");
        assert_eq!(
            instant_to_ticks(unix).expect("unix epoch ticks"),
            621_355_968_000_000_000
        );
    }

    #[test]
    fn negative_durations_round_trip_through_ticks() {
        let delta = TimeDelta::milliseconds(-1_500) - TimeDelta::nanoseconds(300);
        let ticks = delta_to_ticks(delta).expect("fits");
        assert_eq!(ticks, -15_000_003);
        assert_eq!(ticks_to_delta(ticks), Some(delta));
    }

    #[test]
    fn instants_before_year_one_are_value_errors() {
        let early = epoch() - TimeDelta::seconds(1);
        assert!(matches!(
            instant_to_ticks(early),
            Err(Error::Value { .. })
        ));
    }
}
