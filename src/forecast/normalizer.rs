//! Turns a decoded [`RawForecast`] into day buckets with human readable labels.

use crate::forecast::decoder::{RawForecast, TimeseriesEntry, Units};
use crate::types::language::Language;
use crate::types::lat_lon::LatLon;
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use std::collections::BTreeMap;

/// The normalized forecast handed to renderers.
///
/// Days ascend by date and, read in order, their entries reproduce the provider's
/// timeseries exactly.
#[derive(Debug, Clone, PartialEq)]
pub struct Forecast {
    pub updated_at: DateTime<Utc>,
    /// Position the provider reports for the forecast, `None` if the geometry was malformed.
    pub coordinates: Option<LatLon>,
    pub altitude: Option<f64>,
    pub days: Vec<Day>,
}

impl Forecast {
    /// Iterates over every entry of every day, in order.
    pub fn hours(&self) -> impl Iterator<Item = &TimeseriesEntry> {
        self.days.iter().flat_map(|day| day.entries.iter())
    }

    pub fn day(&self, date: NaiveDate) -> Option<&Day> {
        self.days.iter().find(|day| day.date == date)
    }
}

/// All entries falling on one local calendar date.
#[derive(Debug, Clone, PartialEq)]
pub struct Day {
    pub date: NaiveDate,
    /// "Today", "Tomorrow" or a short date such as "Sat, 17 Oct".
    pub label: String,
    pub entries: Vec<TimeseriesEntry>,
    pub units: Units,
}

impl Day {
    /// Lowest and highest instant air temperature of the day.
    pub fn temperature_range(&self) -> Option<(f64, f64)> {
        self.entries
            .iter()
            .map(|entry| entry.instant().air_temperature)
            .fold(None, |range, t| match range {
                None => Some((t, t)),
                Some((lo, hi)) => Some((lo.min(t), hi.max(t))),
            })
    }
}

/// Groups the timeseries of `raw` by calendar date in `now`'s time zone and labels
/// each day relative to `now`.
///
/// Never fails: entries without summary windows simply have no symbol or
/// precipitation.
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use vaderappen::{decode, normalize, Language};
///
/// let body = std::fs::read(concat!(env!("CARGO_MANIFEST_DIR"), "/data/locationforecast_sample.json")).unwrap();
/// let raw = decode(&body).unwrap();
/// let now = Utc.with_ymd_and_hms(2026, 10, 15, 17, 30, 0).unwrap();
/// let forecast = normalize(raw, &now, Language::English);
/// assert_eq!(forecast.days[0].label, "Today");
/// ```
pub fn normalize<Tz: TimeZone>(raw: RawForecast, now: &DateTime<Tz>, language: Language) -> Forecast {
    let tz = now.timezone();
    let today = now.date_naive();
    let coordinates = raw.geometry.lat_lon();
    let altitude = raw.geometry.altitude();
    let units = raw.properties.meta.units;

    let mut buckets: BTreeMap<NaiveDate, Vec<TimeseriesEntry>> = BTreeMap::new();
    for entry in raw.properties.timeseries {
        let date = entry.local_time(&tz).date_naive();
        buckets.entry(date).or_default().push(entry);
    }

    let days = buckets
        .into_iter()
        .map(|(date, entries)| Day {
            date,
            label: day_label(date, today, language),
            entries,
            units: units.clone(),
        })
        .collect();

    Forecast {
        updated_at: raw.properties.meta.updated_at,
        coordinates,
        altitude,
        days,
    }
}

/// Label for `date` as seen on `today`.
pub fn day_label(date: NaiveDate, today: NaiveDate, language: Language) -> String {
    if date == today {
        language.today().to_string()
    } else if today.succ_opt() == Some(date) {
        language.tomorrow().to_string()
    } else {
        language.short_date(date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forecast::decoder::decode;
    use crate::forecast::decoder::tests::{entry, SAMPLE};
    use crate::types::precipitation::Precipitation;
    use crate::types::weather_symbol::Condition;
    use chrono::FixedOffset;
    use serde_json::json;
    use std::collections::BTreeSet;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample() -> RawForecast {
        decode(SAMPLE.as_bytes()).unwrap()
    }

    #[test]
    fn test_day_labels() {
        let today = date(2026, 10, 15);
        assert_eq!(day_label(today, today, Language::English), "Today");
        assert_eq!(day_label(date(2026, 10, 16), today, Language::English), "Tomorrow");
        assert_eq!(day_label(date(2026, 10, 17), today, Language::English), "Sat, 17 Oct");
        assert_eq!(day_label(date(2026, 10, 16), today, Language::Swedish), "Imorgon");
    }

    #[test]
    fn test_tomorrow_across_year_boundary() {
        let label = day_label(date(2027, 1, 1), date(2026, 12, 31), Language::English);
        assert_eq!(label, "Tomorrow");
    }

    #[test]
    fn test_same_weekday_a_week_later_is_not_today() {
        let label = day_label(date(2026, 10, 22), date(2026, 10, 15), Language::English);
        assert_eq!(label, "Thu, 22 Oct");
    }

    #[test]
    fn test_sample_round_trip_in_utc() {
        let raw = sample();
        let original: Vec<TimeseriesEntry> = raw.timeseries().to_vec();
        let distinct: BTreeSet<NaiveDate> =
            original.iter().map(|e| e.time.with_timezone(&Utc).date_naive()).collect();

        let now = Utc.with_ymd_and_hms(2026, 10, 15, 17, 30, 0).unwrap();
        let forecast = normalize(raw, &now, Language::English);

        assert_eq!(forecast.days.len(), distinct.len());
        assert_eq!(forecast.days.len(), 4);
        let dates: Vec<NaiveDate> = forecast.days.iter().map(|d| d.date).collect();
        assert_eq!(dates, distinct.into_iter().collect::<Vec<_>>());

        let flattened: Vec<TimeseriesEntry> = forecast.hours().cloned().collect();
        assert_eq!(flattened, original);

        let labels: Vec<&str> = forecast.days.iter().map(|d| d.label.as_str()).collect();
        assert_eq!(labels, ["Today", "Tomorrow", "Sat, 17 Oct", "Sun, 18 Oct"]);
        assert_eq!(forecast.coordinates, Some(LatLon(59.3293, 18.0686)));
        assert_eq!(forecast.days[0].units.air_temperature, "celsius");
    }

    #[test]
    fn test_grouping_follows_now_time_zone() {
        let stockholm = FixedOffset::east_opt(2 * 3600).unwrap();
        let now = stockholm.with_ymd_and_hms(2026, 10, 15, 19, 30, 0).unwrap();
        let forecast = normalize(sample(), &now, Language::English);

        let sizes: Vec<usize> = forecast.days.iter().map(|d| d.entries.len()).collect();
        // 23:00Z on the 15th is already 01:00 on the 16th in UTC+2.
        assert_eq!(sizes, [2, 4, 1, 1]);
        assert_eq!(forecast.days[1].label, "Tomorrow");
    }

    #[test]
    fn test_symbol_and_precipitation_per_entry() {
        let now = Utc.with_ymd_and_hms(2026, 10, 15, 17, 30, 0).unwrap();
        let forecast = normalize(sample(), &now, Language::English);
        let hours: Vec<&TimeseriesEntry> = forecast.hours().collect();

        assert_eq!(hours[0].symbol().map(|s| s.condition), Some(Condition::Cloudy));
        assert!(hours[0].precipitation().is_absent());
        assert_eq!(hours[1].precipitation().to_string(), "0.5–2.0 (30%)");
        // 06:00Z on the 16th only has 6h and 12h windows.
        assert_eq!(hours[4].symbol().map(|s| s.code()), Some("clearsky_day".to_string()));
        assert_eq!(
            hours[5].precipitation(),
            Precipitation::Amount {
                amount: 2.4,
                probability: Some(71.0)
            }
        );
        assert_eq!(hours[7].symbol(), None);
    }

    #[test]
    fn test_unsorted_days_come_out_ascending() {
        let mut raw = sample();
        raw.properties.timeseries = vec![
            entry("2026-10-20T12:00:00Z", json!({})),
            entry("2026-10-18T12:00:00Z", json!({})),
            entry("2026-10-20T13:00:00Z", json!({})),
        ];
        let now = Utc.with_ymd_and_hms(2026, 10, 18, 8, 0, 0).unwrap();
        let forecast = normalize(raw, &now, Language::English);

        assert_eq!(forecast.days.len(), 2);
        assert_eq!(forecast.days[0].date, date(2026, 10, 18));
        assert_eq!(forecast.days[1].entries.len(), 2);
        assert_eq!(forecast.days[1].entries[0].time.to_rfc3339(), "2026-10-20T12:00:00+00:00");
    }

    #[test]
    fn test_empty_timeseries_gives_no_days() {
        let mut raw = sample();
        raw.properties.timeseries.clear();
        let now = Utc.with_ymd_and_hms(2026, 10, 15, 17, 30, 0).unwrap();
        let forecast = normalize(raw, &now, Language::English);
        assert!(forecast.days.is_empty());
        assert_eq!(forecast.hours().count(), 0);
    }

    #[test]
    fn test_temperature_range() {
        let now = Utc.with_ymd_and_hms(2026, 10, 15, 17, 30, 0).unwrap();
        let forecast = normalize(sample(), &now, Language::English);
        assert_eq!(forecast.days[0].temperature_range(), Some((8.6, 9.8)));
        assert_eq!(forecast.day(date(2026, 10, 18)).map(|d| d.entries.len()), Some(1));
    }
}
