//! SenML readings and the energy leaderboard.
//!
//! Energy meters report total-energy-to-date in joules, so a day's
//! consumption is the difference between the first and last hourly rollup;
//! what happens in between does not matter.

use chrono::{DateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::crawl::Fetch;
use crate::error::Result;

const SECONDS_PER_DAY: i64 = 86_400;
const SECONDS_PER_HOUR: i64 = 3_600;
pub const JOULES_PER_KWH: f64 = 3_600_000.0;

/// A SenML pack: a list of timestamped entries.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SenmlPack {
    #[serde(default)]
    pub e: Vec<SenmlEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SenmlEntry {
    /// Epoch seconds
    #[serde(default)]
    pub t: Option<f64>,
    #[serde(default)]
    pub v: Option<f64>,
}

/// Value of the first entry stamped exactly `t` (epoch seconds).
pub fn value_at_time(pack: &SenmlPack, t: i64) -> Option<f64> {
    pack.e
        .iter()
        .find(|entry| entry.t.map(|et| et.round() as i64) == Some(t))
        .and_then(|entry| entry.v)
}

/// Half-open range of epoch seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayWindow {
    pub start: i64,
    pub end: i64,
}

/// The last whole UTC day before `now`.
pub fn previous_day(now: DateTime<Utc>) -> DayWindow {
    let today = now.date_naive().and_time(NaiveTime::MIN).and_utc().timestamp();
    let start = today - SECONDS_PER_DAY;
    DayWindow {
        start,
        end: start + SECONDS_PER_DAY,
    }
}

/// OpenIoT query for hourly averages over `window`.
pub fn series_url(href: &str, window: DayWindow) -> String {
    format!(
        "{href}?start={}&end={}&interval=1h&rollup=avg",
        window.start, window.end
    )
}

/// Energy used over `window` in kWh, from hourly total-to-date values.
pub fn energy_kwh(pack: &SenmlPack, window: DayWindow) -> Option<f64> {
    let first = value_at_time(pack, window.start)?;
    let last = value_at_time(pack, window.end - SECONDS_PER_HOUR)?;
    Some((last - first) / JOULES_PER_KWH)
}

/// One meter's consumption. `kwh` is `None` when the series could not be
/// fetched or lacked the needed samples.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Reading {
    pub href: String,
    pub kwh: Option<f64>,
}

pub fn energy_series<F: Fetch + ?Sized>(fetcher: &F, href: &str, window: DayWindow) -> Reading {
    let kwh = match fetch_pack(fetcher, &series_url(href, window)) {
        Ok(pack) => energy_kwh(&pack, window),
        Err(e) => {
            warn!(href, error = %e, "could not read energy series");
            None
        }
    };
    Reading {
        href: href.to_string(),
        kwh,
    }
}

fn fetch_pack<F: Fetch + ?Sized>(fetcher: &F, url: &str) -> Result<SenmlPack> {
    Ok(serde_json::from_str(&fetcher.fetch_text(url)?)?)
}

/// A ranked leaderboard row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Standing {
    pub href: String,
    /// kWh to two decimal places
    pub kwh: String,
}

/// Rank readings highest first, dropping missing and zero values.
pub fn leaderboard(readings: Vec<Reading>) -> Vec<Standing> {
    let mut valid: Vec<(String, f64)> = readings
        .into_iter()
        .filter_map(|r| match r.kwh {
            Some(kwh) if kwh != 0.0 => Some((r.href, kwh)),
            _ => None,
        })
        .collect();
    valid.sort_by(|a, b| b.1.total_cmp(&a.1));
    valid
        .into_iter()
        .map(|(href, kwh)| Standing {
            href,
            kwh: format!("{kwh:.2}"),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MemoryFetcher;
    use chrono::TimeZone;

    fn window() -> DayWindow {
        previous_day(Utc.with_ymd_and_hms(2014, 3, 2, 15, 30, 12).unwrap())
    }

    fn pack(entries: &[(i64, f64)]) -> SenmlPack {
        SenmlPack {
            e: entries
                .iter()
                .map(|(t, v)| SenmlEntry {
                    t: Some(*t as f64),
                    v: Some(*v),
                })
                .collect(),
        }
    }

    #[test]
    fn test_previous_day() {
        let w = window();
        let expected = Utc.with_ymd_and_hms(2014, 3, 1, 0, 0, 0).unwrap().timestamp();
        assert_eq!(w.start, expected);
        assert_eq!(w.end - w.start, SECONDS_PER_DAY);
    }

    #[test]
    fn test_previous_day_at_midnight() {
        let w = previous_day(Utc.with_ymd_and_hms(2014, 3, 2, 0, 0, 0).unwrap());
        let expected = Utc.with_ymd_and_hms(2014, 3, 1, 0, 0, 0).unwrap().timestamp();
        assert_eq!(w.start, expected);
    }

    #[test]
    fn test_value_at_time() {
        let p = pack(&[(10, 1.0), (20, 2.0)]);
        assert_eq!(value_at_time(&p, 20), Some(2.0));
        assert_eq!(value_at_time(&p, 30), None);
    }

    #[test]
    fn test_senml_deserialize_with_float_times() {
        let p: SenmlPack = serde_json::from_str(r#"{"e":[{"t":100.0,"v":5},{"t":200}]}"#).unwrap();
        assert_eq!(value_at_time(&p, 100), Some(5.0));
        assert_eq!(value_at_time(&p, 200), None);
    }

    #[test]
    fn test_energy_kwh() {
        let w = window();
        let p = pack(&[
            (w.start, 1_000_000.0),
            (w.start + 3600, 2_000_000.0),
            (w.end - 3600, 8_200_000.0),
        ]);
        let kwh = energy_kwh(&p, w).unwrap();
        assert!((kwh - 2.0).abs() < 1e-9);
        assert_eq!(energy_kwh(&pack(&[(w.start, 1.0)]), w), None);
    }

    #[test]
    fn test_series_url() {
        let w = DayWindow { start: 100, end: 200 };
        assert_eq!(
            series_url("http://h/meter", w),
            "http://h/meter?start=100&end=200&interval=1h&rollup=avg"
        );
    }

    #[test]
    fn test_energy_series_fetches_window() {
        let w = window();
        let body = serde_json::to_string(&pack(&[(w.start, 0.0), (w.end - 3600, 7_200_000.0)])).unwrap();
        let fetcher = MemoryFetcher::default().with(&series_url("http://h/m", w), body);
        let reading = energy_series(&fetcher, "http://h/m", w);
        assert_eq!(reading.href, "http://h/m");
        assert_eq!(reading.kwh, Some(2.0));
    }

    #[test]
    fn test_energy_series_failure_is_none() {
        let fetcher = MemoryFetcher::default();
        let reading = energy_series(&fetcher, "http://h/missing", window());
        assert_eq!(reading.kwh, None);
    }

    #[test]
    fn test_leaderboard_ranks_and_filters() {
        let readings = vec![
            Reading { href: "a".into(), kwh: Some(1.234) },
            Reading { href: "b".into(), kwh: None },
            Reading { href: "c".into(), kwh: Some(9.0) },
            Reading { href: "d".into(), kwh: Some(0.0) },
        ];
        let board = leaderboard(readings);
        assert_eq!(
            board,
            vec![
                Standing { href: "c".into(), kwh: "9.00".into() },
                Standing { href: "a".into(), kwh: "1.23".into() },
            ]
        );
    }
}
