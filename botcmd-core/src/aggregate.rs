//! Fold 3-hourly samples into per-day summaries in the location's local time.

use chrono::{DateTime, FixedOffset, NaiveDate};

use crate::{
    error::{CommandError, Result},
    forecast::ForecastSample,
};

const SKY_SEPARATOR: &str = " - ";

/// Summary of all samples falling on one local calendar day.
#[derive(Debug, Clone, PartialEq)]
pub struct DayBucket {
    pub date: NaiveDate,
    /// Full English weekday name, e.g. "Thursday".
    pub weekday: String,
    pub temp_min_kelvin: f64,
    pub temp_max_kelvin: f64,
    pub sky: String,
}

impl DayBucket {
    fn open(date: NaiveDate) -> Self {
        Self {
            date,
            weekday: date.format("%A").to_string(),
            temp_min_kelvin: f64::INFINITY,
            temp_max_kelvin: 0.0,
            sky: String::new(),
        }
    }

    fn fold(&mut self, sample: &ForecastSample) {
        self.temp_min_kelvin = self.temp_min_kelvin.min(sample.temp_min_kelvin);
        self.temp_max_kelvin = self.temp_max_kelvin.max(sample.temp_max_kelvin);
        self.merge_sky(&sample.sky);
    }

    /// Append `description` unless the accumulated text already ends with it.
    fn merge_sky(&mut self, description: &str) {
        if self.sky.ends_with(description) {
            return;
        }
        if !self.sky.is_empty() {
            self.sky.push_str(SKY_SEPARATOR);
        }
        self.sky.push_str(description);
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Forecast {
    /// The first raw sample, unaggregated.
    pub current: ForecastSample,
    /// One bucket per day from tomorrow on, in calendar order. The last day
    /// of the fetched horizon is never included.
    pub following_days: Vec<DayBucket>,
    pub location_label: String,
}

/// Group `samples` (ascending by time) into a [`Forecast`] relative to `now`.
///
/// Samples still on today's local date are skipped. Each sample whose local
/// date is the next expected day opens a new bucket; every other sample folds
/// into the latest open bucket. A horizon with no sample on tomorrow's date
/// never opens a bucket. The final bucket is dropped because the provider's
/// horizon almost always ends part way through a day.
pub fn aggregate(
    location_label: impl Into<String>,
    now: DateTime<FixedOffset>,
    samples: &[ForecastSample],
) -> Result<Forecast> {
    let current = samples
        .first()
        .cloned()
        .ok_or_else(|| CommandError::ForecastFetch("forecast contained no samples".to_string()))?;

    let offset = *now.offset();
    let mut next_day = following(now.date_naive())?;
    let mut following_days: Vec<DayBucket> = Vec::new();

    for sample in samples {
        let day = local_date(sample.timestamp, offset)?;

        if following_days.is_empty() && day < next_day {
            continue;
        }

        if day == next_day {
            following_days.push(DayBucket::open(day));
            next_day = following(next_day)?;
        }

        // No bucket yet means the horizon skipped tomorrow entirely.
        let Some(bucket) = following_days.last_mut() else {
            continue;
        };
        bucket.fold(sample);
    }

    following_days.pop();

    Ok(Forecast { current, following_days, location_label: location_label.into() })
}

fn local_date(timestamp: i64, offset: FixedOffset) -> Result<NaiveDate> {
    DateTime::from_timestamp(timestamp, 0)
        .map(|utc| utc.with_timezone(&offset).date_naive())
        .ok_or_else(|| {
            CommandError::MalformedUpstreamPayload(format!("timestamp {timestamp} is out of range"))
        })
}

fn following(date: NaiveDate) -> Result<NaiveDate> {
    date.succ_opt().ok_or_else(|| {
        CommandError::MalformedUpstreamPayload(format!("no calendar day after {date}"))
    })
}
