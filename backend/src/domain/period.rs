//! Analytics period resolution.
//!
//! A symbolic period tag ("24h", "week", ...) resolves to a concrete date
//! range, a bucketing granularity, and a label style. Resolution never
//! fails: unrecognized tags fall back to a caller-supplied default, which
//! keeps the analytics endpoints total over arbitrary input.

use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc, Weekday};

/// Symbolic analytics window selected by the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PeriodTag {
    Last24Hours,
    Week,
    Month,
    ThreeMonths,
    SixMonths,
    Year,
}

/// Bucket width used to group transactions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Granularity {
    Hour,
    Day,
    IsoWeek,
    Month,
}

/// How a bucket key is rendered for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelStyle {
    /// "14:00"
    HourOfDay,
    /// "Mon 06/08"
    WeekdayDate,
    /// "06/08"
    MonthDay,
    /// "Week 06/08" (the Monday opening the ISO week)
    WeekOfMonday,
    /// "Jun 2026"
    MonthYear,
}

/// A fully resolved analytics window.
#[derive(Debug, Clone, Copy)]
pub struct ResolvedPeriod {
    pub tag: PeriodTag,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub granularity: Granularity,
    pub label_style: LabelStyle,
}

impl PeriodTag {
    /// Parse a raw tag, falling back to `default` on anything unrecognized.
    /// Never an error: analytics degrade instead of failing.
    pub fn parse_or(raw: &str, default: PeriodTag) -> PeriodTag {
        match raw {
            "24h" => PeriodTag::Last24Hours,
            "week" => PeriodTag::Week,
            "month" => PeriodTag::Month,
            "3months" => PeriodTag::ThreeMonths,
            "6months" => PeriodTag::SixMonths,
            "year" => PeriodTag::Year,
            _ => default,
        }
    }

    /// Resolve to a rolling window ending at `now`. Used by the trend
    /// endpoint, where "month" means the last 30 days.
    pub fn resolve(self, now: DateTime<Utc>) -> ResolvedPeriod {
        let (start, granularity, label_style) = match self {
            PeriodTag::Last24Hours => (
                now - Duration::hours(24),
                Granularity::Hour,
                LabelStyle::HourOfDay,
            ),
            PeriodTag::Week => (
                now - Duration::days(7),
                Granularity::Day,
                LabelStyle::WeekdayDate,
            ),
            PeriodTag::Month => (
                now - Duration::days(30),
                Granularity::Day,
                LabelStyle::MonthDay,
            ),
            PeriodTag::ThreeMonths => (
                now - Duration::days(90),
                Granularity::IsoWeek,
                LabelStyle::WeekOfMonday,
            ),
            PeriodTag::SixMonths => (
                now - Duration::days(180),
                Granularity::Month,
                LabelStyle::MonthYear,
            ),
            PeriodTag::Year => (
                now - Duration::days(365),
                Granularity::Month,
                LabelStyle::MonthYear,
            ),
        };

        ResolvedPeriod {
            tag: self,
            start,
            end: now,
            granularity,
            label_style,
        }
    }

    /// Resolve for the dashboard summary, where "month" anchors to the
    /// first instant of the current calendar month instead of a rolling
    /// 30 days. Every other tag resolves exactly as [`resolve`].
    ///
    /// [`resolve`]: PeriodTag::resolve
    pub fn resolve_calendar_anchored(self, now: DateTime<Utc>) -> ResolvedPeriod {
        let mut resolved = self.resolve(now);
        if self == PeriodTag::Month {
            resolved.start = month_start(now);
        }
        resolved
    }

    /// Render the dashboard's period heading for a window starting at
    /// `start`.
    pub fn summary_label(self, start: DateTime<Utc>) -> String {
        match self {
            PeriodTag::Last24Hours => "Last 24 Hours".to_string(),
            PeriodTag::Week => "Last 7 Days".to_string(),
            PeriodTag::Month => start.format("%B %Y").to_string(),
            PeriodTag::ThreeMonths => {
                format!("Last 3 Months (from {})", start.format("%B %d, %Y"))
            }
            PeriodTag::SixMonths => {
                format!("Last 6 Months (from {})", start.format("%B %d, %Y"))
            }
            PeriodTag::Year => format!("Last Year (from {})", start.format("%B %d, %Y")),
        }
    }
}

/// First instant of `now`'s calendar month.
fn month_start(now: DateTime<Utc>) -> DateTime<Utc> {
    let first = now
        .date_naive()
        .with_day(1)
        .unwrap_or_else(|| now.date_naive());
    match first.and_hms_opt(0, 0, 0) {
        Some(start) => start.and_utc(),
        None => now,
    }
}

impl Granularity {
    /// Derive the bucket key for a timestamp.
    ///
    /// Every component is zero-padded to fixed width, so keys sort
    /// lexicographically in chronological order. The aggregator relies on
    /// this.
    pub fn bucket_key(self, ts: DateTime<Utc>) -> String {
        match self {
            Granularity::Hour => ts.format("%Y-%m-%d-%H").to_string(),
            Granularity::Day => ts.format("%Y-%m-%d").to_string(),
            // ISO year-week: %G differs from %Y around New Year on purpose.
            Granularity::IsoWeek => ts.format("%G-W%V").to_string(),
            Granularity::Month => ts.format("%Y-%m").to_string(),
        }
    }
}

impl LabelStyle {
    /// Render a bucket key for display. Pure and deterministic; a key this
    /// style cannot interpret renders as itself.
    pub fn render(self, key: &str) -> String {
        match self {
            LabelStyle::HourOfDay => match key.rsplit_once('-') {
                Some((_, hour)) => format!("{hour}:00"),
                None => key.to_string(),
            },
            LabelStyle::WeekdayDate => match NaiveDate::parse_from_str(key, "%Y-%m-%d") {
                Ok(date) => date.format("%a %m/%d").to_string(),
                Err(_) => key.to_string(),
            },
            LabelStyle::MonthDay => match NaiveDate::parse_from_str(key, "%Y-%m-%d") {
                Ok(date) => date.format("%m/%d").to_string(),
                Err(_) => key.to_string(),
            },
            LabelStyle::WeekOfMonday => match iso_week_monday(key) {
                Some(monday) => format!("Week {}", monday.format("%m/%d")),
                None => key.to_string(),
            },
            LabelStyle::MonthYear => {
                match NaiveDate::parse_from_str(&format!("{key}-01"), "%Y-%m-%d") {
                    Ok(date) => date.format("%b %Y").to_string(),
                    Err(_) => key.to_string(),
                }
            }
        }
    }
}

/// Monday of the ISO week named by a "GGGG-WVV" key.
fn iso_week_monday(key: &str) -> Option<NaiveDate> {
    let (year, week) = key.split_once("-W")?;
    let year: i32 = year.parse().ok()?;
    let week: u32 = week.parse().ok()?;
    NaiveDate::from_isoywd_opt(year, week, Weekday::Mon)
}
