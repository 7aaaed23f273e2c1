//! Locale-aware date formatting in a given zone.
//!
//! Field order, month names, clock style and separators come from the
//! locale's CLDR date and time lengths. Zoned variants append the zone
//! abbreviation after the localized text.

use chrono::{DateTime, Datelike, Locale, NaiveDate, Timelike, Utc};
use chrono_tz::Tz;
use icu::calendar::{Date, DateTime as CalendarDateTime, Gregorian};
use icu::datetime::options::length;
use icu::datetime::{TypedDateFormatter, TypedDateTimeFormatter};
use icu::locid::Locale as IcuLocale;

/// Which localized lengths to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateStyle {
    /// Long date: `January 5, 2024`, `2024年1月5日`.
    LongDate,
    /// Long date and medium time, then the zone: `January 5, 2024 ... 8:30:00 PM EST`.
    LongDateTime,
    /// Medium date and short time, then the zone: `Jan 5, 2024, 8:30 PM UTC`.
    ShortTimestamp,
    /// Medium date: `Jan 5, 2024`.
    ShortDate,
}

/// CLDR locale for a `chrono` locale name such as `en_US` or `sr_RS@latin`.
fn cldr_locale(locale: Locale) -> IcuLocale {
    let name = locale.to_string();
    if name == "POSIX" {
        return icu::locid::locale!("en");
    }
    let tag = name.split('@').next().unwrap_or_default().replace('_', "-");
    tag.parse().unwrap_or(IcuLocale::UND)
}

pub fn format_in_zone(
    instant: DateTime<Utc>,
    zone: Tz,
    style: DateStyle,
    locale: Locale,
) -> String {
    let local = instant.with_timezone(&zone);
    let localized = match style {
        DateStyle::LongDate => localized_date(local.date_naive(), length::Date::Long, locale),
        DateStyle::ShortDate => localized_date(local.date_naive(), length::Date::Medium, locale),
        DateStyle::LongDateTime => {
            localized_date_time(&local, length::Date::Long, length::Time::Medium, locale)
                .map(|text| format!("{text} {}", local.format("%Z")))
        }
        DateStyle::ShortTimestamp => {
            localized_date_time(&local, length::Date::Medium, length::Time::Short, locale)
                .map(|text| format!("{text} {}", local.format("%Z")))
        }
    };

    localized.unwrap_or_else(|e| {
        tracing::warn!(error = %e, %locale, ?style, "Localized formatting failed");
        local.format("%Y-%m-%d %H:%M:%S %Z").to_string()
    })
}

pub fn format_date(date: NaiveDate, style: DateStyle, locale: Locale) -> String {
    let length = match style {
        DateStyle::LongDate | DateStyle::LongDateTime => length::Date::Long,
        DateStyle::ShortDate | DateStyle::ShortTimestamp => length::Date::Medium,
    };
    localized_date(date, length, locale).unwrap_or_else(|e| {
        tracing::warn!(error = %e, %locale, ?style, "Localized formatting failed");
        date.format("%Y-%m-%d").to_string()
    })
}

fn localized_date(date: NaiveDate, length: length::Date, locale: Locale) -> Result<String, String> {
    let value = gregorian_date(date)?;
    let data_locale = (&cldr_locale(locale)).into();
    let formatter = TypedDateFormatter::<Gregorian>::try_new_with_length(&data_locale, length)
        .map_err(|e| format!("{e:?}"))?;
    Ok(formatter.format_to_string(&value))
}

fn localized_date_time(
    local: &DateTime<Tz>,
    date_length: length::Date,
    time_length: length::Time,
    locale: Locale,
) -> Result<String, String> {
    let value = CalendarDateTime::try_new_gregorian_datetime(
        local.year(),
        local.month() as u8,
        local.day() as u8,
        local.hour() as u8,
        local.minute() as u8,
        local.second() as u8,
    )
    .map_err(|e| format!("{e:?}"))?;
    let options = length::Bag::from_date_time_style(date_length, time_length);
    let data_locale = (&cldr_locale(locale)).into();
    let formatter = TypedDateTimeFormatter::<Gregorian>::try_new(&data_locale, options.into())
        .map_err(|e| format!("{e:?}"))?;
    Ok(formatter.format_to_string(&value))
}

fn gregorian_date(date: NaiveDate) -> Result<Date<Gregorian>, String> {
    Date::try_new_gregorian_date(date.year(), date.month() as u8, date.day() as u8)
        .map_err(|e| format!("{e:?}"))
}
