use std::ops::Index;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use lazy_static::lazy_static;
use regex::Regex;

fn to_int<T: std::str::FromStr>(num_str: &str, date_str: &str) -> Result<T, String> {
    match num_str.parse::<T>() {
        Ok(x) => Ok(x),
        Err(_) => Err(format!("Error parsing {} from the date {}", num_str, date_str)),
    }
}

/// Accepts `2024-01-15` as well as `2024-01-15 10:42:32[.123]`.
/// A date without time is placed at midnight.
pub fn parse_date_time(buf: &str) -> Result<NaiveDateTime, String> {
    lazy_static! {
        static ref DATE_REGEX: Regex = Regex::new(
            r#"^(\d{4})-(\d{1,2})-(\d{1,2})(?: (\d{1,2}):(\d{1,2}):(\d{1,2})(\.\d{0,3})?)?$"#
        ).unwrap();
    }

    let buf = buf.trim();
    let Some(caps) = DATE_REGEX.captures(buf) else {
        return Err(format!("Unable to parse date time {}", buf));
    };

    let to_i32 = |num_str: &str| to_int::<i32>(num_str, buf);
    let to_u32 = |num_str: &str| to_int::<u32>(num_str, buf);

    let y: i32 = to_i32(caps.index(1))?;
    let m: u32 = to_u32(caps.index(2))?;
    let d: u32 = to_u32(caps.index(3))?;
    let (h, mn, s) = match (caps.get(4), caps.get(5), caps.get(6)) {
        (Some(h), Some(mn), Some(s)) => (to_u32(h.as_str())?, to_u32(mn.as_str())?, to_u32(s.as_str())?),
        _ => (0, 0, 0),
    };

    let date = NaiveDate::from_ymd_opt(y, m, d)
        .ok_or_else(|| format!("Invalid date {}", buf))?;
    let time = NaiveTime::from_hms_opt(h, mn, s)
        .ok_or_else(|| format!("Invalid time {}", buf))?;

    Ok(NaiveDateTime::new(date, time))
}

/// Long form used on cards and article headers, e.g. `January 15, 2024`.
pub fn format_long_date(date_time: &NaiveDateTime) -> String {
    date_time.format("%B %-d, %Y").to_string()
}

/// Lower-cases the text, collapses every run of characters outside `[a-z0-9]`
/// into one `-` and trims leading and trailing hyphens.
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_hyphen = false;
    for c in text.chars().flat_map(char::to_lowercase) {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(c);
        } else {
            pending_hyphen = true;
        }
    }
    slug
}
