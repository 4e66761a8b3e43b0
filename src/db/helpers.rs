use chrono::{Datelike, NaiveDate};

pub const DATE_FMT : &str = "%Y-%m-%d";

// helper function to compute number of days in a given month
pub fn days_in_month(year : i32, month : u32) -> u32
{
    chrono::NaiveDate::from_ymd_opt(year, month + 1, 1)
        .unwrap_or(chrono::NaiveDate::from_ymd_opt(year + 1, 1, 1).unwrap())
        .pred_opt().unwrap().day()
}

// helper function to render a date the way the betting_log table stores it
pub fn datestr(date : NaiveDate) -> String
{
    date.format(DATE_FMT).to_string()
}

// helper function to parse a stored / user entered date string
pub fn parse_date(s : &str) -> Option<NaiveDate>
{
    NaiveDate::parse_from_str(s.trim(), DATE_FMT).ok()
}

/// first and last day of the month `day` falls into, as stored date strings;
/// default range of the search prompt
pub fn month_bounds(day : NaiveDate) -> (String, String)
{
    let first = day.with_day(1).unwrap_or(day);
    let last  = day
        .with_day(days_in_month(day.year(), day.month()))
        .unwrap_or(day);

    (datestr(first), datestr(last))
}
