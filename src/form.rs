//! registration form: raw user input and the checks it has to pass before
//! anything is handed to the store

use std::sync::OnceLock;

use chrono::NaiveDate;
use regex::Regex;
use thiserror::Error;

use crate::db::helpers::{datestr, parse_date};
use crate::db::NewRecord;
use crate::master::{self, Table, NO_SELECTION_ID};

pub const AMOUNT_UNIT : u32 = 100;
pub const MEMO_MAX_CHARS : usize = 400;

/// why a form was rejected; Display is what the user gets to read
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Required fields missing (date, race course, race, stake, payout)")]
    MissingRequired,
    #[error("Date must be a valid YYYY-MM-DD date")]
    InvalidDate,
    #[error("Stake must be entered in units of 100 yen")]
    InvalidStake,
    #[error("Payout must be entered in units of 100 yen")]
    InvalidPayout,
    #[error("Memo must be 400 characters or fewer")]
    MemoTooLong,
    #[error("Memo contains invalid symbols (--, ;)")]
    MemoForbiddenPattern,
    #[error("Unknown {field} code {code}")]
    UnknownCode { field: &'static str, code: u32 },
}

/// contents of the registration form; selectors hold master data codes,
/// amounts are kept as typed so they can be checked
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordForm {
    pub date: String,
    pub race_course: u32,
    pub race_number: u32,
    pub surface: u32,
    pub distance: u32,
    pub field_size: u32,
    pub class: u32,
    pub bet_type: u32,
    pub stake: String,
    pub payout: String,
    pub memo: String,
}

impl RecordForm {
    /// blank form dated `day`
    pub fn new(day: NaiveDate) -> Self {
        Self {
            date: datestr(day),
            ..Default::default()
        }
    }

    /// form prefilled from an existing record, for entering a similar bet
    pub fn from_record(record: &NewRecord) -> Self {
        Self {
            date: record.date.clone(),
            race_course: record.race_course,
            race_number: record.race_number,
            surface: record.surface,
            distance: record.distance,
            field_size: record.field_size,
            class: record.class,
            bet_type: record.bet_type,
            stake: record.stake.to_string(),
            payout: record.payout.to_string(),
            memo: record.memo.clone(),
        }
    }

    /// clear everything but the date, done after a successful save
    pub fn reset(&mut self) {
        *self = Self {
            date: std::mem::take(&mut self.date),
            ..Default::default()
        };
    }

    pub fn validate(&self) -> Result<NewRecord, ValidationError> {
        let stake = self.stake.trim();
        let payout = self.payout.trim();

        if self.date.trim().is_empty()
            || self.race_course == NO_SELECTION_ID
            || self.race_number == NO_SELECTION_ID
            || stake.is_empty()
            || payout.is_empty()
        {
            return Err(ValidationError::MissingRequired);
        }

        // must round trip exactly, unpadded dates would break range search
        let date = parse_date(&self.date)
            .map(datestr)
            .filter(|d| d == self.date.trim())
            .ok_or(ValidationError::InvalidDate)?;

        let stake = match stake.parse::<u32>() {
            Ok(v) if v > 0 && v % AMOUNT_UNIT == 0 => v,
            _ => return Err(ValidationError::InvalidStake),
        };

        let payout = match payout.parse::<u32>() {
            Ok(v) if v % AMOUNT_UNIT == 0 => v,
            _ => return Err(ValidationError::InvalidPayout),
        };

        validate_memo(&self.memo)?;

        let fields : [(&'static str, Table, u32); 7] = [
            ("race course", master::RACE_COURSES, self.race_course),
            ("race number", master::RACE_NUMBERS, self.race_number),
            ("surface", master::SURFACES, self.surface),
            ("distance", master::DISTANCES, self.distance),
            ("field size", master::FIELD_SIZES, self.field_size),
            ("class", master::RACE_CLASSES, self.class),
            ("bet type", master::BET_TYPES, self.bet_type),
        ];

        for (field, table, code) in fields {
            if !master::contains(table, code) {
                return Err(ValidationError::UnknownCode { field, code });
            }
        }

        Ok(NewRecord {
            date,
            race_course: self.race_course,
            race_number: self.race_number,
            surface: self.surface,
            distance: self.distance,
            field_size: self.field_size,
            class: self.class,
            bet_type: self.bet_type,
            stake,
            payout,
            memo: self.memo.clone(),
        })
    }
}

fn forbidden_memo_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(--|;)").expect("static regex"))
}

/// length is counted in characters, not bytes
pub fn validate_memo(memo: &str) -> Result<(), ValidationError> {
    if memo.chars().count() > MEMO_MAX_CHARS {
        return Err(ValidationError::MemoTooLong);
    }
    if forbidden_memo_pattern().is_match(memo) {
        return Err(ValidationError::MemoForbiddenPattern);
    }
    Ok(())
}
