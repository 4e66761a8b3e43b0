//! submodule dealing with statistics
//! totals over a set of records and displaying them

use std::fmt;

use super::BettingRecord;

/// running sums over a result set
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    pub count: usize,
    pub total_stake: i64,
    pub total_payout: i64,
}

impl Summary {
    pub fn of<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a BettingRecord>,
    {
        records.into_iter().fold(Summary::default(), |mut s, r| {
            s.count += 1;
            s.total_stake += r.record.stake as i64;
            s.total_payout += r.record.payout as i64;
            s
        })
    }

    /// payout minus stake
    pub fn profit(&self) -> i64 {
        self.total_payout - self.total_stake
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Records: {}", self.count)?;
        writeln!(f, "Stake:   {:>12}", yen(self.total_stake))?;
        writeln!(f, "Payout:  {:>12}", yen(self.total_payout))?;
        write!(f, "Profit:  {:>12}", signed_yen(self.profit()))
    }
}

/// amount w/ thousands separators, eg `-1,234,500`
pub fn yen(amount: i64) -> String {
    let digits = amount.unsigned_abs().to_string();
    let mut out = String::new();

    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }

    if amount < 0 {
        out.insert(0, '-');
    }
    out
}

/// like `yen` but gains are prefixed w/ `+`
pub fn signed_yen(amount: i64) -> String {
    if amount > 0 {
        format!("+{}", yen(amount))
    } else {
        yen(amount)
    }
}
