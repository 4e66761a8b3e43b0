
pub const SQL_TABLEN_LOG : &str = "betting_log";

// AUTOINCREMENT: sqlite won't hand out an id again once its row is deleted
pub const SQL_CREATE_LOG : &str =
"CREATE TABLE IF NOT EXISTS betting_log (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    date TEXT,
    race_course INTEGER,
    race_number INTEGER,
    surface INTEGER,
    distance INTEGER,
    field_size INTEGER,
    class INTEGER,
    bet_type INTEGER,
    stake INTEGER,
    payout INTEGER,
    memo TEXT
    )";

pub const SQL_CREATE_LOG_DATE_IDX : &str =
"CREATE INDEX IF NOT EXISTS idx_betting_log_date ON betting_log(date DESC)";

/// column order every SELECT uses; `map_record` relies on it
pub const SQL_COLUMNS_LOG : [&str; 12] = [
    "id", "date", "race_course", "race_number", "surface", "distance",
    "field_size", "class", "bet_type", "stake", "payout", "memo",
];

pub const SQL_INSERT_LOG : &str =
"INSERT INTO betting_log
    (date, race_course, race_number, surface, distance, field_size,
     class, bet_type, stake, payout, memo)
    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)";

pub const SQL_SELECT_ALL : &str =
"SELECT id, date, race_course, race_number, surface, distance,
    field_size, class, bet_type, stake, payout, memo
    FROM betting_log ORDER BY id DESC";

/*
 * absent criteria are bound as NULL and the matching predicate collapses
 * to true; the statement text never changes
 */
pub const SQL_SEARCH : &str =
"SELECT id, date, race_course, race_number, surface, distance,
    field_size, class, bet_type, stake, payout, memo
    FROM betting_log
    WHERE (:start IS NULL OR date >= :start)
      AND (:end IS NULL OR date <= :end)
      AND (:course IS NULL OR race_course = :course)
      AND (:bettype IS NULL OR bet_type = :bettype)
    ORDER BY date DESC, id DESC";

pub const SQL_DELETE_BY_ID : &str = "DELETE FROM betting_log WHERE id = ?1";
