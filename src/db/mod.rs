//! handles the betting_log table
//! (initialization, integrity checking, insert / list / search / delete)
//! aggregation ousted to submodule stat

pub mod helpers;
pub mod queries;
pub mod stat;

use std::path::Path;

use rusqlite::{named_params, params, Connection, Row};
use thiserror::Error;
use queries::*;

#[derive(Debug, Error)]
pub enum DbError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("table {table} failed integrity check: expected columns {expected:?}, found {found:?}")]
    Schema {
        table: &'static str,
        expected: Vec<String>,
        found: Vec<String>,
    },
}

pub type DbResult<T> = Result<T, DbError>;

/// representing a row from the betting_log table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BettingRecord {
    pub id: i64,
    pub record: NewRecord,
}

impl BettingRecord {
    /// payout minus stake; negative for a lost bet
    pub fn profit(&self) -> i64 {
        self.record.payout as i64 - self.record.stake as i64
    }
}

/// a row's content without its id, i.e. what gets inserted;
/// enumerated fields hold master data codes, 0 meaning "no selection"
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewRecord {
    /// `YYYY-MM-DD`, zero padded so string comparison orders by date
    pub date: String,
    pub race_course: u32,
    pub race_number: u32,
    pub surface: u32,
    pub distance: u32,
    pub field_size: u32,
    pub class: u32,
    pub bet_type: u32,
    pub stake: u32,
    pub payout: u32,
    pub memo: String,
}

/// filter for `Store::search`; every field that is `None` imposes no filter,
/// the remaining ones are AND-ed together
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchCriteria {
    /// inclusive lower bound on `date`
    pub start_date: Option<String>,
    /// inclusive upper bound on `date`
    pub end_date: Option<String>,
    pub race_course: Option<u32>,
    pub bet_type: Option<u32>,
}

impl SearchCriteria {
    /// empty date strings and the "no selection" code count as absent
    pub fn normalized(&self) -> SearchCriteria {
        let date = |d : &Option<String>| {
            d.as_ref()
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        };
        let code = |c : Option<u32>| {
            c.filter(|&c| c != crate::master::NO_SELECTION_ID)
        };

        SearchCriteria {
            start_date: date(&self.start_date),
            end_date: date(&self.end_date),
            race_course: code(self.race_course),
            bet_type: code(self.bet_type),
        }
    }
}

/// owns the one connection to the ledger database;
/// constructed once at startup and handed to everything that needs storage
pub struct Store {
    conn: Connection,
}

impl Store {
    /// open (or create) the database file at `path`;
    /// does not create the table, see `initialize`
    pub fn open(path: &Path) -> DbResult<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(path)?;
        log::debug!("opened database {:?}", path);

        Ok(Self { conn })
    }

    pub fn open_in_memory() -> DbResult<Self> {
        Ok(Self { conn: Connection::open_in_memory()? })
    }

    /// make sure the betting_log table exists; safe to call repeatedly;
    /// failures are logged, not returned (later operations will fail instead)
    pub fn initialize(&self) {
        match self.create_table() {
            Ok(()) => log::info!("Database initialized."),
            Err(e) => log::error!("Database initialization failed: {}", e),
        }
    }

    fn create_table(&self) -> DbResult<()> {
        self.conn.execute(SQL_CREATE_LOG, ())?;
        self.conn.execute(SQL_CREATE_LOG_DATE_IDX, ())?;
        Ok(())
    }

    /// check existing db for integrity, conforming to expected layout
    pub fn check(&self) -> DbResult<()> {
        let mut stmt = self.conn.prepare(
            &format!("PRAGMA table_info({})", SQL_TABLEN_LOG))?;

        let found = stmt
            .query_map([], |row| row.get::<_, String>(1))?
            .collect::<Result<Vec<_>, _>>()?;

        let expected: Vec<String> =
            SQL_COLUMNS_LOG.iter().map(|c| c.to_string()).collect();

        if found != expected {
            return Err(DbError::Schema {
                table: SQL_TABLEN_LOG,
                expected,
                found,
            });
        }

        Ok(())
    }

    /// insert a validated record, returning the id sqlite assigned to it;
    /// field rules (stake rounding, memo content...) are not re-checked here
    pub fn insert(&self, record: &NewRecord) -> DbResult<i64> {
        let res = self.conn.execute(
            SQL_INSERT_LOG,
            params![
                record.date,
                record.race_course,
                record.race_number,
                record.surface,
                record.distance,
                record.field_size,
                record.class,
                record.bet_type,
                record.stake,
                record.payout,
                record.memo,
            ],
        );

        match res {
            Ok(_) => {
                let id = self.conn.last_insert_rowid();
                log::debug!("inserted record {}", id);
                Ok(id)
            }
            Err(e) => {
                log::error!("Failed to add record: {}", e);
                Err(e.into())
            }
        }
    }

    /// every record, newest (highest id) first; empty if the query fails
    pub fn list_all(&self) -> Vec<BettingRecord> {
        self.try_list_all().unwrap_or_else(|e| {
            log::error!("Failed to get records: {}", e);
            Vec::new()
        })
    }

    pub fn try_list_all(&self) -> DbResult<Vec<BettingRecord>> {
        let mut stmt = self.conn.prepare(SQL_SELECT_ALL)?;
        let records = stmt
            .query_map([], map_record)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(records)
    }

    /// records matching all given criteria, by date then id, both descending;
    /// a failing query yields no records rather than an error,
    /// use `try_search` to tell the two apart
    pub fn search(&self, criteria: &SearchCriteria) -> Vec<BettingRecord> {
        self.try_search(criteria).unwrap_or_else(|e| {
            log::error!("Failed to search records: {}", e);
            Vec::new()
        })
    }

    pub fn try_search(&self, criteria: &SearchCriteria)
        -> DbResult<Vec<BettingRecord>>
    {
        let c = criteria.normalized();
        log::debug!("searching with {:?}", c);

        let mut stmt = self.conn.prepare(SQL_SEARCH)?;
        let records = stmt
            .query_map(
                named_params! {
                    ":start": c.start_date,
                    ":end": c.end_date,
                    ":course": c.race_course,
                    ":bettype": c.bet_type,
                },
                map_record,
            )?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(records)
    }

    /// remove the record with `id`; an unknown id is not an error
    pub fn delete_by_id(&self, id: i64) -> DbResult<()> {
        match self.conn.execute(SQL_DELETE_BY_ID, params![id]) {
            Ok(0) => {
                log::debug!("no record {} to delete", id);
                Ok(())
            }
            Ok(_) => {
                log::debug!("deleted record {}", id);
                Ok(())
            }
            Err(e) => {
                log::error!("Failed to delete record: {}", e);
                Err(e.into())
            }
        }
    }
}

/// build a BettingRecord from a row selected w/ SQL_COLUMNS_LOG ordering;
/// NULLs (rows written by other tools) read as the "no selection" defaults
pub fn map_record(row: &Row) -> rusqlite::Result<BettingRecord> {
    // out of range integers (negative, > u32) read as 0 too,
    // one bad row must not take the whole result set down
    let code = |i : usize| -> rusqlite::Result<u32> {
        Ok(row.get::<_, Option<i64>>(i)?
            .and_then(|v| u32::try_from(v).ok())
            .unwrap_or(0))
    };

    Ok(BettingRecord {
        id: row.get(0)?,
        record: NewRecord {
            date: row.get::<_, Option<String>>(1)?.unwrap_or_default(),
            race_course: code(2)?,
            race_number: code(3)?,
            surface: code(4)?,
            distance: code(5)?,
            field_size: code(6)?,
            class: code(7)?,
            bet_type: code(8)?,
            stake: code(9)?,
            payout: code(10)?,
            memo: row.get::<_, Option<String>>(11)?.unwrap_or_default(),
        },
    })
}

#[cfg(test)]
mod tests
{
    use super::*;
    use crate::test; // crate w/ shared test logic

    #[test]
    fn insert_then_list_includes_record()
    {
        let store = test::initialized_store();
        let rec = test::record("2024-04-05", 5, 1000, 0);

        let id = store.insert(&rec).unwrap();
        let all = store.list_all();

        assert_eq!(all.len(), 1);
        assert_eq!(all[0].id, id);
        assert_eq!(all[0].record, rec);
    }

    #[test]
    fn list_all_is_newest_first()
    {
        let store = test::initialized_store();
        let ids = test::populate_store(&store);

        let listed: Vec<i64> = store.list_all().iter().map(|r| r.id).collect();
        let mut expected = ids.clone();
        expected.sort_unstable_by(|a, b| b.cmp(a));

        assert_eq!(listed, expected);
    }

    #[test]
    fn ids_are_not_reused_after_delete()
    {
        let store = test::initialized_store();
        let first = store.insert(&test::record("2024-04-01", 1, 100, 0)).unwrap();
        let second = store.insert(&test::record("2024-04-02", 1, 100, 0)).unwrap();

        store.delete_by_id(second).unwrap();
        let third = store.insert(&test::record("2024-04-03", 1, 100, 0)).unwrap();

        assert!(third > second);
        assert!(second > first);
    }

    #[test]
    fn initialize_twice_keeps_data()
    {
        let store = test::initialized_store();
        store.insert(&test::record("2024-04-05", 5, 1000, 0)).unwrap();

        store.initialize();
        store.initialize();

        let tables: i64 = store.conn.query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name=?1",
            params![SQL_TABLEN_LOG],
            |row| row.get(0)).unwrap();

        assert_eq!(tables, 1);
        assert_eq!(store.list_all().len(), 1);
        store.check().unwrap();
    }

    #[test]
    fn uninitialized_store_degrades_reads_and_fails_writes()
    {
        let store = Store::open_in_memory().unwrap();

        assert!(store.list_all().is_empty());
        assert!(store.search(&SearchCriteria::default()).is_empty());
        assert!(store.try_search(&SearchCriteria::default()).is_err());
        assert!(store.insert(&test::record("2024-04-05", 5, 1000, 0)).is_err());
        assert!(store.delete_by_id(1).is_err());
        assert!(matches!(store.check(), Err(DbError::Schema { .. })));
    }

    #[test]
    fn extra_table_column_integrity_check()
    {
        let store = test::initialized_store();

        store.conn
            .execute(
                &format!("ALTER TABLE {} ADD COLUMN TEST INTEGER", SQL_TABLEN_LOG),
                (),
            )
            .unwrap_or_else(|_| panic!("Couldn't add table column"));

        match store.check() {
            Err(DbError::Schema { found, .. }) => {
                assert_eq!(found.last().map(String::as_str), Some("TEST"));
            }
            other => panic!("expected integrity failure, got {:?}", other),
        }
    }

    #[test]
    fn search_by_date_range_orders_by_date_then_id()
    {
        let store = test::initialized_store();
        test::populate_store(&store);

        let res = store.search(&SearchCriteria {
            start_date: Some("2024-04-01".to_string()),
            end_date: Some("2024-04-30".to_string()),
            ..Default::default()
        });

        assert!(!res.is_empty());
        for r in &res {
            assert!(r.record.date.as_str() >= "2024-04-01" && r.record.date.as_str() <= "2024-04-30");
        }
        for pair in res.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            assert!(a.record.date > b.record.date || (a.record.date == b.record.date && a.id > b.id));
        }
        // 2024-03-31 and 2024-05-01 sit right outside the range
        assert_eq!(res.len(), 4);
    }

    #[test]
    fn search_without_criteria_returns_everything()
    {
        let store = test::initialized_store();
        let ids = test::populate_store(&store);

        let res = store.search(&SearchCriteria::default());
        assert_eq!(res.len(), ids.len());

        let mut listed: Vec<i64> = store.list_all().iter().map(|r| r.id).collect();
        let mut searched: Vec<i64> = res.iter().map(|r| r.id).collect();
        listed.sort_unstable();
        searched.sort_unstable();
        assert_eq!(listed, searched);
    }

    #[test]
    fn search_combines_criteria_with_and()
    {
        let store = test::initialized_store();
        test::populate_store(&store);

        let res = store.search(&SearchCriteria {
            start_date: Some("2024-04-01".to_string()),
            race_course: Some(5),
            bet_type: Some(1),
            ..Default::default()
        });

        assert!(!res.is_empty());
        for r in &res {
            assert_eq!(r.record.race_course, 5);
            assert_eq!(r.record.bet_type, 1);
            assert!(r.record.date.as_str() >= "2024-04-01");
        }
    }

    #[test]
    fn search_with_inverted_range_is_empty()
    {
        let store = test::initialized_store();
        test::populate_store(&store);

        let res = store.try_search(&SearchCriteria {
            start_date: Some("2024-04-30".to_string()),
            end_date: Some("2024-04-01".to_string()),
            ..Default::default()
        }).unwrap();

        assert!(res.is_empty());
    }

    #[test]
    fn sentinel_and_blank_criteria_are_ignored()
    {
        let store = test::initialized_store();
        let ids = test::populate_store(&store);

        let res = store.search(&SearchCriteria {
            start_date: Some("".to_string()),
            end_date: Some("  ".to_string()),
            race_course: Some(0),
            bet_type: Some(0),
        });

        assert_eq!(res.len(), ids.len());
    }

    #[test]
    fn sentinel_values_round_trip()
    {
        let store = test::initialized_store();
        let rec = NewRecord {
            date: "2024-04-05".to_string(),
            race_course: 5,
            race_number: 11,
            ..Default::default()
        };

        let id = store.insert(&rec).unwrap();
        let back = store.list_all().into_iter().find(|r| r.id == id).unwrap();

        assert_eq!(back.record.surface, 0);
        assert_eq!(back.record.distance, 0);
        assert_eq!(back.record.field_size, 0);
        assert_eq!(back.record.class, 0);
        assert_eq!(back.record.bet_type, 0);
        assert_eq!(back.record.memo, "");
        assert_eq!(back.record, rec);

        let raw: Option<i64> = store.conn.query_row(
            "SELECT surface FROM betting_log WHERE id = ?1",
            params![id],
            |row| row.get(0)).unwrap();
        assert_eq!(raw, Some(0));
    }

    #[test]
    fn delete_missing_id_is_noop()
    {
        let store = test::initialized_store();
        let ids = test::populate_store(&store);

        store.delete_by_id(999_999).unwrap();
        assert_eq!(store.list_all().len(), ids.len());

        store.delete_by_id(ids[0]).unwrap();
        assert_eq!(store.list_all().len(), ids.len() - 1);
        assert!(store.list_all().iter().all(|r| r.id != ids[0]));
    }

    #[test]
    fn file_store_survives_reopen()
    {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("ledger.db");

        let id = {
            let store = Store::open(&path).unwrap();
            store.initialize();
            store.insert(&test::record("2024-04-10", 6, 500, 1200)).unwrap()
        };

        let store = Store::open(&path).unwrap();
        store.initialize();
        store.check().unwrap();

        let all = store.list_all();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].id, id);
        assert_eq!(all[0].record.payout, 1200);
    }

    #[test]
    fn out_of_range_codes_read_as_unset()
    {
        let store = test::initialized_store();
        test::populate_store(&store);

        // a row no form would produce, eg written by another tool
        store.conn.execute(
            "INSERT INTO betting_log (date, race_course, race_number, stake, payout)
             VALUES ('2024-04-20', -5, 1, 100, ?1)",
            params![u32::MAX as i64 + 1],
        ).unwrap();

        let all = store.try_list_all().unwrap();
        assert_eq!(all.len(), 7);

        let odd = all.iter().find(|r| r.record.date == "2024-04-20").unwrap();
        assert_eq!(odd.record.race_course, 0);
        assert_eq!(odd.record.payout, 0);
        assert_eq!(odd.record.surface, 0);
        assert_eq!(odd.record.memo, "");

        assert_eq!(store.search(&SearchCriteria::default()).len(), 7);
    }

    #[test]
    fn profit_can_be_negative()
    {
        let rec = BettingRecord { id: 1, record: test::record("2024-04-05", 5, 1000, 300) };
        assert_eq!(rec.profit(), -700);
    }
}
