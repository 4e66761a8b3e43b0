use std::error;
use std::io::{self, Write};

pub mod db;
pub mod form;
pub mod master;

use db::stat::{signed_yen, yen, Summary};
use db::{BettingRecord, SearchCriteria, Store};
use form::RecordForm;
use master::Table;

const RULE : &str =
    "---------------------------------------------------------------";

/// read one trimmed line from stdin
fn read_input() -> io::Result<String>
{
    io::stdout().flush()?;
    let mut input = String::new();
    if io::stdin().read_line(&mut input)? == 0
    {
        return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "stdin closed"));
    }
    Ok(input.trim().to_string())
}

/// prompt w/ the current value shown; empty input keeps it
fn prompt_text(label : &str, current : &str) -> io::Result<String>
{
    print!("  {} [{}]: ", label, current);
    let input = read_input()?;
    if input.is_empty() { Ok(current.to_string()) } else { Ok(input) }
}

/// parse user input into a code of `table`;
/// `None` for anything the table doesn't list
pub fn parse_code(input : &str, table : Table) -> Option<u32>
{
    input.trim().parse().ok().filter(|&c| master::contains(table, c))
}

fn print_table(table : Table)
{
    let line = master::to_list(table)
        .iter()
        .map(|item| format!("{}={}", item.id, item.name))
        .collect::<Vec<_>>()
        .join("  ");
    println!("    {}", line);
}

/// prompt for a code of `table`, showing the choices;
/// empty input keeps `current`
fn prompt_code(label : &str, table : Table, current : u32) -> io::Result<u32>
{
    print_table(table);

    loop
    {
        print!("  {} [{}]: ", label, master::display(table, current));
        let input = read_input()?;
        if input.is_empty() { return Ok(current); }
        if let Some(code) = parse_code(&input, table) { return Ok(code); }
        println!("  not a listed code");
    }
}

/// like prompt_code but w/ an extra "a" choice meaning no filter
fn prompt_filter(label : &str, table : Table) -> io::Result<Option<u32>>
{
    print_table(table);

    loop
    {
        print!("  {} ('a' for all) [all]: ", label);
        let input = read_input()?;
        if input.is_empty() || input == "a" { return Ok(None); }
        if let Some(code) = parse_code(&input, table) { return Ok(Some(code)); }
        println!("  not a listed code");
    }
}

/// parse a search bound: `-` clears it (`Some(None)`), a date is
/// normalized to the zero padded form the table stores, anything else
/// is rejected (`None`)
pub fn parse_search_date(input : &str) -> Option<Option<String>>
{
    let input = input.trim();
    if input == "-" { return Some(None); }
    db::helpers::parse_date(input).map(|d| Some(db::helpers::datestr(d)))
}

/// prompt for a search bound; empty input keeps `current`
fn prompt_search_date(label : &str, current : &str)
    -> io::Result<Option<String>>
{
    loop
    {
        print!("  {} [{}]: ", label, current);
        let input = read_input()?;
        let input = if input.is_empty() { current } else { input.as_str() };
        if let Some(bound) = parse_search_date(input) { return Ok(bound); }
        println!("  not a YYYY-MM-DD date ('-' for none)");
    }
}

/// record of `records` w/ the given id, if the input names one
pub fn find_record<'a>(records : &'a [BettingRecord], input : &str)
    -> Option<&'a BettingRecord>
{
    let id : i64 = input.trim().parse().ok()?;
    records.iter().find(|r| r.id == id)
}

/// prompt for one of the listed records; `None` if the user backs out w/ 'q'
fn prompt_record(records : &[BettingRecord])
    -> io::Result<Option<&BettingRecord>>
{
    loop
    {
        print!("Your input: #");
        let input = read_input()?;
        if input == "q" { return Ok(None); }
        if let Some(r) = find_record(records, &input) { return Ok(Some(r)); }
        println!("  not a listed ID");
    }
}

fn confirm(question : &str) -> io::Result<bool>
{
    print!("{} (y/n): ", question);

    loop
    {
        let choice = read_input()?;
        if ["y", "Y"].contains(&choice.as_str()) { return Ok(true); }
        if ["n", "N"].contains(&choice.as_str()) { return Ok(false); }
    }
}

/// one line of the record listing
pub fn format_row(r : &BettingRecord) -> String
{
    format!("#{:<5} {}  {:<8} {:>3}R  {:<6} {:>9} {:>9} {:>10}  {}",
            r.id,
            r.record.date,
            master::display(master::RACE_COURSES, r.record.race_course),
            r.record.race_number,
            master::display(master::BET_TYPES, r.record.bet_type),
            yen(r.record.stake as i64),
            yen(r.record.payout as i64),
            signed_yen(r.profit()),
            r.record.memo)
}

fn print_records(records : &[BettingRecord])
{
    println!("{}", RULE);
    println!("ID     Date        Course    Race  Type       Stake    Payout     Profit  Memo");

    for r in records
    {
        println!("{}", format_row(r));
    }

    if records.is_empty()
    {
        println!("  (no records)");
    }
    println!("{}", RULE);
}

/// walk the user through every form field
fn fill_form(f : &mut RecordForm) -> io::Result<()>
{
    f.date        = prompt_text("Date (YYYY-MM-DD) *", &f.date)?;
    f.race_course = prompt_code("Race course *", master::RACE_COURSES, f.race_course)?;
    f.race_number = prompt_code("Race *", master::RACE_NUMBERS, f.race_number)?;
    f.surface     = prompt_code("Surface", master::SURFACES, f.surface)?;
    f.distance    = prompt_code("Distance", master::DISTANCES, f.distance)?;
    f.field_size  = prompt_code("Field size", master::FIELD_SIZES, f.field_size)?;
    f.class       = prompt_code("Class", master::RACE_CLASSES, f.class)?;
    f.bet_type    = prompt_code("Bet type", master::BET_TYPES, f.bet_type)?;
    f.stake       = prompt_text("Stake (yen) *", &f.stake)?;
    f.payout      = prompt_text("Payout (yen) *", &f.payout)?;
    f.memo        = prompt_text("Memo", &f.memo)?;
    Ok(())
}

/// validate and store a form, re-prompting until it's saved or abandoned
fn save_form(db : &Store, mut f : RecordForm) -> Result<(), Box<dyn error::Error>>
{
    loop
    {
        fill_form(&mut f)?;

        match f.validate()
        {
            Ok(record) => match db.insert(&record)
            {
                Ok(id) =>
                {
                    println!("Record saved (#{})", id);
                    if !confirm("Register another record?")? { return Ok(()); }
                    f.reset();
                    continue;
                }
                Err(e) => eprintln!("Failed to save the record: {}", e),
            },
            Err(e) => eprintln!("Error: {}", e),
        }

        if !confirm("Edit the entry again?")? { return Ok(()); }
    }
}

/// register a new bet
pub fn register(db : &Store) -> Result<(), Box<dyn error::Error>>
{
    println!("New record (Enter keeps the value in brackets)");
    save_form(db, RecordForm::new(chrono::Local::now().date_naive()))
}

/// register a new bet starting from a copy of an existing one
pub fn quote(db : &Store) -> Result<(), Box<dyn error::Error>>
{
    let records = db.list_all();
    print_records(&records);

    if records.is_empty() { return Ok(()); }

    println!("ID of the record to copy ('q' to go back to main)");

    let source = match prompt_record(&records)?
    {
        Some(r) => r,
        None => return Ok(()),
    };

    save_form(db, RecordForm::from_record(&source.record))
}

/// every record, newest first
pub fn list(db : &Store) -> Result<(), Box<dyn error::Error>>
{
    let records = db.list_all();
    print_records(&records);
    println!("{}", Summary::of(&records));
    Ok(())
}

/// filter records and show their totals
pub fn search(db : &Store) -> Result<(), Box<dyn error::Error>>
{
    let (first, last) =
        db::helpers::month_bounds(chrono::Local::now().date_naive());

    println!("Search (Enter keeps the value in brackets, '-' clears a date)");

    let criteria = SearchCriteria {
        start_date: prompt_search_date("Start date", &first)?,
        end_date: prompt_search_date("End date", &last)?,
        race_course: prompt_filter("Race course", master::RACE_COURSES)?,
        bet_type: prompt_filter("Bet type", master::BET_TYPES)?,
    };

    let records = db.search(&criteria);
    print_records(&records);
    println!("{}", Summary::of(&records));
    Ok(())
}

/// remove a record after confirmation
pub fn delete(db : &Store) -> Result<(), Box<dyn error::Error>>
{
    let records = db.list_all();
    print_records(&records);

    if records.is_empty() { return Ok(()); }

    println!("Specify a record ID");
    println!("  'q' to go back to main");

    let target = match prompt_record(&records)?
    {
        Some(r) => r,
        None => return Ok(()),
    };

    println!("{}", RULE);
    println!("{}", format_row(target));
    println!("{}", RULE);

    if !confirm("Should the above record be removed?")?
    {
        println!("Have not removed record, back to main menu");
        return Ok(());
    }

    match db.delete_by_id(target.id)
    {
        Ok(()) => println!("Record removed"),
        Err(e) => eprintln!("Failed to delete the record: {}", e),
    }

    Ok(())
}

/// end of program routine
pub fn quit()
{
    std::process::exit(0);
}
