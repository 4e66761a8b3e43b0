use std::env;
use std::error;
use std::io;
use std::io::Write;
use std::path;

use keibalog::db::Store;
use directories::ProjectDirs;

const VERSION: &str = "0.1.0"; // keep in synch w/ ver from Cargo.toml
const DB_NAME: &str = "calanda_horse_racing.db";

fn main() -> Result<(), Box<dyn error::Error>>
{
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("warn"))
        .init();

    // a path given as first argument wins (scratch ledgers and such),
    // otherwise the OS specific configuration folder (eg `~/.config` for unix)
    let dbpath: path::PathBuf = match env::args_os().nth(1)
    {
        Some(arg) => path::PathBuf::from(arg),
        None =>
        {
            let projdir = ProjectDirs::from("dev", "calanda", "keibalog")
                .ok_or("Could not retrieve OS specific configuration folder!")?;
            projdir.config_dir().join(DB_NAME)
        }
    };

    println!();

    if !dbpath.exists()
    {
        println!("db file doesn't exist, creating: {:?}", dbpath);
        // creation below via Store::open (creates folder and file)
    }

    println!("Horse racing betting log");
    println!("Version : {}", VERSION);
    println!("Database used: {:?}", dbpath);

    let db = Store::open(&dbpath)?; // create/open db
    db.initialize();

    if let Err(e) = db.check()
    {
        eprintln!("{}", e);
        eprintln!("continuing; storage operations may fail");
    }

    loop
    {
        println!();
        println!("-----------------");
        println!("--- Main Menu --- ");
        println!("-----------------");
        println!("Available options");
        println!();
        println!("  1) register");
        println!("  2) register from copy");
        println!("  3) list all");
        println!("  4) search & totals");
        println!("  5) delete record");
        println!();
        println!("  6) exit");
        println!();
        print!("Your option: ");
        io::stdout().flush()?;

        let mut option = String::new();
        if io::stdin().read_line(&mut option)? == 0 { keibalog::quit(); }
        option = option.trim().to_string();

        println!();

        match option.as_str() {
            "1" => keibalog::register(&db)?,
            "2" => keibalog::quote(&db)?,
            "3" => keibalog::list(&db)?,
            "4" => keibalog::search(&db)?,
            "5" => keibalog::delete(&db)?,
            "6" => keibalog::quit(),
            _ => (),
        }
    }
}
