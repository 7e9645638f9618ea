use std::fmt;

use storage::repository::Storage;
use vanguard_core::model::{Identity, SECTION_POINTS, SectionId, UserProgress, UserProgressDraft};
use vanguard_core::vanguard_curriculum;

#[derive(Debug, Clone)]
struct Args {
    db_url: String,
    name: Option<String>,
    sections: usize,
    last_viewed: Option<SectionId>,
}

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidDbUrl { raw: String },
    InvalidSections { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidDbUrl { raw } => write!(f, "invalid --db value: {raw}"),
            ArgsError::InvalidSections { raw } => write!(f, "invalid --sections value: {raw}"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

impl Args {
    fn parse() -> Result<Self, ArgsError> {
        let mut db_url = std::env::var("VANGUARD_DB_URL")
            .unwrap_or_else(|_| "sqlite://vanguard.sqlite3".into());
        let mut name = None;
        let mut sections = 3;
        let mut last_viewed = None;

        let mut args = std::env::args().skip(1);
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--db" => {
                    let value = require_value(&mut args, "--db")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidDbUrl { raw: value });
                    }
                    db_url = value;
                }
                "--name" => {
                    name = Some(require_value(&mut args, "--name")?);
                }
                "--sections" => {
                    let value = require_value(&mut args, "--sections")?;
                    sections = value
                        .parse::<usize>()
                        .map_err(|_| ArgsError::InvalidSections { raw: value.clone() })?;
                }
                "--last-viewed" => {
                    let value = require_value(&mut args, "--last-viewed")?;
                    last_viewed = Some(SectionId::new(value));
                }
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self {
            db_url,
            name,
            sections,
            last_viewed,
        })
    }
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p storage --bin seed -- [options]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --db <sqlite_url>         SQLite URL (default: sqlite://vanguard.sqlite3)");
    eprintln!("  --name <display name>     Learner name on the record");
    eprintln!("  --sections <n>            Complete the first n sections (default: 3)");
    eprintln!("  --last-viewed <id>        Section to resume at (default: last completed)");
    eprintln!("  -h, --help                Show this help");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  VANGUARD_DB_URL");
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse().map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    let curriculum = vanguard_curriculum()?;
    let completed: Vec<SectionId> = curriculum
        .flatten()
        .into_iter()
        .take(args.sections)
        .map(|section| section.id)
        .collect();

    let mut identity = Identity::default();
    if let Some(name) = args.name {
        identity.name = name;
    }
    let points = u32::try_from(completed.len())?.saturating_mul(SECTION_POINTS);
    let last_viewed = args.last_viewed.or_else(|| completed.last().cloned());

    let user = UserProgress::from_persisted(UserProgressDraft {
        identity,
        points,
        completed_sections: completed,
        completed_interactives: Vec::new(),
        last_viewed_section: last_viewed,
    });

    let storage = Storage::sqlite(&args.db_url).await?;
    storage.progress.save_user(&user).await?;

    println!(
        "Seeded {} completed sections ({} points) for {} into {}",
        user.completed_sections().len(),
        user.points(),
        user.identity().name,
        args.db_url
    );

    Ok(())
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(2);
    }
}
