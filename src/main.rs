use clap::Parser;
use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use rollcall::{
    export_filename, line_options, parse_query, record_rows, subject_options, to_csv,
    CanonicalRecord, DatasetShape, FieldHint, LookupConfig, LookupEngine, LookupSession,
    RecordNormalizer, SearchFilters, SearchOutcome,
};

mod cli;
use cli::display::{self, BOLD, CYAN, GRAY};
use cli::{Cli, Commands, OutputFormat};

type CliResult = Result<(), Box<dyn Error>>;

fn main() {
    // Logs go to stderr so search output stays pipeable
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_env("ROLLCALL_LOG")
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let result = load_config(cli.config.as_deref(), cli.data_dir.as_deref()).and_then(|config| {
        match cli.command {
            Commands::Search {
                query,
                field,
                grade,
                subject,
                line,
                format,
                output,
            } => {
                let mut filters = SearchFilters::new();
                if let Some(grade) = grade.as_deref() {
                    filters = filters.grade(grade);
                }
                if let Some(subject) = subject {
                    filters = filters.subject(subject);
                }
                if let Some(line) = line {
                    filters = filters.line(line);
                }
                run_search(
                    config,
                    &query,
                    FieldHint::parse(&field),
                    grade.as_deref(),
                    &filters,
                    format,
                    output.as_deref(),
                )
            }
            Commands::Student { identifier, grade } => {
                run_student(config, &identifier, grade.as_deref())
            }
            Commands::Options { grade, subject } => {
                run_options(config, grade.as_deref(), subject.as_deref())
            }
            Commands::Inspect { file } => run_inspect(&config, &file),
        }
    });

    if let Err(e) = result {
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }
}

fn load_config(path: Option<&Path>, data_dir: Option<&Path>) -> Result<LookupConfig, Box<dyn Error>> {
    let mut config = match path {
        Some(path) => LookupConfig::load(path)?,
        None => LookupConfig::default(),
    };
    if let Some(dir) = data_dir {
        config.prepend_base_path(dir);
    }
    Ok(config)
}

fn open_session(config: LookupConfig, grade: Option<&str>) -> Result<LookupSession, Box<dyn Error>> {
    let mut session = LookupSession::new(config);
    session.select_grade(grade)?;
    Ok(session)
}

fn run_search(
    config: LookupConfig,
    query: &str,
    hint: FieldHint,
    grade: Option<&str>,
    filters: &SearchFilters,
    format: OutputFormat,
    output: Option<&Path>,
) -> CliResult {
    let session = open_session(config, grade)?;
    let records = match session.search(query, hint, filters)? {
        SearchOutcome::MissingGrade => {
            eprintln!("{}", display::warning("Select a grade to search by subject and line."));
            return Ok(());
        }
        SearchOutcome::Matches(records) => records,
    };

    if let Some(path) = output {
        let text = match format {
            OutputFormat::Json => serde_json::to_string_pretty(&records)?,
            OutputFormat::Table | OutputFormat::Csv => to_csv(&record_rows(records.iter().copied()))?,
        };
        let path = output_path(path);
        fs::write(&path, text)?;
        eprintln!("✓ {} results written to {}", records.len(), path.display());
        return Ok(());
    }

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&records)?),
        OutputFormat::Csv => println!("{}", to_csv(&record_rows(records.iter().copied()))?),
        OutputFormat::Table => {
            let engine = session.engine()?;
            let tier = engine.resolve(&parse_query(query, hint), filters).tier;
            print_results(query, hint, &records, display::tier_badge(tier));
        }
    }
    Ok(())
}

/// A directory gets today's dated export name inside it.
fn output_path(path: &Path) -> PathBuf {
    if path.is_dir() {
        path.join(export_filename(chrono::Local::now().date_naive()))
    } else {
        path.to_path_buf()
    }
}

fn print_results(query: &str, hint: FieldHint, records: &[&CanonicalRecord], badge: String) {
    display::section_top(&format!("SEARCH \"{}\" ({})", query, hint));
    display::row(&format!(
        "{} {}",
        badge,
        display::themed(GRAY, &[], &format!("{} results", records.len()))
    ));
    display::section_mid("RESULTS");
    if records.is_empty() {
        display::row(&display::themed(GRAY, &[], "No records match."));
    } else {
        display::row(&display::record_header());
        for record in records {
            display::row(&display::record_row(record));
        }
    }
    display::section_bot();
}

fn run_student(config: LookupConfig, identifier: &str, grade: Option<&str>) -> CliResult {
    let session = open_session(config, grade)?;
    let engine = session.engine()?;
    let Some(student) = engine.lookup(identifier) else {
        return Err(format!("no student with number {}", identifier).into());
    };

    display::section_top("STUDENT");
    for (label, value) in [
        ("Number", &student.identifier),
        ("Name", &student.name),
        ("Class", &student.registration_class),
        ("Gender", &student.gender),
        ("Grade", &student.grade),
        ("Photo", &student.photo_reference),
    ] {
        display::row(&format!(
            "{} {}",
            display::pad_right(&display::themed(CYAN, &[BOLD], label), 8),
            value
        ));
    }

    let subjects = engine.subjects_for(identifier);
    display::section_mid(&format!("SUBJECTS ({})", subjects.len()));
    for record in subjects.iter().filter(|r| !r.subject.is_empty()) {
        let line = if record.line.is_empty() {
            String::new()
        } else {
            format!("line {}", record.line)
        };
        display::row(&format!(
            "{} {} {}",
            display::pad_right(&display::truncate(&record.subject, 34), 34),
            display::pad_right(&line, 8),
            display::themed(GRAY, &[], &record.teacher)
        ));
    }
    display::section_bot();
    Ok(())
}

fn run_options(config: LookupConfig, grade: Option<&str>, subject: Option<&str>) -> CliResult {
    let session = open_session(config, grade)?;
    let records = session.engine()?.records();

    display::section_top(&format!("SUBJECTS ({})", grade.unwrap_or("all grades")));
    for option in subject_options(records, grade) {
        display::row(&option);
    }
    display::section_mid(&format!("LINES ({})", subject.unwrap_or("all subjects")));
    let lines = line_options(records, grade, subject);
    if lines.is_empty() {
        display::row(&display::themed(GRAY, &[], "none"));
    } else {
        display::row(&lines.join("  "));
    }
    display::section_bot();
    Ok(())
}

fn run_inspect(config: &LookupConfig, file: &Path) -> CliResult {
    let text = fs::read_to_string(file)?;
    let value: serde_json::Value = serde_json::from_str(&text)?;
    let shape = DatasetShape::of(&value);
    let engine = LookupEngine::from_value(&value, &RecordNormalizer::new(config.normalize_options()));
    let indexes = engine.indexes();

    display::section_top(&format!("INSPECT {}", file.display()));
    for (label, value) in [
        ("Layout", format!("{:?}", shape)),
        ("Records", engine.len().to_string()),
        ("Students", indexes.identifier_count().to_string()),
        ("Classes", indexes.classes().len().to_string()),
        ("Subjects", indexes.subjects().len().to_string()),
    ] {
        display::row(&format!(
            "{} {}",
            display::pad_right(&display::themed(CYAN, &[BOLD], label), 10),
            value
        ));
    }
    if !indexes.subjects().is_empty() {
        display::section_mid("SUBJECT KEYS");
        for (key, lines) in indexes.subjects().iter() {
            let count: usize = lines.iter().map(|(_, ids)| ids.len()).sum();
            display::row(&format!(
                "{} {}",
                display::pad_right(&display::truncate(key, 40), 40),
                display::themed(GRAY, &[], &format!("{} records", count))
            ));
        }
    }
    display::section_bot();
    Ok(())
}
