use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use subjournal::{config, entry, fetch, load, output, search};

/// Shared flags for commands that print entry lists.
#[derive(clap::Args, Clone)]
struct FormatArgs {
    /// Emit JSON instead of the text display
    #[arg(long)]
    json: bool,
}

fn version_string() -> &'static str {
    let on_tag = env!("ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once at startup — trivial, called exactly once
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "subjournal")]
#[command(about = "Terminal viewer for plain-text journals served as static files")]
#[command(long_about = "\
Terminal viewer for plain-text journals served as static files

The journal is a folder tree on any static host. A manifest names the
topics and their files; each entry is a plain text file with the title on
the first line, the date on the second, and the body after that.

Remote content structure:

  <root_url>/
  ├── manifest.json            # {\"topics\": [{\"name\": \"Nature\", \"files\": [...]}]}
  ├── Nature/
  │   ├── first-hike.txt       # one entry per .txt file
  │   ├── rainy-day.txt
  │   └── photo.png            # images are attached to the topic's entries
  └── travel/
      └── tokyo.txt

Entry file format:

  Morning Hike                 # line 1: title
  2024-03-01                   # line 2: date, used for ordering
  Great day on the ridge.      # everything after: body

Entry ids are '<topic>-<filename without .txt>', e.g. Nature-first-hike.

Config is read from journal.toml in the working directory when present.
Run 'subjournal gen-config' to print a documented copy.")]
#[command(version = version_string())]
struct Cli {
    /// Config file path (default: ./journal.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Journal root URL (overrides the config file)
    #[arg(long, global = true)]
    root_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Load the journal and list every entry, newest first
    Load(FormatArgs),
    /// Load the journal and list the entries matching a query
    Search {
        /// Text to look for in titles, previews, subjects, and bodies
        query: String,

        /// Keep only entries whose subject matches exactly
        #[arg(long)]
        category: Option<String>,

        #[command(flatten)]
        format: FormatArgs,
    },
    /// List the distinct subjects across the journal
    Categories,
    /// Load the journal and print one entry in full
    Show {
        /// Entry id, e.g. Nature-first-hike
        id: String,
    },
    /// Validate the manifest without fetching any entries
    Check,
    /// Print a stock journal.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Command::Load(format) => {
            let journal_config = resolve_config(cli.config.as_deref(), cli.root_url.as_deref())?;
            let backend = fetch::HttpBackend::new(journal_config.timeout())?;
            if format.json {
                let result = load::load_with(&backend, &journal_config, None)?;
                println!("{}", serde_json::to_string_pretty(&result.entries)?);
            } else {
                let (tx, rx) = std::sync::mpsc::channel();
                let printer = std::thread::spawn(move || {
                    for event in rx {
                        for line in output::format_load_event(&event) {
                            println!("{}", line);
                        }
                    }
                });
                let result = load::load_with(&backend, &journal_config, Some(tx))?;
                printer.join().unwrap();

                println!();
                let refs: Vec<&entry::Entry> = result.entries.iter().collect();
                output::print_entry_list(&refs);
                println!();
                println!("Loaded {}", result.stats);
            }
        }
        Command::Search {
            query,
            category,
            format,
        } => {
            let journal_config = resolve_config(cli.config.as_deref(), cli.root_url.as_deref())?;
            let backend = fetch::HttpBackend::new(journal_config.timeout())?;
            let result = load::load_with(&backend, &journal_config, None)?;
            let found = search::filter_entries(&result.entries, &query, category.as_deref());
            if format.json {
                println!("{}", serde_json::to_string_pretty(&found)?);
            } else {
                output::print_entry_list(&found);
            }
        }
        Command::Categories => {
            let journal_config = resolve_config(cli.config.as_deref(), cli.root_url.as_deref())?;
            let backend = fetch::HttpBackend::new(journal_config.timeout())?;
            let result = load::load_with(&backend, &journal_config, None)?;
            output::print_categories(&search::categories(&result.entries));
        }
        Command::Show { id } => {
            let journal_config = resolve_config(cli.config.as_deref(), cli.root_url.as_deref())?;
            let backend = fetch::HttpBackend::new(journal_config.timeout())?;
            let result = load::load_with(&backend, &journal_config, None)?;
            match result.entries.iter().find(|entry| entry.id == id) {
                Some(entry) => output::print_entry_detail(entry),
                None => return Err(format!("no entry with id '{id}'").into()),
            }
        }
        Command::Check => {
            let journal_config = resolve_config(cli.config.as_deref(), cli.root_url.as_deref())?;
            let backend = fetch::HttpBackend::new(journal_config.timeout())?;
            println!("==> Checking {}", journal_config.manifest_url());
            let report = load::inspect_manifest(&backend, &journal_config)?;
            output::print_check_report(&report);
            if report.skipped.is_empty() && report.duplicate_ids.is_empty() {
                println!("==> Manifest is valid");
            } else {
                return Err(format!(
                    "manifest check failed: {} descriptors skipped, {} duplicate ids",
                    report.skipped.len(),
                    report.duplicate_ids.len()
                )
                .into());
            }
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Load config and apply CLI overrides: flag beats file beats default.
fn resolve_config(
    explicit: Option<&Path>,
    root_url: Option<&str>,
) -> Result<config::JournalConfig, config::ConfigError> {
    let mut journal_config = config::load_config(explicit)?;
    if let Some(root_url) = root_url {
        journal_config.root_url = root_url.to_string();
        journal_config.validate()?;
    }
    Ok(journal_config)
}
