use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process;

use anyhow::{Context, anyhow, bail};
use clap::{Parser, Subcommand, ValueEnum};
use jsonschema::Validator;
use once_cell::sync::Lazy;
use serde::Serialize;
use serde_json::Value;
use tabwriter::TabWriter;
use tracing_subscriber::EnvFilter;

use blocklib_io::analyze::is_list_layout;
use blocklib_io::library::{DEFAULT_SIMILARITY_THRESHOLD, SortBy, SortOrder};
use blocklib_io::page_json::{self, parse_values_json_str};
use blocklib_io::prelude::*;

static BLOCK_SCHEMA: Lazy<Result<Validator, String>> = Lazy::new(|| {
    let schema_json: Value =
        serde_json::from_str(include_str!("../../../schemas/block.schema.json"))
            .map_err(|e| format!("invalid block schema JSON: {e}"))?;
    Validator::new(&schema_json).map_err(|e| format!("compile block schema: {e}"))
});

static PAGES_SCHEMA: Lazy<Result<Validator, String>> = Lazy::new(|| {
    let schema_json: Value =
        serde_json::from_str(include_str!("../../../schemas/pages.schema.json"))
            .map_err(|e| format!("invalid pages schema JSON: {e}"))?;
    Validator::new(&schema_json).map_err(|e| format!("compile pages schema: {e}"))
});

#[derive(Debug, Parser)]
#[command(name = "blocklib", version, about = "Component template inference and library CLI")]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the editable field descriptors of a block.
    Fields {
        /// Block JSON path
        block: PathBuf,
        #[arg(long)]
        min: bool,
    },
    /// Print the placeholder template of a block.
    Template {
        block: PathBuf,
        #[arg(long)]
        min: bool,
    },
    /// Print the placeholder-key to value map of a block.
    Values {
        block: PathBuf,
        #[arg(long)]
        min: bool,
    },
    /// Fill a template with values.
    Hydrate {
        /// Template JSON path (a block whose data holds placeholders)
        template: PathBuf,
        /// Values JSON path (placeholder key to value)
        values: PathBuf,
        #[arg(long)]
        min: bool,
    },
    /// Print the similarity score of two blocks.
    Similarity { a: PathBuf, b: PathBuf },
    /// Adapt flat content to a target layout.
    Remap {
        /// Content JSON object path
        content: PathBuf,
        /// Target layout id (e.g. `features-grid`)
        #[arg(long)]
        layout: String,
        #[arg(long)]
        min: bool,
    },
    /// Extract reusable components from generated pages.
    Extract {
        /// Pages JSON path (array of pages with `blocks`)
        pages: PathBuf,
        /// Library file; without it extraction runs against an empty in-memory library
        #[arg(long, env = "BLOCKLIB_LIBRARY")]
        library: Option<PathBuf>,
        #[arg(long, env = "BLOCKLIB_SIMILARITY_THRESHOLD", default_value_t = DEFAULT_SIMILARITY_THRESHOLD, value_parser = parse_threshold)]
        threshold: f64,
        #[arg(long, value_enum, default_value_t = SourceArg::AiGenerated)]
        source: SourceArg,
        /// Recorded on admitted entries
        #[arg(long)]
        store_id: Option<String>,
        /// Admit every block, relying only on the (type, variant) uniqueness rule
        #[arg(long)]
        no_skip_existing: bool,
        /// Exit 2 when the summary reports any error
        #[arg(long)]
        strict: bool,
        #[arg(long)]
        min: bool,
    },
    /// Seed hand-built components from a manifest.
    Seed {
        /// Seed manifest JSON path
        manifest: PathBuf,
        #[arg(long, env = "BLOCKLIB_LIBRARY")]
        library: PathBuf,
        #[arg(long)]
        dry_run: bool,
        #[arg(long)]
        min: bool,
    },
    /// Inspect and use the component library.
    Library {
        #[arg(long, env = "BLOCKLIB_LIBRARY")]
        library: PathBuf,
        #[command(subcommand)]
        cmd: LibraryCommand,
    },
}

#[derive(Debug, Subcommand)]
enum LibraryCommand {
    /// List entries as a table (or JSON with --json).
    List {
        #[arg(long = "type")]
        kind: Option<String>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long, default_value_t = 50)]
        limit: usize,
        #[arg(long, value_enum, default_value_t = SortArg::UsageCount)]
        sort_by: SortArg,
        #[arg(long)]
        asc: bool,
        #[arg(long)]
        json: bool,
    },
    /// Search entry names.
    Search {
        term: String,
        #[arg(long)]
        json: bool,
    },
    /// Record one use of an entry and print its new usage count.
    Use { id: String },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum SourceArg {
    AiGenerated,
    UserCreated,
}

impl From<SourceArg> for EntrySource {
    fn from(s: SourceArg) -> Self {
        match s {
            SourceArg::AiGenerated => EntrySource::AiGenerated,
            SourceArg::UserCreated => EntrySource::UserCreated,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum SortArg {
    UsageCount,
    CreatedAt,
    Rating,
}

impl From<SortArg> for SortBy {
    fn from(s: SortArg) -> Self {
        match s {
            SortArg::UsageCount => SortBy::UsageCount,
            SortArg::CreatedAt => SortBy::CreatedAt,
            SortArg::Rating => SortBy::Rating,
        }
    }
}

fn parse_threshold(s: &str) -> Result<f64, String> {
    let t: f64 = s.parse().map_err(|e| format!("{e}"))?;
    if !(0.0..=1.0).contains(&t) {
        return Err(format!("threshold must be within 0..=1, got {t}"));
    }
    Ok(t)
}

fn init_tracing() {
    // stdout carries JSON output; logs go to stderr.
    let filter = EnvFilter::try_from_env("BLOCKLIB_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .compact()
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing();

    match cli.cmd {
        Command::Fields { block, min } => {
            let block = read_block(&block)?;
            print_json(&compute_editable_fields(&block.data), min)?;
        }
        Command::Template { block, min } => {
            let block = read_block(&block)?;
            print_json(&materialize_template(&block), min)?;
        }
        Command::Values { block, min } => {
            let block = read_block(&block)?;
            print_json(&extract_values(&block), min)?;
        }
        Command::Hydrate { template, values, min } => {
            let template = Template::from_block(read_block(&template)?);
            let values = parse_values_json_str(&read_text(&values)?)
                .with_context(|| format!("reading {}", values.display()))?;
            print_json(&hydrate_template(&template, &values), min)?;
        }
        Command::Similarity { a, b } => {
            let (a, b) = (read_block(&a)?, read_block(&b)?);
            println!("{:.4}", similarity(&a, &b));
        }
        Command::Remap { content, layout, min } => {
            let Value::Object(map) = read_json(&content)? else {
                bail!("{} must contain a JSON object", content.display());
            };
            tracing::debug!(layout = %layout, list = is_list_layout(&layout), "remapping content");
            print_json(&remap_for_layout(&map, &layout), min)?;
        }
        Command::Extract {
            pages,
            library,
            threshold,
            source,
            store_id,
            no_skip_existing,
            strict,
            min,
        } => {
            let input = read_json(&pages)?;
            // Extraction tolerates bad pages and blocks and reports them in the
            // summary, so schema violations here are only logged.
            for err in schema_errors(schema(&PAGES_SCHEMA)?, &input) {
                tracing::warn!(path = %pages.display(), "pages schema: {err}");
            }
            let options = AdmitOptions {
                similarity_threshold: threshold,
                skip_existing: !no_skip_existing,
                store_id,
            };
            let summary = match library {
                Some(path) => extract(JsonFileStore::open(path), options, &input, source.into()),
                None => extract(MemoryStore::new(), options, &input, source.into()),
            };
            print_json(&summary, min)?;
            if strict && !summary.errors.is_empty() {
                process::exit(2);
            }
        }
        Command::Seed {
            manifest,
            library,
            dry_run,
            min,
        } => {
            let text = read_text(&manifest)?;
            let manifest_value: SeedManifest = serde_json::from_str(&text)
                .with_context(|| format!("{} is not a valid seed manifest", manifest.display()))?;
            let store = JsonFileStore::open(library);
            let summary = seed_library(&store, &manifest_value, SeedOptions { dry_run });
            print_json(&summary, min)?;
            if summary.failed > 0 {
                process::exit(2);
            }
        }
        Command::Library { library, cmd } => run_library(JsonFileStore::open(library), cmd)?,
    }

    Ok(())
}

fn extract<S: LibraryStore>(
    store: S,
    options: AdmitOptions,
    pages: &Value,
    source: EntrySource,
) -> ExtractionSummary {
    Admission::with_options(store, options).extract_from_pages(pages, source)
}

fn run_library(store: JsonFileStore, cmd: LibraryCommand) -> anyhow::Result<()> {
    match cmd {
        LibraryCommand::List {
            kind,
            category,
            limit,
            sort_by,
            asc,
            json,
        } => {
            let query = LibraryQuery {
                kind,
                category,
                limit,
                sort_by: sort_by.into(),
                sort_order: if asc { SortOrder::Asc } else { SortOrder::Desc },
            };
            let entries = store.list(&query)?;
            if json {
                print_json(&entries, false)?;
            } else {
                print_table(&entries)?;
            }
        }
        LibraryCommand::Search { term, json } => {
            let entries = store.search(&term)?;
            if json {
                print_json(&entries, false)?;
            } else {
                print_table(&entries)?;
            }
        }
        LibraryCommand::Use { id } => {
            if store.get(&id)?.is_none() {
                eprintln!("library entry '{id}' not found");
                process::exit(2);
            }
            match Admission::new(&store).record_usage(&id) {
                Some(count) => println!("{count}"),
                None => {
                    eprintln!("failed to record usage for '{id}'");
                    process::exit(2);
                }
            }
        }
    }
    Ok(())
}

fn schema(cell: &'static Lazy<Result<Validator, String>>) -> anyhow::Result<&'static Validator> {
    cell.as_ref().map_err(|e| anyhow!("{e}"))
}

fn read_text(path: &Path) -> anyhow::Result<String> {
    fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

fn read_json(path: &Path) -> anyhow::Result<Value> {
    serde_json::from_str(&read_text(path)?)
        .with_context(|| format!("{} is not valid JSON", path.display()))
}

fn read_block(path: &Path) -> anyhow::Result<Block> {
    let value = read_json(path)?;
    check_schema(schema(&BLOCK_SCHEMA)?, &value, "block", path)?;
    page_json::parse_block_value(&value).with_context(|| format!("reading {}", path.display()))
}

fn schema_errors(validator: &Validator, instance: &Value) -> Vec<String> {
    validator.iter_errors(instance).map(|e| e.to_string()).collect()
}

fn check_schema(validator: &Validator, instance: &Value, what: &str, path: &Path) -> anyhow::Result<()> {
    let errors = schema_errors(validator, instance);
    if errors.is_empty() {
        return Ok(());
    }
    bail!(
        "{} does not match the {what} schema:\n  - {}",
        path.display(),
        errors.join("\n  - ")
    )
}

fn print_json<T: Serialize + ?Sized>(value: &T, min: bool) -> anyhow::Result<()> {
    let out = if min {
        serde_json::to_string(value)?
    } else {
        serde_json::to_string_pretty(value)?
    };
    println!("{out}");
    Ok(())
}

fn print_table(entries: &[LibraryEntry]) -> anyhow::Result<()> {
    let mut tw = TabWriter::new(io::stdout());
    writeln!(tw, "ID\tTYPE\tVARIANT\tNAME\tCATEGORY\tUSAGE")?;
    for e in entries {
        writeln!(
            tw,
            "{}\t{}\t{}\t{}\t{}\t{}",
            e.id, e.kind, e.variant_id, e.name, e.category, e.metadata.usage_count
        )?;
    }
    tw.flush()?;
    Ok(())
}
