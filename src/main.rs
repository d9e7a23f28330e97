use clap::{Parser, Subcommand};
use leb_verses::generate::{self, GenerateError};
use leb_verses::index::VerseIndex;
use leb_verses::{config, dataset, guard, ingest, logging, output};
use std::path::PathBuf;

fn version_string() -> &'static str {
    let on_tag = env!("ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once at startup, called exactly once
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "leb-verses")]
#[command(about = "One-page-per-verse static site generator for the Lexham English Bible")]
#[command(long_about = "\
One-page-per-verse static site generator for the Lexham English Bible

A plain-text verse file is normalized into a JSON dataset, which is then
validated in full, flattened into canonical order and written out as one
static page per verse.

Pipeline:

  bible.txt ──ingest──▶ bible.json ──build──▶ dist/
                                        ├── index.html        → first verse
                                        ├── 404.html          → reference lookup
                                        ├── index.json        → every page path
                                        ├── meta.json         → chapter lengths
                                        └── genesis/1/1/index.html ...

Input line format for ingest (one verse per line, tab-separated):

  Genesis 1:1<TAB>In the beginning, God created the heavens and the earth.

A build whose verse count falls below [guard] minimum_verses writes only
health.html and the lookup files, then exits with status 1.

Run 'leb-verses gen-config' to generate a documented site.toml.")]
#[command(version = version_string())]
struct Cli {
    /// Site configuration file (optional)
    #[arg(long, default_value = "site.toml", global = true)]
    config: PathBuf,

    /// Output directory
    #[arg(long, default_value = "dist", global = true)]
    output: PathBuf,

    /// Log debug detail to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Normalize a tab-separated verse file into the JSON dataset
    Ingest {
        /// Plain-text verse file
        input: PathBuf,
        /// Dataset JSON to write
        #[arg(value_name = "OUTPUT")]
        dataset: PathBuf,
    },
    /// Validate the dataset and write the static site
    Build {
        /// Dataset JSON
        #[arg(long, default_value = "data/bible.json")]
        data: PathBuf,
    },
    /// Validate the dataset and run the build guard without writing anything
    Check {
        /// Dataset JSON
        #[arg(long, default_value = "data/bible.json")]
        data: PathBuf,
    },
    /// Print a stock site.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    logging::init(cli.verbose)?;

    match cli.command {
        Command::Ingest { input, dataset } => {
            let ingested = ingest::ingest_file(&input, &dataset)?;
            output::print_ingest_output(&ingested, &dataset);
        }
        Command::Build { data } => {
            let site_config = config::load_config(&cli.config)?;
            println!("==> Building {} → {}", data.display(), cli.output.display());
            let summary = generate::build(&data, &cli.output, &site_config)?;
            output::print_build_output(&summary, &cli.output);
            println!("==> Build complete: {}", cli.output.display());
        }
        Command::Check { data } => {
            let site_config = config::load_config(&cli.config)?;
            println!("==> Checking {}", data.display());
            let dataset = dataset::load(&data)?;
            let index = VerseIndex::build(&dataset);
            let report = guard::check(index.len(), &site_config.guard);
            output::print_check_output(&dataset, &report);
            if !report.passed() {
                return Err(GenerateError::Guard(report).into());
            }
            println!("==> Dataset is ready to build");
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}
