use casebook::content::ContentRepository;
use casebook::{config, generate, logging, output, scan};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

fn version_string() -> &'static str {
    let on_tag = env!("ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once at startup
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "casebook")]
#[command(about = "Static site generator for product-design case study portfolios")]
#[command(long_about = "\
Static site generator for product-design case study portfolios

Each case study is a folder with an index.md: TOML front matter followed by
markdown and widget blocks (compare, quotes, timeline, kpi, video, ...).

Content structure:

  content/
  ├── config.toml                  # Site config (optional)
  ├── intro.md                     # Home page introduction (optional)
  ├── resume.md                    # CV page (optional, `pdf` key adds a download link)
  ├── assets/                      # Copied to the site root
  └── projects/
      ├── 010-redaction-studio/    # Numbered = listed first, in order
      │   ├── index.md
      │   ├── config.toml          # Per-project overrides (optional)
      │   └── images/thumbnail.svg # Card thumbnail (.svg, then .png)
      └── side-project/            # Unnumbered = listed after, by slug
          └── index.md

Run 'casebook gen-config' to generate a documented config.toml.")]
#[command(version = version_string())]
struct Cli {
    /// Content directory
    #[arg(long, default_value = "content", global = true)]
    source: PathBuf,

    /// Output directory
    #[arg(long, default_value = "dist", global = true)]
    output: PathBuf,

    /// Directory for intermediate files (manifest)
    #[arg(long, default_value = ".casebook-temp", global = true)]
    temp_dir: PathBuf,

    /// More log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Scan content directory into a manifest
    Scan,
    /// Produce the final HTML site from the manifest
    Generate,
    /// Run the full pipeline: scan → generate
    Build,
    /// Validate content without building; fails on any problem
    Check,
    /// List case studies in display order
    List,
    /// Show one case study's metadata
    Show {
        /// Project slug, e.g. `redaction-studio`
        slug: String,
    },
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    logging::init(cli.verbose, cli.quiet)?;

    let manifest_path = cli.temp_dir.join("manifest.json");

    match cli.command {
        Command::Scan => {
            let manifest = scan::scan(&cli.source)?;
            scan::write_manifest(&manifest, &manifest_path)?;
            output::print_scan_output(&manifest, &cli.source);
        }
        Command::Generate => {
            let report = generate::generate(&manifest_path, &cli.source, &cli.output)?;
            output::print_generate_output(&report);
        }
        Command::Build => {
            println!("==> Stage 1: Scanning {}", cli.source.display());
            let manifest = scan::scan(&cli.source)?;
            scan::write_manifest(&manifest, &manifest_path)?;
            output::print_scan_output(&manifest, &cli.source);

            println!("==> Stage 2: Generating HTML → {}", cli.output.display());
            let report = generate::generate_site(&manifest, &cli.source, &cli.output)?;
            output::print_generate_output(&report);

            println!("==> Build complete: {}", cli.output.display());
        }
        Command::Check => {
            println!("==> Checking {}", cli.source.display());
            let (manifest, problems) = scan::scan_with_problems(&cli.source)?;
            output::print_scan_output(&manifest, &cli.source);
            println!();
            output::print_problems(&problems);
            if !problems.is_empty() {
                return Err(format!("{} problem(s) in {}", problems.len(), cli.source.display()).into());
            }
            println!("==> Content is valid");
        }
        Command::List => {
            let manifest = scan::scan(&cli.source)?;
            output::print_list(&manifest);
        }
        Command::Show { slug } => {
            let project = show(&cli.source, &slug)?;
            output::print_show(&project);
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Load a single project by slug without scanning the others.
fn show(source: &Path, slug: &str) -> Result<casebook::types::Project, Box<dyn std::error::Error>> {
    let site = config::load_config(source)?;
    Ok(ContentRepository::new(source).document(slug, &site)?)
}
