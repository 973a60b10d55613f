use blogcfg::{config, documents, export, output};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "blogcfg")]
#[command(about = "Site configuration for the blog's static-site renderer")]
#[command(long_about = "\
Site configuration for the blog's static-site renderer

The configuration is embedded in the binary. A config.toml in the source
directory overrides any part of it:

  title = \"写前端的图图\"
  base = \"/\"

  [[theme.nav]]
  text = \"JavaScript\"
  link = \"/javascript/\"

  [[theme.sidebar.sections.\"/javascript/\"]]
  title = \"JavaScript\"
  children = [\"Chapter3\", \"Chapter4\"]

Sidebar children resolve to <docs>/<section>/<child>.md.

Run 'blogcfg gen-config' to print the full declaration as a documented config.toml.")]
#[command(version)]
struct Cli {
    /// Directory holding an optional config.toml overlay
    #[arg(long, default_value = ".", global = true)]
    source: PathBuf,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Validate the configuration, and the chapter documents with --docs
    Check {
        /// Docs directory to resolve sidebar chapters against
        #[arg(long)]
        docs: Option<PathBuf>,
    },
    /// Print the configuration as the renderer reads it (JSON)
    Show,
    /// Print the navigation and sidebar outline
    Outline,
    /// Print the embedded configuration as a documented config.toml
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::Check { docs } => {
            let site = config::load_config(&cli.source)?;
            println!("==> Configuration is valid");
            println!("{}", output::format_check_summary(&site));
            if let Some(docs) = docs {
                println!("==> Checking documents in {}", docs.display());
                let report = documents::check_documents(&docs, &site)?;
                output::print_document_report(&report);
                if !report.is_ok() {
                    let missing = report.dangling().count();
                    return Err(format!("{missing} sidebar chapter(s) have no document").into());
                }
            }
        }
        Command::Show => {
            let site = config::load_config(&cli.source)?;
            println!("{}", export::render_json(&site)?);
        }
        Command::Outline => {
            let site = config::load_config(&cli.source)?;
            output::print_outline(&site);
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Log to stderr so `show` output stays pipeable. `RUST_LOG` wins over `-v`.
fn init_tracing(verbose: u8) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match verbose {
        0 => "blogcfg=warn",
        1 => "blogcfg=info",
        _ => "blogcfg=debug",
    };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
