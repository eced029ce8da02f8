use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};
use famtree::commands::{export_json_command, render_command, summary_command, RenderArgs};
use famtree::init_logging;

/// Genealogy report generator.
///
/// This CLI is a thin wrapper around `famtree-core` (exposed in code as
/// `famtree_core`). All substantive logic lives in the library.
#[derive(Parser, Debug)]
#[command(
    name = "famtree",
    version,
    about = "Turn a GEDCOM file into a static HTML family tree report",
    long_about = None
)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug). `RUST_LOG` overrides this.
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render the family tree as a static HTML report.
    Render {
        /// GEDCOM file (`.ged`) or pre-parsed record graph (`.json`).
        #[arg(short, long)]
        file: String,

        /// Family name shown in the report title.
        #[arg(short, long)]
        name: Option<String>,

        /// Show each person's families inside their own entry.
        #[arg(long, default_value_t = false)]
        family_inline: bool,

        /// Omit the separate section listing every family.
        #[arg(long = "no-family-section", action = ArgAction::SetFalse)]
        family_section: bool,

        /// Optional report config file (yaml, yml or json).
        #[arg(long)]
        config: Option<String>,

        /// Output HTML path. Defaults to `output.html` in the current directory.
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Write the normalized family tree as JSON.
    ExportJson {
        /// GEDCOM file (`.ged`) or pre-parsed record graph (`.json`).
        #[arg(short, long)]
        file: String,

        /// Output path. Prints to stdout when omitted.
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Show counts and skipped references for an input file.
    Summary {
        /// GEDCOM file (`.ged`) or pre-parsed record graph (`.json`).
        #[arg(short, long)]
        file: String,

        /// Emit JSON instead of human-readable text.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::Render { file, name, family_inline, family_section, config, output } => {
            let args = RenderArgs { file, name, family_inline, family_section, config, output };
            render_command(&args)?;
        }
        Command::ExportJson { file, output } => export_json_command(&file, output.as_deref())?,
        Command::Summary { file, json } => summary_command(&file, json)?,
    }

    Ok(())
}
