use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "textra", version, about = "Translate selected text into an overlay")]
pub struct Cli {
    /// JSON config profile, the platform config dir is used when omitted
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Preferences file holding the input/output language pair
    #[arg(long, global = true)]
    pub preferences: Option<PathBuf>,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Speak the JSON-lines host protocol on stdin/stdout
    Host,
    /// Translate TEXT, or stdin when TEXT is omitted
    Translate(TranslateArgs),
    /// List supported language codes
    Languages,
    /// Show or change the stored language pair
    Prefs {
        #[command(subcommand)]
        action: PrefsAction,
    },
}

#[derive(Debug, Args)]
pub struct TranslateArgs {
    /// Source language, stored preference when omitted
    #[arg(long)]
    pub from: Option<String>,
    /// Target language, stored preference when omitted
    #[arg(long)]
    pub to: Option<String>,
    pub text: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum PrefsAction {
    Show,
    Set {
        #[arg(long)]
        input: Option<String>,
        #[arg(long)]
        output: Option<String>,
    },
}
