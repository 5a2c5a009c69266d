use clap::{ArgAction, Parser, Subcommand};
use unitypkg_archive::{ExtractOptions, SanitizeRules};
use unitypkg_fs::FallbackStrategy;

mod extract;
mod view;

pub use extract::Extract;
pub use view::View;

pub const USAGE: &str = "USAGE: unitypkg extract <ARCHIVE> [OUTPUT]\n       unitypkg view <ARCHIVE>";

#[derive(Debug, Parser)]
#[command(name = "unitypkg", version, about = "Extract or list the assets of a .unitypackage")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// More log output (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count, conflicts_with = "quiet")]
    pub verbose: u8,

    /// Only log warnings and errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Filename rules for the destination platform
    #[arg(long, global = true, value_name = "RULES", default_value = "host")]
    pub rules: SanitizeRules,

    /// Fail instead of copying when a move crosses devices
    #[arg(long, global = true)]
    pub no_copy_fallback: bool,
}

impl Cli {
    pub fn options(&self) -> ExtractOptions {
        let fallback = if self.no_copy_fallback {
            FallbackStrategy::Error
        } else {
            FallbackStrategy::Copy
        };
        ExtractOptions::new().rules(self.rules).fallback(fallback)
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Extract every asset into OUTPUT, rebuilding the original folder layout
    #[command(visible_alias = "x")]
    Extract(Extract),
    /// List the destination path of every asset without extracting
    #[command(visible_aliases = ["ls", "list"])]
    View(View),
}
