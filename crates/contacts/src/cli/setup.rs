use clap::{Parser, Subcommand, ValueEnum};
use contactsapp::commands::export::ExportFormat;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "contacts",
    bin_name = "contacts",
    version,
    disable_help_subcommand = true
)]
#[command(about = "Manage contacts on a REST contacts backend", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Backend base URL (overrides config and CONTACTS_API_URL)
    #[arg(long, global = true, help_heading = "Options")]
    pub api_url: Option<String>,

    /// Verbose output
    #[arg(short, long, global = true, help_heading = "Options")]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List contacts, newest first
    #[command(alias = "ls", display_order = 1)]
    List {
        /// Filter by name (case-insensitive substring)
        #[arg(short, long)]
        search: Option<String>,

        /// Show only favourites
        #[arg(short, long, conflicts_with = "all")]
        favourites: bool,

        /// Show favourites and non-favourites
        #[arg(long)]
        all: bool,

        /// Page to show (starting at 1)
        #[arg(short, long)]
        page: Option<usize>,
    },

    /// Show the next page of the current list
    #[command(display_order = 2)]
    Next,

    /// Show the previous page of the current list
    #[command(display_order = 3)]
    Prev,

    /// Show one contact
    #[command(alias = "v", display_order = 10)]
    View {
        /// Contact id
        id: String,
    },

    /// Create a contact
    #[command(alias = "n", display_order = 11)]
    Add {
        #[arg(long)]
        name: String,

        #[arg(long)]
        email: String,

        /// Format XXX-XXX-XXXX
        #[arg(long)]
        phone: String,

        #[arg(long)]
        address: String,

        /// Mark as favourite
        #[arg(long)]
        favourite: bool,
    },

    /// Change fields of a contact, keeping the others
    #[command(alias = "e", display_order = 12)]
    Edit {
        /// Contact id
        id: String,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        email: Option<String>,

        /// Format XXX-XXX-XXXX
        #[arg(long)]
        phone: Option<String>,

        #[arg(long)]
        address: Option<String>,

        #[arg(long)]
        favourite: Option<bool>,
    },

    /// Delete a contact
    #[command(alias = "rm", display_order = 13)]
    Delete {
        /// Contact id
        id: String,
    },

    /// Mark one or more contacts as favourite
    #[command(display_order = 14)]
    Fav {
        /// Contact ids
        #[arg(required = true, num_args = 1..)]
        ids: Vec<String>,
    },

    /// Remove the favourite mark from one or more contacts
    #[command(display_order = 15)]
    Unfav {
        /// Contact ids
        #[arg(required = true, num_args = 1..)]
        ids: Vec<String>,
    },

    /// Export the current list (all pages) to contacts.csv or contacts.vcf
    #[command(display_order = 20)]
    Export {
        format: ExportFormatArg,

        /// Directory to write into (defaults to the current directory)
        #[arg(long)]
        dir: Option<PathBuf>,
    },

    /// Clear the search and favourites filter
    #[command(display_order = 30)]
    Reset,

    /// Switch between light and dark output
    #[command(display_order = 31)]
    Theme { theme: ThemeArg },

    /// Show the resolved configuration
    #[command(display_order = 32)]
    Config,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum ExportFormatArg {
    Csv,
    Vcf,
}

impl From<ExportFormatArg> for ExportFormat {
    fn from(arg: ExportFormatArg) -> Self {
        match arg {
            ExportFormatArg::Csv => ExportFormat::Csv,
            ExportFormatArg::Vcf => ExportFormat::Vcf,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum ThemeArg {
    Light,
    Dark,
}

pub fn parse_cli() -> Cli {
    Cli::parse()
}
