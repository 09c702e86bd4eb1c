use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "swot")]
#[command(version, about = "Turn study material into exam revision notes")]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Save a note directly, without calling the generation upstream
    Add {
        /// Note title
        title: String,

        /// Note content (or use --stdin)
        #[arg(allow_hyphen_values = true)]
        content: Option<String>,

        /// Provenance of the material (ocr, text)
        #[arg(long, default_value = "text")]
        source: String,

        /// Read content from stdin
        #[arg(long)]
        stdin: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Generate a note from study material via the AI upstream
    Generate {
        /// Raw study text (or use --file / --stdin / --image)
        text: Option<String>,

        /// Read study text from a file
        #[arg(long, short = 'f')]
        file: Option<PathBuf>,

        /// Read study text from stdin
        #[arg(long)]
        stdin: bool,

        /// Photographed study material (can be specified multiple times)
        #[arg(long = "image", short = 'i')]
        images: Vec<PathBuf>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List saved notes, newest first
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show a single note by id (full UUID or prefix)
    Show {
        id: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Delete a note by id
    Delete {
        id: String,

        /// Skip the confirmation prompt
        #[arg(long)]
        force: bool,
    },

    /// Export a note as Markdown (default) or HTML
    Export {
        id: String,

        /// Export as a standalone HTML document
        #[arg(long)]
        html: bool,

        /// Output directory
        #[arg(long, default_value = ".")]
        out: PathBuf,
    },

    /// Show or set the theme preference (light, dark, system)
    Theme {
        mode: Option<String>,
    },

    /// Run the generation proxy server
    Serve {
        /// Port to listen on
        #[arg(long, default_value_t = 3000)]
        port: u16,
    },
}
