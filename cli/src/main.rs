//! pdfmark CLI - PDF bookmark tool

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;

use pdfmark::{BookmarkOptions, CountMode, DocumentModel, Metadata, PdfDocument, Report};

#[derive(Parser)]
#[command(name = "pdfmark")]
#[command(version)]
#[command(about = "Add, remove and export PDF bookmarks using indented text", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Add bookmarks from a text file to a PDF
    Add {
        /// Input PDF file
        #[arg(value_name = "PDF")]
        input: PathBuf,

        /// Bookmark text file (title and page number per line)
        #[arg(value_name = "BOOKMARKS")]
        bookmarks: PathBuf,

        /// Added to every page number in the bookmark file
        #[arg(
            long,
            env = "PDFMARK_PAGE_OFFSET",
            default_value_t = 0,
            allow_hyphen_values = true
        )]
        offset: i64,

        /// Output file (defaults to <name>_bookmark_added.pdf)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// How outline counts are computed
        #[arg(long, value_enum, default_value = "siblings")]
        count_mode: CountArg,

        /// Document title to store in the metadata
        #[arg(long)]
        title: Option<String>,

        /// Document author to store in the metadata
        #[arg(long)]
        author: Option<String>,
    },

    /// Remove all bookmarks from a PDF
    #[command(alias = "rm")]
    Remove {
        /// Input PDF file
        #[arg(value_name = "PDF")]
        input: PathBuf,

        /// Output file (defaults to <name>_bookmark_removed.pdf)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Indent numbered lines (1.2, 1.2.3) of a bookmark text file
    Indent {
        /// Bookmark text file
        #[arg(value_name = "BOOKMARKS")]
        bookmarks: PathBuf,

        /// Output file (defaults to <name>_indents_added.txt)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Print a PDF's bookmarks in the bookmark text format
    Show {
        /// Input PDF file
        #[arg(value_name = "PDF")]
        input: PathBuf,

        /// Output metadata and outline as JSON
        #[arg(long)]
        json: bool,

        /// Write to a file instead of stdout
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Show version information
    Version,
}

#[derive(Copy, Clone, PartialEq, Eq, Debug, ValueEnum)]
enum CountArg {
    /// Direct children per group
    Siblings,
    /// All descendants (strict viewer compatibility)
    Descendants,
}

impl From<CountArg> for CountMode {
    fn from(arg: CountArg) -> Self {
        match arg {
            CountArg::Siblings => CountMode::Siblings,
            CountArg::Descendants => CountMode::Descendants,
        }
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Add {
            input,
            bookmarks,
            offset,
            output,
            count_mode,
            title,
            author,
        }) => cmd_add(
            &input,
            &bookmarks,
            offset,
            output,
            count_mode,
            title,
            author,
        ),
        Some(Commands::Remove { input, output }) => cmd_remove(&input, output.as_deref()),
        Some(Commands::Indent { bookmarks, output }) => cmd_indent(&bookmarks, output.as_deref()),
        Some(Commands::Show {
            input,
            json,
            output,
        }) => cmd_show(&input, json, output.as_deref()),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            println!("{}", "Usage: pdfmark <COMMAND>".yellow());
            println!("       pdfmark --help for more information");
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn print_report(report: &Report) {
    println!("{} {}", "Done!".green().bold(), report);
}

fn cmd_add(
    input: &Path,
    bookmarks: &Path,
    offset: i64,
    output: Option<PathBuf>,
    count_mode: CountArg,
    title: Option<String>,
    author: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    log::debug!(
        "adding bookmarks from {} to {}",
        bookmarks.display(),
        input.display()
    );
    let mut options = BookmarkOptions::new()
        .with_page_offset(offset)
        .with_count_mode(count_mode.into());
    if let Some(path) = output {
        options = options.with_output(path);
    }

    let mut metadata = Metadata::new();
    if let Some(title) = title {
        metadata.set("Title", title);
    }
    if let Some(author) = author {
        metadata.set("Author", author);
    }
    if !metadata.is_empty() {
        options = options.with_metadata(metadata);
    }

    let report = pdfmark::add_bookmarks(input, bookmarks, &options)?;
    print_report(&report);
    println!("  {} {} bookmarks", "└─".dimmed(), report.entries);
    Ok(())
}

fn cmd_remove(input: &Path, output: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let report = pdfmark::remove_bookmarks(input, output)?;
    print_report(&report);
    Ok(())
}

fn cmd_indent(bookmarks: &Path, output: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let report = pdfmark::normalize_indents(bookmarks, output)?;
    print_report(&report);
    Ok(())
}

fn cmd_show(
    input: &Path,
    json: bool,
    output: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let doc = PdfDocument::open(input)?;
    let outline = doc.outline()?;

    let rendered = if json {
        serde_json::to_string_pretty(&serde_json::json!({
            "pdf_version": doc.version(),
            "pages": doc.page_count(),
            "metadata": doc.metadata(),
            "outline": outline,
        }))?
    } else {
        outline.to_bookmark_text()
    };

    if let Some(path) = output {
        fs::write(path, &rendered)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else if !json && outline.is_empty() {
        println!("{}", "No bookmarks found.".yellow());
    } else {
        print!("{}", rendered);
        if json {
            println!();
        }
    }

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "pdfmark".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("PDF bookmark tool");
    println!();
    println!("License: MIT");
}
