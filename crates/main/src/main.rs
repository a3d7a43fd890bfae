use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use log::info;
use news_digest::input::load_articles;
use news_digest::renderer::DEFAULT_DOCUMENT_TITLE;
use news_digest::sample::sample_articles;
use news_digest::text::plain_text;
use news_digest::{ArticleRecord, DigestBuilder, FontChoice, LayoutConfig};

/// Renders summarized news articles to a paginated PDF or plain text.
///
/// The TrueType font is looked up in `NEWS_DIGEST_FONTS_DIR`, then `assets/fonts` next to the
/// binary, then `assets/fonts` in the library crate. Without one, the PDF built-in Helvetica is used.
#[derive(Parser)]
#[command(author, version, about = "Render news digests to PDF")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Args)]
struct PdfOptions {
    /// Title stored in the PDF metadata.
    #[arg(long, default_value = DEFAULT_DOCUMENT_TITLE)]
    title: String,

    /// JSON file overriding page size, margins, line height and gaps (points).
    #[arg(long)]
    layout: Option<PathBuf>,

    /// Directory containing Roboto-Regular.ttf.
    #[arg(long, env = "NEWS_DIGEST_FONTS_DIR")]
    fonts_dir: Option<PathBuf>,

    /// Use the built-in Helvetica font even when a TrueType font is available.
    #[arg(long)]
    builtin_font: bool,

    /// Add one bookmark per article.
    #[cfg(feature = "bookmarks")]
    #[arg(long)]
    bookmarks: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Render articles from a JSON file to PDF.
    Render {
        /// Array of article records or a `{"summaries": [...]}` response.
        #[arg(short, long)]
        input: PathBuf,

        #[arg(short, long, default_value = "digest.pdf")]
        output: PathBuf,

        #[command(flatten)]
        options: PdfOptions,
    },

    /// Render articles from a JSON file to plain text.
    Text {
        #[arg(short, long)]
        input: PathBuf,

        /// Write to this file instead of stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Render the built-in sample digest to PDF.
    Sample {
        #[arg(short, long, default_value = "sample_digest.pdf")]
        output: PathBuf,

        #[command(flatten)]
        options: PdfOptions,
    },
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let result: Result<(), Box<dyn Error>> = match cli.command {
        Commands::Render {
            input,
            output,
            options,
        } => load_articles(&input)
            .map_err(Into::into)
            .and_then(|articles| render_pdf(&articles, &output, &options)),
        Commands::Text { input, output } => render_text(&input, output.as_deref()),
        Commands::Sample { output, options } => {
            render_pdf(&sample_articles(), &output, &options)
        }
    };

    if let Err(err) = result {
        eprintln!("Error: {}", err);
        print_error_sources(err.as_ref());
        std::process::exit(1);
    }
}

fn render_pdf(
    articles: &[ArticleRecord],
    output: &Path,
    options: &PdfOptions,
) -> Result<(), Box<dyn Error>> {
    let mut builder = DigestBuilder::new().with_title(options.title.clone());

    if let Some(path) = &options.layout {
        let layout: LayoutConfig = serde_json::from_str(&fs::read_to_string(path)?)?;
        builder = builder.with_layout(layout);
    }
    if let Some(dir) = &options.fonts_dir {
        builder = builder.with_fonts_dir(dir);
    }
    if options.builtin_font {
        builder = builder.with_font(FontChoice::Builtin);
    }
    #[cfg(feature = "bookmarks")]
    {
        builder = builder.with_bookmarks(options.bookmarks);
    }

    let pdf = builder.build()?.render(articles)?;
    fs::write(output, &pdf.bytes)?;
    info!("wrote {}", output.display());
    println!(
        "Generated {} ({} pages, {} bytes)",
        output.display(),
        pdf.document.page_count(),
        pdf.bytes.len()
    );
    Ok(())
}

fn render_text(input: &Path, output: Option<&Path>) -> Result<(), Box<dyn Error>> {
    let articles = load_articles(input)?;
    let body = plain_text(&articles)?;
    match output {
        Some(path) => fs::write(path, body)?,
        None => print!("{}", body),
    }
    Ok(())
}

fn print_error_sources(mut error: &(dyn Error + 'static)) {
    while let Some(source) = error.source() {
        eprintln!("  caused by: {}", source);
        error = source;
    }
}
