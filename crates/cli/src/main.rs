use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::Context;
use clap::Parser;
use owo_colors::OwoColorize;
use wikifold_core::{FetchConfig, SectionConfig, fetch_article, fetch_url, section_article_with_config};

mod echo;
use echo::{format_size, print_banner, print_info, print_step, print_success};

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Output format for sectioned articles
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Json,
    Text,
    Html,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "text" | "txt" => Ok(Self::Text),
            "html" => Ok(Self::Html),
            _ => Err(format!("Invalid format: {}. Valid options: json, text, html", s)),
        }
    }
}

/// Split Wikipedia articles into an infobox, intro, and named sections
#[derive(Parser, Debug)]
#[command(name = "wikifold")]
#[command(author = "Wikifold Contributors")]
#[command(version = VERSION)]
#[command(about = "Split Wikipedia articles into renderable sections", long_about = None)]
struct Args {
    /// Article title, URL to fetch, local HTML file, or "-" for stdin
    #[arg(value_name = "INPUT")]
    input: String,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Output format (json, text, html)
    #[arg(short, long, default_value = "json", value_name = "FORMAT")]
    format: OutputFormat,

    /// Wikipedia language edition for title lookups
    #[arg(short, long, default_value = "en", value_name = "LANG")]
    lang: String,

    /// HTTP timeout in seconds
    #[arg(long, default_value = "30", value_name = "SECS")]
    timeout: u64,

    /// Custom User-Agent for HTTP requests
    #[arg(long, value_name = "UA")]
    user_agent: Option<String>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if args.verbose {
        print_banner();
        print_info("Debug logging enabled");
        eprintln!();
    }

    let origin = format!("https://{}.wikipedia.org", args.lang);
    let fetch_config = FetchConfig {
        origin: origin.clone(),
        timeout: args.timeout,
        user_agent: args
            .user_agent
            .unwrap_or_else(|| "Mozilla/5.0 (compatible; Wikifold/1.0)".to_string()),
    };

    let (html, size) = if args.input == "-" {
        if args.verbose {
            print_step(1, 3, "Reading from stdin");
        }
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .context("Failed to read from stdin")?;
        let len = buffer.len();
        (buffer, len)
    } else if args.input.starts_with("http://") || args.input.starts_with("https://") {
        if args.verbose {
            print_step(
                1,
                3,
                &format!("Fetching from {}", args.input.bright_white().underline()),
            );
        }

        let content = fetch_url(&args.input, &fetch_config).await.context("Failed to fetch URL")?;
        let len = content.len();
        (content, len)
    } else if Path::new(&args.input).exists() {
        if args.verbose {
            print_step(1, 3, &format!("Reading from file {}", args.input.bright_white()));
        }
        let content =
            fs::read_to_string(&args.input).with_context(|| format!("Failed to read file: {}", args.input))?;
        let len = content.len();
        (content, len)
    } else {
        if args.verbose {
            print_step(
                1,
                3,
                &format!("Fetching article {}", args.input.bright_white().underline()),
            );
        }
        let content = fetch_article(&args.input, &fetch_config)
            .await
            .with_context(|| format!("Failed to fetch article: {}", args.input))?;
        let len = content.len();
        (content, len)
    };

    if args.verbose {
        eprintln!("  {} {}", "Size:".dimmed(), format_size(size).bright_white());
        eprintln!();
        print_step(2, 3, "Sectioning article");
    }

    let section_config = SectionConfig::builder().origin(&origin).build();
    let article = section_article_with_config(&html, &section_config).context("Failed to section article")?;

    if args.verbose {
        if let Some(title) = &article.meta.title {
            eprintln!("  {} {}", "Title:".dimmed(), title.bright_white());
        }
        eprintln!(
            "  {} {}",
            "Sections:".dimmed(),
            article.sections.len().to_string().bright_white()
        );
        eprintln!(
            "  {} {}",
            "Words:".dimmed(),
            article.word_count.to_string().bright_white()
        );
        eprintln!(
            "  {} {}",
            "Reading time:".dimmed(),
            format!("{:.1} min", article.reading_time).bright_white()
        );
        eprintln!();
        print_step(3, 3, "Writing output");
        eprintln!(
            "  {} {}",
            "Format:".dimmed(),
            format!("{:?}", args.format).bright_white()
        );
        eprintln!();
    }

    let output = match args.format {
        OutputFormat::Json => article.to_json().context("Failed to serialize article")?.to_string(),
        OutputFormat::Text => article.to_text(),
        OutputFormat::Html => article.to_html(),
    };

    match args.output {
        Some(path) => {
            fs::write(&path, output).with_context(|| format!("Failed to write to file: {}", path.display()))?;
            print_success(&format!("Output written to {}", path.display().bright_white()));
        }
        None => {
            println!("{}", output);
        }
    }

    Ok(())
}
