//! mediagrab CLI - resolve post URLs to media, or serve the download API

mod server;

use clap::{Parser, Subcommand, ValueEnum};
use mediagrab::{DownloadRequest, Downloader, ExtractionResult, USAGE_LLMTXT};
use std::io::{self, Write};
use std::net::SocketAddr;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// Output format for extract subcommand
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum OutputFormat {
    /// Markdown with YAML frontmatter
    #[default]
    Md,
    /// JSON format
    Json,
}

/// mediagrab - Open Graph media extraction for public post pages
#[derive(Parser, Debug)]
#[command(name = "mediagrab")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Print full help with examples (llmtxt)
    #[arg(long)]
    llmtxt: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Serve POST /api/download over HTTP
    Serve {
        /// Address to bind
        #[arg(long, env = "MEDIAGRAB_HOST", default_value = "127.0.0.1")]
        host: String,

        /// Port to bind
        #[arg(long, short, env = "MEDIAGRAB_PORT", default_value_t = 3000)]
        port: u16,

        #[command(flatten)]
        fetch: FetchArgs,
    },
    /// Resolve a post URL and print the media metadata
    Extract {
        /// Post URL
        url: String,

        /// Output format
        #[arg(long, short, default_value = "md")]
        output: OutputFormat,

        #[command(flatten)]
        fetch: FetchArgs,
    },
}

/// Options shared by every command that fetches pages
#[derive(clap::Args, Debug)]
struct FetchArgs {
    /// Custom User-Agent
    #[arg(long, env = "MEDIAGRAB_USER_AGENT")]
    user_agent: Option<String>,

    /// Custom Accept-Language
    #[arg(long, env = "MEDIAGRAB_ACCEPT_LANGUAGE")]
    accept_language: Option<String>,

    /// Upstream request timeout in seconds
    #[arg(long, env = "MEDIAGRAB_TIMEOUT_SECS", default_value_t = 30)]
    timeout_secs: u64,
}

impl FetchArgs {
    fn downloader(self) -> Downloader {
        let mut builder = Downloader::builder().timeout(Duration::from_secs(self.timeout_secs));
        if let Some(ua) = self.user_agent {
            builder = builder.user_agent(ua);
        }
        if let Some(lang) = self.accept_language {
            builder = builder.accept_language(lang);
        }
        builder.build()
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    // Handle --llmtxt flag
    if cli.llmtxt {
        writeln_safe(USAGE_LLMTXT);
        std::process::exit(0);
    }

    match cli.command {
        Some(Commands::Serve { host, port, fetch }) => {
            run_serve(&host, port, fetch.downloader()).await;
        }
        Some(Commands::Extract { url, output, fetch }) => {
            run_extract(&url, output, fetch.downloader()).await;
        }
        None => {
            eprintln!("Usage: mediagrab extract <URL>");
            eprintln!("   or: mediagrab serve");
            eprintln!("   or: mediagrab --help");
            std::process::exit(1);
        }
    }
}

async fn run_serve(host: &str, port: u16, downloader: Downloader) {
    let addr: SocketAddr = match format!("{}:{}", host, port).parse() {
        Ok(addr) => addr,
        Err(e) => {
            eprintln!("Error: invalid bind address {}:{}: {}", host, port, e);
            std::process::exit(1);
        }
    };

    if let Err(e) = server::run_server(addr, downloader).await {
        eprintln!("Error: server failed: {}", e);
        std::process::exit(1);
    }
}

async fn run_extract(url: &str, output: OutputFormat, downloader: Downloader) {
    match downloader.execute(DownloadRequest::new(url)).await {
        Ok(result) => match output {
            OutputFormat::Md => writeln_safe(&format_md_with_frontmatter(&result)),
            OutputFormat::Json => {
                let json = serde_json::to_string_pretty(&mediagrab::DownloadResponse::from(result))
                    .unwrap_or_else(|e| {
                        eprintln!("Error serializing response: {}", e);
                        std::process::exit(1);
                    });
                writeln_safe(&json);
            }
        },
        Err(e) => {
            eprintln!("Error: {} ({})", e.user_message(), e);
            std::process::exit(1);
        }
    }
}

/// Format result as markdown with YAML frontmatter
fn format_md_with_frontmatter(result: &ExtractionResult) -> String {
    let mut output = String::new();

    output.push_str("---\n");
    output.push_str(&format!("type: {}\n", result.media_type));
    output.push_str(&format!("url: {}\n", result.media_url));
    if let Some(ref thumbnail) = result.thumbnail_url {
        output.push_str(&format!("thumbnail: {}\n", thumbnail));
    }
    output.push_str("---\n");
    output.push_str(&format!("# {}\n\n", result.title));
    output.push_str(&format!("[Download {}]({})", result.media_type, result.media_url));

    output
}

/// Write to stdout, exit silently on broken pipe
fn writeln_safe(s: &str) {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    if let Err(e) = writeln!(handle, "{}", s) {
        if e.kind() == io::ErrorKind::BrokenPipe {
            std::process::exit(0);
        }
        eprintln!("Error writing to stdout: {}", e);
        std::process::exit(1);
    }
}
