//! playbox-gallery - Search Flickr photos by tag

use std::num::NonZeroU32;

use clap::Parser;
use libplaybox::gallery::{PhotoRecord, SearchResult, Size};
use libplaybox::{PlayboxError, PlayboxService, RequestParams, Result};

#[derive(Parser, Debug)]
#[command(name = "playbox-gallery")]
#[command(version, about = "Search Flickr photos by tag")]
#[command(long_about = r#"Search public Flickr photos by tag and print their image URLs.

EXAMPLES:
    # First page for the configured default tag
    playbox-gallery

    # Second page of "moon", 10 photos per page
    playbox-gallery moon --page 2 --per-page 10

    # Large images as JSON
    playbox-gallery nebula --size b --format json

CONFIGURATION:
    The api key is read from $PLAYBOX_FLICKR_API_KEY, or from the [flickr]
    section of the config file ($PLAYBOX_CONFIG or
    ~/.config/playbox/config.toml).

EXIT CODES:
    0 - Success
    1 - Configuration or api failure
    2 - Api key rejected (401/403)
    3 - Invalid input
"#)]
struct Cli {
    /// Tag to search for (defaults to gallery.default_tag)
    tag: Option<String>,

    /// Page number, starting at 1
    #[arg(short, long, default_value = "1", value_name = "N")]
    page: u32,

    /// Photos per page (defaults to gallery.per_page)
    #[arg(long, value_name = "N")]
    per_page: Option<u32>,

    /// Image size: z (640), c (800) or b (1024)
    #[arg(short, long, value_name = "SIZE")]
    size: Option<String>,

    /// Output format
    #[arg(short, long, default_value = "text", value_name = "FORMAT")]
    #[arg(value_parser = ["text", "json", "jsonl"])]
    format: String,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    libplaybox::logging::init_default(cli.verbose);

    if let Err(e) = run(cli).await {
        eprintln!("Error: {}", e);
        std::process::exit(e.exit_code());
    }
}

async fn run(cli: Cli) -> Result<()> {
    let service = PlayboxService::new()?;

    // Validate the request before touching credentials
    let tag = cli
        .tag
        .clone()
        .unwrap_or_else(|| service.config().gallery.default_tag.clone());
    let params = if cli.page == 1 {
        RequestParams::first(&tag)?
    } else {
        RequestParams::page(&tag, cli.page)?
    };
    let per_page = cli
        .per_page
        .map(|n| {
            NonZeroU32::new(n)
                .ok_or_else(|| PlayboxError::InvalidInput("Page size must be at least 1".to_string()))
        })
        .transpose()?;
    let size = cli
        .size
        .as_deref()
        .map(|s| s.parse::<Size>().map_err(PlayboxError::InvalidInput))
        .transpose()?;

    let mut use_case = service.gallery()?;
    if let Some(per_page) = per_page {
        use_case = use_case.with_per_page(per_page);
    }
    if let Some(size) = size {
        use_case = use_case.with_size(size);
    }

    tracing::debug!("Fetching {:?}", params);
    let result = use_case.get(params).await?;

    print!("{}", render(&result, &cli.format)?);
    Ok(())
}

fn render(result: &SearchResult, format: &str) -> Result<String> {
    match format {
        "json" => Ok(format!("{}\n", serde_json::to_string_pretty(result)?)),
        "jsonl" => {
            let mut output = String::new();
            for photo in &result.photos {
                output.push_str(&serde_json::to_string(photo)?);
                output.push('\n');
            }
            Ok(output)
        }
        _ => Ok(result.photos.iter().map(render_text).collect()),
    }
}

fn render_text(photo: &PhotoRecord) -> String {
    let title = if photo.title.is_empty() {
        "(untitled)"
    } else {
        photo.title.as_str()
    };
    format!("{} | {} | {}\n", photo.id, title, photo.url)
}
