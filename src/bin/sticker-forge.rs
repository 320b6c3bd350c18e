//! Command-line front end: render one photo file into a sticker PNG.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use sticker_forge::{StickerMaker, StickerProfile, StickerResult, StyleId};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "sticker-forge", version, about = "Turn a photo into a square PNG sticker")]
struct Cli {
    /// Input image (JPEG, PNG, WebP, ...)
    #[arg(required_unless_present = "list_styles")]
    input: Option<PathBuf>,

    /// Output PNG path
    #[arg(short, long, default_value = StickerResult::FILE_NAME)]
    output: PathBuf,

    /// Style slug or label (defaults to the profile's default style)
    #[arg(short, long)]
    style: Option<StyleId>,

    /// Canvas side in pixels (overrides the profile)
    #[arg(long)]
    side: Option<u32>,

    /// Chroma-key brightness threshold for the no-background style
    #[arg(long)]
    threshold: Option<u8>,

    /// JSON profile with pipeline settings
    #[arg(short, long)]
    profile: Option<PathBuf>,

    /// Print the available styles and exit
    #[arg(long)]
    list_styles: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if cli.list_styles {
        for style in StyleId::ALL {
            println!("{:<14} {}  ({})", style.slug(), style.label(), style.description());
        }
        return Ok(());
    }

    let mut profile = match &cli.profile {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read profile {}", path.display()))?;
            StickerProfile::from_json(&json)
                .with_context(|| format!("Failed to parse profile {}", path.display()))?
        }
        None => StickerProfile::default(),
    };
    if let Some(side) = cli.side {
        profile = profile.with_side(side);
    }
    if let Some(threshold) = cli.threshold {
        profile = profile.with_chroma_key_threshold(threshold);
    }

    let maker = StickerMaker::new(profile)?;
    let style = cli.style.unwrap_or(maker.default_style());

    let input = cli.input.context("No input image given")?;
    let bytes = std::fs::read(&input)
        .with_context(|| format!("Failed to read {}", input.display()))?;

    let sticker = maker.make_sticker(&bytes, style)?;
    std::fs::write(&cli.output, sticker.png())
        .with_context(|| format!("Failed to write {}", cli.output.display()))?;

    tracing::info!(
        input = %input.display(),
        output = %cli.output.display(),
        %style,
        "Wrote sticker"
    );
    Ok(())
}
