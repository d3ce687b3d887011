//! # QR Studio CLI
//!
//! Command-line interface for generating styled QR code cards.
//!
//! ## Usage
//!
//! ```bash
//! # Export a card to ./qrcode.png
//! qrstudio export https://example.com
//!
//! # Themed card with badge and wrapped footer title
//! qrstudio export https://example.com --color "royal blue" \
//!     --badge NEW --title "Our spring catalog is here" --out cards/
//!
//! # Let the suggestion service pick a title (needs GEMINI_API_KEY)
//! qrstudio export https://example.com --suggest
//!
//! # Preview the symbol in the terminal, or write the SVG
//! qrstudio preview https://example.com
//! qrstudio preview https://example.com --svg preview.svg
//!
//! # Inspect the computed layout
//! qrstudio plan https://example.com --title "Hello" --badge AB
//!
//! # List theme colors
//! qrstudio themes
//! ```

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use qrstudio::{
    StudioError,
    config::{CardConfig, ConfigField, Features, PREDEFINED_THEMES},
    font::{BitmapTypeface, TtfTypeface, Typeface},
    logging,
    qr::{QrErrorLevel, QrSymbol},
    studio::{Studio, SuggestOutcome},
    suggest::{DEFAULT_MODEL, GeminiSuggester, SuggestionService},
};

/// QR Studio - styled QR code card generator
#[derive(Parser, Debug)]
#[command(name = "qrstudio")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Debug logging (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Render the card and save it as PNG
    Export {
        #[command(flatten)]
        card: CardArgs,

        /// Output directory
        #[arg(long, short, default_value = ".")]
        out: PathBuf,

        /// Ask the suggestion service for a title first
        #[arg(long)]
        suggest: bool,

        #[command(flatten)]
        service: ServiceArgs,
    },
    /// Show the QR symbol in the terminal or write it as SVG
    Preview {
        #[command(flatten)]
        card: CardArgs,

        /// Write SVG to this file instead of printing to the terminal
        #[arg(long, value_name = "FILE")]
        svg: Option<PathBuf>,
    },
    /// Print the computed layout plan as JSON
    Plan {
        #[command(flatten)]
        card: CardArgs,
    },
    /// Print a suggested title for the content
    Suggest {
        /// Content to label
        content: String,

        #[command(flatten)]
        service: ServiceArgs,
    },
    /// List predefined theme colors
    Themes,
}

#[derive(Args, Debug)]
struct CardArgs {
    /// Content to encode (usually a URL)
    content: String,

    /// Footer title
    #[arg(long, short, default_value = "")]
    title: String,

    /// Badge text drawn over the center of the symbol
    #[arg(long, short, default_value = "")]
    badge: String,

    /// Theme color: a theme name or hex value
    #[arg(long, short, default_value = "#000000")]
    color: String,

    /// Light module color for --themed-qr
    #[arg(long, default_value = "#ffffff")]
    bg_color: String,

    /// Preview size in pixels
    #[arg(long, default_value = "512")]
    size: u32,

    /// Preview quiet zone (0 disables it)
    #[arg(long, default_value = "4")]
    margin: u32,

    /// Error correction level
    #[arg(long, value_enum, default_value = "h")]
    ec_level: QrErrorLevel,

    /// Regular-weight TTF/OTF font (built-in bitmap font when omitted)
    #[arg(long, env = "QRSTUDIO_FONT")]
    font: Option<PathBuf>,

    /// Bold TTF/OTF font for the badge
    #[arg(long, env = "QRSTUDIO_FONT_BOLD")]
    font_bold: Option<PathBuf>,

    /// Static-label card: no badge, no wrapping, themed symbol
    #[arg(long)]
    basic: bool,

    /// Never draw the badge
    #[arg(long)]
    no_badge: bool,

    /// Single-line title in a fixed footer
    #[arg(long)]
    no_wrap: bool,

    /// Paint the symbol in the theme color on --bg-color
    #[arg(long)]
    themed_qr: bool,
}

#[derive(Args, Debug)]
struct ServiceArgs {
    /// Gemini API key
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Gemini model
    #[arg(long, default_value_t = DEFAULT_MODEL.to_string())]
    model: String,
}

impl CardArgs {
    fn features(&self) -> Features {
        let mut features = if self.basic {
            Features::basic()
        } else {
            Features::default()
        };
        if self.no_badge {
            features.badge = false;
        }
        if self.no_wrap {
            features.dynamic_wrap = false;
        }
        if self.themed_qr {
            features.themed_qr = true;
        }
        features
    }

    fn config(&self) -> Result<CardConfig, StudioError> {
        let mut config = CardConfig::default();
        for field in [
            ConfigField::Content(self.content.clone()),
            ConfigField::Title(self.title.clone()),
            ConfigField::CenterText(self.badge.clone()),
            ConfigField::Color(self.color.clone()),
            ConfigField::BgColor(self.bg_color.clone()),
            ConfigField::Size(self.size),
            ConfigField::Margin(self.margin),
            ConfigField::EcLevel(self.ec_level),
        ] {
            config.apply(field)?;
        }
        Ok(config)
    }

    fn typeface(&self) -> Result<Box<dyn Typeface>, StudioError> {
        match &self.font {
            Some(regular) => Ok(Box::new(TtfTypeface::load(
                regular,
                self.font_bold.as_deref(),
            )?)),
            None => Ok(Box::new(BitmapTypeface::new()?)),
        }
    }

    fn studio(&self) -> Result<Studio, StudioError> {
        Ok(Studio::with_config(self.config()?, self.typeface()?).features(self.features()))
    }
}

impl ServiceArgs {
    fn service(&self) -> Result<GeminiSuggester, StudioError> {
        let key = self.api_key.as_deref().ok_or_else(|| {
            StudioError::Config("No API key: pass --api-key or set GEMINI_API_KEY".to_string())
        })?;
        Ok(GeminiSuggester::new(key).with_model(&self.model))
    }
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), StudioError> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    match cli.command {
        Commands::Export {
            card,
            out,
            suggest,
            service,
        } => {
            let mut studio = card.studio()?;

            if suggest {
                let service = service.service()?;
                println!("Asking for a title suggestion...");
                match studio.suggest_title(&service).await {
                    SuggestOutcome::Applied(title) => println!("Suggested title: {}", title),
                    SuggestOutcome::Failed => println!("No suggestion, keeping current title"),
                    SuggestOutcome::Skipped => {}
                }
            }

            if !studio.can_export() {
                println!("Nothing to export: content is empty");
                return Ok(());
            }

            match studio.try_export().await {
                Some(export) => {
                    std::fs::create_dir_all(&out)?;
                    let path = export.save(&out)?;
                    tracing::info!(
                        width = export.width,
                        height = export.height,
                        bytes = export.png.len(),
                        "card exported"
                    );
                    println!("Saved to {}", path.display());
                }
                None => println!("Export aborted, nothing written"),
            }
        }

        Commands::Preview { card, svg } => {
            let studio = card.studio()?;
            match svg {
                Some(path) => match studio.preview_svg()? {
                    Some(markup) => {
                        std::fs::write(&path, markup)?;
                        println!("Saved to {}", path.display());
                    }
                    None => println!("Awaiting content"),
                },
                None => {
                    let config = studio.config();
                    if config.has_content() {
                        let symbol = QrSymbol::encode(&config.content, config.ec_level)?;
                        println!("{}", symbol.to_terminal());
                    } else {
                        println!("Awaiting content");
                    }
                }
            }
        }

        Commands::Plan { card } => {
            let plan = card.studio()?.plan();
            let json = serde_json::to_string_pretty(&plan)
                .map_err(|e| StudioError::Config(format!("Failed to serialize plan: {}", e)))?;
            println!("{}", json);
        }

        Commands::Suggest { content, service } => {
            let service = service.service()?;
            let title = service.suggest(&content).await?;
            println!("{}", title);
        }

        Commands::Themes => {
            println!("Available themes:");
            for theme in PREDEFINED_THEMES {
                println!("  {:<14} {}", theme.name, theme.color);
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_defaults_to_library_default() {
        let cli = Cli::try_parse_from(["qrstudio", "suggest", "https://example.com"]).unwrap();
        match cli.command {
            Commands::Suggest { service, .. } => assert_eq!(service.model, DEFAULT_MODEL),
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
