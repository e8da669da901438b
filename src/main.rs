use std::path::PathBuf;

use chrono::Utc;
use clap::{Parser as ClapParser, Subcommand};
use color_eyre::eyre::{bail, eyre, Result, WrapErr};
use tracing_subscriber::EnvFilter;

use palettegen::color::{is_valid_color, to_canonical_hex};
use palettegen::config::{Settings, STORE_ENV};
use palettegen::export::raster::{self, DEFAULT_HEIGHT, DEFAULT_WIDTH};
use palettegen::export::{self as exporter, JsonFormatter, PaletteFormatter, TextFormatter};
use palettegen::generator::{generate_harmony_palette, generate_random_palette, Palette};
use palettegen::storage::library::{SavedPalette, Theme};

#[derive(ClapParser, Debug)]
#[command(name = "palettegen", about = "Generate, save and export color palettes")]
struct Cli {
    /// Directory holding saved palettes (defaults to ~/.palettegen).
    #[arg(long, global = true, env = STORE_ENV)]
    store: Option<PathBuf>,

    /// Seed the random generator for reproducible palettes.
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Reject unknown harmony names instead of falling back to analogous.
    #[arg(long, global = true)]
    strict: bool,

    /// Print without terminal colors.
    #[arg(long, global = true)]
    plain: bool,

    /// More log output on stderr (-v info, -vv debug). RUST_LOG overrides.
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Five random colors.
    Random,

    /// Derive a palette from a seed color.
    Harmony {
        /// Seed color: hex, rgb(), hsl() or a CSS color name.
        seed: String,

        /// analogous, triadic, complementary, monochromatic or splitComplement.
        #[arg(short = 'H', long, default_value = "analogous")]
        harmony: String,
    },

    /// Check whether a string is a readable color.
    Validate { input: String },

    /// Print the canonical hex form of a color (#000000 when unreadable).
    Hex { input: String },

    /// Save five colors as a favorite.
    Save {
        #[arg(num_args = 5, required = true)]
        colors: Vec<String>,
    },

    /// List saved palettes, newest first.
    List,

    /// Delete a saved palette by id.
    Delete { id: u64 },

    /// Report whether five colors are already saved.
    Check {
        #[arg(num_args = 5, required = true)]
        colors: Vec<String>,
    },

    /// Export five colors, or a saved palette, as JSON and/or PNG.
    /// With neither --json nor --png the JSON document goes to stdout.
    Export {
        #[arg(num_args = 5, required_unless_present = "id")]
        colors: Vec<String>,

        /// Export a saved palette instead of colors given on the command line.
        #[arg(long, conflicts_with = "colors")]
        id: Option<u64>,

        /// Write the JSON document, optionally to a specific path.
        #[arg(long, num_args = 0..=1)]
        json: Option<Option<PathBuf>>,

        /// Write a PNG image, optionally to a specific path.
        #[arg(long, num_args = 0..=1)]
        png: Option<Option<PathBuf>>,

        #[arg(long, default_value_t = DEFAULT_WIDTH)]
        width: u32,

        #[arg(long, default_value_t = DEFAULT_HEIGHT)]
        height: u32,
    },

    /// Show or change the saved theme preference.
    Theme { theme: Option<Theme> },

    /// Delete all saved palettes and preferences.
    Clear,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let settings = Settings {
        store: cli.store,
        strict_harmony: cli.strict,
        seed: cli.seed,
    };
    let text = TextFormatter {
        plain: cli.plain,
        ..TextFormatter::default()
    };

    match cli.command {
        Command::Random => {
            let palette = generate_random_palette(&mut settings.random_source());
            print!("{}", text.format(&palette)?);
        }
        Command::Harmony { seed, harmony } => {
            let harmony = settings.harmony(&harmony)?;
            let palette = generate_harmony_palette(&seed, harmony, &mut settings.random_source())?;
            println!("{harmony} from {}", to_canonical_hex(&seed));
            print!("{}", text.format(&palette)?);
        }
        Command::Validate { input } => {
            let verdict = if is_valid_color(&input) { "valid" } else { "invalid" };
            println!("{verdict}");
        }
        Command::Hex { input } => println!("{}", to_canonical_hex(&input)),
        Command::Save { colors } => {
            let palette = Palette::from_codes(&colors)?;
            let library = settings.library()?;
            if library.is_saved(&palette.hex_codes()) {
                println!("Already saved.");
            } else {
                let saved = library.save(&palette)?;
                println!("Saved palette {}.", saved.id);
            }
        }
        Command::List => {
            let saved = settings.library()?.list();
            print_saved(&saved, &text);
        }
        Command::Delete { id } => {
            if settings.library()?.delete(id)? {
                println!("Deleted palette {id}.");
            } else {
                bail!("No saved palette with id {id}");
            }
        }
        Command::Check { colors } => {
            let palette = Palette::from_codes(&colors)?;
            let saved = settings.library()?.is_saved(&palette.hex_codes());
            println!("{}", if saved { "saved" } else { "not saved" });
        }
        Command::Export {
            colors,
            id,
            json,
            png,
            width,
            height,
        } => {
            let (palette, saved_id) = match id {
                Some(id) => {
                    let saved = settings
                        .library()?
                        .get(id)
                        .ok_or_else(|| eyre!("No saved palette with id {id}"))?;
                    let palette = saved
                        .palette()
                        .wrap_err_with(|| format!("Saved palette {id} is damaged"))?;
                    (palette, Some(id))
                }
                None => (Palette::from_codes(&colors)?, None),
            };
            export(&palette, saved_id, json, png, width, height)?;
        }
        Command::Theme { theme } => {
            let library = settings.library()?;
            match theme {
                Some(theme) => {
                    library.set_theme(theme)?;
                    println!("Theme set to {theme}.");
                }
                None => println!("{}", library.theme()),
            }
        }
        Command::Clear => {
            settings.library()?.clear()?;
            println!("Cleared all saved data.");
        }
    }

    Ok(())
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn export(
    palette: &Palette,
    saved_id: Option<u64>,
    json: Option<Option<PathBuf>>,
    png: Option<Option<PathBuf>>,
    width: u32,
    height: u32,
) -> Result<()> {
    let now = Utc::now();

    if json.is_none() && png.is_none() {
        let formatter = JsonFormatter {
            exported_at: Some(now),
        };
        println!("{}", formatter.format(palette)?);
        return Ok(());
    }

    if let Some(path) = json {
        let path = path.unwrap_or_else(|| {
            PathBuf::from(match saved_id {
                Some(id) => exporter::saved_file_name(id),
                None => exporter::default_file_name("json", now),
            })
        });
        exporter::write_json(palette, now, &path)?;
        println!("Wrote {}", path.display());
    }

    if let Some(path) = png {
        let path = path.unwrap_or_else(|| PathBuf::from(exporter::default_file_name("png", now)));
        raster::write_png(palette, width, height, &path)?;
        println!("Wrote {}", path.display());
    }

    Ok(())
}

fn print_saved(saved: &[SavedPalette], text: &TextFormatter) {
    println!("Saved palettes ({})", saved.len());
    println!();

    for entry in saved {
        let strip = match entry.palette() {
            Ok(palette) => text.strip(&palette),
            Err(e) => {
                tracing::warn!(id = entry.id, error = %e, "skipping swatch for damaged palette");
                String::new()
            }
        };
        println!(
            "  {:<14} {}  {} {}",
            entry.id,
            entry.created_at.format("%Y-%m-%d %H:%M"),
            entry.colors.join(" "),
            strip,
        );
    }
}
