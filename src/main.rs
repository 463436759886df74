//! Binary entrypoint for photoprint.
//!
//! Lays a photo out on 4×6 paper and writes the page raster. Printing itself
//! is left to the system spooler; `--ticket` prints what it needs to know.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{ArgAction, Parser};
use tracing::{Level, info};
use tracing_subscriber::{EnvFilter, fmt};

use photoprint::render::{RenderOptions, render_page};
use photoprint::settings::{Settings, SettingsStore};
use photoprint::svg::render_layout_svg;
use photoprint::{PageSpec, ScaleMode, Size, compute_layout, compute_preview, source};

#[derive(Debug, Parser)]
#[command(name = "photoprint", version, about = "Lay out a photo for 4x6 printing")]
struct Cli {
    /// Photo to print
    #[arg(value_name = "IMAGE")]
    image: PathBuf,

    /// fill (crop to cover the page) or fit (whole photo with border)
    #[arg(short, long, value_name = "MODE")]
    mode: Option<ScaleMode>,

    /// Keep the sheet portrait, turning landscape photos instead
    #[arg(long, action = ArgAction::SetTrue)]
    forced_portrait: bool,

    /// Page raster output [default: <stem>-print.png]
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Also render a preview that fits in WxH pixels
    #[arg(long, value_name = "WxH", value_parser = parse_viewport)]
    preview: Option<Size>,

    /// Preview output [default: <stem>-preview.png]
    #[arg(long, value_name = "FILE", requires = "preview")]
    preview_output: Option<PathBuf>,

    /// Write a diagram of the layout
    #[arg(long, value_name = "FILE")]
    svg: Option<PathBuf>,

    /// Print the print ticket as JSON on stdout
    #[arg(long)]
    ticket: bool,

    /// Settings file [default: user config dir]
    #[arg(long, value_name = "FILE")]
    settings: Option<PathBuf>,

    /// Remember --mode and --forced-portrait for next time
    #[arg(long)]
    save: bool,

    /// Increase log verbosity (repeatable)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    verbose: u8,
}

fn init_tracing(verbosity: u8) -> Result<()> {
    let level = match verbosity {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    let filter = EnvFilter::from_default_env()
        .add_directive(format!("photoprint={level}").parse()?);
    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}

fn parse_viewport(s: &str) -> Result<Size, String> {
    let (w, h) = s
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WxH, got `{s}`"))?;
    let width: u32 = w.trim().parse().map_err(|_| format!("bad width `{w}`"))?;
    let height: u32 = h.trim().parse().map_err(|_| format!("bad height `{h}`"))?;
    if width == 0 || height == 0 {
        return Err(format!("viewport must be non-empty, got {width}x{height}"));
    }
    Ok(Size::new(width, height))
}

fn sibling(image: &Path, suffix: &str) -> PathBuf {
    let stem = image
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| String::from("photo"));
    image.with_file_name(format!("{stem}-{suffix}.png"))
}

fn settings_store(cli: &Cli) -> Result<SettingsStore> {
    match &cli.settings {
        Some(path) => Ok(SettingsStore::new(path)),
        None => SettingsStore::default_location().context("locating settings file"),
    }
}

fn apply_overrides(cli: &Cli, settings: &mut Settings) {
    if let Some(mode) = cli.mode {
        settings.last_scale_mode = mode;
    }
    if cli.forced_portrait {
        settings.forced_portrait = true;
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose)?;

    let store = settings_store(&cli)?;
    let mut settings = store.load();
    apply_overrides(&cli, &mut settings);
    if cli.save {
        store
            .save(&settings)
            .with_context(|| format!("saving settings to {}", store.path().display()))?;
        info!(path = %store.path().display(), "saved settings");
    }

    let photo = source::load(&cli.image)
        .with_context(|| format!("loading {}", cli.image.display()))?;
    let options = settings.layout_options();
    let page = PageSpec::PHOTO_4X6;
    let layout = compute_layout(&photo.descriptor, &page, options)
        .with_context(|| format!("laying out {}", cli.image.display()))?;
    info!(
        mode = %layout.mode,
        page = ?layout.page_orientation,
        rotation = layout.rotation_degrees(),
        crop = ?layout.source_crop,
        "layout ready"
    );

    let render_options = RenderOptions::for_quality(settings.quality);
    let output = cli.output.clone().unwrap_or_else(|| sibling(&cli.image, "print"));
    if output == cli.image {
        bail!("refusing to overwrite the source photo {}", output.display());
    }
    render_page(&photo.pixels, &layout, &render_options)?
        .save(&output)
        .with_context(|| format!("writing {}", output.display()))?;
    info!(path = %output.display(), "wrote print raster");

    if let Some(viewport) = cli.preview {
        let preview = compute_preview(&photo.descriptor, &page, options, viewport)?;
        let path = cli
            .preview_output
            .clone()
            .unwrap_or_else(|| sibling(&cli.image, "preview"));
        render_page(&photo.pixels, &preview, &render_options)?
            .save(&path)
            .with_context(|| format!("writing {}", path.display()))?;
        info!(path = %path.display(), dpi = preview.dpi, "wrote preview");
    }

    if let Some(path) = &cli.svg {
        fs::write(path, render_layout_svg(&layout))
            .with_context(|| format!("writing {}", path.display()))?;
        info!(path = %path.display(), "wrote layout diagram");
    }

    if cli.ticket {
        let ticket = settings.print_ticket(&layout);
        println!("{}", serde_json::to_string_pretty(&ticket)?);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn viewport_parsing() {
        assert_eq!(parse_viewport("600x400"), Ok(Size::new(600, 400)));
        assert_eq!(parse_viewport("600X400"), Ok(Size::new(600, 400)));
        assert!(parse_viewport("600").is_err());
        assert!(parse_viewport("0x400").is_err());
        assert!(parse_viewport("wide x tall").is_err());
    }

    #[test]
    fn output_names() {
        assert_eq!(
            sibling(Path::new("/tmp/IMG_0001.jpg"), "print"),
            PathBuf::from("/tmp/IMG_0001-print.png")
        );
    }

    #[test]
    fn cli_overrides_settings() {
        let cli = Cli::parse_from(["photoprint", "a.jpg", "--mode", "fit", "--forced-portrait"]);
        let mut settings = Settings::default();
        apply_overrides(&cli, &mut settings);
        assert_eq!(settings.last_scale_mode, ScaleMode::Fit);
        assert!(settings.forced_portrait);

        let cli = Cli::parse_from(["photoprint", "a.jpg"]);
        let mut settings = Settings {
            forced_portrait: true,
            ..Settings::default()
        };
        apply_overrides(&cli, &mut settings);
        assert!(settings.forced_portrait);
        assert_eq!(settings.last_scale_mode, ScaleMode::Fill);
    }
}
