use clap::{Parser, Subcommand, ValueEnum};
use site_assets::config::{self, SiteConfig, SitePaths};
use site_assets::convert::{self, ConvertOptions};
use site_assets::imaging::{MagickBackend, MaxEdge, Quality, RustBackend};
use site_assets::thumbnails::{self, ThumbnailOptions};
use site_assets::{cad, gallery, logging, output};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "site-assets")]
#[command(about = "Maintenance jobs for a static site's image and CAD assets")]
#[command(long_about = "\
Maintenance jobs for a static site's image and CAD assets

Site layout (all paths configurable in site-assets.toml):

  site/
  ├── site-assets.toml             # Optional config, layered over the defaults
  ├── images/
  │   ├── projects/                # Section: any depth of subdirectories
  │   │   ├── deck/IMG_0412.HEIC   # convert-heic writes IMG_0412.jpg beside it
  │   │   └── deck/IMG_0412.jpg
  │   ├── boats/
  │   ├── fabrication/
  │   └── _thumbs/                 # thumbnails mirrors each section here
  │       └── projects/deck/IMG_0412.jpg
  ├── docs/cad/                    # Flat directory of CAD PDFs
  └── data/
      ├── gallery.json             # Written by `gallery`
      └── cad.json                 # Written by `cad`

Typical run after dropping new phone photos into a section:

  site-assets convert-heic --update-gallery
  site-assets thumbnails
  site-assets gallery

Exit status: 0 on success, 2 if any file failed, 1 on a fatal error.

Run 'site-assets gen-config' to generate a documented site-assets.toml.")]
#[command(version)]
struct Cli {
    /// Site root directory
    #[arg(long, default_value = ".", global = true)]
    root: PathBuf,

    /// Config file (default: <root>/site-assets.toml if present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Show debug diagnostics on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Convert HEIC/HEIF photos to JPEG copies
    ConvertHeic(ConvertArgs),
    /// Generate JPEG thumbnails mirroring the section tree
    Thumbnails(ThumbnailArgs),
    /// Write the gallery manifest
    Gallery(ManifestArgs),
    /// Write the CAD manifest
    Cad(ManifestArgs),
    /// Print a stock site-assets.toml with all options documented
    GenConfig,
}

#[derive(clap::Args)]
struct ConvertArgs {
    /// Sections to scan (default: gallery.sections)
    #[arg(long, num_args = 1..)]
    sections: Vec<String>,

    /// JPEG quality, clamped to 1-100 (default: convert.quality)
    #[arg(long, allow_negative_numbers = true)]
    quality: Option<i64>,

    /// Overwrite existing JPG files
    #[arg(long)]
    overwrite: bool,

    /// Delete source HEIC/HEIF files after successful conversion
    #[arg(long)]
    delete_original: bool,

    /// Show what would convert without writing files
    #[arg(long)]
    dry_run: bool,

    /// Regenerate the gallery manifest afterwards
    #[arg(long)]
    update_gallery: bool,
}

#[derive(clap::Args)]
struct ThumbnailArgs {
    /// Sections to scan (default: gallery.sections)
    #[arg(long, num_args = 1..)]
    sections: Vec<String>,

    /// Longest edge in pixels, clamped to 200-2000 (default: thumbnails.max_size)
    #[arg(long, allow_negative_numbers = true)]
    max_size: Option<i64>,

    /// JPEG quality, clamped to 1-100 (default: thumbnails.quality)
    #[arg(long, allow_negative_numbers = true)]
    quality: Option<i64>,

    /// Overwrite existing thumbnails
    #[arg(long)]
    overwrite: bool,

    /// Show what would be generated without writing files
    #[arg(long)]
    dry_run: bool,

    /// Image backend
    #[arg(long, value_enum, default_value_t = BackendChoice::Rust)]
    backend: BackendChoice,
}

#[derive(clap::Args)]
struct ManifestArgs {
    /// Output file (default: from config, relative to the site root)
    #[arg(long)]
    output: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
enum BackendChoice {
    /// Built-in decoders (no HEIC)
    Rust,
    /// ImageMagick `magick` CLI
    Magick,
}

fn main() -> ExitCode {
    // Usage errors exit 1; 2 is reserved for per-file failures.
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return if e.use_stderr() {
                ExitCode::from(1)
            } else {
                ExitCode::SUCCESS
            };
        }
    };
    logging::init_logging(cli.verbose);

    match run(cli) {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::from(1)
        }
    }
}

fn run(cli: Cli) -> Result<u8, Box<dyn std::error::Error>> {
    if let Command::GenConfig = cli.command {
        print!("{}", config::stock_config_toml());
        return Ok(0);
    }

    let site_config = config::load_config(&cli.root, cli.config.as_deref())?;
    let paths = SitePaths::new(&cli.root, &site_config.paths);

    match cli.command {
        Command::ConvertHeic(args) => {
            let options = convert_options(&site_config, args);
            let run = convert::convert_heic(&MagickBackend::new(), &site_config, &paths, &options)?;
            output::print_convert_report(&run.report);
            if let Some(gallery) = &run.gallery {
                let written = paths.site_relative(paths.gallery_manifest());
                output::print_gallery_written(&written, gallery);
            }
            Ok(run.report.summary().exit_code())
        }
        Command::Thumbnails(args) => {
            let backend = args.backend;
            let options = thumbnail_options(&site_config, args);
            let report = match backend {
                BackendChoice::Rust => {
                    thumbnails::generate_thumbnails(&RustBackend::new(), &site_config, &paths, &options)
                }
                BackendChoice::Magick => thumbnails::generate_thumbnails(
                    &MagickBackend::new(),
                    &site_config,
                    &paths,
                    &options,
                ),
            };
            output::print_thumbnail_report(&report);
            Ok(report.summary().exit_code())
        }
        Command::Gallery(args) => {
            let target = manifest_target(args.output, paths.gallery_manifest());
            let gallery = gallery::generate_gallery(&site_config, &paths, &target)?;
            output::print_gallery_written(&paths.site_relative(&target), &gallery);
            Ok(0)
        }
        Command::Cad(args) => {
            let target = manifest_target(args.output, paths.cad_manifest());
            let cad = cad::generate_cad(&site_config, &paths, &target)?;
            output::print_cad_written(&paths.site_relative(&target), &cad);
            Ok(0)
        }
        Command::GenConfig => Ok(0),
    }
}

fn convert_options(config: &SiteConfig, args: ConvertArgs) -> ConvertOptions {
    let mut options = ConvertOptions::from_config(config);
    if !args.sections.is_empty() {
        options.sections = args.sections;
    }
    if let Some(quality) = args.quality {
        options.quality = Quality::saturating(quality);
    }
    options.overwrite = args.overwrite;
    options.delete_original = args.delete_original;
    options.dry_run = args.dry_run;
    options.update_gallery = args.update_gallery;
    options
}

fn thumbnail_options(config: &SiteConfig, args: ThumbnailArgs) -> ThumbnailOptions {
    let mut options = ThumbnailOptions::from_config(config);
    if !args.sections.is_empty() {
        options.sections = args.sections;
    }
    if let Some(max_size) = args.max_size {
        options.max_edge = MaxEdge::saturating(max_size);
    }
    if let Some(quality) = args.quality {
        options.quality = Quality::saturating(quality);
    }
    options.overwrite = args.overwrite;
    options.dry_run = args.dry_run;
    options
}

/// `--output` wins over the configured manifest path.
fn manifest_target(explicit: Option<PathBuf>, configured: &Path) -> PathBuf {
    explicit.unwrap_or_else(|| configured.to_path_buf())
}
