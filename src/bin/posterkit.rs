use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use sha2::Digest as _;

#[derive(Parser, Debug)]
#[command(name = "posterkit", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Composite a photo and a name into a poster PNG.
    Generate(GenerateArgs),
    /// List built-in layouts.
    Layouts,
    /// Print a built-in layout as JSON, as a starting point for a custom one.
    DumpLayout(DumpLayoutArgs),
}

#[derive(Parser, Debug)]
struct GenerateArgs {
    /// Name to print on the poster.
    #[arg(long)]
    name: String,

    /// Photo to place in the frame (PNG, JPEG, WebP, ...).
    #[arg(long)]
    photo: PathBuf,

    /// Built-in layout name or path to a layout JSON file.
    #[arg(long, default_value = "workshop")]
    layout: String,

    /// Template image (raster or SVG) replacing the built-in artwork.
    #[arg(long)]
    template: Option<PathBuf>,

    /// Output PNG path, or a directory to write the default file name into.
    #[arg(long, default_value = ".")]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct DumpLayoutArgs {
    /// Built-in layout name.
    preset: String,
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();
    match cli.cmd {
        Command::Generate(args) => cmd_generate(args),
        Command::Layouts => cmd_layouts(),
        Command::DumpLayout(args) => cmd_dump_layout(args),
    }
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn cmd_generate(args: GenerateArgs) -> anyhow::Result<()> {
    let layout = resolve_layout(&args.layout)?;
    let source = match &args.template {
        Some(path) => posterkit::TemplateSource::from_path(path),
        None => posterkit::TemplateSource::Builtin,
    };
    let compositor = posterkit::Compositor::new(layout, source)?;

    let mut session = posterkit::PosterSession::new();
    session.set_name(&args.name);

    let photo_bytes = std::fs::read(&args.photo)
        .with_context(|| format!("read photo '{}'", args.photo.display()))?;
    session
        .load_photo(&photo_bytes, media_type_for(&args.photo, &photo_bytes))
        .map_err(user_facing)
        .with_context(|| format!("load photo '{}'", args.photo.display()))?;

    session
        .generate(&compositor)
        .map_err(user_facing)?;
    let (file_name, bytes) = session.download()?;

    let out_path = resolve_out_path(&args.out, file_name);
    if let Some(parent) = out_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(&out_path, bytes)
        .with_context(|| format!("write png '{}'", out_path.display()))?;

    eprintln!("wrote {}", out_path.display());
    eprintln!("  sha256: {}", sha256_hex(bytes));
    Ok(())
}

fn cmd_layouts() -> anyhow::Result<()> {
    for preset in posterkit::LayoutPreset::ALL {
        let layout = preset.layout();
        println!(
            "{:<10} {}x{}  event: {}",
            preset.name(),
            layout.canvas.width,
            layout.canvas.height,
            layout.event_slug
        );
    }
    Ok(())
}

fn cmd_dump_layout(args: DumpLayoutArgs) -> anyhow::Result<()> {
    let preset = posterkit::LayoutPreset::by_name(&args.preset)
        .with_context(|| format!("unknown layout preset '{}'", args.preset))?;
    println!("{}", preset.layout().to_json_pretty()?);
    Ok(())
}

fn resolve_layout(arg: &str) -> anyhow::Result<posterkit::PosterLayout> {
    if let Some(preset) = posterkit::LayoutPreset::by_name(arg) {
        return Ok(preset.layout());
    }
    let layout = posterkit::PosterLayout::from_path(arg)
        .with_context(|| format!("'{arg}' is neither a built-in layout nor a layout file"))?;
    Ok(layout)
}

/// `--out` names a directory when it exists as one, ends in a separator, or has no
/// extension. Directories get the session's download file name.
fn resolve_out_path(out: &Path, file_name: &str) -> PathBuf {
    let trailing_sep = out
        .as_os_str()
        .to_string_lossy()
        .ends_with(std::path::is_separator);
    if out.is_dir() || trailing_sep || out.extension().is_none() {
        out.join(file_name)
    } else {
        out.to_path_buf()
    }
}

/// Sniff the photo's media type from its bytes, then from its extension.
fn media_type_for(path: &Path, bytes: &[u8]) -> &'static str {
    image::guess_format(bytes)
        .or_else(|_| image::ImageFormat::from_path(path))
        .map(|format| format.to_mime_type())
        .unwrap_or("application/octet-stream")
}

/// Input rejections already read as a sentence; anything else keeps its detail underneath.
fn user_facing(err: posterkit::PosterError) -> anyhow::Error {
    let message = posterkit::notification(&err).into_owned();
    match err {
        posterkit::PosterError::InvalidInput(_) => anyhow::anyhow!(message),
        other => anyhow::Error::new(other).context(message),
    }
}

fn sha256_hex(bytes: &[u8]) -> String {
    let digest = sha2::Sha256::digest(bytes);
    let mut out = String::with_capacity(digest.len() * 2);
    for b in digest {
        out.push_str(&format!("{:02x}", b));
    }
    out
}
