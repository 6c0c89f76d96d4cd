use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;

use charpix::typeface::{FontCatalog, FontStyle, Typeface};
use charpix::{
    clamp_workers, generate_image_files, generate_range, run_to_completion, CodePointRange,
    ColorTable, Selection, WorkerPool,
};

/// Process exit codes: 0 normal, 1 unexpected error, 2 configuration error.
#[derive(Clone, Copy)]
enum ExitCode {
    Normal = 0,
    Unspecified = 1,
    Configuration = 2,
}

impl ExitCode {
    fn shutdown(self) -> ! {
        std::process::exit(self as i32)
    }
}

/// A bad command-line setting, raised where it is detected so the exit
/// code can be classified by type rather than message text.
#[derive(Debug)]
struct ConfigError(String);

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl std::error::Error for ConfigError {}

/// Generate centered per-glyph PNG files for Unicode code point ranges.
#[derive(Parser, Debug)]
#[command(name = "charpix", version, about)]
struct Cli {
    /// Font file (TTF/OTF); repeat for fallback priority order
    #[arg(long = "font", required_unless_present = "list_colors")]
    fonts: Vec<PathBuf>,

    /// First code point, inclusive
    #[arg(long, default_value_t = 0x41)]
    start: u32,

    /// Last code point, exclusive
    #[arg(long, default_value_t = 0x5b)]
    end: u32,

    /// Color name from the built-in palette; repeatable
    #[arg(long = "color", default_values_t = [String::from("black")])]
    colors: Vec<String>,

    /// Font size in pixels
    #[arg(long, default_value_t = 48.0)]
    size: f32,

    /// Font style: plain, bold, italic, bold-italic
    #[arg(long, default_value = "plain")]
    style: String,

    /// Canvas width in pixels
    #[arg(long, default_value_t = 128)]
    width: u32,

    /// Canvas height in pixels
    #[arg(long, default_value_t = 128)]
    height: u32,

    /// Output base directory
    #[arg(long, default_value = "out")]
    out: PathBuf,

    /// Selection name (first directory level under the base)
    #[arg(long, default_value = "glyphs")]
    name: String,

    /// Worker threads (clamped to [cores, 4*cores])
    #[arg(long)]
    threads: Option<usize>,

    /// Run the single-typeface, single-color synchronous path
    #[arg(long)]
    sequential: bool,

    /// Print the built-in color palette and exit
    #[arg(long)]
    list_colors: bool,
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let palette = ColorTable::builtin();
    if cli.list_colors {
        for name in palette.names() {
            println!("{name}");
        }
        return Ok(());
    }

    let style: FontStyle = cli
        .style
        .parse()
        .map_err(|e: String| ConfigError(format!("invalid --style: {e}")))?;

    let mut catalog = FontCatalog::new();
    for path in &cli.fonts {
        catalog.load_file(path)?;
    }
    log::debug!("{}", catalog.listing());

    let colors = cli
        .colors
        .iter()
        .map(|name| {
            palette
                .get(name)
                .cloned()
                .ok_or_else(|| ConfigError(format!("unknown color: {name}")))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let faces: Vec<Arc<dyn Typeface>> = catalog
        .faces(cli.size, style)
        .into_iter()
        .map(|face| Arc::new(face) as Arc<dyn Typeface>)
        .collect();

    if cli.sequential {
        if faces.len() != 1 || colors.len() != 1 {
            return Err(ConfigError(
                "--sequential takes exactly one --font and one --color".to_string(),
            )
            .into());
        }
        std::fs::create_dir_all(&cli.out)?;
        generate_range(
            cli.start,
            cli.end,
            faces[0].as_ref(),
            &cli.out,
            &colors[0],
            cli.height,
            cli.width,
        );
        return Ok(());
    }

    let selection = Selection {
        name: cli.name.clone(),
        faces,
        font_size: cli.size,
        style,
        width: cli.width,
        height: cli.height,
        colors,
        ranges: vec![CodePointRange::new(cli.start, cli.end)],
    };

    let built = generate_image_files(&cli.out, &selection)?;
    log::info!(
        "built {} tasks across {} glyph jobs",
        built.task_count,
        built.jobs.len()
    );

    let pool = WorkerPool::new(clamp_workers(cli.threads))?;
    run_to_completion(&pool, built)?;
    Ok(())
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::Normal.shutdown(),
        Err(e) => {
            eprintln!("charpix: {e:#}");
            let configuration = e.downcast_ref::<ConfigError>().is_some()
                || matches!(
                    e.downcast_ref::<charpix::Error>(),
                    Some(charpix::Error::InvalidSelection(_))
                        | Some(charpix::Error::FontLoad { .. })
                );
            if configuration {
                ExitCode::Configuration.shutdown()
            }
            ExitCode::Unspecified.shutdown()
        }
    }
}
