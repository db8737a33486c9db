use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use log::LevelFilter;

use tileboard::io::save_mask;
use tileboard::{
    load_occupants_json, load_tiles_json, locate_files_with_debug, render_file, update_board,
    write_tiles_json, LocatorParams, OverlayParams, TileSet, TileboardConfig, TileboardError,
};

#[derive(Parser, Debug)]
#[command(name = "tileboard", version, about = "Locate board tiles and draw team markers")]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Emit structured JSON logs.
    #[cfg(feature = "tracing")]
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Find tiles by subtracting the blank board from the tiled board.
    Locate(LocateArgs),
    /// Draw occupant markers onto a board using a saved tile list.
    Render(RenderArgs),
    /// Locate (or load cached tiles) and render, driven by a JSON config.
    Run {
        #[arg(long)]
        config: PathBuf,
    },
}

#[derive(Args, Debug)]
struct LocateArgs {
    #[arg(long)]
    background: PathBuf,
    #[arg(long)]
    mixed: PathBuf,
    /// Write the tile list as JSON.
    #[arg(long)]
    out: Option<PathBuf>,
    /// Write the closed change mask as an image.
    #[arg(long)]
    mask_out: Option<PathBuf>,
    /// Minimal luminance difference for a changed pixel [default: 25].
    #[arg(long)]
    diff_threshold: Option<u8>,
    /// Smallest accepted tile area in pixels [default: 400].
    #[arg(long)]
    min_area: Option<u64>,
    /// Largest accepted tile area in pixels [default: 80000].
    #[arg(long)]
    max_area: Option<u64>,
    /// Dilate/erode rounds used to close gaps [default: 2].
    #[arg(long)]
    close_iterations: Option<u32>,
}

impl LocateArgs {
    fn params(&self) -> LocatorParams {
        let d = LocatorParams::default();
        LocatorParams {
            diff_threshold: self.diff_threshold.unwrap_or(d.diff_threshold),
            min_area: self.min_area.unwrap_or(d.min_area),
            max_area: self.max_area.unwrap_or(d.max_area),
            close_iterations: self.close_iterations.unwrap_or(d.close_iterations),
        }
    }
}

#[derive(Args, Debug)]
struct RenderArgs {
    #[arg(long)]
    board: PathBuf,
    /// Tile list written by `tileboard locate --out`.
    #[arg(long)]
    tiles: PathBuf,
    /// JSON list of `{ "label", "color", "tile_index" }`.
    #[arg(long)]
    occupants: PathBuf,
    #[arg(long)]
    out: PathBuf,
    /// Marker disc radius in pixels [default: 10].
    #[arg(long)]
    radius: Option<u32>,
    /// Marker inset from the tile edges [default: 10].
    #[arg(long)]
    pad: Option<u32>,
    /// Step between markers sharing a tile [default: 10].
    #[arg(long)]
    shift: Option<u32>,
}

impl RenderArgs {
    fn params(&self) -> OverlayParams {
        let d = OverlayParams::default();
        OverlayParams {
            radius: self.radius.unwrap_or(d.radius),
            pad: self.pad.unwrap_or(d.pad),
            shift: self.shift.unwrap_or(d.shift),
            ..d
        }
    }
}

fn level_for(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

fn init_logging(cli: &Cli) {
    let level = level_for(cli.verbose);

    #[cfg(feature = "tracing")]
    if cli.log_json {
        let _ = tracing_log::LogTracer::builder()
            .with_max_level(level)
            .init();
        tileboard::core::init_tracing(true);
        return;
    }

    if let Err(e) = tileboard::core::init_with_level(level) {
        eprintln!("logger init failed: {e}");
    }
}

fn print_tiles(tiles: &TileSet) {
    println!("{} tiles", tiles.len());
    for (i, t) in tiles.iter().enumerate() {
        println!("{i:3}: x={} y={} {}x{}", t.x, t.y, t.width, t.height);
    }
}

fn locate(args: LocateArgs) -> Result<(), TileboardError> {
    let debug = locate_files_with_debug(&args.background, &args.mixed, &args.params())?;
    for r in &debug.rejected {
        log::debug!("rejected {:?} ({:?}, area {})", r.tile, r.reason, r.tile.area());
    }
    print_tiles(&debug.tiles);

    if let Some(path) = &args.mask_out {
        save_mask(&debug.mask, path)?;
    }
    if let Some(path) = &args.out {
        write_tiles_json(path, &debug.tiles)?;
        println!("wrote tiles to {}", path.display());
    }
    Ok(())
}

fn render(args: RenderArgs) -> Result<(), TileboardError> {
    let tiles = load_tiles_json(&args.tiles)?;
    let occupants = load_occupants_json(&args.occupants)?;
    let (_, report) = render_file(&args.board, &tiles, &occupants, &args.out, &args.params())?;
    println!(
        "drew {} markers, skipped {}; wrote {}",
        report.placed.len(),
        report.skipped.len(),
        args.out.display()
    );
    Ok(())
}

fn run(config: PathBuf) -> Result<(), TileboardError> {
    let cfg = TileboardConfig::load_json(&config)?;
    let update = update_board(&cfg)?;
    if update.tiles_from_cache {
        println!("{} tiles (cached)", update.tiles.len());
    } else {
        print_tiles(&update.tiles);
    }
    println!(
        "drew {} markers, skipped {}; wrote {}",
        update.report.placed.len(),
        update.report.skipped.len(),
        update.output_path.display()
    );
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(&cli);

    let result = match cli.command {
        Command::Locate(args) => locate(args),
        Command::Render(args) => render(args),
        Command::Run { config } => run(config),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
