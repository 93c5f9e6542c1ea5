//! busway CLI - compile busway routes and inspect elbow and leader geometry.

use anyhow::{Context, Result};
use busway_annotate::{compute_leader, Point2D, Rect2D};
use busway_math::Direction;
use busway_route::{compile_run, RouteFile};
use busway_solids::{classify_turn, ElbowTable, SolidRecord};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "busway")]
#[command(about = "Busway run compiler", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile a route file into segment and elbow solids
    Compile {
        /// Route file (.toml)
        route: PathBuf,
        /// Write the solid list as JSON to this file instead of printing a summary
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Override the bend radius from the route file
        #[arg(short, long)]
        radius: Option<u32>,
    },
    /// Print the elbow cuts for a turn
    Cuts {
        /// Incoming direction (+X, -Y, Z, ...)
        #[arg(long, allow_hyphen_values = true)]
        from: Direction,
        /// Outgoing direction
        #[arg(long, allow_hyphen_values = true)]
        to: Direction,
        /// Bend radius (default: the route file's radius, else 1000)
        #[arg(long)]
        radius: Option<u32>,
        /// Take the elbow table and radius from this route file
        #[arg(long)]
        route: Option<PathBuf>,
    },
    /// Print the leader line from an anchor to a text box
    Leader {
        /// Anchor center as `x,y`
        #[arg(long, allow_hyphen_values = true, value_parser = parse_point)]
        anchor: Point2D,
        /// Box as `left,top,width,height`
        #[arg(long, allow_hyphen_values = true, value_parser = parse_rect)]
        rect: Rect2D,
    },
}

#[derive(Serialize)]
struct CompileOutput {
    radius: u32,
    elbows: usize,
    segments: usize,
    solids: Vec<SolidRecord>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(std::env::var(EnvFilter::DEFAULT_ENV).ok()))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Compile {
            route,
            output,
            radius,
        } => compile_file(&route, output.as_deref(), radius)?,
        Commands::Cuts {
            from,
            to,
            radius,
            route,
        } => {
            let file = route
                .as_deref()
                .map(|path| {
                    RouteFile::load(path)
                        .with_context(|| format!("Failed to load route {}", path.display()))
                })
                .transpose()?;
            let (table, radius) = cuts_config(file, radius);
            show_cuts(&table, from, to, radius)?;
        }
        Commands::Leader { anchor, rect } => show_leader(anchor, rect),
    }

    Ok(())
}

fn compile_file(path: &Path, output: Option<&Path>, radius: Option<u32>) -> Result<()> {
    let mut file = RouteFile::load(path)
        .with_context(|| format!("Failed to load route {}", path.display()))?;
    if let Some(r) = radius {
        file.config.radius = r;
    }

    let run = compile_run(&file.route, &file.config)
        .with_context(|| format!("Failed to compile {}", path.display()))?;
    info!(
        elbows = run.elbow_count(),
        segments = run.segment_count(),
        "compiled route"
    );

    match output {
        Some(out) => {
            let doc = CompileOutput {
                radius: file.config.radius,
                elbows: run.elbow_count(),
                segments: run.segment_count(),
                solids: run.solids.iter().map(|s| s.to_record()).collect(),
            };
            let json = serde_json::to_string_pretty(&doc)?;
            std::fs::write(out, json)
                .with_context(|| format!("Failed to write {}", out.display()))?;
            println!("Wrote {} solids to {}", doc.solids.len(), out.display());
        }
        None => {
            println!("Route: {}", path.display());
            println!("  Radius:   {}", file.config.radius);
            println!("  Vertices: {}", run.vertices.len());
            println!("  Segments: {}", run.segment_count());
            println!("  Elbows:   {}", run.elbow_count());
            let bounds = run.bounds();
            if bounds.is_valid() {
                let [sx, sy, sz] = bounds.size();
                println!(
                    "  Bounds:   [{:.1}, {:.1}, {:.1}] .. [{:.1}, {:.1}, {:.1}]",
                    bounds.min.x, bounds.min.y, bounds.min.z, bounds.max.x, bounds.max.y, bounds.max.z
                );
                println!("  Size:     {sx:.1} x {sy:.1} x {sz:.1}");
            }
        }
    }

    Ok(())
}

/// `RUST_LOG` when it parses, `info` otherwise.
fn log_filter(directives: Option<String>) -> EnvFilter {
    directives
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new("info"))
}

/// Elbow table and radius for `busway cuts`. An explicit radius beats the
/// route file's.
fn cuts_config(file: Option<RouteFile>, radius: Option<u32>) -> (ElbowTable, u32) {
    match file {
        Some(f) => (f.config.elbows, radius.unwrap_or(f.config.radius)),
        None => (
            ElbowTable::default(),
            radius.unwrap_or(busway_route::DEFAULT_RADIUS),
        ),
    }
}

fn show_cuts(table: &ElbowTable, from: Direction, to: Direction, radius: u32) -> Result<()> {
    let cuts = table
        .resolve(radius, from, to)
        .with_context(|| format!("No elbow for {from} -> {to} at radius {radius}"))?;
    println!("{from} -> {to} ({:?}, radius {radius})", classify_turn(from, to));
    println!("  a = {}", cuts.a);
    println!("  b = {}", cuts.b);
    Ok(())
}

fn show_leader(anchor: Point2D, rect: Rect2D) {
    let leader = compute_leader(anchor, rect);
    println!("start  = ({:.3}, {:.3})", leader.start.x, leader.start.y);
    println!("end    = ({:.3}, {:.3})", leader.end.x, leader.end.y);
    println!("length = {:.3}", leader.length());
    println!("angle  = {:.3} deg", leader.angle_deg());
}

fn parse_numbers<const N: usize>(s: &str) -> Result<[f64; N], String> {
    let parts: Vec<&str> = s.split(',').map(str::trim).collect();
    if parts.len() != N {
        return Err(format!("expected {N} comma-separated numbers, got {s:?}"));
    }
    let mut out = [0.0; N];
    for (slot, part) in out.iter_mut().zip(parts) {
        *slot = part
            .parse()
            .map_err(|_| format!("{part:?} is not a number"))?;
    }
    Ok(out)
}

fn parse_point(s: &str) -> Result<Point2D, String> {
    let [x, y] = parse_numbers::<2>(s)?;
    Ok(Point2D::new(x, y))
}

fn parse_rect(s: &str) -> Result<Rect2D, String> {
    let [left, top, width, height] = parse_numbers::<4>(s)?;
    Ok(Rect2D::from_origin_size(left, top, width, height))
}
