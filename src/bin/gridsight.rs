use bevy::log::{Level, LogPlugin};
use bevy::prelude::*;
use clap::{Args, Parser, Subcommand};
use gridsight::collision::{Polygon, Shape, ShapeGeometry};
use gridsight::components::Agent;
use gridsight::config::{GridSightConfig, load_config, load_config_from};
use gridsight::errors::{GridSightError, GridSightResult};
use gridsight::map::{MapDefinition, TileGrid};
use gridsight::pathfinding::{
    GridAdapter, NoOverlay, OverlayKind, OverlayLog, TraversalEvaluator, find_path,
};
use std::path::{Path, PathBuf};

mod gridsight_cli {
    pub mod cli_utils;
}

use gridsight_cli::cli_utils::*;

#[derive(Parser, Clone)]
#[command(name = "gridsight")]
#[command(about = "Footprint and traversal queries for shaped agents on tile grids")]
struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    verbose: bool,

    /// Config file to use instead of the per-user one
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Clone)]
enum Command {
    /// List the grid cells a shape covers at a position
    Footprint(FootprintArgs),
    /// Heuristic and actual cost of a straight move between two cells
    Cost(MoveArgs),
    /// Search for a path between two cells
    Path(MoveArgs),
    /// Generate a random map file
    Generate(GenerateArgs),
    /// Print a summary of a map file
    Info {
        /// Map file (.toml or binary)
        map: PathBuf,
    },
}

#[derive(Args, Clone)]
struct FootprintArgs {
    /// Polygon outline (format: X,Y;X,Y;X,Y); a unit square when omitted
    #[arg(long)]
    vertices: Option<String>,

    /// Position of the shape (format: X,Y)
    #[arg(long, default_value = "0,0")]
    at: String,

    /// Include cells the shape only touches
    #[arg(long)]
    touching: bool,
}

#[derive(Args, Clone)]
struct MoveArgs {
    /// Map file (.toml or binary)
    map: PathBuf,

    /// Start cell (format: X,Y)
    #[arg(long)]
    from: String,

    /// Target cell (format: X,Y)
    #[arg(long)]
    to: String,

    /// Agent outline overriding the map's agent (format: X,Y;X,Y;X,Y)
    #[arg(long)]
    vertices: Option<String>,

    /// Print every sampled position or expanded cell
    #[arg(long)]
    trace: bool,
}

#[derive(Args, Clone)]
struct GenerateArgs {
    /// Output file; `.toml` is written as text, anything else as binary
    output: PathBuf,

    /// Map name
    #[arg(long, default_value = "generated_map")]
    name: String,

    /// Map size in cells (format: WIDTHxHEIGHT)
    #[arg(long, default_value = "32x32")]
    size: String,

    /// Fraction of cells to block (0.0-1.0)
    #[arg(long, default_value = "0.2")]
    density: f32,

    /// Random seed for reproducible generation
    #[arg(long, default_value = "0")]
    seed: u64,
}

fn main() -> GridSightResult<()> {
    let cli = Cli::parse();

    // The app only hosts the log subscriber; it is never run
    let _app = init_logging(cli.verbose);

    let config = match &cli.config {
        Some(path) => load_config_from(path)?,
        None => load_config(),
    };

    match cli.command {
        Command::Footprint(args) => footprint(&args),
        Command::Cost(args) => cost(&args, &config),
        Command::Path(args) => path(&args, &config),
        Command::Generate(args) => generate(&args),
        Command::Info { map } => info(&map),
    }
}

fn init_logging(verbose: bool) -> App {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    let mut app = App::new();
    app.add_plugins(LogPlugin {
        level,
        filter: format!("wgpu=error,gridsight={level}").to_lowercase(),
        ..default()
    });
    app
}

fn custom_shape(vertices: Option<&str>) -> GridSightResult<Option<Shape>> {
    vertices
        .map(|outline| parse_vertices(outline).map(|v| Shape::from(Polygon::new(v))))
        .transpose()
}

fn footprint(args: &FootprintArgs) -> GridSightResult<()> {
    let shape = custom_shape(args.vertices.as_deref())?.unwrap_or_else(Shape::unit_square);
    let agent = Agent::new(parse_point(&args.at)?, shape);
    let cells = agent.covered_cells(!args.touching);

    println!(
        "{} cells covered at ({}, {}):",
        cells.len(),
        agent.position.x,
        agent.position.y
    );
    for cell in cells {
        println!("  {},{}", cell.x, cell.y);
    }
    Ok(())
}

/// Load the map, its grid and the agent for a move query
fn load_move(args: &MoveArgs) -> GridSightResult<(TileGrid, Agent, IVec2, IVec2)> {
    let map = MapDefinition::load_from_file(&args.map)?;
    let grid = map.to_grid()?;
    let from = parse_cell(&args.from)?;
    let to = parse_cell(&args.to)?;

    let agent = match custom_shape(args.vertices.as_deref())? {
        Some(shape) => Agent::new(from.as_vec2(), shape),
        None => map.agent_at(from.as_vec2())?,
    };

    for cell in [from, to] {
        if !grid.in_bounds_cell(cell) {
            return Err(GridSightError::InvalidInput {
                reason: format!(
                    "Cell {},{} is outside the {}x{} map",
                    cell.x,
                    cell.y,
                    grid.width(),
                    grid.height()
                ),
            });
        }
    }

    Ok((grid, agent, from, to))
}

fn cost(args: &MoveArgs, config: &GridSightConfig) -> GridSightResult<()> {
    let (grid, agent, from, to) = load_move(args)?;
    let evaluator = TraversalEvaluator::new(config.traversal.clone());

    let heuristic = evaluator.heuristic_cost(&grid, &agent, from, to);
    let mut log = OverlayLog::new();
    let actual = evaluator.actual_cost_traced(&grid, &agent, from, to, &mut log);

    println!("Heuristic cost: {heuristic:.4}");
    match actual {
        Some(actual) => println!("Actual cost: {actual:.4}"),
        None => println!("Actual cost: unreachable"),
    }

    if args.trace {
        println!("Sampled positions:");
        for position in log.positions(OverlayKind::Sample) {
            println!("  {:.4},{:.4}", position.x, position.y);
        }
    }
    Ok(())
}

fn path(args: &MoveArgs, config: &GridSightConfig) -> GridSightResult<()> {
    let (grid, agent, from, to) = load_move(args)?;
    let evaluator = TraversalEvaluator::new(config.traversal.clone());

    let mut log = OverlayLog::new();
    let result = if args.trace {
        find_path(&grid, &agent, from, to, &evaluator, &config.search, &mut log)
    } else {
        find_path(&grid, &agent, from, to, &evaluator, &config.search, &mut NoOverlay)
    };

    let Some(found) = result else {
        println!("No path from {},{} to {},{}", from.x, from.y, to.x, to.y);
        return Ok(());
    };

    println!(
        "Path of {} cells, cost {:.4}:",
        found.cells.len(),
        found.cost
    );
    for cell in &found.cells {
        println!("  {},{}", cell.x, cell.y);
    }

    if args.trace {
        println!("Expanded {} cells:", log.count(OverlayKind::Expanded));
        for position in log.positions(OverlayKind::Expanded) {
            println!("  {},{}", position.x, position.y);
        }
    }
    Ok(())
}

fn generate(args: &GenerateArgs) -> GridSightResult<()> {
    let (width, height) = parse_size(&args.size)?;
    let density = validate_density(args.density);

    let map = MapDefinition::random(args.name.clone(), width, height, density, args.seed)?;
    map.save_to_file(&args.output)?;

    println!("Map saved successfully to: {}", args.output.display());
    print_map_summary(&map)
}

fn info(path: &Path) -> GridSightResult<()> {
    let map = MapDefinition::load_from_file(path)?;
    print_map_summary(&map)
}

fn print_map_summary(map: &MapDefinition) -> GridSightResult<()> {
    let grid = map.to_grid()?;
    let agent = map.agent_at(Vec2::ZERO)?;
    let blocked = grid.blocked_count();
    let total = grid.tiles().len();

    println!("\nMap summary:");
    println!("  Name: {}", map.name);
    println!("  Size: {}x{} ({} cells)", map.width, map.height, total);
    println!(
        "  Blocked: {} cells ({:.1}%)",
        blocked,
        (blocked as f32 / total as f32) * 100.0
    );
    println!(
        "  Agent: {} with {} vertices, extent {}x{}",
        agent.shape.variant_name(),
        agent.shape.vertices().len(),
        agent.extent().x,
        agent.extent().y
    );
    Ok(())
}
