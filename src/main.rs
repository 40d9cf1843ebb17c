use std::path::PathBuf;

use clap::Parser;
use pizza_slicer::grid::Grid;
use pizza_slicer::render;
use pizza_slicer::solver::Solver;
use tracing::Level;

#[derive(Parser)]
#[command(
    name = "pizza_slicer",
    about = "Cuts a two-topping pizza grid into constrained rectangular slices"
)]
struct Cli {
    /// Pizza description: header "rows cols min_ingredient max_size" then one line of T/M per row
    input: PathBuf,

    /// Write the submission here instead of stdout
    #[arg(long, short)]
    output: Option<PathBuf>,

    /// Show the sliced pizza diagram
    #[arg(long)]
    diagram: bool,

    /// Log every slice decision
    #[arg(long, short)]
    verbose: bool,
}

fn fail(msg: impl std::fmt::Display) -> ! {
    eprintln!("Error: {}", msg);
    std::process::exit(1);
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::INFO })
        .init();

    let description = std::fs::read_to_string(&cli.input)
        .unwrap_or_else(|e| fail(format!("cannot read {}: {}", cli.input.display(), e)));
    let grid = Grid::parse(&description)
        .unwrap_or_else(|e| fail(format!("{}: {}", cli.input.display(), e)));

    let mut solver = Solver::new(grid);
    let solution = solver.solve();

    if cli.diagram {
        eprint!("{}", render::render_grid(solver.grid()));
    }

    let submission = solution.to_submission();
    match &cli.output {
        Some(path) => std::fs::write(path, &submission)
            .unwrap_or_else(|e| fail(format!("cannot write {}: {}", path.display(), e))),
        None => print!("{}", submission),
    }

    eprintln!("Slices: {}", solution.slice_count());
    eprintln!("Used: {:.2}%", solution.used_percent());
    eprintln!("Score: {}", solution.used);
    eprintln!("Waste: {}", solution.waste);
}
