use docopt::Docopt;
use serde_derive::Deserialize;
use mazes::{
    generators,
    grid::Grid,
    grid_displays::PathDisplay,
    pathing,
};
use std::{
    io,
    io::prelude::*,
    fs::File,
    sync::Arc
};
use tracing::info;
use tracing_subscriber::EnvFilter;

const USAGE: &str = "Mazes

Usage:
    mazes_driver -h | --help
    mazes_driver [--width=<w>] [--height=<h>] [--seed=<n>] [--show-path] [--text-out=<path>] [--save-edges=<path>]

Options:
    -h --help              Show this screen.
    --width=<w>            The grid width in a w*h grid [default: 10].
    --height=<h>           The grid height in a w*h grid [default: 10].
    --seed=<n>             Seed for the maze generator. A random seed is used if not given.
    --show-path            Mark the longest path through the maze.
    --text-out=<path>      Output file path for a textual rendering of a maze. Printed to stdout if not given.
    --save-edges=<path>    Serialize the maze to a text file: each line is a pair of numbers. Line 1: n(#vertices) m(#edges). Line 2+ edge between vertices. Uses 1-based vertex indices.
";
#[derive(Debug, Deserialize)]
struct MazeArgs {
    flag_width: i32,
    flag_height: i32,
    flag_seed: Option<u64>,
    flag_show_path: bool,
    flag_text_out: String,
    flag_save_edges: String,
}

mod errors {
    // Result is a typedef of std `Result` with the error type our own `Error`.
    // ResultExt adds the `chain_err` trait method.
    use error_chain::*;
    error_chain! {

        links {
            Maze(::mazes::errors::Error, ::mazes::errors::ErrorKind);
        }

        foreign_links {
            DocOptFailure(::docopt::Error);
            Io(::std::io::Error);
        }
    }
}
use crate::errors::*;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    if let Err(e) = run() {
        // docopt errors carry their own usage/help text and exit codes
        if let ErrorKind::DocOptFailure(ref docopt_error) = *e.kind() {
            docopt_error.exit();
        }
        eprintln!("error: {}", e);
        for cause in e.iter().skip(1) {
            eprintln!("caused by: {}", cause);
        }
        std::process::exit(1);
    }
}

fn run() -> Result<()> {

    let args: MazeArgs = Docopt::new(USAGE).and_then(|d| d.deserialize())?;

    let mut maze_grid = match args.flag_seed {
        Some(seed) => generators::generate_maze_with_seed(args.flag_width, args.flag_height, seed)?,
        None => generators::generate_maze(args.flag_width, args.flag_height)?,
    };
    info!(width = maze_grid.width(), height = maze_grid.height(), "maze ready");

    if args.flag_show_path {
        let path = pathing::longest_path(&maze_grid).unwrap_or_else(Vec::new);
        info!(length = path.len(), "longest path");
        maze_grid.set_grid_display(Some(Arc::new(PathDisplay::new(&path))));
    }

    if !args.flag_save_edges.is_empty() {
        save_maze_graph(&maze_grid, &args.flag_save_edges)?;
    }

    if args.flag_text_out.is_empty() {
        println!("{}", maze_grid);
    } else {
        write_text_to_file(&format!("{}", maze_grid), &args.flag_text_out)
            .chain_err(|| format!("Failed to write maze to text file {}", args.flag_text_out))?;
    }

    Ok(())
}

fn write_text_to_file(data: &str, file_name: &str) -> io::Result<()> {
    let mut f = File::create(file_name)?;
    f.write_all(data.as_bytes())?;
    Ok(())
}

fn save_maze_graph(maze_grid: &Grid, file_path: &str) -> Result<()> {

    let mut graph_data = String::new();
    let vertices_count = maze_grid.size();
    let edges_count = maze_grid.passages_count();
    graph_data.push_str(&format!("{} {}\n", vertices_count, edges_count));

    for (src, passage) in maze_grid.iter_passages() {
        let index_a = maze_grid.coordinate_to_index(src)
            .ok_or("Passage starts outside the grid")?;
        let index_b = maze_grid.coordinate_to_index(passage.to)
            .ok_or("Passage ends outside the grid")?;
        graph_data.push_str(&format!("{} {}\n", index_a + 1, index_b + 1));
    }

    write_text_to_file(&graph_data, file_path)
        .chain_err(|| format!("Failed to write maze graph to text file {}", file_path))?;

    Ok(())
}
