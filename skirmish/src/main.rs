//! Command-line harness: feed a map, print paths and movement ranges.

use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;
use std::str::FromStr;

use clap::{Parser, Subcommand};
use rand::rngs::SmallRng;
use rand::{RngExt, SeedableRng};

use skirmish::map::load_map;
use skirmish::unit::{TurnOrder, Unit};
use tactics_core::{Cell, CostGrid};
use tactics_paths::PathEngine;

/// Weighted-grid movement demo for turn-based tactics.
#[derive(Parser, Debug)]
#[command(name = "skirmish", version, about)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the cheapest path between two cells.
    Path {
        /// Map file (comma-separated cost rows)
        map: PathBuf,

        /// Start cell as x,y
        #[arg(long)]
        from: Coord,

        /// Destination cell as x,y
        #[arg(long)]
        to: Coord,
    },

    /// Print every cell reachable within a movement budget.
    Reach {
        /// Map file (comma-separated cost rows)
        map: PathBuf,

        /// Origin cell as x,y
        #[arg(long)]
        from: Coord,

        /// Movement budget
        #[arg(long)]
        budget: i32,
    },

    /// Play a few scripted turns with two randomly placed units.
    Demo {
        /// Map file (comma-separated cost rows)
        map: PathBuf,

        /// Random seed (default: from the OS)
        #[arg(long)]
        seed: Option<u64>,

        /// Number of turns to play
        #[arg(long, default_value_t = 4)]
        turns: u32,
    },
}

/// A cell argument in `x,y` form.
#[derive(Debug, Clone, Copy)]
struct Coord(Cell);

impl FromStr for Coord {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || format!("\"{s}\" is not of the form x,y");
        let (x, y) = s.split_once(',').ok_or_else(err)?;
        let x = x.trim().parse().map_err(|_| err())?;
        let y = y.trim().parse().map_err(|_| err())?;
        Ok(Self(Cell::new(x, y)))
    }
}

fn main() -> ExitCode {
    match run(Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<(), Box<dyn Error>> {
    match args.command {
        Command::Path { map, from, to } => {
            let grid = load_map(&map)?;
            let mut engine = PathEngine::new(grid.bounds());
            match engine.shortest_path(&grid, from.0, to.0)? {
                Some(path) => {
                    println!("{}", render(&grid, |c| {
                        if c == from.0 {
                            '@'
                        } else if path.steps().contains(&c) {
                            '*'
                        } else {
                            ' '
                        }
                    }));
                    println!("cost {} in {} steps", path.cost(), path.len());
                }
                None => println!("no path from {} to {}", from.0, to.0),
            }
        }
        Command::Reach { map, from, budget } => {
            let grid = load_map(&map)?;
            let mut engine = PathEngine::new(grid.bounds());
            let set = engine.reachable_set(&grid, from.0, budget)?;
            println!("{}", render(&grid, |c| {
                if c == from.0 {
                    '@'
                } else if set.contains(c) {
                    '+'
                } else {
                    ' '
                }
            }));
            println!(
                "{} of {} cells reachable within {}",
                set.len(),
                grid.bounds().len(),
                budget
            );
        }
        Command::Demo { map, seed, turns } => {
            let grid = load_map(&map)?;
            let mut rng = match seed {
                Some(s) => SmallRng::seed_from_u64(s),
                None => SmallRng::from_rng(&mut rand::rng()),
            };
            demo(&grid, &mut rng, turns);
        }
    }
    Ok(())
}

/// Two units, the original demo's movement allowances, each turn moving
/// to the most expensive destination it can still afford.
fn demo(grid: &CostGrid, rng: &mut SmallRng, turns: u32) {
    let a = random_cell(grid, rng);
    let b = loop {
        let c = random_cell(grid, rng);
        if c != a {
            break c;
        }
    };
    let mut order = TurnOrder::new(vec![Unit::new(a, 7), Unit::new(b, 4)]);
    let mut engine = PathEngine::new(grid.bounds());

    for turn in 1..=turns {
        let Some(unit) = order.active().copied() else {
            break;
        };
        let Ok(reachable) = order.reachable(&mut engine, grid) else {
            break;
        };
        // Farthest affordable destination; row-major order breaks ties.
        let dest = reachable
            .iter()
            .max_by_key(|(c, p)| (p.cost(), *c))
            .map(|(c, _)| *c)
            .unwrap_or(unit.pos);
        match order.move_active(&mut engine, grid, dest) {
            Ok(path) => {
                println!(
                    "turn {turn}: unit at {} moves to {dest} spending {}",
                    unit.pos,
                    path.cost()
                );
            }
            Err(e) => {
                println!("turn {turn}: unit at {} cannot move: {e}", unit.pos);
                break;
            }
        }
    }

    println!("{}", render(grid, |c| {
        if order.units().iter().any(|u| u.pos == c) {
            '@'
        } else {
            ' '
        }
    }));
}

fn random_cell(grid: &CostGrid, rng: &mut SmallRng) -> Cell {
    Cell::new(
        rng.random_range(0..grid.width()),
        rng.random_range(0..grid.height()),
    )
}

/// Render the cost grid with a one-character marker per cell.
fn render(grid: &CostGrid, mark: impl Fn(Cell) -> char) -> String {
    let max_cost = grid
        .bounds()
        .iter()
        .filter_map(|c| grid.get(c))
        .max()
        .unwrap_or(0);
    let width = max_cost.to_string().len();

    let mut out = String::new();
    for y in 0..grid.height() {
        for x in 0..grid.width() {
            let c = Cell::new(x, y);
            let cost = grid.get(c).unwrap_or(0);
            out.push_str(&format!("{cost:>width$}{} ", mark(c)));
        }
        // Trim the row's trailing space.
        out.pop();
        out.push('\n');
    }
    out.pop();
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_cells_stay_in_bounds_and_seed_deterministically() {
        let grid = CostGrid::filled(4, 3, 1);
        let mut a = SmallRng::seed_from_u64(7);
        let mut b = SmallRng::seed_from_u64(7);
        for _ in 0..32 {
            let c = random_cell(&grid, &mut a);
            assert!(grid.contains(c));
            assert_eq!(c, random_cell(&grid, &mut b));
        }
    }

    #[test]
    fn coord_parses_x_y_pairs() {
        assert_eq!(Coord::from_str("3,4").unwrap().0, Cell::new(3, 4));
        assert_eq!(Coord::from_str(" 0 , -2 ").unwrap().0, Cell::new(0, -2));
        assert!(Coord::from_str("3").is_err());
        assert!(Coord::from_str("a,b").is_err());
    }

    #[test]
    fn render_pads_to_the_widest_cost() {
        let grid = CostGrid::from_rows(&[vec![1, 10], vec![2, 3]]).unwrap();
        let text = render(&grid, |c| if c == Cell::new(0, 0) { '@' } else { ' ' });
        assert_eq!(text, " 1@ 10 \n 2   3 ");
    }
}
