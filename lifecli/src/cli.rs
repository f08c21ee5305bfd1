use std::io;

use anyhow::{Context, bail};
use colored::Colorize;
use itertools::Itertools;
use liblife::{Cell, Grid, Rule, analysis, pattern::Pattern};
use strum::IntoEnumIterator;

use crate::session::{self, Session};

/// Largest bounding box `show` will print, in cells.
const MAX_RENDER_AREA: u128 = 1 << 20;

pub fn run_cli(mut session: Session) -> anyhow::Result<()> {
    for line_res in io::stdin().lines() {
        let line = line_res.context("Couldn't read stdin")?;
        let args = line.split_whitespace();

        match handle_cmd(&mut session, args) {
            Ok(Flow::Continue) => println!("OK"),
            Ok(Flow::Exit) => break,
            Err(e) => eprintln!("! {e:#}"),
        }
    }

    Ok(())
}

#[derive(Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

pub fn handle_cmd<'a, I>(session: &mut Session, mut args: I) -> anyhow::Result<Flow>
where
    I: Iterator<Item = &'a str>,
{
    match args.next().context("No command")? {
        "step" => {
            let times = args.next().unwrap_or("1").parse::<i64>()?;
            session.step(times)?;
        }

        "back" => {
            let times = args.next().unwrap_or("1").parse::<usize>()?;
            session.back(times)?;
        }

        "show" => {
            if let Some(bounds) = session.grid.bounds()
                && bounds.area() > MAX_RENDER_AREA
            {
                bail!(
                    "Bounding box of {} x {} cells is too large to show",
                    bounds.rows(),
                    bounds.cols()
                );
            }

            println!(
                "gen {}: population {}",
                session.generation,
                session.grid.population()
            );
            println!("{}", render(&session.grid));
        }

        "stats" => print_stats(session),

        "classify" => {
            let kind = analysis::classify(
                &session.engine,
                &session.grid,
                session.config.max_analysis_generations,
            );
            println!("{kind}");
        }

        "load" => {
            let seed = args.next().context("missing pattern or path")?;
            session.reset(session::load_seed(seed)?);
        }

        "save" => {
            let path = args.next().context("missing path")?;
            session::save_grid(&session.grid, path)?;
        }

        "clear" => {
            session.reset(Grid::empty());
        }

        "rule" => {
            let rule = args.next().context("missing rulestring")?.parse::<Rule>()?;
            session.set_rule(rule);
        }

        "set" => {
            let cell = parse_cell(&mut args)?;
            session.edit(session.grid.with_cell(cell));
        }

        "unset" => {
            let cell = parse_cell(&mut args)?;
            session.edit(session.grid.without_cell(cell));
        }

        "patterns" => {
            println!("{}", Pattern::iter().join(" "));
        }

        "exit" => return Ok(Flow::Exit),

        _ => bail!("Unknown command"),
    }

    Ok(Flow::Continue)
}

fn parse_cell<'a, I>(args: &mut I) -> anyhow::Result<Cell>
where
    I: Iterator<Item = &'a str>,
{
    let row = args.next().context("missing row")?.parse::<i64>()?;
    let col = args.next().context("missing col")?.parse::<i64>()?;
    Ok(Cell::new(row, col))
}

fn render(grid: &Grid) -> String {
    grid.to_string()
        .lines()
        .map(|line| {
            line.chars()
                .map(|ch| match ch {
                    '*' => "*".bright_green().to_string(),
                    _ => ".".dimmed().to_string(),
                })
                .collect::<String>()
        })
        .join("\n")
}

fn print_stats(session: &Session) {
    let lookahead = session.config.max_analysis_generations;
    let grid = &session.grid;

    println!("generation: {}", session.generation);
    println!("population: {}", grid.population());
    println!("rule:       {}", session.engine.rule);

    match grid.bounds() {
        Some(bounds) => println!(
            "bounds:     ({}, {}) .. ({}, {}), density {:.3}",
            bounds.min.row,
            bounds.min.col,
            bounds.max.row,
            bounds.max.col,
            analysis::density(grid)
        ),
        None => println!("bounds:     none"),
    }

    if let Some(peak) = analysis::population_peak(&session.engine, grid, lookahead) {
        let peak_line = format!("{peak} (next {lookahead} generations)");
        println!("{}", peak_line.as_str().cyan());
    }

    match analysis::stabilization_point(&session.engine, grid, lookahead) {
        Some(generation) => println!("population settles after {generation} generations"),
        None => println!("population doesn't settle within {lookahead} generations"),
    }

    println!(
        "average population: {:.2}",
        analysis::average_population(&session.engine, grid, lookahead)
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    fn run(session: &mut Session, line: &str) -> anyhow::Result<Flow> {
        handle_cmd(session, line.split_whitespace())
    }

    #[test]
    fn editing_and_stepping() {
        let mut session = Session::new(Config::default(), Grid::empty());

        for line in ["set 0 0", "set 0 1", "set 0 2", "step"] {
            assert_eq!(run(&mut session, line).unwrap(), Flow::Continue);
        }

        assert_eq!(session.grid, Grid::new([(-1, 1), (0, 1), (1, 1)]));
        assert_eq!(session.generation, 1);

        run(&mut session, "back").unwrap();
        run(&mut session, "unset 0 2").unwrap();
        assert_eq!(session.grid, Grid::new([(0, 0), (0, 1)]));
    }

    #[test]
    fn rejects_bad_input() {
        let mut session = Session::new(Config::default(), Grid::empty());

        assert!(run(&mut session, "").is_err());
        assert!(run(&mut session, "frobnicate").is_err());
        assert!(run(&mut session, "step -2").is_err());
        assert!(run(&mut session, "set 1").is_err());
        assert!(run(&mut session, "rule B3").is_err());
    }

    #[test]
    fn show_refuses_huge_bounding_boxes() {
        let mut session = Session::new(Config::default(), Grid::empty());

        run(&mut session, "set 0 0").unwrap();
        run(&mut session, "set 5000000000 5000000000").unwrap();

        assert!(run(&mut session, "show").is_err());
        assert_eq!(run(&mut session, "stats").unwrap(), Flow::Continue);

        run(&mut session, "unset 5000000000 5000000000").unwrap();
        assert_eq!(run(&mut session, "show").unwrap(), Flow::Continue);
    }

    #[test]
    fn load_and_rule_commands() {
        let mut session = Session::new(Config::default(), Grid::empty());

        run(&mut session, "load glider").unwrap();
        run(&mut session, "rule B36/S23").unwrap();

        assert_eq!(session.grid, Pattern::Glider.grid());
        assert_eq!(session.engine.rule, Rule::high_life());
        assert_eq!(run(&mut session, "exit").unwrap(), Flow::Exit);
    }
}
