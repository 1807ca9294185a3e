use crate::direction::Direction;
use anyhow::{anyhow, Error as AnyError};
use clap::{Parser, Subcommand};
use geo::geometry::Coord;
use std::{path::PathBuf, str::FromStr};

/// Render banded skyline views of elevation maps.
#[derive(Parser, Debug, Clone)]
pub struct Cli {
    /// Map file: JSON, or NASADEM/SRTM `.hgt`.
    #[arg(short, long)]
    pub map: PathBuf,

    /// Row width of a flat JSON map, overriding the file's own.
    #[arg(short, long)]
    pub width: Option<usize>,

    /// Number of elevation-angle bands.
    #[arg(short, long, default_value_t = 16)]
    pub resolution: usize,

    /// Observer "x,y".
    #[arg(short, long)]
    pub observer: XY,

    /// Observer elevation. Defaults to the map's elevation under the
    /// observer.
    #[arg(long)]
    pub z0: Option<f64>,

    /// Elevation used for void or off-map cells.
    #[arg(long)]
    pub void: Option<f64>,

    /// How many cells to look out, and to either side.
    #[arg(long, default_value_t = 16, value_parser = clap::value_parser!(u32).range(1..))]
    pub radius: u32,

    /// Directions to look in, composed left to right, e.g. "NESW".
    #[arg(short, long, default_value = "N")]
    pub look: Look,

    #[command(subcommand)]
    pub cmd: Command,
}

#[derive(Clone, Debug, Copy)]
pub struct XY(pub Coord<i64>);

impl FromStr for XY {
    type Err = AnyError;
    fn from_str(s: &str) -> Result<Self, AnyError> {
        let (x_str, y_str) = s
            .split_once(',')
            .ok_or_else(|| anyhow!("not a valid x,y pair"))?;
        let x = i64::from_str(x_str.trim())?;
        let y = i64::from_str(y_str.trim())?;
        Ok(Self(Coord { x, y }))
    }
}

#[derive(Clone, Debug)]
pub struct Look(pub Vec<Direction>);

impl FromStr for Look {
    type Err = AnyError;
    fn from_str(s: &str) -> Result<Self, AnyError> {
        let directions = s
            .chars()
            .filter(|c| !c.is_whitespace() && *c != ',')
            .map(Direction::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        if directions.is_empty() {
            return Err(anyhow!("no directions to look in"));
        }
        Ok(Self(directions))
    }
}

#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Print bands as lines of 0/1.
    Window,

    /// Print bands as a Tcl list.
    Tcl,

    /// Print bands as Unicode Braille.
    Braille,

    /// Print bands as comma separated 0/1.
    Csv,

    /// Print map bounds and bands as JSON.
    Json,

    /// Print map bounds as JSON.
    Bounds,
}
