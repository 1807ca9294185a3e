mod direction;
mod encode;
mod input;
mod options;

use anyhow::Error as AnyError;
use clap::Parser;
use encode::{JsonView, Panorama};
use log::debug;
use options::{Cli, Command as CliCmd, Look, XY};
use skyline::View;

fn main() -> Result<(), AnyError> {
    let Cli {
        map,
        width,
        resolution,
        observer: XY(observer),
        z0,
        void,
        radius,
        look: Look(directions),
        cmd,
    } = Cli::parse();

    env_logger::init();

    let input::MapData { cells, width } = input::load(&map, width)?;
    let view = View::builder()
        .map(cells, width)
        .resolution(resolution)
        .build()?;
    let bounds = view.map().bounds();
    debug!("view; {bounds:?}, resolution: {}", view.resolution());

    let panorama = || -> Result<Panorama, AnyError> {
        let windows = directions
            .iter()
            .map(|direction| direction.window(&view, observer, radius, void, z0))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Panorama::new(&windows))
    };

    match cmd {
        CliCmd::Bounds => println!("{}", serde_json::to_string(&bounds)?),
        CliCmd::Window => println!("{}", panorama()?),
        CliCmd::Braille => println!("{}", panorama()?.braille()),
        CliCmd::Csv => println!("{}", panorama()?.csv()),
        CliCmd::Tcl => println!("{}", panorama()?.tcl()),
        CliCmd::Json => {
            let json = serde_json::to_string(&JsonView {
                bounds: &bounds,
                resolution: view.resolution(),
                window: panorama()?.bits(),
            })?;
            println!("{json}");
        }
    }
    Ok(())
}
