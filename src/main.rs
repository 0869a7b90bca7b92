mod controls;
mod data;
mod graphics;
mod math;
mod modes;
mod snake;

use anyhow::Context;

use data::{Config, Program};
use modes::Mode;

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();

    let config = Config::default().eval_args(&mut args.iter())?;

    if config.help {
        data::reader::print_usage();
        return Ok(());
    }

    data::log::init(config.quiet).context("Failed to initialise logging")?;

    let prog = Program::new(config)?;
    prog.print_startup_info();

    match prog.mode() {
        Mode::Win => modes::windowed_mode::winit_main(prog),

        #[cfg(feature = "minifb")]
        Mode::WinLegacy => modes::minifb_mode::minifb_main(prog),
    }
}
