mod cli;
mod commands;
mod libs;
mod logger;
mod schemas;

use clap::Parser;
use cli::cmd_enums::Cli;

fn main() {
    let cli = Cli::parse();
    logger::init(cli.debug);

    let code = commands::install::run(cli);
    std::process::exit(code);
}
