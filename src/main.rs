use clap::Parser;
use log::debug;

use datacheck::cli::SubCommandExtend;
use datacheck::config::{Opts, SubCommand};

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let opts = Opts::parse();
    debug!("{:?}", opts);

    match &opts.subcmd {
        SubCommand::Mask(config) => config.run(&opts),
        SubCommand::All(config) => config.run(&opts),
        SubCommand::Demo(config) => config.run(&opts),
    }
}
