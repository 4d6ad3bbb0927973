use clap::Parser;

use matebound::options::Options;
use matebound::presets;
use matebound::tb::MateTb;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .format_target(false)
        .init();

    let mut options = Options::parse();
    presets::apply(&mut options);
    println!("Running with options {options}");

    let mut tb = match MateTb::new(&options) {
        Ok(tb) => tb,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };
    tb.create();
    tb.output();

    if let Some(path) = &options.out_file {
        if let Err(err) = tb.write_tb(path) {
            eprintln!("Cannot write TB to {path}: {err}");
            std::process::exit(1);
        }
    }
}
