use std::{
    io::{self, IsTerminal as _},
    path::PathBuf,
};

use tgrid::{
    app::{self, AppError, RunOptions},
    logging,
    settings::Settings,
};

use clap::Parser;

#[derive(Parser, Debug)]
#[clap(version, author, about, name = "tgrid")]
struct Args {
    #[clap(short = 'W', long, help = "Maze width, including the outer walls")]
    width: Option<i32>,
    #[clap(short = 'H', long, help = "Maze height, including the outer walls")]
    height: Option<i32>,
    #[clap(short, long, help = "Seed for the maze generator")]
    seed: Option<u64>,
    #[clap(short, long, help = "Solve the maze stored in this file instead of generating one")]
    input: Option<PathBuf>,
    #[clap(long, help = "Save the generated maze, as RON for .ron files and as text otherwise")]
    save: Option<PathBuf>,
    #[clap(short, long, action, help = "Replay carving and solving frame by frame")]
    animate: bool,
    #[clap(long, action, help = "Print without colors")]
    no_color: bool,
    #[clap(short, long, help = "Load settings from this file")]
    config: Option<PathBuf>,
    #[clap(long, action, help = "Reset config to default and quit")]
    reset_config: bool,
    #[clap(long, action, help = "Show config path and quit")]
    show_config_path: bool,
    #[clap(short, long, action = clap::ArgAction::Count, help = "More verbose logging, can be repeated")]
    verbose: u8,
}

fn main() -> Result<(), AppError> {
    let args = Args::parse();
    let settings_path = args.config.clone().unwrap_or_else(Settings::default_path);

    if args.reset_config {
        Settings::reset_config(&settings_path)?;
        return Ok(());
    }

    if args.show_config_path {
        if let Some(s) = settings_path.to_str() {
            println!("{}", s);
        } else {
            println!("{:?}", settings_path);
        }
        return Ok(());
    }

    better_panic::install();

    let settings = Settings::load(&settings_path)?;
    let level = settings.get_log_level().raised(args.verbose);
    logging::init(level.to_filter(), io::stderr().is_terminal())?;

    let defaults = RunOptions::from_settings(&settings);
    let opts = RunOptions {
        width: args.width.unwrap_or(defaults.width),
        height: args.height.unwrap_or(defaults.height),
        seed: args.seed.or(defaults.seed),
        input: args.input,
        save: args.save,
        animate: args.animate,
        color: defaults.color && !args.no_color && io::stdout().is_terminal(),
    };

    let mut stdout = io::stdout().lock();
    app::run(&settings, &opts, &mut stdout)?;

    Ok(())
}
