#![windows_subsystem = "windows"]

use std::{error::Error, io::Write};

use iced::Size;
use tracing::{error, info};

use billybot::config::Config;
use billybot_gui::{
    app::App,
    args::{parse_args, Arg},
    dir::BillyBotDirectory,
    logger::{parse_log_level, setup_logger},
    VERSION,
};

fn main() -> Result<(), Box<dyn Error>> {
    let args = parse_args(std::env::args().collect(), VERSION)?;
    let mut config_path = None;
    let mut datadir = None;
    for arg in args {
        match arg {
            Arg::ConfigPath(path) => config_path = Some(path),
            Arg::DatadirPath(dir) => datadir = Some(dir),
        }
    }

    let config = Config::from_file(config_path)
        .map_err(|e| format!("Error parsing configuration: {}", e))?;

    let datadir = match datadir {
        Some(dir) => dir,
        None => config
            .data_dir()
            .map(BillyBotDirectory::new)
            .ok_or("Failed to get default data directory")?,
    };
    if !datadir.exists() {
        datadir.init()?;
    }

    let log_level = parse_log_level()?.unwrap_or(config.log_level);
    setup_logger(log_level, &datadir)?;
    setup_panic_hook();

    info!("Starting BillyBot {} ({:?} signup)", VERSION, config.variant);
    let flow = billybot::signup_flow(&config);

    if let Err(e) = iced::application(App::title, App::update, App::view)
        .window_size(Size {
            width: 480.0,
            height: 720.0,
        })
        .run_with(move || App::new(flow))
    {
        error!("{}", e);
        Err(format!("Failed to launch UI: {}", e).into())
    } else {
        Ok(())
    }
}

// A panic in any thread should stop the main thread, and print the panic.
fn setup_panic_hook() {
    std::panic::set_hook(Box::new(move |panic_info| {
        let file = panic_info
            .location()
            .map(|l| l.file())
            .unwrap_or_else(|| "'unknown'");
        let line = panic_info
            .location()
            .map(|l| l.line().to_string())
            .unwrap_or_else(|| "'unknown'".to_string());

        let bt = backtrace::Backtrace::new();
        let info = panic_info
            .payload()
            .downcast_ref::<&str>()
            .map(|s| s.to_string())
            .or_else(|| panic_info.payload().downcast_ref::<String>().cloned());
        error!(
            "panic occurred at line {} of file {}: {:?}\n{:?}",
            line, file, info, bt
        );

        std::io::stdout().flush().expect("Flushing stdout");
        std::process::exit(1);
    }));
}
