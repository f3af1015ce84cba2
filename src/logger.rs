use std::env;

use simplelog::{ConfigBuilder, SharedLogger};

use crate::prelude::*;

pub const LOG_LEVEL_ENV: &str = "VIZDIFF_LOG";

fn get_log_level() -> log::LevelFilter {
    env::var(LOG_LEVEL_ENV)
        .ok()
        .and_then(|log_level| log_level.parse::<log::LevelFilter>().ok())
        .unwrap_or(log::LevelFilter::Info)
}

pub fn get_local_logger() -> Box<dyn SharedLogger> {
    let config = ConfigBuilder::new()
        .set_time_level(log::LevelFilter::Off)
        .set_target_level(log::LevelFilter::Debug)
        .set_thread_level(log::LevelFilter::Off)
        .build();

    simplelog::TermLogger::new(
        get_log_level(),
        config,
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )
}

pub fn init_local_logger() -> Result<()> {
    simplelog::CombinedLogger::init(vec![get_local_logger()])
        .context("Failed to initialize the logger")?;
    Ok(())
}
