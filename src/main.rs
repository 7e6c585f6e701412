use anyhow::Result;

use combo_handler_patcher::config::Config;
use combo_handler_patcher::patcher;

fn main() -> Result<()> {
    // Parse configuration from command line and config file
    let config = Config::from_args_and_env()?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&config.log_level))
        .init();

    log::debug!("Patching {:?} into {:?}", config.input_path, config.output_path);
    let report = patcher::run(&config)?;
    println!("{}", report);

    Ok(())
}
