use std::fs::File;

use anyhow::Context;
use log::info;

use aging_life::{
    config::Config,
    draw::{self, App},
    session::Session,
};

fn main() -> anyhow::Result<()> {
    let config = Config::from_args()?;

    // the alternate screen owns the terminal, so records only ever go to a file
    if let Some(path) = &config.log {
        let file = File::create(path)
            .with_context(|| format!("could not create log file {}", path.display()))?;
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug"))
            .target(env_logger::Target::Pipe(Box::new(file)))
            .init();
    }

    let session = Session::from_config(&config)?;
    info!(
        "grid {} window {} at {} fps",
        session.grid().size(),
        session.window(),
        session.fps()
    );

    let mut app = App::new(session, &config);
    draw::run(&mut app).map_err(|e| anyhow::anyhow!(e))?;
    Ok(())
}
