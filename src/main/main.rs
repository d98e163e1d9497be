mod clap;
mod runtime;
mod signal;

use std::sync::Arc;

use ssync_core::{Config, Result, Server};
use ssync_router as router;

fn main() -> Result<()> {
	let args = clap::parse();
	let config = Config::load(args.config)?;
	ssync_core::log::init(&config.log);

	let runtime = runtime::new()?;
	let server = Arc::new(Server::new(config, Some(runtime.handle().clone())));

	runtime.spawn(signal::signal(Arc::clone(&server)));
	let result = runtime.block_on(async_main(&server));
	runtime::shutdown(runtime);

	tracing::debug!("Exit");
	result
}

#[tracing::instrument(name = "main", skip_all)]
async fn async_main(server: &Arc<Server>) -> Result<()> {
	let services = match router::start(server).await {
		Ok(services) => services,
		Err(error) => {
			tracing::error!("Critical error starting server: {error}");
			return Err(error);
		},
	};

	if let Err(error) = router::run(server, &services).await {
		tracing::error!("Critical error running server: {error}");
		return Err(error);
	}

	if let Err(error) = router::stop(services).await {
		tracing::error!("Critical error stopping server: {error}");
		return Err(error);
	}

	tracing::debug!("Exit runtime");
	Ok(())
}
