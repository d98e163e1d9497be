use tracing_subscriber::{prelude::*, EnvFilter};

pub use tracing::Level;

/// Installs the process-wide `tracing` subscriber: an `EnvFilter` seeded
/// from `config.log` (falling back to `"warn"` on a bad directive string)
/// feeding a plain `fmt` layer. Call once from `main`.
pub fn init(directives: &str) {
	let filter_layer = EnvFilter::try_new(directives).unwrap_or_else(|e| {
		eprintln!("failed to parse log filter {directives:?}: {e}, falling back to \"warn\"");
		EnvFilter::try_new("warn").expect("\"warn\" is a valid EnvFilter directive")
	});

	let fmt_layer = tracing_subscriber::fmt::Layer::new();

	tracing_subscriber::registry()
		.with(filter_layer)
		.with(fmt_layer)
		.init();
}

// Wraps around the tracing macros so project code reaches for these rather
// than importing ::tracing directly.

#[macro_export]
macro_rules! error {
	( $($x:tt)+ ) => { ::tracing::error!( $($x)+ ) };
}

#[macro_export]
macro_rules! warn {
	( $($x:tt)+ ) => { ::tracing::warn!( $($x)+ ) };
}

#[macro_export]
macro_rules! info {
	( $($x:tt)+ ) => { ::tracing::info!( $($x)+ ) };
}

#[macro_export]
macro_rules! debug {
	( $($x:tt)+ ) => { ::tracing::debug!( $($x)+ ) };
}
