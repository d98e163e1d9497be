mod layers;
mod request;
mod router;
mod run;
mod serve;

pub use run::{run, start, stop};
