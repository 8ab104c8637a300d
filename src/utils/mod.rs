pub mod panic;
mod signal;

pub use signal::*;
