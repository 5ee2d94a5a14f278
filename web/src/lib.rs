use clap::Parser;
use wasm_bindgen::prelude::*;

pub use api::*;
pub use session::*;

mod api;
mod session;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,

    /// Level to start the first session at
    #[arg(short, long, default_value_t = 1)]
    level: u32,
}

impl Args {
    /// Parses arguments out of a URL hash such as `#-vv&--seed=42&--level=5`.
    pub fn from_hash(hash: &str) -> anyhow::Result<Self> {
        Ok(Self::try_parse_from(hash.split(['#', '&']))?)
    }

    pub fn from_location() -> anyhow::Result<Self> {
        let hash = gloo::utils::window()
            .location()
            .hash()
            .unwrap_or_else(|_| "".to_string());
        Self::from_hash(&hash)
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn log_level(&self) -> Option<log::Level> {
        self.verbose.log_level()
    }
}

#[wasm_bindgen(start)]
pub fn start() {
    #[cfg(feature = "console_error_panic_hook")]
    {
        console_error_panic_hook::set_once();
    }

    let args = Args::from_location().expect("Could not parse args");
    if let Some(log_level) = args.log_level() {
        console_log::init_with_level(log_level).expect("Error initializing logger");
    }
    log::debug!("seed: {:?}, level: {}", args.seed(), args.level());
}

/// Seed for the generator when none was forced, drawn from `Math.random`.
pub(crate) fn random_seed() -> u64 {
    (js_sys::Math::random() * (u64::MAX as f64)) as u64
}

pub(crate) fn js_error(err: anyhow::Error) -> JsError {
    JsError::new(&format!("{err:#}"))
}
