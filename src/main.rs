//! Command-line entry point: populate the optical-depth store in the
//! current directory, fetching HITRAN line data on first use.

use anyhow::Context;
use log::info;

use taugen::prelude::*;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = BatchConfig::default();
    let mut provider = HitranProvider::new(HitranProviderConfig::default());
    let store = DepthStore::open(DEFAULT_STORE_PATH)
        .with_context(|| format!("opening store at {DEFAULT_STORE_PATH}"))?;

    info!("Populating {DEFAULT_STORE_PATH}");
    let stats = populate(&store, &mut provider, &config)?;
    info!("{stats}");

    RunManifest::new(&config)
        .write(MANIFEST_FILE_NAME)
        .with_context(|| format!("writing {MANIFEST_FILE_NAME}"))?;

    Ok(())
}
