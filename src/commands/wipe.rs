use anyhow::Result;

use daybook_core::config::AppConfig;
use daybook_core::store;

pub fn run(config: &AppConfig, force: bool) -> Result<()> {
    if !force {
        anyhow::bail!("This deletes all local data. Re-run with --force to confirm.");
    }

    store::wipe(&config.data_dir)?;
    println!("Local data wiped");
    Ok(())
}
