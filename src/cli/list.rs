use crate::config::Config;
use crate::errors::Result;
use std::path::PathBuf;

/// List all suites visible to this configuration.
pub fn run(config_path: Option<PathBuf>) -> Result<()> {
    let config = Config::load(config_path.as_deref())?;
    let suites = config.all_suites();

    println!(
        "{:<12} {:<20} {:<22} {:<8}",
        "SUITE", "IMAGE", "CONTAINER", "PROBES"
    );
    println!("{}", "-".repeat(64));

    for (name, spec) in suites {
        println!(
            "{:<12} {:<20} {:<22} {:<8}",
            name,
            spec.image,
            spec.container,
            spec.probes.len()
        );
    }

    Ok(())
}
