use crate::config::Config;
use crate::docker::runtime::DockerCli;
use crate::errors::{Result, SmokeError};
use crate::runner::{RunOptions, SuiteRunner};
use std::path::PathBuf;

/// Run one smoke-test suite end to end and print its summary.
pub fn run(suite: String, options: RunOptions, config_path: Option<PathBuf>) -> Result<()> {
    let config = Config::load(config_path.as_deref())?;
    let spec = config.resolve(&suite)?;

    let docker = DockerCli::new(options.inspect);
    if !docker.is_available() {
        return Err(SmokeError::DockerUnavailable);
    }

    let runner = SuiteRunner::new(&docker, &options);
    let report = runner.execute(&suite, &spec)?;
    report.print_summary();

    Ok(())
}
