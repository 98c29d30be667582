use std::path::Path;

/// Initializes the logging system from the default `log4rs.yaml`.
///
/// It should be called once at the beginning of the application's execution.
pub fn init() -> Result<(), Box<dyn std::error::Error>> {
    init_from(Path::new("log4rs.yaml"))
}

/// Initializes the logging system from an explicit configuration file.
pub fn init_from(path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    log4rs::init_file(path, Default::default())?;
    Ok(())
}
