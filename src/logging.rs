// Logger setup for hosts embedding the model (CLI tools, tests).
// The library itself only talks to the `log` facade.
use simplelog::{ColorChoice, ConfigBuilder, LevelFilter, TermLogger, TerminalMode};

/// Install a stderr logger at `level`. Safe to call more than once: if a
/// logger is already installed the call does nothing.
pub fn init(level: LevelFilter) {
    let config = ConfigBuilder::new()
        .set_target_level(LevelFilter::Error)
        .set_location_level(LevelFilter::Off)
        .build();
    // SetLoggerError only means someone got there first.
    let _ = TermLogger::init(level, config, TerminalMode::Stderr, ColorChoice::Auto);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_is_idempotent() {
        init(LevelFilter::Debug);
        init(LevelFilter::Warn);
        log::debug!("logger installed twice without panicking");
    }
}
