//! Checks on the shipped log4rs.yml

use log4rs::config::{load_config_file, Deserializers};

#[test]
fn test_console_only_shows_warnings() {
    let config = load_config_file("log4rs.yml", Deserializers::default()).expect("log4rs.yml invalid");

    let stderr = config
        .appenders()
        .iter()
        .find(|a| a.name() == "stderr")
        .expect("No stderr appender");
    // crate logger is debug and additive, so the console needs its own threshold
    assert_eq!(stderr.filters().len(), 1);

    let crate_logger = config
        .loggers()
        .iter()
        .find(|l| l.name() == "pdb_intersect")
        .expect("No pdb_intersect logger");
    assert_eq!(crate_logger.level(), log::LevelFilter::Debug);
}
