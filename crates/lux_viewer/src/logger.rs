use log::LevelFilter;

/// Initialize the logger; `RUST_LOG` filters are applied on top of `level`.
pub fn init_logger(level: LevelFilter) {
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}
