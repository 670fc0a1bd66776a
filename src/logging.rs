use std::io::Write;

/// Installs the process logger. `RUST_LOG`, when set, refines `level`
/// per module.
pub fn setup_logging(level: log::LevelFilter) -> Result<(), log::SetLoggerError> {
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format(|buf, record| {
            let thread = std::thread::current();
            writeln!(
                buf,
                "[{0} {1} {2} {3}] {4}",
                record.level(),
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
                thread.name().unwrap_or("-"),
                record.module_path().unwrap_or(""),
                record.args()
            )
        })
        .target(env_logger::Target::Stdout)
        .try_init()
}
