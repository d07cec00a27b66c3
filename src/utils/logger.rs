use chrono::Utc;
use log::info;
use std::io::Write;

/// Logger setup shared by the GUI and the CLI.
pub struct StudioLogger;

impl StudioLogger {
    /// Initialize `env_logger` with a timestamped format. `RUST_LOG` wins over
    /// `default_level` when set. Calling it twice is harmless.
    pub fn init(default_level: &str) {
        let result = env_logger::Builder::from_env(
            env_logger::Env::default().default_filter_or(default_level),
        )
        .format(|buf, record| {
            writeln!(
                buf,
                "[{}] [{}] [{}] {}",
                Utc::now().format("%Y-%m-%d %H:%M:%S UTC"),
                record.level(),
                record.target(),
                record.args()
            )
        })
        .try_init();

        if result.is_ok() {
            info!("UML Studio logger initialized");
        }
    }
}
