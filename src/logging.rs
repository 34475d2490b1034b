use std::io::Write;

use env_logger::Builder;
use log::LevelFilter;

/// Sets up env_logger with the format "LEVEL\tmessage".
///
/// 0: warnings (photos not transferred, recovered move failures), 1: every move,
/// 2+: per-photo decisions. `RUST_LOG` overrides the flag.
pub fn configure_logging(verbosity: u8) {
    let level = match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };

    Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format(|buf, record| {
            let style = buf.default_level_style(record.level());
            writeln!(buf, "{style}{}{style:#}\t{}", record.level(), record.args())
        })
        .init();
}
