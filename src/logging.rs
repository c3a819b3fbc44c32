use anyhow::{Context, Result};
use log::{LevelFilter, Log, Metadata, Record};
use std::fs;
use std::io::Write;
use std::path::Path;
use std::sync::{Arc, Mutex};
use tracing_appender::rolling::{RollingFileAppender, Rotation};

/// Console output that can be held back while the TUI owns the screen
#[derive(Debug, Default)]
struct ConsoleSink {
    suspended: bool,
    pending: Vec<String>,
}

impl ConsoleSink {
    fn emit(&mut self, line: String) {
        if self.suspended {
            self.pending.push(line);
        } else {
            println!("{}", line);
        }
    }

    fn resume(&mut self) {
        self.suspended = false;
        let mut stdout = std::io::stdout().lock();
        for line in self.pending.drain(..) {
            let _ = writeln!(stdout, "{}", line);
        }
        let _ = stdout.flush();
    }
}

/// Handle for pausing console logging around the terminal UI
#[derive(Debug, Clone)]
pub struct ConsoleHandle {
    sink: Arc<Mutex<ConsoleSink>>,
}

impl ConsoleHandle {
    /// Queue console lines instead of printing them
    pub fn suspend(&self) {
        if let Ok(mut sink) = self.sink.lock() {
            sink.suspended = true;
        }
    }

    /// Print everything queued since `suspend` and go back to printing directly
    pub fn resume(&self) {
        if let Ok(mut sink) = self.sink.lock() {
            sink.resume();
        }
    }
}

/// Logger writing `[LEVEL] message` to the console and, optionally, a rotating file
struct PasteimgLogger {
    console: Arc<Mutex<ConsoleSink>>,
    file_writer: Option<Mutex<RollingFileAppender>>,
    level: LevelFilter,
}

impl Log for PasteimgLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let line = format!("[{}] {}", record.level(), record.args());

        if let Some(file_writer) = &self.file_writer {
            if let Ok(mut writer) = file_writer.lock() {
                let timestamp = chrono::Local::now();
                let _ = writeln!(writer, "{} {}", timestamp.format("%Y-%m-%d %H:%M:%S"), line);
            }
        }

        if let Ok(mut console) = self.console.lock() {
            console.emit(line);
        }
    }

    fn flush(&self) {
        // RollingFileAppender handles flushing automatically
    }
}

/// Parse log level string to LevelFilter
pub fn parse_level(level_str: &str) -> LevelFilter {
    match level_str.to_lowercase().as_str() {
        "off" => LevelFilter::Off,
        "error" => LevelFilter::Error,
        "warn" => LevelFilter::Warn,
        "info" => LevelFilter::Info,
        "debug" => LevelFilter::Debug,
        "trace" => LevelFilter::Trace,
        _ => LevelFilter::Info, // Default to info
    }
}

fn file_appender(log_file_path: &Path) -> Result<RollingFileAppender> {
    let dir = log_file_path
        .parent()
        .ok_or_else(|| anyhow::anyhow!("Invalid log file path {:?}", log_file_path))?;
    fs::create_dir_all(dir).context("Failed to create log directory")?;

    // Daily rotation, keep 3 files
    RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .max_log_files(3)
        .filename_prefix(
            log_file_path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("pasteimg"),
        )
        .filename_suffix(
            log_file_path
                .extension()
                .and_then(|s| s.to_str())
                .unwrap_or("log"),
        )
        .build(dir)
        .context("Failed to create rotating file appender")
}

/// Initialize the global logger
pub fn init_logger(level: &str, log_file_path: Option<&Path>) -> Result<ConsoleHandle> {
    let file_writer = log_file_path.map(file_appender).transpose()?.map(Mutex::new);

    let console = Arc::new(Mutex::new(ConsoleSink::default()));
    let level = parse_level(level);

    let logger = PasteimgLogger {
        console: Arc::clone(&console),
        file_writer,
        level,
    };

    log::set_boxed_logger(Box::new(logger)).context("Failed to set global logger")?;
    log::set_max_level(level);

    Ok(ConsoleHandle { sink: console })
}
