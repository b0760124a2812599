use std::fs::{create_dir_all, File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use chrono::Local;
use env_logger::{Builder, Target};

use crate::config_loader::LoggingConfig;

/// Writes every log line to the console and, when configured, appends it to a file.
pub struct TeeWriter {
    console: bool,
    file: Option<File>,
}

impl TeeWriter {
    pub fn new(console: bool, file: Option<File>) -> Self {
        Self { console, file }
    }
}

impl Write for TeeWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.console {
            io::stderr().write_all(buf)?;
        }
        if let Some(file) = &mut self.file {
            file.write_all(buf)?;
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        if self.console {
            io::stderr().flush()?;
        }
        if let Some(file) = &mut self.file {
            file.flush()?;
        }
        Ok(())
    }
}

fn open_append(path: &Path) -> Result<File> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        create_dir_all(dir)
            .with_context(|| format!("Could not create log directory {}", dir.display()))?;
    }
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Could not open log file {}", path.display()))
}

/// Installs the global logger: `timestamp - component - LEVEL - message`.
pub fn setup_logging(cfg: &LoggingConfig) -> Result<()> {
    let file = cfg.log_file().map(open_append).transpose()?;

    Builder::new()
        .filter_level(cfg.level_filter()?)
        .target(Target::Pipe(Box::new(TeeWriter::new(cfg.console, file))))
        .format(|buf, record| {
            writeln!(
                buf,
                "{} - {} - {} - {}",
                Local::now().format("%Y-%m-%d %H:%M:%S,%3f"),
                record.target(),
                record.level(),
                record.args()
            )
        })
        .try_init()
        .map_err(|e| anyhow!("Logger already initialized: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;

    #[test]
    fn test_tee_writer_appends_to_file() {
        let path = std::env::temp_dir().join(format!("tee_writer_{}.log", std::process::id()));
        let _ = std::fs::remove_file(&path);

        {
            let mut writer = TeeWriter::new(false, Some(open_append(&path).unwrap()));
            writeln!(writer, "first").unwrap();
        }
        {
            let mut writer = TeeWriter::new(false, Some(open_append(&path).unwrap()));
            writeln!(writer, "second").unwrap();
            writer.flush().unwrap();
        }

        let mut contents = String::new();
        File::open(&path)
            .unwrap()
            .read_to_string(&mut contents)
            .unwrap();
        assert_eq!(contents, "first\nsecond\n");

        std::fs::remove_file(&path).unwrap();
    }
}
