// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use clap::Parser;
use clipmark::SaveMode;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_PORT: u16 = 9999;
pub const DEFAULT_MARKER_FILE: &str = "markers.json";

#[derive(Debug, Clone)]
pub struct NodeConfig {
    pub bind_addr: SocketAddr,
    /// Holds the marker file and backs the static fallback. Becomes the
    /// working directory at startup.
    pub data_dir: PathBuf,
    /// Relative paths resolve against `data_dir`.
    pub marker_file: PathBuf,
    pub save_mode: SaveMode,
    pub open_browser: bool,
    pub browser_delay: Duration,
    /// Save body cap. `None` accepts any size.
    pub max_body_bytes: Option<usize>,
    pub serve_static: bool,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], DEFAULT_PORT)),
            data_dir: PathBuf::from("."),
            marker_file: PathBuf::from(DEFAULT_MARKER_FILE),
            save_mode: SaveMode::Verbatim,
            open_browser: true,
            browser_delay: Duration::from_millis(1000),
            max_body_bytes: None,
            serve_static: true,
        }
    }
}

impl NodeConfig {
    pub fn marker_path(&self) -> PathBuf {
        self.data_dir.join(&self.marker_file)
    }

    /// URL printed at startup and handed to the browser.
    pub fn local_url(&self) -> String {
        format!("http://localhost:{}", self.bind_addr.port())
    }
}

#[derive(Parser, Debug)]
#[command(name = "clipmark")]
#[command(about = "Mark timestamps in local audio and video files from the browser", long_about = None)]
pub struct NodeArgs {
    /// Address to listen on.
    #[arg(long, env = "CLIPMARK_BIND", default_value_t = NodeConfig::default().bind_addr)]
    pub bind: SocketAddr,

    /// Directory holding the marker file. Defaults to the directory of the executable.
    #[arg(long, env = "CLIPMARK_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Marker file name, relative to the data directory.
    #[arg(long, env = "CLIPMARK_MARKER_FILE", default_value = DEFAULT_MARKER_FILE)]
    pub marker_file: PathBuf,

    /// Reject saves that are not a valid marker document.
    #[arg(long, env = "CLIPMARK_VALIDATE")]
    pub validate: bool,

    /// Do not open a browser window at startup.
    #[arg(long, env = "CLIPMARK_NO_BROWSER")]
    pub no_browser: bool,

    #[arg(long, env = "CLIPMARK_BROWSER_DELAY_MS", default_value_t = 1000)]
    pub browser_delay_ms: u64,

    /// Largest accepted save body. Unlimited when unset.
    #[arg(long, env = "CLIPMARK_MAX_BODY_BYTES")]
    pub max_body_bytes: Option<usize>,

    /// Disable serving other files from the data directory.
    #[arg(long, env = "CLIPMARK_NO_STATIC")]
    pub no_static: bool,
}

impl NodeArgs {
    pub fn into_config(self) -> NodeConfig {
        NodeConfig {
            bind_addr: self.bind,
            data_dir: self.data_dir.unwrap_or_else(default_data_dir),
            marker_file: self.marker_file,
            save_mode: if self.validate { SaveMode::Validated } else { SaveMode::Verbatim },
            open_browser: !self.no_browser,
            browser_delay: Duration::from_millis(self.browser_delay_ms),
            max_body_bytes: self.max_body_bytes,
            serve_static: !self.no_static,
        }
    }
}

/// Directory of the running executable, so the marker file does not depend on
/// where the binary was started from.
pub fn default_data_dir() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|p| p.to_path_buf()))
        .unwrap_or_else(|| PathBuf::from("."))
}
