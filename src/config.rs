//! Runtime configuration.
//!
//! Everything the original prototype kept as module-level globals
//! (stylesheet, upload folder, quiz length) is explicit here and passed
//! in at startup. Resolution order for each value: CLI flag, environment
//! variable, built-in default.

use std::path::PathBuf;

/// Default stylesheet served inline on every page.
pub const DEFAULT_CSS: &str = "\
body {
  font-family: sans-serif;
  background: #f0f8ff;
  text-align: center;
  padding-top: 50px;
}

.container {
  width: 60%;
  margin: auto;
  padding: 20px;
  background: white;
  box-shadow: 0 2px 10px rgba(0,0,0,0.1);
  border-radius: 10px;
}

input[type=\"text\"], input[type=\"file\"] {
  padding: 10px;
  width: 80%;
}

button {
  padding: 10px 20px;
  background: #2e8b57;
  color: white;
  border: none;
  border-radius: 5px;
}
";

fn default_bind() -> String {
    "0.0.0.0:8080".to_string()
}

fn default_upload_dir() -> PathBuf {
    PathBuf::from("uploads")
}

fn default_max_upload_bytes() -> usize {
    10 * 1024 * 1024
}

fn default_max_quiz_items() -> usize {
    5
}

#[derive(Debug, Clone)]
pub struct Config {
    /// Address the HTTP server binds to.
    pub bind_addr: String,
    /// Directory uploaded PDFs are written to. Created on startup.
    pub upload_dir: PathBuf,
    /// Request body cap, enforced by the body-limit layer.
    pub max_upload_bytes: usize,
    /// Maximum number of questions sampled per quiz.
    pub max_quiz_items: usize,
    /// Stylesheet injected into every rendered page.
    pub css: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: default_bind(),
            upload_dir: default_upload_dir(),
            max_upload_bytes: default_max_upload_bytes(),
            max_quiz_items: default_max_quiz_items(),
            css: DEFAULT_CSS.to_string(),
        }
    }
}

impl Config {
    /// Build a config from environment variables, falling back to defaults.
    ///
    /// Recognized: STUDYLOOP_BIND, STUDYLOOP_UPLOAD_DIR,
    /// STUDYLOOP_MAX_UPLOAD_BYTES.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(bind) = std::env::var("STUDYLOOP_BIND") {
            if !bind.is_empty() {
                config.bind_addr = bind;
            }
        }
        if let Ok(dir) = std::env::var("STUDYLOOP_UPLOAD_DIR") {
            if !dir.is_empty() {
                config.upload_dir = PathBuf::from(dir);
            }
        }
        if let Ok(max) = std::env::var("STUDYLOOP_MAX_UPLOAD_BYTES") {
            if let Ok(n) = max.parse::<usize>() {
                config.max_upload_bytes = n;
            }
        }

        config
    }
}
