//! StudyLoop server binary.
//!
//! Usage:
//!   STUDYLOOP_BIND=0.0.0.0:8080 studyloop
//!
//! Or with args:
//!   studyloop --bind 127.0.0.1:8080 --upload-dir /tmp/uploads

use studyloop::config::Config;
use studyloop::server;

#[tokio::main]
async fn main() {
    // Parse simple args (no clap to keep the binary small)
    let args: Vec<String> = std::env::args().collect();
    let mut config = Config::from_env();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--bind" if i + 1 < args.len() => {
                config.bind_addr = args[i + 1].clone();
                i += 2;
            }
            "--upload-dir" if i + 1 < args.len() => {
                config.upload_dir = std::path::PathBuf::from(&args[i + 1]);
                i += 2;
            }
            "--max-upload-bytes" if i + 1 < args.len() => {
                match args[i + 1].parse::<usize>() {
                    Ok(n) => config.max_upload_bytes = n,
                    Err(_) => {
                        eprintln!("[Server] Invalid --max-upload-bytes '{}'", args[i + 1]);
                        std::process::exit(1);
                    }
                }
                i += 2;
            }
            "--help" | "-h" => {
                println!("studyloop — PDF quiz web server");
                println!();
                println!("Usage: studyloop [--bind ADDR:PORT] [--upload-dir PATH] [--max-upload-bytes N]");
                println!();
                println!("Environment variables:");
                println!("  STUDYLOOP_BIND              Bind address (default: 0.0.0.0:8080)");
                println!("  STUDYLOOP_UPLOAD_DIR        Upload directory (default: uploads)");
                println!("  STUDYLOOP_MAX_UPLOAD_BYTES  Request body cap (default: 10 MiB)");
                std::process::exit(0);
            }
            _ => {
                i += 1;
            }
        }
    }

    println!("[Server] Upload directory: {}", config.upload_dir.display());
    println!("[Server] Binding to: {}", config.bind_addr);

    if let Err(e) = server::serve(config).await {
        eprintln!("[Server] {}", e);
        std::process::exit(1);
    }
}
