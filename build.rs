use std::env;
use std::fs;
use std::path::Path;

fn main() {
    // Load variables from .env when present
    let env_file = Path::new(".env");

    if env_file.exists() {
        println!("cargo:rerun-if-changed=.env");

        if let Ok(contents) = fs::read_to_string(env_file) {
            for line in contents.lines() {
                let line = line.trim();
                if line.is_empty() || line.starts_with('#') {
                    continue;
                }

                // KEY=VALUE, optionally quoted
                if let Some((key, value)) = line.split_once('=') {
                    let key = key.trim();
                    let value = value.trim().trim_matches('"');

                    // Variables already set in the environment win
                    if env::var(key).is_err() {
                        println!("cargo:rustc-env={}={}", key, value);
                    }
                }
            }
        }
    } else {
        println!("cargo:warning=No .env file found. Using default backend URLs (see config.rs).");
    }

    println!("cargo:rerun-if-changed=build.rs");
    for key in [
        "BACKEND_URL_DEVELOPMENT",
        "BACKEND_URL_PRODUCTION",
        "ENVIRONMENT",
        "ENABLE_LOGGING",
        "LOG_LEVEL",
    ] {
        println!("cargo:rerun-if-env-changed={}", key);
    }
}
