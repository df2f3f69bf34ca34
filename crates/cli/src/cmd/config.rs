use woplab_core::config::{ResolvedConfig, settings_files};

pub fn run(cfg: &ResolvedConfig) {
    println!("config files:");
    for path in settings_files() {
        let state = if path.is_file() { "exists" } else { "missing" };
        println!("  {} ({state})", path.display());
    }
    match &cfg.source {
        Some(path) => println!("loaded: {}", path.display()),
        None => println!("loaded: built-in defaults"),
    }
    println!();

    match toml::to_string_pretty(cfg) {
        Ok(s) => print!("{s}"),
        Err(e) => {
            eprintln!("Failed to serialize config: {e}");
            std::process::exit(1);
        }
    }
}
