use tracing_subscriber::EnvFilter;

/// Filter precedence: `PAPERSHELF_LOG`, then `RUST_LOG`, then `warn`.
fn filter() -> EnvFilter {
    for key in ["PAPERSHELF_LOG", "RUST_LOG"] {
        if let Ok(v) = std::env::var(key) {
            if let Ok(f) = EnvFilter::try_new(v.trim()) {
                if !v.trim().is_empty() {
                    return f;
                }
            }
        }
    }
    EnvFilter::new("warn")
}

/// Logs go to stderr; stdout carries only view output.
pub fn init() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter())
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
