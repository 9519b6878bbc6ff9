const PRETTY_LOGS_ENV: &str = "RUST_LOG_PRETTY";

// `RUST_LOG_PRETTY=1` (or `true`) at build time switches to multi-line log output
fn main() {
    println!("cargo::rustc-check-cfg=cfg(pretty_logs)");
    println!("cargo::rerun-if-env-changed={PRETTY_LOGS_ENV}");

    let enabled = std::env::var(PRETTY_LOGS_ENV)
        .is_ok_and(|x| matches!(x.trim(), "1" | "true"));
    if enabled {
        println!("cargo::rustc-cfg=pretty_logs");
    }
}
