use anyhow::Context;
use asciidonut::{app, config::USAGE, Cli};

fn main() -> anyhow::Result<()> {
    // Logs go to stderr so they never interleave with the frame on stdout.
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format_timestamp_micros()
        .init();

    let cli = Cli::parse(std::env::args().skip(1)).context("invalid command line")?;
    if cli.help {
        print!("{USAGE}");
        return Ok(());
    }

    let cfg = cli.resolve().context("failed to build configuration")?;
    log::info!(
        "starting {} variant, {}x{}, shader {}",
        cfg.variant,
        cfg.width,
        cfg.height,
        cfg.shader
    );

    app::run(&cfg, cli.dump).with_context(|| format!("{} variant failed", cfg.variant))?;
    Ok(())
}
