// src/bin/cli.rs
use nextclass::cli;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    if let Err(e) = cli::run() {
        return Err(color_eyre::eyre::eyre!("{e}"));
    }
    Ok(())
}
