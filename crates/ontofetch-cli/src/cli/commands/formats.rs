//! `ontofetch formats` – show the negotiation catalog.

use anyhow::Result;
use ontofetch_core::config::FetchConfig;

pub fn run_formats(cfg: &FetchConfig) -> Result<()> {
    let catalog = cfg.catalog()?;
    println!("{:<4} {:<10} {:<8} {}", "#", "NAME", "EXT", "ACCEPT");
    for (i, c) in catalog.iter().enumerate() {
        println!("{:<4} {:<10} {:<8} {}", i + 1, c.name, c.extension, c.accept);
    }
    Ok(())
}
