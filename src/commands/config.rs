use anyhow::Result;
use owo_colors::OwoColorize;
use plancal_core::config::PlanCalConfig;

pub fn run() -> Result<()> {
    let config_path = PlanCalConfig::config_path().map_err(|e| anyhow::anyhow!(e))?;
    let config = PlanCalConfig::load().map_err(|e| anyhow::anyhow!(e))?;
    let window = config.window().map_err(|e| anyhow::anyhow!(e))?;

    println!("{}", "Paths".bold());
    println!("  Config:  {}", config_path.display());
    println!();
    println!("{}", "Operating year".bold());
    println!("  Start:   {}", window.start());
    println!("  End:     {}", window.end());

    Ok(())
}
