use clap::Parser;

mod cli;
mod files;
mod shoot;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = cli::Args::parse();

    let fb = shoot::shoot(&args)?;
    shoot::save_png(&fb, &args.out)?;
    log::info!("wrote {}", args.out.display());
    Ok(())
}
