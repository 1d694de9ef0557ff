use clap::Parser;
use log::info;

use fractales::{PngPresenter, Router, ServerConfig, serve};

/// Serves Mandelbrot and Julia renders as PNG images.
#[derive(Debug, Parser)]
#[command(name = "fractales", version, about)]
struct Args {
    /// Address to listen on
    #[arg(long, default_value = fractales::controllers::http::server::DEFAULT_ADDRESS)]
    port: String,

    /// Threads used to render a single image (defaults to one per CPU)
    #[arg(long)]
    threads: Option<usize>,

    /// Threads accepting and answering requests
    #[arg(long, default_value_t = fractales::controllers::http::server::DEFAULT_WORKERS)]
    workers: usize,
}

impl Args {
    fn server_config(&self) -> ServerConfig {
        ServerConfig {
            address: self.port.clone(),
            workers: self.workers,
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    if let Some(threads) = args.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()?;
    }
    info!("Rendering on {} threads", rayon::current_num_threads());

    serve(&args.server_config(), Router::new(PngPresenter::new()))?;

    Ok(())
}
