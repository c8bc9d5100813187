use std::fs;
use std::io::{self, BufWriter};
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use log::info;

use mandelbrot_explorer::protocol::worker;
use mandelbrot_explorer::{
    ColourMapKinds, Config, ExploreController, PpmFilePresenter, RenderController,
    colour_map_factory,
};

#[derive(Parser)]
#[command(
    name = "mandelbrot_explorer",
    about = "Escape-time Mandelbrot renderer with an offloaded interactive explorer"
)]
struct Cli {
    /// JSON configuration file; flags below override its values
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Cmd,
}

#[derive(Subcommand)]
enum Cmd {
    /// Render one viewport to a PPM file
    Render {
        #[command(flatten)]
        view: ViewOverrides,
        #[arg(short, long, default_value = "mandelbrot.ppm")]
        output: PathBuf,
    },
    /// Read navigation actions from stdin, one per line, writing a PPM per delivered frame
    Explore {
        #[command(flatten)]
        view: ViewOverrides,
        #[arg(long, default_value = "frames")]
        output_dir: PathBuf,
    },
    /// Serve field computations as JSON lines on stdin/stdout
    Worker,
}

#[derive(Args)]
struct ViewOverrides {
    #[arg(long)]
    width: Option<u32>,
    #[arg(long)]
    height: Option<u32>,
    /// Pixels per unit of the complex plane
    #[arg(long)]
    zoom: Option<f64>,
    /// Real part of the centre offset
    #[arg(long, allow_hyphen_values = true)]
    re: Option<f64>,
    /// Imaginary part of the centre offset
    #[arg(long, allow_hyphen_values = true)]
    im: Option<f64>,
    #[arg(long)]
    max_iterations: Option<u32>,
    /// red, spectrum, fire or random
    #[arg(long)]
    palette: Option<ColourMapKinds>,
    /// Seed for the random palette
    #[arg(long)]
    seed: Option<u64>,
}

impl ViewOverrides {
    fn apply(&self, config: &mut Config) {
        let viewport = &mut config.viewport;

        if let Some(width) = self.width {
            viewport.width = width;
        }
        if let Some(height) = self.height {
            viewport.height = height;
        }
        if let Some(zoom) = self.zoom {
            viewport.zoom = zoom;
        }
        if let Some(re) = self.re {
            viewport.center_offset.re = re;
        }
        if let Some(im) = self.im {
            viewport.center_offset.im = im;
        }
        if let Some(max_iterations) = self.max_iterations {
            viewport.max_iterations = max_iterations;
        }
        if let Some(kind) = self.palette {
            config.palette.kind = kind;
        }
        if let Some(seed) = self.seed {
            config.palette.seed = seed;
        }
    }
}

fn load_config(path: Option<&Path>, view: &ViewOverrides) -> anyhow::Result<Config> {
    let mut config = Config::load_or_default(path)
        .context("Failed to load configuration")?;
    view.apply(&mut config);

    Ok(config)
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match cli.command {
        Cmd::Render { view, output } => {
            let config = load_config(cli.config.as_deref(), &view)?;
            let params = config.viewport_params().context("Invalid viewport")?;
            let colour_map = colour_map_factory(config.palette.kind, config.palette.seed);

            let mut controller = RenderController::new(PpmFilePresenter::new());
            controller.generate(&params, colour_map.as_ref());
            controller
                .write(&output)
                .with_context(|| format!("Failed to write {}", output.display()))?;
        }
        Cmd::Explore { view, output_dir } => {
            let config = load_config(cli.config.as_deref(), &view)?;
            let params = config.viewport_params().context("Invalid viewport")?;
            let colour_map = colour_map_factory(config.palette.kind, config.palette.seed);

            fs::create_dir_all(&output_dir)
                .with_context(|| format!("Failed to create {}", output_dir.display()))?;

            let mut controller = ExploreController::new(
                params,
                config.navigation,
                colour_map,
                PpmFilePresenter::new(),
                output_dir,
            );
            let summary = controller
                .run(io::stdin().lock())
                .context("Exploration failed")?;

            info!("Last generation: {}", summary.last_generation);
        }
        Cmd::Worker => {
            let stdout = io::stdout();
            let mut writer = BufWriter::new(stdout.lock());
            let served = worker::serve(io::stdin().lock(), &mut writer)
                .context("Worker protocol failed")?;

            info!("Worker served {} requests", served);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use mandelbrot_explorer::ComplexPoint;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).unwrap()
    }

    #[test]
    fn test_render_defaults_to_config_values() {
        let cli = parse(&["mandelbrot_explorer", "render"]);

        let Cmd::Render { view, output } = cli.command else {
            panic!("expected render");
        };
        let config = load_config(None, &view).unwrap();

        assert_eq!(output, PathBuf::from("mandelbrot.ppm"));
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_flags_override_config() {
        let cli = parse(&[
            "mandelbrot_explorer",
            "explore",
            "--width",
            "64",
            "--re",
            "-0.25",
            "--palette",
            "fire",
            "--seed",
            "3",
        ]);

        let Cmd::Explore { view, .. } = cli.command else {
            panic!("expected explore");
        };
        let config = load_config(None, &view).unwrap();

        assert_eq!(config.viewport.width, 64);
        assert_eq!(config.viewport.height, 600);
        assert_eq!(config.viewport.center_offset, ComplexPoint { re: -0.25, im: 0.0 });
        assert_eq!(config.palette.kind, ColourMapKinds::Fire);
        assert_eq!(config.palette.seed, 3);
    }

    #[test]
    fn test_unknown_palette_is_rejected() {
        assert!(Cli::try_parse_from(["mandelbrot_explorer", "render", "--palette", "plaid"]).is_err());
    }

    #[test]
    fn test_worker_subcommand_parses() {
        let cli = parse(&["mandelbrot_explorer", "worker"]);

        assert!(matches!(cli.command, Cmd::Worker));
    }
}
