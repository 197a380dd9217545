use crate::grid::Size;
#[cfg(any(feature = "image", feature = "json"))]
use std::path::PathBuf;
use std::time::Duration;
use structopt::clap::Shell;
use structopt::StructOpt;
use structopt_flags::QuietVerbose;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct OutputConfig {
    #[cfg(feature = "image")]
    pub image: Option<PathBuf>,
    #[cfg(feature = "image")]
    pub resolution: u32,
    #[cfg(feature = "json")]
    pub json: Option<PathBuf>,
    pub print: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub size: Size,
    pub seed: Option<u64>,
    pub generations: usize,
    pub animate: bool,
    pub delay: Duration,
    pub output: OutputConfig,
}

#[derive(Debug, StructOpt)]
#[structopt(
    name = "knot-wfc",
    about = "Grow knot patterns from line tiles, one collapsed cell at a time"
)]
pub struct Opt {
    #[structopt(flatten)]
    pub verbose: QuietVerbose,

    #[structopt(
        parse(try_from_str),
        short,
        long,
        default_value = "8x6",
        help = "Grid size as <columns>x<rows>"
    )]
    size: Size,

    #[structopt(long, help = "Random seed")]
    seed: Option<u64>,

    #[structopt(
        short,
        long,
        default_value = "1",
        help = "Number of patterns to generate, each on a fresh grid"
    )]
    generations: usize,

    #[structopt(short, long, help = "Redraw the grid in the terminal after every step")]
    animate: bool,

    #[structopt(long, default_value = "0", help = "Milliseconds to wait between steps")]
    delay: u64,

    #[structopt(long, help = "Don't print the finished grid to the terminal")]
    no_print: bool,

    #[cfg(feature = "image")]
    #[structopt(parse(from_os_str), short, long, help = "Save the pattern as a PNG")]
    output: Option<PathBuf>,

    #[cfg(feature = "image")]
    #[structopt(short, long, default_value = "32", help = "Pixels per cell in the PNG")]
    resolution: u32,

    #[cfg(feature = "json")]
    #[structopt(parse(from_os_str), long, help = "Save the resolved tiles as JSON")]
    json: Option<PathBuf>,

    #[structopt(long, possible_values = &Shell::variants(), case_insensitive = true, help = "Generate shell completions and exit")]
    pub completions: Option<Shell>,
}

impl Opt {
    pub fn to_app_config(self) -> Result<AppConfig, &'static str> {
        if self.size.area() == 0 {
            return Err("Grid size must be at least 1x1");
        }

        if self.generations == 0 {
            return Err("At least one generation is required");
        }

        Ok(AppConfig {
            size: self.size,
            seed: self.seed,
            generations: self.generations,
            animate: self.animate,
            delay: Duration::from_millis(self.delay),
            output: OutputConfig {
                #[cfg(feature = "image")]
                image: self.output,
                #[cfg(feature = "image")]
                resolution: self.resolution,
                #[cfg(feature = "json")]
                json: self.json,
                print: !self.no_print || self.animate,
            },
        })
    }
}
