use crate::cell::Cell;
use crate::cli::AppConfig;
use crate::grid::Grid;
use crate::render::text_renderer::TextRenderer;
use crate::render::{RenderEvent, Renderer};
use crate::solver::{Solver, Step};
use crate::tile::TileSet;

#[cfg(feature = "image")]
use crate::render::image_renderer::ImageRenderer;

#[cfg(feature = "json")]
use crate::render::json_renderer::JsonRenderer;

use indicatif::{ProgressBar, ProgressStyle};
use log::{info, warn};
use rand::rngs::OsRng;
use rand::{Rng, SeedableRng};
use rand_xorshift::XorShiftRng;
use std::time::Duration;

pub type BoxedRenderer = Box<dyn Renderer<Error = String>>;

/// Summary of one finished generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Generation {
    pub seed: u64,
    pub collapses: usize,
    pub contradictions: usize,
}

/// Per-tick driver: owns the grid, solver and random stream of each
/// generation and feeds every renderer after each step.
pub struct KnotApp {
    config: AppConfig,
    tiles: TileSet,
}

impl KnotApp {
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            tiles: TileSet::new(),
        }
    }

    pub fn run(&self) -> Result<Vec<Generation>, Box<dyn std::error::Error>> {
        let mut renderers = self.create_renderers()?;
        self.run_with(&mut renderers)
    }

    pub fn run_with(&self, renderers: &mut [BoxedRenderer]) -> Result<Vec<Generation>, Box<dyn std::error::Error>> {
        info!("{} tile variants", self.tiles.len());

        let seed = self.config.seed.unwrap_or_else(|| OsRng.gen());

        info!("Using seed: {}", seed);

        let mut solver = Solver::new();
        let mut results = Vec::with_capacity(self.config.generations);

        for generation in 1..=self.config.generations {
            // reset: fresh grid, fresh solver state, next seed
            let generation_seed = seed.wrapping_add(generation as u64 - 1);
            let mut grid = Grid::create(self.config.size.height, self.config.size.width, &self.tiles);
            let mut rng = XorShiftRng::seed_from_u64(generation_seed);
            solver.reset();

            let result = self.generate(generation, generation_seed, &mut grid, &mut solver, &mut rng, renderers)?;

            if result.contradictions > 0 {
                warn!(
                    "Generation {} left {} cells without a tile",
                    generation, result.contradictions
                );
            }

            results.push(result);
        }

        info!("Generation completed");
        Ok(results)
    }

    fn generate(
        &self,
        generation: usize,
        seed: u64,
        grid: &mut Grid<Cell>,
        solver: &mut Solver,
        rng: &mut XorShiftRng,
        renderers: &mut [BoxedRenderer],
    ) -> Result<Generation, Box<dyn std::error::Error>> {
        let start_event = RenderEvent::Started { generation };

        for renderer in renderers.iter_mut() {
            renderer.handle_event(&start_event)?;
        }

        let progress = self.progress_bar(grid.remaining() as u64);

        loop {
            let step = solver.step(grid, rng);

            progress.set_position(solver.collapses() as u64);

            for renderer in renderers.iter_mut() {
                renderer.handle_event(&RenderEvent::Progress)?;
                renderer.update(grid)?;
            }

            if step == Step::Done {
                break;
            }

            if !self.config.delay.is_zero() {
                std::thread::sleep(self.config.delay);
            }
        }

        progress.finish_and_clear();

        let completion_event = RenderEvent::Completed {
            collapses: solver.collapses(),
            contradictions: solver.contradictions(),
        };

        for renderer in renderers.iter_mut() {
            renderer.handle_event(&completion_event)?;
            renderer.finalize(grid)?;
        }

        Ok(Generation {
            seed,
            collapses: solver.collapses(),
            contradictions: solver.contradictions(),
        })
    }

    fn progress_bar(&self, length: u64) -> ProgressBar {
        if self.config.animate {
            return ProgressBar::hidden();
        }

        let progress = ProgressBar::new(length);
        progress.enable_steady_tick(Duration::from_millis(200));

        if let Ok(style) = ProgressStyle::default_bar().template(
            "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos:>5}/{len} {per_sec:>12}",
        ) {
            progress.set_style(style.progress_chars("#>-"));
        }

        progress
    }

    fn create_renderers(&self) -> Result<Vec<BoxedRenderer>, Box<dyn std::error::Error>> {
        let mut renderers: Vec<BoxedRenderer> = Vec::new();

        if self.config.output.print {
            renderers.push(Box::new(TextRenderer::new(std::io::stdout(), self.config.animate)));
        }

        #[cfg(feature = "image")]
        if let Some(path) = &self.config.output.image {
            renderers.push(Box::new(ImageRenderer::new(path.clone(), self.config.output.resolution)?));
        }

        #[cfg(feature = "json")]
        if let Some(path) = &self.config.output.json {
            renderers.push(Box::new(JsonRenderer::new(path.clone())));
        }

        Ok(renderers)
    }
}
