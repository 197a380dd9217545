use knot_wfc::app::KnotApp;
use knot_wfc::cli::Opt;
use log::{error, info};
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};
use structopt::StructOpt;
use structopt_flags::LogLevel;

fn main() {
    let opt: Opt = Opt::from_args();

    if let Some(shell) = opt.completions {
        Opt::clap().gen_completions_to("knot-wfc", shell, &mut std::io::stdout());
        return;
    }

    // stdout carries the pattern, logs go to stderr
    if let Err(e) = TermLogger::init(
        opt.verbose.get_level_filter(),
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    ) {
        eprintln!("Failed to initialise logging: {}", e);
    }

    let config = match opt.to_app_config() {
        Ok(config) => config,
        Err(e) => {
            error!("{}", e);
            std::process::exit(2);
        }
    };

    match KnotApp::new(config).run() {
        Ok(generations) => {
            for (index, generation) in generations.iter().enumerate() {
                info!(
                    "#{} seed {}: {} collapses, {} contradictions",
                    index + 1,
                    generation.seed,
                    generation.collapses,
                    generation.contradictions
                );
            }
        }
        Err(e) => {
            error!("{}", e);
            std::process::exit(1);
        }
    }
}
