use std::{io, process};

use clap::Parser;
use perfbaseline::{
    AnalysisConfig, GateEnforcer, cli::CommandLineConfig, logging::init_logging, report,
    run_analysis,
};

fn main() {
    let cli = CommandLineConfig::parse();
    if let Err(err) = init_logging(cli.verbose, cli.quiet) {
        eprintln!("warning: {err}");
    }

    let config = match AnalysisConfig::resolve(&cli.overrides()) {
        Ok(cfg) => cfg,
        Err(err) => {
            eprintln!("error: {err}");
            process::exit(2);
        }
    };

    let analysis = match run_analysis(&config) {
        Ok(analysis) => analysis,
        Err(err) => {
            eprintln!("analysis failed: {err}");
            process::exit(2);
        }
    };

    let mut stdout = io::stdout().lock();
    if let Err(err) = report::write_report(&mut stdout, &analysis, &config.labels, config.format) {
        eprintln!("{err}");
        process::exit(2);
    }

    let gate = GateEnforcer::new(config.fail_on).evaluate(&analysis);
    if !gate.passed {
        for reason in &gate.reasons {
            eprintln!("gate: {reason}");
        }
        process::exit(1);
    }
}
