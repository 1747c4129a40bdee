use clap::Parser;

use parlint::cli::{Cli, ColorChoice};
use parlint::linter::{Linter, run_worker};
use parlint::options::LintOptions;
use parlint::output::{ColorMode, Formatter};
use parlint::{EXIT_PROBLEMS, EXIT_SUCCESS};

const fn color_choice_to_mode(choice: ColorChoice) -> ColorMode {
    match choice {
        ColorChoice::Auto => ColorMode::Auto,
        ColorChoice::Always => ColorMode::Always,
        ColorChoice::Never => ColorMode::Never,
    }
}

fn main() {
    let cli = Cli::parse();

    let exit_code = if cli.worker {
        run_as_worker()
    } else {
        run_lint(&cli)
    };

    std::process::exit(exit_code);
}

fn run_as_worker() -> i32 {
    match run_worker() {
        Ok(()) => EXIT_SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            EXIT_PROBLEMS
        }
    }
}

fn run_lint(cli: &Cli) -> i32 {
    match run_lint_impl(cli) {
        Ok(exit_code) => exit_code,
        Err(e) => {
            println!("{e}");
            EXIT_PROBLEMS
        }
    }
}

fn run_lint_impl(cli: &Cli) -> parlint::Result<i32> {
    let options = LintOptions::from_cli(cli)?;
    let linter = Linter::new(options)?;
    let report = linter.execute(&cli.patterns)?;

    if report.is_clean() {
        return Ok(EXIT_SUCCESS);
    }

    let formatter = Formatter::new(color_choice_to_mode(cli.color));
    print!("{}", formatter.format_results(&report.results));
    print!("{}", formatter.format_total(&report));
    Ok(EXIT_PROBLEMS)
}

#[cfg(test)]
#[path = "main_tests.rs"]
mod tests;
