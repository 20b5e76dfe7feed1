use std::process::ExitCode;

fn main() -> ExitCode {
    archdoc::cli::run()
}
