//! uml CLI - Edit UML class-diagram documents

mod cli;
mod text_view;

use clap::Parser;

fn main() {
    let cli_args = cli::Cli::parse();

    // Logging is initialized by run() once the flags are known
    let mut app = cli::UmlApp::new();

    if let Err(e) = app.run(cli_args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
