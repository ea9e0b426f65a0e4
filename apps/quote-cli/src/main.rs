use std::process::ExitCode;

use clap::Parser;

use quote_cli::cli::Cli;

#[tokio::main]
async fn main() -> ExitCode {
    quote_cli::init_tracing();

    let cli = Cli::parse();
    let json = cli.json;

    match quote_cli::run(cli).await {
        Ok(rendered) => {
            if json {
                println!("{}", rendered.json);
            } else {
                print!("{}", rendered.text);
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            if json {
                eprintln!("{}", serde_json::to_string(&e).unwrap_or_else(|_| e.to_string()));
            } else {
                eprintln!("{e}");
            }
            ExitCode::from(e.exit_code())
        }
    }
}
