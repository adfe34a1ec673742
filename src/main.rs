use clap::Parser;
use log::{error, info};
use reddit_researcher::cli::{self, Cli, ParseFailure};
use reddit_researcher::config::AppConfig;
use reddit_researcher::models::Envelope;
use std::io::Write;

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Stderr)
        .format(|buf, record| writeln!(buf, "[reddit-researcher] {}", record.args()))
        .init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => match cli::parse_failure(&err) {
            ParseFailure::Usage(code) => {
                eprint!("{}", err);
                std::process::exit(code);
            }
            ParseFailure::Envelope(envelope) => {
                error!("{}", err.to_string().trim_end());
                println!("{}", envelope.to_json_pretty());
                std::process::exit(envelope.exit_code());
            }
        },
    };

    let config = AppConfig::load();
    let envelope = match config.create_client() {
        Ok(client) => cli::execute(&cli.command, &client).await,
        Err(err) => {
            error!("Failed to create HTTP client: {}", err);
            Envelope::failure(err.to_string())
        }
    };

    let json = envelope.to_json_pretty();
    if let Some(path) = &cli.command.flags().output {
        match cli::write_output(path, &json) {
            Ok(()) => info!("Saved results to {}", path.display()),
            Err(err) => error!("Failed to write {}: {}", path.display(), err),
        }
    }

    println!("{}", json);
    std::process::exit(envelope.exit_code());
}
