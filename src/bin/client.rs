use clap::Parser;
use picnet::consts::EXIT_CLIENT_CLI_ERROR;
use picnet::{Client, ClientArgs};

fn main() {
    env_logger::init();

    let args = ClientArgs::try_parse().unwrap_or_else(|e| {
        eprintln!("{e}");
        std::process::exit(EXIT_CLIENT_CLI_ERROR);
    });

    Client::new(&args).run();
}
