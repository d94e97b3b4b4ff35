use clap::Parser;
use picnet::consts::EXIT_SERVER_CLI_ERROR;
use picnet::{Server, ServerArgs};

fn main() {
    env_logger::init();

    let args = ServerArgs::try_parse().unwrap_or_else(|e| {
        eprintln!("{e}");
        std::process::exit(EXIT_SERVER_CLI_ERROR);
    });

    Server::new(&args).run();
}
