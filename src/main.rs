use clap::Parser;

fn main() -> std::io::Result<()> {
    env_logger::init();
    let args = chessd::config::Args::parse();
    let settings = chessd::config::Settings::from(args);

    log::info!("Starting chess server ...");
    let server = chessd::Server::new(&settings)?;
    server.run()
}
