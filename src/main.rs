fn main() {
    dotenvy::from_filename(".env.local").ok();
    dotenvy::dotenv().ok();
    candlefeed::app::logging::init();
    if let Err(err) = candlefeed::app::cli::run() {
        eprintln!("error: {}", err.message);
        std::process::exit(1);
    }
}
