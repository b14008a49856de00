use bluebikes_etl::config::CleanTripsArgs;
use bluebikes_etl::utils::logger;
use bluebikes_etl::{EtlEngine, TripCleaner};
use clap::Parser;

fn main() {
    let _args = CleanTripsArgs::parse();

    // 初始化日誌
    logger::init_cli_logger(false);

    let engine = EtlEngine::new(TripCleaner::new());
    if let Err(e) = engine.run_stdio() {
        e.report_and_exit();
    }
}
