use bluebikes_etl::config::ExtractStationsArgs;
use bluebikes_etl::utils::logger;
use bluebikes_etl::{EtlEngine, StationExtractor};
use clap::Parser;

fn main() {
    let _args = ExtractStationsArgs::parse();

    // 初始化日誌
    logger::init_cli_logger(false);

    let engine = EtlEngine::new(StationExtractor::new());
    if let Err(e) = engine.run_stdio() {
        e.report_and_exit();
    }
}
