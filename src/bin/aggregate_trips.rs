use bluebikes_etl::config::AggregateArgs;
use bluebikes_etl::utils::{logger, validation::Validate};
use bluebikes_etl::{EtlEngine, TripAggregator};
use clap::Parser;

fn main() {
    let args = AggregateArgs::parse();

    // 初始化日誌
    logger::init_cli_logger(args.verbose);
    tracing::debug!("CLI args: {:?}", args);

    // 驗證參數
    if let Err(e) = args.validate() {
        e.report_and_exit();
    }
    let mode = match args.mode() {
        Ok(mode) => mode,
        Err(e) => e.report_and_exit(),
    };
    tracing::info!("🚀 Aggregating trips in {:?} mode", mode);

    let engine = EtlEngine::new(TripAggregator::new(mode));
    if let Err(e) = engine.run_stdio() {
        e.report_and_exit();
    }
}
