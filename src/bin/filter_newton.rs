use bluebikes_etl::config::FilterNewtonArgs;
use bluebikes_etl::utils::logger;
use bluebikes_etl::{EtlEngine, NewtonFilter};
use clap::Parser;

fn main() {
    let _args = FilterNewtonArgs::parse();

    // 初始化日誌
    logger::init_cli_logger(false);

    let engine = EtlEngine::new(NewtonFilter::new());
    if let Err(e) = engine.run_stdio() {
        e.report_and_exit();
    }
}
