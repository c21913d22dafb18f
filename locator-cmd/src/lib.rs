use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use locator_core::{Accuracy, LocationProvider, PollController, SimulatedPlatform};
use tracing::info;
use tracing::level_filters::LevelFilter;
use tracing_error::ErrorLayer;
use tracing_log::LogTracer;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{EnvFilter, Layer, Registry, fmt};

pub mod config;
pub mod view;

use config::{ConfigCenter, Overrides};
use view::ConsoleView;

pub fn init_tracing() -> tracing_appender::non_blocking::WorkerGuard {
    let _ = LogTracer::builder().init();
    let file_appender = tracing_appender::rolling::daily("logs", "locator");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_span_events(FmtSpan::CLOSE)
        .with_timer(fmt::time::ChronoLocal::rfc_3339())
        .with_level(true)
        .with_writer(std::io::stderr)
        .with_filter(LevelFilter::INFO);
    let file_layer = tracing_subscriber::fmt::layer()
        .with_span_events(FmtSpan::CLOSE)
        // 移除输出内容中的 颜色或其它格式相关转义字符
        .with_ansi(false)
        .with_writer(non_blocking)
        .with_filter(LevelFilter::INFO);
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let collector = Registry::default()
        .with(ErrorLayer::default())
        .with(env_filter)
        .with(file_layer)
        .with(fmt_layer);
    tracing::subscriber::set_global_default(collector).expect("Tracing collect error");
    guard
}

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    #[arg(short, long, value_name = "locator配置文件")]
    config: Option<String>,
    /// Lowest | Low | Medium | High | Best
    #[arg(short, long)]
    accuracy: Option<Accuracy>,
    /// 定位超时, 毫秒
    #[arg(short, long)]
    timeout: Option<u64>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Get the current location once
    Once,
    /// Poll the location until Ctrl-C or `--count` renders
    Watch {
        /// 轮询间隔, 毫秒
        #[arg(short, long)]
        interval: Option<u64>,
        #[arg(short = 'n', long)]
        count: Option<usize>,
    },
    /// Check whether positioning is available without prompting
    Check,
}

pub async fn cmd() -> anyhow::Result<()> {
    let args = Args::parse();
    let interval = match &args.command {
        Command::Watch { interval, .. } => *interval,
        _ => None,
    };
    let overrides = Overrides {
        accuracy: args.accuracy,
        timeout: args.timeout,
        interval,
    };
    let center = ConfigCenter::new(args.config, overrides)
        .await
        .context("加载配置失败")?;
    info!(
        "[{}] 精度{}, 超时{:?}, 间隔{:?}",
        center.id, center.request.accuracy, center.request.timeout, center.poll.interval
    );

    let platform = Arc::new(SimulatedPlatform::new(center.platform));
    let view = Arc::new(ConsoleView::new());
    let controller = PollController::new(center.id, LocationProvider::new(platform), view.clone())
        .with_request(center.request)
        .with_poll_config(center.poll);

    match args.command {
        Command::Once => controller.request_once().await,
        Command::Check => {
            controller.check_gps().await;
        }
        Command::Watch { count, .. } => {
            let mut renders = view.subscribe();
            controller.start_polling().await;
            tokio::select! {
                res = tokio::signal::ctrl_c() => {
                    res.context("监听Ctrl-C失败")?;
                    info!("收到Ctrl-C, 停止轮询");
                }
                _ = async {
                    let Some(count) = count else {
                        return std::future::pending::<()>().await;
                    };
                    let _ = renders.wait_for(|n| *n >= count).await;
                } => {}
            }
            controller.stop_polling().await;
        }
    }
    Ok(())
}
