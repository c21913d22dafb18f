use locator_cmd::{cmd, init_tracing};
use mimalloc::MiMalloc;
use tracing::error;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() {
    let _log = init_tracing();
    if let Err(err) = cmd().await {
        error!("{:#}", err);
        std::process::exit(1);
    }
}
