use std::io;
use std::sync::Arc;

use cstu_passport::client::BackendConfig;
use cstu_passport::services::{FormController, SubmitOutcome};
use cstu_passport::terminal::{self, TerminalNotifier, TerminalPage};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn wants_html() -> bool {
    std::env::args().any(|a| a == "--html")
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "cstu_passport=info".to_string()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let config = BackendConfig::new_from_env()?;
    info!("using backend at {}", config.base_url());

    let controller = FormController::connect(config, Arc::new(TerminalNotifier))?;
    let mut page = TerminalPage::new();

    let loaded = controller.on_load(&mut page).await;
    if loaded == 0 {
        warn!("no activity types available");
    }

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stdout();

    match terminal::fill_and_submit(&controller, &mut page, &mut input, &mut output).await? {
        SubmitOutcome::Rendered(confirmation) => {
            if wants_html() {
                println!("{}", confirmation.to_html()?);
            } else {
                terminal::print_confirmation(&mut output, &confirmation)?;
            }
            Ok(())
        }
        outcome => {
            warn!("submission did not complete: {:?}", outcome);
            std::process::exit(1);
        }
    }
}
