mod components;
mod config;
mod console;
mod daemon;
mod hardware;
mod state;

use anyhow::Result;
use tracing::info;
use tracing_subscriber::fmt;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::DaemonConfig;
use crate::console::{Console, MessageSink};
use crate::daemon::Daemon;
use crate::hardware::Hardware;

fn main() -> Result<()> {
    // Create a log layer for file output
    #[cfg(target_os = "linux")]
    let log_dir = "/tmp/app-daemon/logs";
    #[cfg(not(target_os = "linux"))]
    let log_dir = "logs";

    let file_appender = tracing_appender::rolling::hourly(log_dir, "tracing.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    let file_layer = fmt::layer().with_writer(non_blocking).with_ansi(false); // Disable colors in file

    // Create a log layer for stdout
    let stdout_layer = fmt::layer().with_writer(std::io::stdout);

    // Combine both layers and enable logging
    tracing_subscriber::registry()
        .with(file_layer)
        .with(stdout_layer)
        .init();

    let config = DaemonConfig::from_args(std::env::args().skip(1))?;

    smol::block_on(async {
        info!("Initializing app daemon...");
        let hardware = Hardware::new(&config).await?;

        let mut console = Console;
        console.log("Starting");
        console.log(&match config.config_gpio {
            Some(pin) => format!("Config GPIO: {pin}"),
            None => "Config GPIO: disabled".to_string(),
        });
        console.log(&match config.led_gpio {
            Some(pin) => format!("LED GPIO: {pin}"),
            None => "LED GPIO: disabled".to_string(),
        });
        if let Some(button) = &hardware.button {
            console.log(&format!("Config button level: {}", button.level().await?));
        }
        console.log("State: IDLE");

        // Held for the life of the process; dropping it would end the loop.
        let (_stop_tx, stop_rx) = smol::channel::bounded::<()>(1);

        let mut daemon = Daemon::new(hardware.button, hardware.led, console);
        daemon.run(stop_rx).await
    })
}
