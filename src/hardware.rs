use anyhow::{Context, Result};
use async_gpiod::Chip;
use tracing::info;

use crate::components::{ConfigButton, StatusLed};
use crate::config::DaemonConfig;

const GPIO_CHIP: &str = "gpiochip0";

/// Acquired pin handles, per the startup configuration. Either pin may be
/// absent; an unconfigured pin disables its behavior without affecting the
/// rest of the daemon.
pub struct Hardware {
    pub button: Option<ConfigButton>,
    pub led: Option<StatusLed>,
}

impl Hardware {
    pub async fn new(config: &DaemonConfig) -> Result<Self> {
        let mut button = None;
        let mut led = None;

        if config.config_gpio.is_some() || config.led_gpio.is_some() {
            let chip = Chip::new(GPIO_CHIP)
                .await
                .with_context(|| format!("Failed to open {}", GPIO_CHIP))?;

            if let Some(pin) = config.config_gpio {
                let b = ConfigButton::new(&chip, pin).await?;
                info!("Config button ready on line {}", b.pin());
                button = Some(b);
            }

            if let Some(pin) = config.led_gpio {
                let l = StatusLed::new(&chip, pin).await?;
                info!("Status LED ready on line {}", l.pin());
                led = Some(l);
            }
        }

        Ok(Self { button, led })
    }
}
