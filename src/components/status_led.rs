use anyhow::{Context, Result};
use async_gpiod::{Chip, LineId, Lines, Options, Output};
use std::sync::atomic::{AtomicBool, Ordering};

use crate::state::LedOutput;

const CONSUMER: &str = "app-daemon";

/// The status LED: an output line, initially off.
pub struct StatusLed {
    pin: LineId,
    line: Lines<Output>,
    // Software copy of the last written level; reading back an output line
    // is unreliable on some platforms.
    level: AtomicBool,
}

impl StatusLed {
    pub async fn new(chip: &Chip, pin: LineId) -> Result<Self> {
        let options = Options::output([pin]).values([false]).consumer(CONSUMER);
        let line = chip
            .request_lines(options)
            .await
            .with_context(|| format!("Failed to request LED line {}", pin))?;

        Ok(Self {
            pin,
            line,
            level: AtomicBool::new(false),
        })
    }

    pub fn pin(&self) -> LineId {
        self.pin
    }

    pub async fn set(&self, on: bool) -> Result<()> {
        self.line.set_values([on]).await?;
        self.level.store(on, Ordering::Relaxed);
        Ok(())
    }

    #[allow(dead_code)]
    pub fn last_level(&self) -> bool {
        self.level.load(Ordering::Relaxed)
    }
}

impl LedOutput for StatusLed {
    async fn set_level(&self, on: bool) -> Result<()> {
        self.set(on).await
    }
}
