use anyhow::{Context, Result};
use async_gpiod::{Bias, Chip, Input, LineId, Lines, Options};

use crate::state::ButtonInput;

const CONSUMER: &str = "app-daemon";

/// The config-mode button: a pulled-up input line, active-low.
pub struct ConfigButton {
    pin: LineId,
    line: Lines<Input>,
}

impl ConfigButton {
    pub async fn new(chip: &Chip, pin: LineId) -> Result<Self> {
        let options = Options::input([pin]).bias(Bias::PullUp).consumer(CONSUMER);
        let line = chip
            .request_lines(options)
            .await
            .with_context(|| format!("Failed to request button line {}", pin))?;

        Ok(Self { pin, line })
    }

    pub fn pin(&self) -> LineId {
        self.pin
    }

    /// Raw logic level of the line, 0 or 1.
    pub async fn level(&self) -> Result<u8> {
        let values = self.line.get_values([false]).await?;
        Ok(if *values.get(0).unwrap_or(&false) { 1 } else { 0 })
    }
}

impl ButtonInput for ConfigButton {
    async fn is_pressed(&self) -> Result<bool> {
        Ok(self.level().await? == 0)
    }
}
