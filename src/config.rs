use anyhow::{bail, Context, Result};
use async_gpiod::LineId;

/// Startup configuration, immutable after parse.
///
/// A pin is either configured (line offset on gpiochip0) or absent. Absent
/// disables that pin's behavior entirely: no button means the state machine
/// stays idle forever, no LED means all LED writes are skipped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DaemonConfig {
    pub config_gpio: Option<LineId>,
    pub led_gpio: Option<LineId>,
}

impl DaemonConfig {
    /// Parse `--config-gpio` and `--led-gpio` from the process arguments
    /// (without the program name). Both `--flag=N` and `--flag N` forms are
    /// accepted. A negative pin number is the legacy "disabled" sentinel and
    /// maps to an absent pin.
    pub fn from_args<I>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = String>,
    {
        let mut config = Self::default();
        let mut args = args.into_iter();

        while let Some(arg) = args.next() {
            let (flag, inline_value) = match arg.split_once('=') {
                Some((flag, value)) => (flag.to_string(), Some(value.to_string())),
                None => (arg, None),
            };

            match flag.as_str() {
                "--config-gpio" => {
                    config.config_gpio = parse_pin(&flag, inline_value.or_else(|| args.next()))?;
                }
                "--led-gpio" => {
                    config.led_gpio = parse_pin(&flag, inline_value.or_else(|| args.next()))?;
                }
                _ => bail!("Unknown argument: {}", flag),
            }
        }

        Ok(config)
    }
}

fn parse_pin(flag: &str, value: Option<String>) -> Result<Option<LineId>> {
    let value = value.with_context(|| format!("Missing value for {}", flag))?;
    let raw: i64 = value
        .parse()
        .with_context(|| format!("Invalid pin number for {}: {}", flag, value))?;

    if raw < 0 {
        return Ok(None);
    }

    Ok(Some(raw as LineId))
}
