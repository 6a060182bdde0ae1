use anyhow::Result;

use crate::console::MessageSink;

/// Seconds a non-idle phase may run before reverting to idle.
pub const CONNECT_TIMEOUT_SECS: i32 = 300;

/// Button seam so the state machine can run against real gpiod lines or
/// scripted fakes in tests.
#[allow(async_fn_in_trait)]
pub trait ButtonInput {
    /// True when the button reads logic level 0 (active-low press).
    async fn is_pressed(&self) -> Result<bool>;
}

#[allow(async_fn_in_trait)]
pub trait LedOutput {
    async fn set_level(&self, on: bool) -> Result<()>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    WaitConnect,
    Connected,
}

/// The config-mode gate: idle until the config button is pressed, then a
/// bounded connect window during which the status LED blinks (waiting) or
/// holds solid (connected). The window expiring returns the machine to idle.
pub struct StateMachine {
    phase: Phase,
    connect_timer: i32,
}

impl StateMachine {
    pub fn new() -> Self {
        Self {
            phase: Phase::Idle,
            connect_timer: 0,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn connect_timer(&self) -> i32 {
        self.connect_timer
    }

    /// Move the machine to `phase` on behalf of an external collaborator.
    ///
    /// The machine itself never enters `Connected`; whatever process confirms
    /// the connection drives that transition through here. Entering a
    /// non-idle phase from idle arms the connect window; moving between the
    /// two non-idle phases keeps the remaining window, since the 300 s bound
    /// covers the whole connect flow.
    pub fn force_phase(&mut self, phase: Phase) {
        match (self.phase, phase) {
            (Phase::Idle, Phase::WaitConnect) | (Phase::Idle, Phase::Connected) => {
                self.connect_timer = CONNECT_TIMEOUT_SECS;
            }
            (_, Phase::Idle) => {
                self.connect_timer = 0;
            }
            _ => {}
        }
        self.phase = phase;
    }

    /// One poll step. Called once per second by the tick driver.
    ///
    /// Pin I/O errors propagate; the daemon has no in-loop recovery and
    /// treats them as fatal.
    pub async fn tick<B, L>(
        &mut self,
        button: Option<&B>,
        led: Option<&L>,
        sink: &mut dyn MessageSink,
    ) -> Result<()>
    where
        B: ButtonInput,
        L: LedOutput,
    {
        match self.phase {
            Phase::Idle => {
                // No button configured: nothing can ever start the connect
                // flow from inside the machine. Intentional.
                let Some(button) = button else {
                    return Ok(());
                };

                if button.is_pressed().await? {
                    sink.log("Config button: pressed");
                    sink.log("State: WAIT_CONNECT");
                    self.phase = Phase::WaitConnect;
                    self.connect_timer = CONNECT_TIMEOUT_SECS;
                }
            }
            Phase::WaitConnect => {
                self.connect_timer -= 1;
                if self.connect_timer > 0 {
                    if let Some(led) = led {
                        // Timer parity gives the 0.5 Hz blink: 1 on the first
                        // tick after entry, then alternating.
                        let level = self.connect_timer % 2;
                        led.set_level(level == 1).await?;
                        sink.log(&format!("LED: {level}"));
                    }
                } else {
                    self.expire(led, sink).await?;
                }
            }
            Phase::Connected => {
                self.connect_timer -= 1;
                if self.connect_timer > 0 {
                    if let Some(led) = led {
                        led.set_level(true).await?;
                        sink.log("LED: On");
                    }
                } else {
                    self.expire(led, sink).await?;
                }
            }
        }

        Ok(())
    }

    /// Connect window ran out. The LED must read "off" before the state line
    /// is emitted, so a poller never sees a stale lit LED after the timeout.
    async fn expire<L: LedOutput>(
        &mut self,
        led: Option<&L>,
        sink: &mut dyn MessageSink,
    ) -> Result<()> {
        if let Some(led) = led {
            led.set_level(false).await?;
            sink.log("LED: off");
        }
        self.phase = Phase::Idle;
        sink.log("State: IDLE (timeout)");
        Ok(())
    }
}

impl Default for StateMachine {
    fn default() -> Self {
        Self::new()
    }
}
