use std::time::{Duration, Instant};

use anyhow::Result;
use smol::channel::Receiver;
use smol::Timer;
use tracing::info;

use crate::console::MessageSink;
use crate::state::{ButtonInput, LedOutput, Phase, StateMachine};

pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Drives the state machine at 1 Hz. Sole owner and sole writer of the
/// machine; nothing else touches it while `run` is live.
pub struct Daemon<B, L, S> {
    machine: StateMachine,
    button: Option<B>,
    led: Option<L>,
    sink: S,
    interval: Duration,
}

impl<B, L, S> Daemon<B, L, S>
where
    B: ButtonInput,
    L: LedOutput,
    S: MessageSink,
{
    pub fn new(button: Option<B>, led: Option<L>, sink: S) -> Self {
        Self {
            machine: StateMachine::new(),
            button,
            led,
            sink,
            interval: TICK_INTERVAL,
        }
    }

    /// Shrink the tick interval so tests run in bounded time.
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn phase(&self) -> Phase {
        self.machine.phase()
    }

    /// Collaborator entry point for the externally-triggered transitions,
    /// notably into `Connected` (the companion process confirms the
    /// connection; its trigger mechanism lives outside this daemon).
    pub fn force_phase(&mut self, phase: Phase) {
        self.machine.force_phase(phase);
    }

    /// Sleep one interval, tick, repeat. Runs until the stop channel fires
    /// or its sender drops; in production neither happens and this is the
    /// process's entire lifetime. A tick-time pin failure propagates out
    /// and takes the process down.
    pub async fn run(&mut self, stop: Receiver<()>) -> Result<()> {
        let mut delay = self.interval;

        loop {
            let stopped = smol::future::or(
                async {
                    let _ = stop.recv().await;
                    true
                },
                async {
                    Timer::after(delay).await;
                    false
                },
            )
            .await;

            if stopped {
                info!("Stop signal received, leaving tick loop");
                return Ok(());
            }

            let start = Instant::now();
            self.machine
                .tick(self.button.as_ref(), self.led.as_ref(), &mut self.sink)
                .await?;

            // Keep close to 1 Hz by charging tick time against the next sleep.
            delay = self.interval.saturating_sub(start.elapsed());
        }
    }
}
