/// Sink for the daemon's compatibility console messages.
///
/// These lines are a fixed external contract (other tooling greps for them),
/// so they bypass `tracing` and go to stdout verbatim.
pub trait MessageSink {
    fn log(&mut self, text: &str);
}

/// Writes each message to stdout as `**** AppDaemon: <text>`.
pub struct Console;

impl MessageSink for Console {
    fn log(&mut self, text: &str) {
        println!("**** AppDaemon: {text}");
    }
}
