mod config_button;
mod status_led;

pub use config_button::ConfigButton;
pub use status_led::StatusLed;
