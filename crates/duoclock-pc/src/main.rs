//! PC host for the dual-panel clock.
//!
//! Single-threaded application that runs the controller loop against
//! simulated peripherals: the system clock stands in for the RTC and all
//! bus/indicator traffic goes to the log. Face images are loaded from an
//! asset directory at startup.

mod assets;
mod sim;

use std::path::PathBuf;
use std::process;

use clap::Parser;

use duoclock_core::{Controller, DebouncedButton, IndicatorDriver, PanelMux};
use duoclock_hal::{RtcDateTime, RtcDevice};

#[derive(Parser)]
#[command(name = "duoclock-pc")]
#[command(about = "Dual-panel clock host with simulated peripherals", long_about = None)]
#[command(version)]
struct Cli {
    /// Directory containing digit_0.png .. digit_9.png and splash.png
    #[arg(long, default_value = "assets")]
    assets: PathBuf,

    /// Set the clock to this time at startup (seconds reset to 0)
    #[arg(long, value_name = "HH:MM")]
    set_time: Option<String>,

    /// Pulse the mode button high for 60 ms every N milliseconds
    #[arg(long, value_name = "N")]
    press_every_ms: Option<u64>,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    log::info!("duoclock-pc: loading face images from {}", cli.assets.display());
    let glyphs = match assets::load_glyph_store(&cli.assets) {
        Ok(store) => store,
        Err(e) => {
            log::error!("digit glyph load failed: {e}");
            process::exit(1);
        }
    };
    let splash = match assets::load_splash(&cli.assets) {
        Ok(glyph) => glyph,
        Err(e) => {
            log::error!("splash load failed: {e}");
            process::exit(1);
        }
    };

    let mut rtc = sim::HostRtc::new();
    if let Some(value) = cli.set_time.as_deref() {
        let dt = match parse_set_time(value) {
            Ok(dt) => dt,
            Err(msg) => {
                log::error!("bad --set-time value {value:?}: {msg}");
                process::exit(1);
            }
        };
        if let Err(e) = rtc.set_time(&dt) {
            log::error!("clock set failed: {e:?}");
            process::exit(1);
        }
    }

    let button = match cli.press_every_ms {
        Some(period) => sim::SimButton::periodic(period, 60),
        None => sim::SimButton::idle(),
    };

    let mut controller = Controller::new(
        rtc,
        PanelMux::new(sim::SimPanelBus::new(), glyphs, splash),
        IndicatorDriver::new(sim::SimIndicator),
        DebouncedButton::new(),
        button,
        sim::HostTimeBase::new(),
    );

    // Runs forever; returning means a peripheral died. Fail loud and let
    // the supervisor restart the process.
    if let Err(e) = controller.run() {
        log::error!("peripheral failure: {e:?}");
        process::exit(1);
    }
}

/// Parse an `HH:MM` argument into a set tuple. The simulated RTC ignores
/// the calendar fields, so they are pinned to a fixed date.
fn parse_set_time(value: &str) -> Result<RtcDateTime, &'static str> {
    let (hour, minute) = value.split_once(':').ok_or("expected HH:MM")?;
    let hour: u8 = hour.parse().map_err(|_| "hour is not a number")?;
    let minute: u8 = minute.parse().map_err(|_| "minute is not a number")?;
    if hour > 23 {
        return Err("hour out of range");
    }
    if minute > 59 {
        return Err("minute out of range");
    }
    Ok(RtcDateTime {
        year: 2024,
        month: 1,
        day: 1,
        hour,
        minute,
        weekday: 0,
    })
}
