//! alt-rgb CLI: command-line keyboard lighting control.

use std::path::PathBuf;
use std::time::Duration;

use alt_rgb_core::color::{Palette, Rgb};
use alt_rgb_core::config::{self, ControllerConfig};
use alt_rgb_core::controller::Controller;
use alt_rgb_core::hid::{HidapiBackend, HidapiDevice};
use alt_rgb_core::lighting::{InputWarning, LightingState, NotificationMode};
use alt_rgb_core::transport::HidBackend;
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "alt-rgb",
    version,
    about = "RGB lighting control for the Drop ALT keyboard"
)]
struct Cli {
    /// Config file (default: $XDG_CONFIG_HOME/alt-rgb/config.json).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Override the vendor ID (hex with 0x prefix, or decimal).
    #[arg(long, global = true, value_parser = parse_u16)]
    vid: Option<u16>,

    /// Override the product ID.
    #[arg(long, global = true, value_parser = parse_u16)]
    pid: Option<u16>,

    /// Override the raw HID usage page.
    #[arg(long, global = true, value_parser = parse_u16)]
    usage_page: Option<u16>,

    /// Override the raw HID usage.
    #[arg(long, global = true, value_parser = parse_u16)]
    usage: Option<u16>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List attached HID interfaces, marking the one that would be opened.
    ListDevices {
        /// Print JSON instead of text.
        #[arg(long)]
        json: bool,
    },
    /// List named colors.
    ListColors,
    /// Show the current LED state.
    GetState {
        /// Print JSON instead of text.
        #[arg(long)]
        json: bool,
    },
    /// Set the LED state: all, key, under, off, or next.
    SetState {
        #[arg(default_value = "all")]
        state: String,
    },
    /// Advance to the next built-in animation.
    NextAnimation,
    /// Set the whole keyboard to a color name, #rrggbb, or r,g,b.
    SetColor { color: String },
    /// Set the whole keyboard to an RGB color (0-255 each; invalid values use white).
    SetColorRgb {
        #[arg(allow_negative_numbers = true)]
        r: i64,
        #[arg(allow_negative_numbers = true)]
        g: i64,
        #[arg(allow_negative_numbers = true)]
        b: i64,
    },
    /// Flash a color, then restore the previous LED state.
    Notify {
        /// Zone: full, bottom, or under.
        #[arg(long, default_value = "full")]
        mode: String,
        /// Color name.
        #[arg(long, conflicts_with = "rgb")]
        color: Option<String>,
        /// RGB components.
        #[arg(long, num_args = 3, value_names = ["R", "G", "B"], allow_negative_numbers = true)]
        rgb: Option<Vec<i64>>,
        /// Seconds before reverting (default from config).
        #[arg(long)]
        duration: Option<f64>,
    },
}

fn parse_u16(s: &str) -> std::result::Result<u16, String> {
    let parsed = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u16::from_str_radix(hex, 16),
        None => s.parse::<u16>(),
    };
    parsed.map_err(|e| format!("invalid 16-bit value '{s}': {e}"))
}

impl Cli {
    fn controller_config(&self) -> Result<ControllerConfig> {
        let mut config = config::load_or_default(self.config.as_deref())?;
        let sel = &mut config.selector;
        if let Some(vid) = self.vid {
            sel.vendor_id = vid;
        }
        if let Some(pid) = self.pid {
            sel.product_id = pid;
        }
        if let Some(page) = self.usage_page {
            sel.usage_page = page;
        }
        if let Some(usage) = self.usage {
            sel.usage = usage;
        }
        Ok(config)
    }
}

fn connect(config: ControllerConfig) -> Result<Controller<HidapiDevice>> {
    let backend = HidapiBackend::new()?;
    let selector = config.selector;
    Controller::connect(&backend, config).with_context(|| {
        format!("connect to keyboard ({selector}); is it plugged in and accessible?")
    })
}

/// A `set-color` argument, classified before connecting.
#[derive(Debug, PartialEq)]
enum ColorArg {
    /// `#rrggbb` or `0xrrggbb`.
    Hex(Rgb),
    /// `r,g,b`, range-checked by the controller.
    Components(i64, i64, i64),
    /// Anything else is looked up in the palette.
    Name(String),
}

impl ColorArg {
    fn parse(text: &str, palette: &Palette) -> Result<Self> {
        let text = text.trim();
        if palette.get(text).is_some() {
            return Ok(Self::Name(text.to_string()));
        }
        if text.contains(',') {
            let parts = text
                .split(',')
                .map(|p| p.trim().parse::<i64>())
                .collect::<std::result::Result<Vec<_>, _>>()
                .with_context(|| format!("invalid RGB components '{text}'"))?;
            return match parts.as_slice() {
                [r, g, b] => Ok(Self::Components(*r, *g, *b)),
                _ => anyhow::bail!("expected three RGB components, got '{text}'"),
            };
        }
        Ok(match text.parse::<Rgb>() {
            Ok(rgb) => Self::Hex(rgb),
            Err(_) => Self::Name(text.to_string()),
        })
    }
}

fn report(warnings: &[InputWarning]) {
    for w in warnings {
        eprintln!("warning: {w}");
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let config = cli.controller_config()?;

    match cli.command {
        Commands::ListDevices { json } => {
            let backend = HidapiBackend::new()?;
            let devices = backend.enumerate()?;
            if json {
                println!("{}", serde_json::to_string_pretty(&devices)?);
            } else if devices.is_empty() {
                println!("No HID devices found.");
            } else {
                for dev in &devices {
                    let marker = if config.selector.matches(dev) { "*" } else { " " };
                    println!(
                        "{marker} VID: 0x{:04X}, PID: 0x{:04X}, usage page: 0x{:04X}, usage: 0x{:02X}, {} (path: {})",
                        dev.vendor_id,
                        dev.product_id,
                        dev.usage_page,
                        dev.usage,
                        dev.product.as_deref().unwrap_or("unknown"),
                        dev.path
                    );
                }
            }
        }
        Commands::ListColors => {
            for (name, rgb) in config.palette.iter() {
                println!("{name:<10} {rgb}");
            }
        }
        Commands::GetState { json } => {
            let mut ctl = connect(config)?;
            let state = ctl.get_state()?;
            ctl.close();
            if json {
                println!("{}", serde_json::json!({ "state": state, "byte": state.as_byte() }));
            } else {
                println!("Current LED state: {state} (0x{:02X})", state.as_byte());
            }
        }
        Commands::SetState { state } => {
            let parsed = LightingState::from_name(&state).ok_or_else(|| {
                anyhow::anyhow!("Unknown state '{state}'. Valid states: all, key, under, off, next")
            })?;
            let mut ctl = connect(config)?;
            ctl.set_state(parsed)?;
            ctl.close();
            println!("LED state set to {parsed}");
        }
        Commands::NextAnimation => {
            let mut ctl = connect(config)?;
            ctl.next_animation()?;
            ctl.close();
            println!("Advanced to next animation");
        }
        Commands::SetColor { color } => {
            let arg = ColorArg::parse(&color, &config.palette)?;
            let mut ctl = connect(config)?;
            match arg {
                ColorArg::Hex(rgb) => ctl.set_color(rgb)?,
                ColorArg::Components(r, g, b) => report(&ctl.set_color_rgb(r, g, b)?),
                ColorArg::Name(name) => report(&ctl.set_color_name(&name)?),
            }
            ctl.close();
            println!("Keyboard color set");
        }
        Commands::SetColorRgb { r, g, b } => {
            let mut ctl = connect(config)?;
            report(&ctl.set_color_rgb(r, g, b)?);
            ctl.close();
            println!("Keyboard color set");
        }
        Commands::Notify {
            mode,
            color,
            rgb,
            duration,
        } => {
            let duration = match duration {
                Some(secs) => Duration::try_from_secs_f64(secs)
                    .map_err(|e| anyhow::anyhow!("invalid duration {secs}: {e}"))?,
                None => config.notification_duration(),
            };
            let mut ctl = connect(config)?;
            let warnings = match rgb.as_deref() {
                Some([r, g, b]) => ctl.send_notification_rgb(&mode, *r, *g, *b, duration)?,
                Some(other) => anyhow::bail!("--rgb takes 3 values, got {}", other.len()),
                None => {
                    let name = color.as_deref().unwrap_or("white");
                    ctl.send_notification_named(&mode, name, duration)?
                }
            };
            report(&warnings);
            ctl.close();
            let (sent_mode, _) = NotificationMode::resolve(&mode);
            println!("Notification sent ({sent_mode})");
        }
    }

    Ok(())
}
