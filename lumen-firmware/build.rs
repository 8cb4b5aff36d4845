//! Build script for lumen-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates display.toml and bakes it into the firmware

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use lumen_display::{ConfigError, DisplayConfig};

fn main() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").expect("OUT_DIR not set"));
    setup_linker(&out_dir);
    generate_display_config(&out_dir);
}

/// Set up linker search paths for memory.x
fn setup_linker(out_dir: &Path) {
    // Copy memory.x to the output directory
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).expect("create memory.x");
    f.write_all(memory_x).expect("write memory.x");

    // Tell rustc where to find memory.x
    println!("cargo:rustc-link-search={}", out_dir.display());

    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Parse display.toml and emit `DISPLAY_CONFIG` into `$OUT_DIR/display_config.rs`
fn generate_display_config(out_dir: &Path) {
    println!("cargo:rerun-if-changed=display.toml");

    let config_path = Path::new("display.toml");
    let config = if config_path.exists() {
        let content = fs::read_to_string(config_path)
            .unwrap_or_else(|e| fail(&format!("Failed to read display.toml: {}", e)));
        DisplayConfig::from_toml(&content).unwrap_or_else(|e| {
            fail(match e {
                ConfigError::Parse => "display.toml is not valid TOML or has mistyped keys",
                ConfigError::InvalidAddress => "[display] address must be a 7-bit I2C address",
                ConfigError::InvalidValue => {
                    "[display] frequency_hz must be 1..=1000000 and both precharge nibbles nonzero"
                }
            })
        })
    } else {
        println!("cargo:warning=display.toml not found, using default panel settings");
        DisplayConfig::DEFAULT
    };

    let source = format!(
        "/// Panel settings from display.toml\n\
         pub const DISPLAY_CONFIG: DisplayConfig = DisplayConfig {{\n    \
             address: {:#04x},\n    \
             frequency_hz: {},\n    \
             contrast: {:#04x},\n    \
             precharge: {:#04x},\n    \
             flip_horizontal: {},\n    \
             flip_vertical: {},\n\
         }};\n",
        config.address,
        config.frequency_hz,
        config.contrast,
        config.precharge,
        config.flip_horizontal,
        config.flip_vertical,
    );
    fs::write(out_dir.join("display_config.rs"), source)
        .unwrap_or_else(|e| fail(&format!("Failed to write display_config.rs: {}", e)));

    println!(
        "cargo:warning=display.toml validated (address {:#04x}, {} Hz)",
        config.address, config.frequency_hz
    );
}

fn fail(msg: &str) -> ! {
    panic!(
        "\n\
        ╔══════════════════════════════════════════════════════════════════╗\n\
        ║  ERROR: Invalid display configuration                            ║\n\
        ╠══════════════════════════════════════════════════════════════════╣\n\
        ║  {:<64}║\n\
        ╚══════════════════════════════════════════════════════════════════╝\n",
        msg
    );
}
