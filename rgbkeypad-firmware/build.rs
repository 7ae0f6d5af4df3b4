//! Build script for rgbkeypad-firmware
//!
//! - Sets up linker search paths for memory.x and the linker scripts
//! - Validates keypad.toml at compile time

use std::env;
use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::PathBuf;

const DEMO_MODES: &[&str] = &["reactive", "hold_toggle", "highlight", "rainbow", "random"];

/// Matches `config::MAX_TICK_MS` in the firmware
const MAX_TICK_MS: i64 = 1_000;

fn main() {
    setup_linker();
    validate_config();
}

/// Set up linker search paths for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    // Copy memory.x to the output directory
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    println!("cargo:rustc-link-search={}", out_dir.display());

    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tlink-rp.x");
    println!("cargo:rustc-link-arg-bins=-Tdefmt.x");

    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validate keypad.toml at compile time
///
/// Rejects everything the on-device parser would reject, and reports all
/// problems at once.
fn validate_config() {
    println!("cargo:rerun-if-changed=keypad.toml");

    let config_content = match fs::read_to_string("keypad.toml") {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => fail(
            "keypad.toml not found",
            &["the firmware embeds it as its configuration".to_string()],
        ),
        Err(e) => fail("cannot read keypad.toml", &[e.to_string()]),
    };

    let config: toml::Value = match toml::from_str(&config_content) {
        Ok(value) => value,
        Err(e) => {
            let lines: Vec<String> = e.to_string().lines().map(str::to_string).collect();
            fail("keypad.toml is not valid TOML", &lines)
        }
    };

    let mut errors = Vec::new();
    validate_sections(&config, &mut errors);
    validate_keypad(&config, &mut errors);
    validate_sleep(&config, &mut errors);
    validate_demo(&config, &mut errors);

    if !errors.is_empty() {
        fail("invalid keypad.toml", &errors);
    }

    println!("cargo:warning=keypad.toml validated successfully");
}

/// Abort the build with a titled list of problems
fn fail(title: &str, lines: &[String]) -> ! {
    let mut report = format!("\n{}\n", title);
    for line in lines {
        report.push_str("  - ");
        report.push_str(line);
        report.push('\n');
    }
    panic!("{}", report);
}

/// Only flat `[keypad]`, `[sleep]` and `[demo]` tables are understood
fn validate_sections(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(root) = config.as_table() else {
        return;
    };

    for (name, value) in root {
        match (name.as_str(), value) {
            ("keypad" | "sleep" | "demo", toml::Value::Table(table)) => {
                for (key, value) in table {
                    if value.is_table() || value.is_array() {
                        errors.push(format!("[{}] {} must be a plain value", name, key));
                    }
                }
            }
            ("keypad" | "sleep" | "demo", _) => {
                errors.push(format!("[{}] must be a table", name));
            }
            _ => errors.push(format!("unknown section or key '{}'", name)),
        }
    }
}

fn section<'a>(config: &'a toml::Value, name: &str) -> Option<&'a toml::value::Table> {
    config.get(name).and_then(|s| s.as_table())
}

fn check_keys(table: &toml::value::Table, section: &str, known: &[&str], errors: &mut Vec<String>) {
    for key in table.keys() {
        if !known.contains(&key.as_str()) {
            errors.push(format!("[{}] unknown key '{}'", section, key));
        }
    }
}

/// Milliseconds must fit a u32
fn check_millis(table: &toml::value::Table, section: &str, key: &str, errors: &mut Vec<String>) {
    match table.get(key) {
        None => {}
        Some(toml::Value::Integer(ms)) if (0..=i64::from(u32::MAX)).contains(ms) => {}
        Some(_) => errors.push(format!("[{}] {} must be a non-negative integer", section, key)),
    }
}

/// Seconds may be an integer or a float, and must not be negative
fn check_seconds(table: &toml::value::Table, section: &str, key: &str, errors: &mut Vec<String>) {
    let secs = match table.get(key) {
        None => return,
        Some(toml::Value::Integer(i)) => *i as f64,
        Some(toml::Value::Float(f)) => *f,
        Some(_) => {
            errors.push(format!("[{}] {} must be a number", section, key));
            return;
        }
    };

    if !secs.is_finite() || secs < 0.0 {
        errors.push(format!("[{}] {} must be a non-negative number", section, key));
    } else if secs * 1000.0 > f64::from(u32::MAX) {
        errors.push(format!("[{}] {} is too long", section, key));
    }
}

fn validate_keypad(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(keypad) = section(config, "keypad") else {
        return;
    };

    check_keys(keypad, "keypad", &["hold_time_ms", "hold_time", "brightness"], errors);
    check_millis(keypad, "keypad", "hold_time_ms", errors);
    check_seconds(keypad, "keypad", "hold_time", errors);

    match keypad.get("brightness") {
        None => {}
        Some(toml::Value::Integer(pct)) if (0..=100).contains(pct) => {}
        Some(_) => errors.push("[keypad] brightness must be an integer 0-100".to_string()),
    }
}

fn validate_sleep(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(sleep) = section(config, "sleep") else {
        return;
    };

    check_keys(sleep, "sleep", &["enabled", "timeout_ms", "timeout"], errors);
    check_millis(sleep, "sleep", "timeout_ms", errors);
    check_seconds(sleep, "sleep", "timeout", errors);

    if let Some(enabled) = sleep.get("enabled") {
        if !enabled.is_bool() {
            errors.push("[sleep] enabled must be true or false".to_string());
        }
    }
}

fn validate_demo(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(demo) = section(config, "demo") else {
        return;
    };

    check_keys(demo, "demo", &["mode", "tick_ms"], errors);

    match demo.get("mode") {
        None => {}
        Some(toml::Value::String(mode)) if DEMO_MODES.contains(&mode.as_str()) => {}
        Some(_) => errors.push(format!("[demo] mode must be one of {}", DEMO_MODES.join(", "))),
    }

    match demo.get("tick_ms") {
        None => {}
        Some(toml::Value::Integer(ms)) if (1..=MAX_TICK_MS).contains(ms) => {}
        Some(_) => errors.push(format!("[demo] tick_ms must be an integer 1-{}", MAX_TICK_MS)),
    }
}
