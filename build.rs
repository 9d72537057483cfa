#![allow(clippy::indexing_slicing, clippy::exit, clippy::unwrap_used)]
fn main() {
    // Release firmware drops the defmt strings entirely.
    if std::env::var("PROFILE").unwrap_or_default() == "release" {
        println!("cargo:rustc-env=DEFMT_LOG=off");
    }

    linker_hints();
    println!("cargo:rustc-link-arg=-Tdefmt.x");
    println!("cargo:rustc-link-arg=-Tlinkall.x");
}

/// Registers this build script as the linker's error handler so missing
/// linker scripts produce a readable hint instead of a wall of symbols.
fn linker_hints() {
    let args: Vec<String> = std::env::args().collect();
    if args.len() > 2 {
        if args[1] != "undefined-symbol" {
            std::process::exit(1);
        }

        let hint = match args[2].as_str() {
            "_defmt_timestamp" => Some(
                "`defmt` not found - make sure `defmt.x` is added as a linker script and a defmt transport (`esp-println`) is linked",
            ),
            "_stack_start" => Some("Is the linker script `linkall.x` missing?"),
            "esp_rtos_initialized" | "esp_rtos_yield_task" => {
                Some("`esp_rtos::start` was never called - the demos need it before spawning tasks")
            }
            _ => None,
        };
        if let Some(hint) = hint {
            eprintln!();
            eprintln!("💡 {hint}");
            eprintln!();
        }

        std::process::exit(0);
    }

    println!(
        "cargo:rustc-link-arg=-Wl,--error-handling-script={}",
        std::env::current_exe().unwrap().display()
    );
}
