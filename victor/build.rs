//! Build-time instruction-set tier resolution.
//!
//! Every tier is enabled by, in order of preference, an explicit `force-*`
//! feature, the `emulation` feature, or a native target feature. Enabling a
//! tier enables every tier below it. The result is emitted as `victor_*`
//! cfgs plus tier bitmasks for `victor::tier::Configuration`.

use std::env;
use std::process::Command;

/// (cfg suffix, rustc target feature, cargo feature env suffix), narrowest first.
const TIERS: [(&str, &str, &str); 8] = [
    ("sse", "sse", "FORCE_SSE"),
    ("sse2", "sse2", "FORCE_SSE2"),
    ("sse3", "sse3", "FORCE_SSE3"),
    ("ssse3", "ssse3", "FORCE_SSSE3"),
    ("sse4_1", "sse4.1", "FORCE_SSE4_1"),
    ("sse4_2", "sse4.2", "FORCE_SSE4_2"),
    ("avx", "avx", "FORCE_AVX"),
    ("avx2", "avx2", "FORCE_AVX2"),
];

/// Tiers the emulation layer provides (sse, sse2).
const EMULATED_MASK: u8 = 0b0000_0011;

const SSE: u8 = 1 << 0;
const SSE2: u8 = 1 << 1;

fn feature(name: &str) -> bool {
    env::var_os(format!("CARGO_FEATURE_{name}")).is_some()
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=CARGO_CFG_TARGET_FEATURE");
    println!("cargo:rerun-if-env-changed=RUSTC_BOOTSTRAP");

    for (cfg, _, _) in TIERS {
        println!("cargo:rustc-check-cfg=cfg(victor_{cfg})");
    }
    println!("cargo:rustc-check-cfg=cfg(victor_native)");
    println!("cargo:rustc-check-cfg=cfg(victor_emulated)");
    println!("cargo:rustc-check-cfg=cfg(victor_vector_extensions)");

    let arch = env::var("CARGO_CFG_TARGET_ARCH").unwrap_or_default();
    let is_x86 = arch == "x86" || arch == "x86_64";
    let target_features = env::var("CARGO_CFG_TARGET_FEATURE").unwrap_or_default();
    let has_target_feature = |name: &str| target_features.split(',').any(|f| f == name);
    let emulation = feature("EMULATION");

    let mut forced = 0u8;
    let mut native = 0u8;
    for (bit, (_, target_feature, force)) in TIERS.iter().enumerate() {
        if feature(force) {
            forced |= 1 << bit;
        }
        if is_x86 && has_target_feature(target_feature) {
            native |= 1 << bit;
        }
    }
    let emulated = if emulation { EMULATED_MASK } else { 0 };

    if forced != 0 && !is_x86 && !emulation {
        panic!(
            "victor: force-* features require an x86/x86_64 target (got `{arch}`); \
             enable `emulation` to satisfy them portably"
        );
    }

    // Walk widest to narrowest so a higher tier pulls in everything below it.
    let mut enabled = 0u8;
    let mut implied = false;
    for bit in (0..TIERS.len()).rev() {
        let mask = 1u8 << bit;
        if implied || (forced | emulated | native) & mask != 0 {
            enabled |= mask;
            implied = true;
        }
    }

    for (bit, (cfg, _, _)) in TIERS.iter().enumerate() {
        if enabled & (1 << bit) != 0 {
            println!("cargo:rustc-cfg=victor_{cfg}");
        }
    }

    // Tiers that native intrinsics may rely on: forced, native, or implied
    // by one of those.
    let mut hardware = 0u8;
    let mut implied = false;
    for bit in (0..TIERS.len()).rev() {
        let mask = 1u8 << bit;
        if implied || (forced | native) & mask != 0 {
            hardware |= mask;
            implied = true;
        }
    }

    let native_backend =
        is_x86 && hardware & SSE != 0 && (hardware & SSE2 != 0 || !emulation);
    let emulated_backend = !native_backend && emulation;
    if native_backend {
        println!("cargo:rustc-cfg=victor_native");
    } else if emulated_backend {
        println!("cargo:rustc-cfg=victor_emulated");
    }

    println!("cargo:rustc-env=VICTOR_TIERS_ENABLED={enabled}");
    println!("cargo:rustc-env=VICTOR_TIERS_FORCED={forced}");
    println!("cargo:rustc-env=VICTOR_TIERS_EMULATED={emulated}");
    println!("cargo:rustc-env=VICTOR_TIERS_NATIVE={native}");

    if feature("VECTOR_EXTENSIONS") && !feature("NO_VECTOR_EXTENSIONS") {
        if !native_backend {
            println!(
                "cargo:warning=victor: vector-extensions needs the native backend; \
                 using plain register aliases"
            );
        } else if !nightly_toolchain() {
            println!(
                "cargo:warning=victor: vector-extensions needs a nightly toolchain; \
                 using plain register aliases"
            );
        } else {
            println!("cargo:rustc-cfg=victor_vector_extensions");
        }
    }
}

fn nightly_toolchain() -> bool {
    if env::var_os("RUSTC_BOOTSTRAP").is_some() {
        return true;
    }
    let rustc = env::var_os("RUSTC").unwrap_or_else(|| "rustc".into());
    Command::new(rustc)
        .arg("--version")
        .output()
        .ok()
        .and_then(|out| String::from_utf8(out.stdout).ok())
        .is_some_and(|version| version.contains("-nightly") || version.contains("-dev"))
}
