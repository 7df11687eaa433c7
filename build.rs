//! Build script - places the nRF52840 memory layout next to the build
//! output so cortex-m-rt's `link.x` can include it.
//!
//! Harmless for host builds: the file is only consumed by the linker
//! when targeting `thumbv7em-none-eabihf`.

use std::env;
use std::fs;
use std::path::PathBuf;

fn main() {
    let out_dir = PathBuf::from(env::var_os("OUT_DIR").expect("cargo sets OUT_DIR"));

    fs::write(out_dir.join("memory.x"), include_bytes!("memory.x"))
        .expect("OUT_DIR is writable");

    println!("cargo:rustc-link-search={}", out_dir.display());
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}
