use std::{env, fs, path::PathBuf};

// Ship settings.json next to the binary so the server finds it when started
// from another directory. OUT_DIR is target/<profile>/build/<pkg>/out.
fn main() {
    println!("cargo:rerun-if-changed=settings.json");

    let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR").unwrap());
    let source = manifest_dir.join("settings.json");
    if !source.is_file() {
        println!("cargo:warning=settings.json not found, server will use defaults");
        return;
    }

    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    let Some(profile_dir) = out_dir.ancestors().nth(3) else {
        return;
    };
    fs::copy(&source, profile_dir.join("settings.json"))
        .expect("Failed to copy settings.json next to the binary");
}
