//! Build script for storefront crate.
//!
//! Fingerprints the stylesheet so templates can link an immutable,
//! cache-busted URL (`/static/css/derived/main.<hash>.css`).

use std::env;
use std::fs;
use std::path::Path;

use sha2::{Digest, Sha256};

/// Hex characters of the digest kept in the filename.
const HASH_LEN: usize = 8;

fn main() {
    let manifest_dir =
        env::var("CARGO_MANIFEST_DIR").expect("CARGO_MANIFEST_DIR must be set by Cargo");
    let css_dir = Path::new(&manifest_dir).join("static/css");
    let css_path = css_dir.join("main.css");

    println!("cargo:rerun-if-changed={}", css_path.display());
    println!("cargo:rerun-if-changed=templates");

    let content = match fs::read(&css_path) {
        Ok(content) => content,
        Err(e) => {
            println!("cargo:warning=Could not read main.css: {e}");
            println!("cargo:rustc-env=CSS_HASH=");
            return;
        }
    };

    let digest = format!("{:x}", Sha256::digest(&content));
    let short_hash: String = digest.chars().take(HASH_LEN).collect();
    println!("cargo:rustc-env=CSS_HASH={short_hash}");

    // Replace any previously fingerprinted copies
    let derived_dir = css_dir.join("derived");
    if derived_dir.exists() {
        fs::remove_dir_all(&derived_dir).expect("Failed to clear derived CSS directory");
    }
    fs::create_dir_all(&derived_dir).expect("Failed to create derived CSS directory");
    fs::copy(&css_path, derived_dir.join(format!("main.{short_hash}.css")))
        .expect("Failed to copy CSS to derived directory");
}
