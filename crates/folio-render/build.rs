use std::env;
use std::fs;
use std::path::{Path, PathBuf};

// Fetches a prebuilt PDFium into vendor/pdfium so the viewer works out of the
// box. Everything here is best effort: if the download fails (offline build,
// unsupported platform), the runtime binding falls back to a system-installed
// pdfium library instead.
fn main() {
    let target = env::var("TARGET").unwrap_or_default();

    // pdfium_7543 (latest stable as of pdfium-render 0.8.37)
    let pdfium_version = "chromium/7543";

    let (platform, arch, lib_name) = match target.as_str() {
        t if t.contains("apple") => {
            let arch = if t.contains("aarch64") {
                "arm64"
            } else {
                "x64"
            };
            ("mac", arch, "libpdfium.dylib")
        }
        t if t.contains("linux") => {
            let arch = if t.contains("aarch64") {
                "arm64"
            } else {
                "x64"
            };
            ("linux", arch, "libpdfium.so")
        }
        t if t.contains("windows") => {
            let arch = if t.contains("aarch64") {
                "arm64"
            } else if t.contains("i686") {
                "x86"
            } else {
                "x64"
            };
            ("win", arch, "pdfium.dll")
        }
        _ => {
            println!("cargo:warning=No prebuilt PDFium for target {}", target);
            return;
        }
    };

    let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR").unwrap());
    let Some(workspace_root) = manifest_dir.parent().and_then(|p| p.parent()) else {
        return;
    };
    let pdfium_dir = workspace_root.join("vendor").join("pdfium");
    let lib_path = pdfium_dir.join("lib").join(lib_name);

    if lib_path.exists() {
        fix_library_install_name(&lib_path, platform);
        return;
    }

    let download_url = format!(
        "https://github.com/bblanchon/pdfium-binaries/releases/download/{}/pdfium-{}-{}.tgz",
        pdfium_version, platform, arch
    );

    println!("cargo:warning=Downloading PDFium from {}", download_url);

    let temp_file = env::temp_dir().join("folio-pdfium.tgz");
    if let Err(e) = download_file(&download_url, &temp_file) {
        println!(
            "cargo:warning=PDFium download failed ({}); will use the system library at runtime",
            e
        );
        return;
    }

    if let Err(e) = extract_tarball(&temp_file, &pdfium_dir) {
        println!("cargo:warning=PDFium extraction failed: {}", e);
    }
    let _ = fs::remove_file(&temp_file);

    if lib_path.exists() {
        println!(
            "cargo:warning=PDFium installed to {}",
            pdfium_dir.display()
        );
        fix_library_install_name(&lib_path, platform);
    }
}

fn download_file(url: &str, dest: &Path) -> Result<(), String> {
    use std::io::Write;

    let response = ureq::get(url).call().map_err(|e| e.to_string())?;

    let mut file = fs::File::create(dest).map_err(|e| e.to_string())?;
    std::io::copy(&mut response.into_reader(), &mut file).map_err(|e| e.to_string())?;
    file.flush().map_err(|e| e.to_string())
}

fn extract_tarball(tarball: &Path, dest: &Path) -> Result<(), String> {
    use flate2::read::GzDecoder;
    use tar::Archive;

    let tar_gz = fs::File::open(tarball).map_err(|e| e.to_string())?;
    let tar = GzDecoder::new(tar_gz);
    let mut archive = Archive::new(tar);
    archive.unpack(dest).map_err(|e| e.to_string())
}

fn fix_library_install_name(lib_path: &Path, platform: &str) {
    if platform != "mac" {
        return;
    }

    // On macOS the library id must be @rpath-relative for runtime loading
    let output = std::process::Command::new("install_name_tool")
        .arg("-id")
        .arg("@rpath/libpdfium.dylib")
        .arg(lib_path)
        .output();

    if let Ok(result) = output {
        if !result.status.success() {
            println!(
                "cargo:warning=Failed to fix install name: {}",
                String::from_utf8_lossy(&result.stderr)
            );
        }
    }
}
