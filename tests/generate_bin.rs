use ext_icon_gen::icon_gen::{GRADIENT_TOP, ICON_SIZES};
use std::path::PathBuf;
use std::process::Command;

/// End-to-end test: run the binary with no arguments and assert that all
/// three icons appear next to the executable, sized per their file names.
#[test]
fn binary_generates_the_full_icon_set() {
    let binary_path = get_binary_path();
    let out_dir = binary_path
        .parent()
        .expect("binary should live in a directory")
        .to_path_buf();

    let output = Command::new(&binary_path)
        .output()
        .expect("Failed to run ext-icon-gen");

    if !output.status.success() {
        eprintln!("Command failed with status: {}", output.status);
        eprintln!("stdout: {}", String::from_utf8_lossy(&output.stdout));
        eprintln!("stderr: {}", String::from_utf8_lossy(&output.stderr));
        panic!("ext-icon-gen failed");
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("All icons generated successfully!"),
        "missing summary line in: {stdout}"
    );

    for (size, filename) in ICON_SIZES {
        assert!(
            stdout.contains(filename),
            "missing confirmation line for {filename}"
        );

        let icon_path = out_dir.join(filename);
        assert!(
            icon_path.exists(),
            "expected {} next to the binary",
            icon_path.display()
        );

        let icon = image::open(&icon_path)
            .unwrap_or_else(|e| panic!("failed to decode {filename}: {e}"));
        assert_eq!(icon.width(), size, "{filename} width");
        assert_eq!(icon.height(), size, "{filename} height");
        assert_eq!(
            icon.to_rgb8().get_pixel(0, 0),
            &GRADIENT_TOP,
            "{filename} top-left pixel"
        );
    }
}

/// Locates target/debug/ext-icon-gen, building it first if needed.
fn get_binary_path() -> PathBuf {
    let debug_path = PathBuf::from("target/debug/ext-icon-gen");
    if debug_path.exists() {
        return debug_path;
    }

    let build_output = Command::new("cargo")
        .args(["build", "--bin", "ext-icon-gen"])
        .output()
        .expect("Failed to run cargo build");

    if !build_output.status.success() {
        panic!(
            "Failed to build ext-icon-gen binary: {}",
            String::from_utf8_lossy(&build_output.stderr)
        );
    }

    debug_path
}
