//! Integration test: `sweep tui` without a TTY prints a clear error.

use std::process::{Command, Stdio};

#[test]
fn tui_without_tty_prints_helpful_error() {
    let bin = env!("CARGO_BIN_EXE_sweep");
    let out = Command::new(bin)
        .arg("tui")
        .stdin(Stdio::null())
        .output()
        .expect("run sweep");
    assert!(!out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(
        stderr.contains("interactive terminal") || stderr.contains("TTY"),
        "stderr should mention TTY; got: {}",
        stderr
    );
}
