use std::fs::{self, File};
use std::process::Command;

use tempfile::tempdir;
use zip::ZipArchive;

fn lurti_pack() -> Command {
    Command::new(env!("CARGO_BIN_EXE_lurti-pack"))
}

fn entry_names(path: &std::path::Path) -> Vec<String> {
    let zip = ZipArchive::new(File::open(path).unwrap()).unwrap();
    zip.file_names().map(str::to_string).collect()
}

#[test]
fn test_packs_working_directory() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("LICENSE"), "0123456789").unwrap();
    fs::write(dir.path().join("init.lua"), "hello").unwrap();
    fs::create_dir_all(dir.path().join("core")).unwrap();
    fs::write(dir.path().join("core/a.lua"), "abc").unwrap();
    fs::create_dir_all(dir.path().join("collections")).unwrap();

    let output = lurti_pack().current_dir(dir.path()).output().unwrap();
    assert!(
        output.status.success(),
        "stderr:\n{}",
        String::from_utf8_lossy(&output.stderr)
    );

    let mut names = entry_names(&dir.path().join("lurti.zip"));
    names.sort();
    assert_eq!(names, vec!["lurti/LICENSE", "lurti/core/a.lua", "lurti/init.lua"]);
}

#[test]
fn test_root_and_manifest_flags() {
    let dir = tempdir().unwrap();
    fs::create_dir_all(dir.path().join("src/nested")).unwrap();
    fs::write(dir.path().join("src/nested/m.lua"), "m").unwrap();
    fs::write(
        dir.path().join("pack.toml"),
        "name = \"kit\"\nfiles = []\ndirs = [\"src\"]\n",
    )
    .unwrap();

    let status = lurti_pack()
        .arg("--root")
        .arg(dir.path())
        .args(["--manifest", "pack.toml"])
        .status()
        .unwrap();
    assert!(status.success());
    assert_eq!(entry_names(&dir.path().join("kit.zip")), vec!["kit/src/nested/m.lua"]);
}

#[test]
fn test_dry_run_writes_nothing() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("init.lua"), "x").unwrap();

    let status = lurti_pack()
        .current_dir(dir.path())
        .arg("--dry-run")
        .status()
        .unwrap();
    assert!(status.success());
    assert!(!dir.path().join("lurti.zip").exists());
}

#[test]
fn test_unwritable_output_exits_nonzero() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("init.lua"), "x").unwrap();

    let output = lurti_pack()
        .current_dir(dir.path())
        .args(["--output", "no-such-dir/lurti.zip"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Error: failed to write"));
    assert!(!dir.path().join("no-such-dir").exists());
}

#[test]
fn test_missing_manifest_exits_nonzero() {
    let dir = tempdir().unwrap();
    let output = lurti_pack()
        .current_dir(dir.path())
        .args(["-m", "absent.toml"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("manifest not found"));
}
