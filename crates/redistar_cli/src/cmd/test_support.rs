use std::path::PathBuf;
use std::process::{Command, Output};
use std::sync::OnceLock;

use redistar_testkit::{scratch_path, target_dir as workspace_target_dir};

static REDISTAR_BIN: OnceLock<PathBuf> = OnceLock::new();

pub(crate) fn write_json_input(name: &str, json: &str) -> PathBuf {
	let path = scratch_path(name);
	std::fs::write(&path, json).expect("json input writes");
	path
}

pub(crate) fn run_redistar(args: &[&str]) -> Output {
	Command::new(redistar_bin()).args(args).output().expect("redistar command executes")
}

pub(crate) fn run_redistar_ok(args: &[&str]) -> String {
	let output = run_redistar(args);
	assert!(
		output.status.success(),
		"redistar command failed with status={}: {}",
		output.status,
		String::from_utf8_lossy(&output.stderr)
	);
	String::from_utf8(output.stdout).expect("stdout should be utf-8")
}

pub(crate) fn run_redistar_json(args: &[&str]) -> serde_json::Value {
	let stdout = run_redistar_ok(args);
	serde_json::from_str(&stdout).expect("stdout should be valid json")
}

fn redistar_bin() -> &'static PathBuf {
	REDISTAR_BIN.get_or_init(resolve_redistar_bin)
}

fn resolve_redistar_bin() -> PathBuf {
	if let Ok(path) = std::env::var("CARGO_BIN_EXE_redistar") {
		return PathBuf::from(path);
	}

	let manifest_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
	let target_dir = workspace_target_dir();

	let mut bin = target_dir.join("debug");
	bin.push(if cfg!(windows) { "redistar.exe" } else { "redistar" });

	let status = Command::new("cargo")
		.current_dir(&manifest_dir)
		.args(["build", "--quiet", "--bin", "redistar"])
		.status()
		.expect("cargo build executes");
	assert!(status.success(), "failed to build redistar binary at {}", bin.display());

	bin
}
