use std::env;
use std::process::Command;

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/refs");

    let vars = [
        ("RENTBOOK_BUILD_HASH", git(&["rev-parse", "--short", "HEAD"]).unwrap_or_else(unknown)),
        ("RENTBOOK_BUILD_STATUS", worktree_status()),
        (
            "RENTBOOK_BUILD_TIMESTAMP",
            chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true),
        ),
        ("RENTBOOK_BUILD_TARGET", env::var("TARGET").unwrap_or_else(|_| unknown())),
        ("RENTBOOK_BUILD_PROFILE", env::var("PROFILE").unwrap_or_else(|_| unknown())),
        ("RENTBOOK_BUILD_RUSTC", command_stdout("rustc", &["--version"]).unwrap_or_else(unknown)),
    ];
    for (name, value) in vars {
        println!("cargo:rustc-env={name}={value}");
    }
}

fn unknown() -> String {
    "unknown".to_string()
}

fn git(args: &[&str]) -> Option<String> {
    command_stdout("git", args).filter(|out| !out.is_empty())
}

fn worktree_status() -> String {
    match command_stdout("git", &["status", "--porcelain"]) {
        Some(out) if out.is_empty() => "clean".to_string(),
        Some(_) => "dirty".to_string(),
        None => unknown(),
    }
}

fn command_stdout(program: &str, args: &[&str]) -> Option<String> {
    let output = Command::new(program).args(args).output().ok()?;
    if !output.status.success() {
        return None;
    }
    String::from_utf8(output.stdout)
        .ok()
        .map(|text| text.trim().to_string())
}
