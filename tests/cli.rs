use assert_cmd::prelude::*;
use assert_fs::TempDir;
use std::process::Command;

// We check the --help output in order to confirm that the clap cli is setup correctly.
// Any arguments that are setup incorrectly will cause clap to panic regardless of the arguments
// or options provided.
// Calling help does not require any application logic so if this tests fails then we know it
// is to do with the clap cli setup code.
#[test]
fn check_clap_cli_help() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin("bookroot")?;

    cmd.arg("--help");
    cmd.assert().success();

    Ok(())
}

#[test]
fn check_subcommand_help() -> Result<(), Box<dyn std::error::Error>> {
    for subcommand in ["google", "open-library", "session"] {
        let mut cmd = Command::cargo_bin("bookroot")?;
        cmd.args([subcommand, "--help"]);
        cmd.assert().success();
    }

    Ok(())
}

// Run from an empty directory so that no .env file is picked up.
#[test]
fn google_without_api_key_fails() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    let mut cmd = Command::cargo_bin("bookroot")?;

    let output = cmd
        .current_dir(dir.path())
        .env_remove("GOOGLE_BOOKS_API_KEY")
        .args(["google", "atomic habits"])
        .output()?;

    assert_eq!(Some(2), output.status.code());
    assert!(String::from_utf8_lossy(&output.stderr).contains("GOOGLE_BOOKS_API_KEY"));

    Ok(())
}

#[test]
fn open_library_without_terms_fails() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin("bookroot")?;

    let output = cmd.args(["open-library", "--limit", "5"]).output()?;

    assert_eq!(Some(2), output.status.code());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Nothing to search for"));

    Ok(())
}
