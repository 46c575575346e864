use std::process::Command;
use tempfile::TempDir;

fn show_config(home: &TempDir, envs: &[(&str, &str)], args: &[&str]) -> String {
    let output = Command::new(env!("CARGO_BIN_EXE_frutta"))
        .arg("--show-config")
        .args(args)
        .env("HOME", home.path())
        .env("XDG_CONFIG_HOME", home.path().join("config"))
        .envs(envs.iter().copied())
        .output()
        .expect("Failed to run show-config");

    assert!(output.status.success());
    String::from_utf8(output.stdout).unwrap()
}

#[test]
fn test_env_override_with_nested_keys() {
    let home = TempDir::new().unwrap();

    // Double underscore separates nested levels
    let stdout = show_config(
        &home,
        &[
            ("FRUTTA_DISPLAY__WIDTH", "7"),
            ("FRUTTA_DISPLAY__TIME_FORMAT", "compact"),
            ("FRUTTA_TIMER__PROBE_INTERVAL_MS", "250"),
        ],
        &[],
    );

    assert!(stdout.contains("width = 7"));
    assert!(stdout.contains("time_format = \"compact\""));
    assert!(stdout.contains("probe_interval_ms = 250"));
}

#[test]
fn test_precedence_file_env_cli() {
    let home = TempDir::new().unwrap();
    let config_dir = home.path().join("config").join("frutta");
    std::fs::create_dir_all(&config_dir).unwrap();
    std::fs::write(
        config_dir.join("settings.toml"),
        "[display]\nwidth = 12\nstyle = \"shade\"\n",
    )
    .unwrap();

    // File alone
    let stdout = show_config(&home, &[], &[]);
    assert!(stdout.contains("width = 12"));
    assert!(stdout.contains("style = \"shade\""));

    // Environment beats the file
    let stdout = show_config(&home, &[("FRUTTA_DISPLAY__WIDTH", "20")], &[]);
    assert!(stdout.contains("width = 20"));
    assert!(stdout.contains("style = \"shade\""));

    // Flags beat both
    let stdout = show_config(
        &home,
        &[("FRUTTA_DISPLAY__WIDTH", "20")],
        &["--width", "30", "--style", "braille"],
    );
    assert!(stdout.contains("width = 30"));
    assert!(stdout.contains("style = \"braille\""));
}

#[test]
fn test_out_of_range_probe_interval_is_rejected() {
    let home = TempDir::new().unwrap();

    for probe in ["0", "1000"] {
        let output = Command::new(env!("CARGO_BIN_EXE_frutta"))
            .arg("1s")
            .env("HOME", home.path())
            .env("XDG_CONFIG_HOME", home.path().join("config"))
            .env("FRUTTA_TIMER__PROBE_INTERVAL_MS", probe)
            .output()
            .expect("Failed to run frutta");

        assert_eq!(output.status.code(), Some(1));
        let stderr = String::from_utf8(output.stderr).unwrap();
        assert!(stderr.contains("probe_interval_ms"), "stderr: {stderr}");
        assert!(!stderr.contains("remaining"));
    }
}
