use std::process::Command;

fn rogue_board(args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_rogue-board"))
        .args(args)
        .output()
        .expect("failed to launch rogue-board")
}

#[test]
fn ascii_output_draws_bordered_board() {
    let output = rogue_board(&["--seed", "7", "--level", "4"]);
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).expect("utf-8 output");
    let mut lines = stdout.lines();
    assert_eq!(lines.next(), Some("Day 4 (seed 7)"));

    let grid: Vec<&str> = lines.take(10).collect();
    assert_eq!(grid.len(), 10);
    assert_eq!(grid[0], "##########");
    assert_eq!(grid[9], "##########");
    assert!(grid.iter().all(|line| line.chars().count() == 10));
    assert_eq!(grid[2].chars().nth(7), Some('>'));
}

#[test]
fn json_output_is_reproducible() {
    let args = ["--seed", "11", "--levels", "3", "--format", "json"];
    let first = rogue_board(&args);
    let second = rogue_board(&args);
    assert!(first.status.success());
    assert_eq!(first.stdout, second.stdout);

    let levels: serde_json::Value =
        serde_json::from_slice(&first.stdout).expect("stdout is json");
    let levels = levels.as_array().expect("array of levels");
    assert_eq!(levels.len(), 3);
    for (index, level) in levels.iter().enumerate() {
        assert_eq!(level["level"], index as u64 + 1);
        assert_eq!(level["seed"], 11);
        assert_eq!(level["pool_size"], 36);
        assert_eq!(level["exit"]["x"], 6);

        let enemies = level["placements"]
            .as_array()
            .expect("placements array")
            .iter()
            .filter(|placement| placement["category"] == "enemy")
            .count();
        assert_eq!(enemies, [0, 1, 1][index]);
    }
}

#[test]
fn level_zero_fails_with_context() {
    let output = rogue_board(&["--seed", "1", "--level", "0"]);
    assert!(!output.status.success());

    let stderr = String::from_utf8(output.stderr).expect("utf-8 output");
    assert!(stderr.contains("failed to generate level 0"));
}
