//! The `sheetmark init` command.

use std::path::Path;

use anyhow::Result;

pub fn execute() -> Result<()> {
    if Path::new("sheetmark.toml").exists() {
        println!("sheetmark.toml already exists, skipping.");
    } else {
        std::fs::write("sheetmark.toml", SAMPLE_CONFIG)?;
        println!("Created sheetmark.toml");
    }

    std::fs::create_dir_all("sheets")?;
    let example_path = Path::new("sheets/example.toml");
    if example_path.exists() {
        println!("sheets/example.toml already exists, skipping.");
    } else {
        std::fs::write(example_path, EXAMPLE_ANSWERS)?;
        println!("Created sheets/example.toml");
    }

    println!("\nNext steps:");
    println!("  1. Print a blank sheet: sheetmark generate --format html --output sheet.html");
    println!("  2. Check the example:   sheetmark validate --answers sheets/example.toml");
    println!("  3. Score it:            sheetmark score --answers sheets/example.toml");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# sheetmark configuration

# Defaults for `generate` and `interactive`
question_count = 10
option_type = "number"   # number, alpha, kana
option_count = 4
mode = "keyed"           # plain, keyed

# Program that receives the copied report on stdin.
# SHEETMARK_CLIPBOARD overrides this; ${VAR} references are expanded.
# clipboard_command = "wl-copy"
clipboard_timeout_ms = 2000
copied_notice_ms = 1500
"#;

const EXAMPLE_ANSWERS: &str = r#"[sheet]
question_count = 3
option_type = "number"
option_count = 4
mode = "keyed"

[answers]
1 = "2"
2 = "1"

[key]
1 = "2"
2 = "3"
3 = "4"
"#;
