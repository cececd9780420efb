//! `lizlint init`: writes a starter configuration.

use std::fs::OpenOptions;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use miette::{IntoDiagnostic, Result};
use tracing::info;

use lizlint_core::LizlintConfig;

const DEFAULT_CONFIG: &str = r#"{
  "$schema": "https://raw.githubusercontent.com/simorgh3196/lizlint/main/schemas/v1/config.json",
  // Limits are inclusive; a function is reported only above them. 0 disables a check.
  "ccn": 10,
  "length": 60,
  "arguments": 5,
  // Count a switch statement as a single branch.
  "modified": false,
  // "whitelist": "whitelizard.txt",
  "extensions": [],
  "executable": "lizard"
}
"#;

/// Writes the default configuration to `target`, or to `.lizlint.jsonc` in
/// the current directory.
pub fn run_init(target: Option<&Path>, force: bool) -> Result<()> {
    let config_path = target
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(LizlintConfig::CONFIG_FILES[0]));

    loop {
        let mut options = OpenOptions::new();
        options.write(true).create_new(true);

        // Never write through a symlink planted at the config path.
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.custom_flags(libc::O_NOFOLLOW);
        }

        match options.open(&config_path) {
            Ok(mut file) => {
                file.write_all(DEFAULT_CONFIG.as_bytes()).into_diagnostic()?;
                info!("Created {}", config_path.display());
                return Ok(());
            }
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                if !force {
                    return Err(miette::miette!(
                        "{} already exists. Use --force to overwrite.",
                        config_path.display()
                    ));
                }

                match std::fs::remove_file(&config_path) {
                    Ok(()) => {}
                    Err(e) if e.kind() == ErrorKind::NotFound => {}
                    Err(e) => return Err(e).into_diagnostic(),
                }
            }
            Err(e) => return Err(e).into_diagnostic(),
        }
    }
}
