use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::de::DeserializeOwned;
use toml::{map::Map, Value};

/// Root of the cargo workspace, falling back to the current directory when
/// cargo is not available (deployed binaries).
pub fn workspace_dir() -> PathBuf {
    let output = std::process::Command::new(env!("CARGO"))
        .arg("locate-project")
        .arg("--workspace")
        .arg("--message-format=plain")
        .output();

    let located = output.ok().and_then(|output| {
        let stdout = String::from_utf8(output.stdout).ok()?;
        let cargo_path = Path::new(stdout.trim());
        cargo_path.parent().map(Path::to_path_buf)
    });

    match located {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => std::env::current_dir().unwrap_or_default(),
    }
}

pub fn load_config<T: DeserializeOwned>(config_name: &str) -> anyhow::Result<T> {
    load_toml(&workspace_dir().join(config_name))
}

pub fn load_env() -> anyhow::Result<Map<String, Value>> {
    load_toml(&workspace_dir().join("Secrets.dev.toml"))
}

pub fn load_toml<T: DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;

    toml::from_str::<T>(&text)
        .with_context(|| format!("failed to parse {}", path.display()))
}

/// String value of a secret, or an error naming the missing key.
pub fn secret<'a>(
    secrets: &'a Map<String, Value>,
    key: &str,
) -> anyhow::Result<&'a str> {
    secrets
        .get(key)
        .and_then(Value::as_str)
        .with_context(|| format!("{} was not found", key))
}

#[cfg(test)]
mod test {
    use std::io::Write;

    use serde::Deserialize;
    use toml::{map::Map, Value};

    use super::{load_toml, secret};

    #[derive(Deserialize)]
    struct Sample {
        name: String,
        #[serde(default)]
        count: u32,
    }

    #[test]
    fn test_load_toml() {
        // Arrange
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "name = \"voyage\"").unwrap();

        // Act
        let sample = load_toml::<Sample>(file.path()).unwrap();

        // Assert
        assert_eq!(sample.name, "voyage");
        assert_eq!(sample.count, 0);
    }

    #[test]
    fn test_load_toml_missing_file() {
        let result =
            load_toml::<Sample>(std::path::Path::new("/no/such/Config.toml"));

        assert!(result.is_err());
    }

    #[test]
    fn test_secret() {
        let mut secrets = Map::new();
        secrets.insert("TOKEN".to_string(), Value::String("abc".to_string()));

        assert_eq!(secret(&secrets, "TOKEN").unwrap(), "abc");
        assert!(secret(&secrets, "ACCOUNT").is_err());
    }
}
