//! 키 생성 명령어

use std::io::Write;
use std::path::Path;

use rand::RngCore;

/// 32바이트 랜덤 키를 생성해 hex로 출력
///
/// `env_file`이 주어지면 `PASETO_SECRET_KEY`를 해당 파일에 추가합니다.
/// 이미 존재하면 변경하지 않습니다.
pub fn generate(env_file: Option<&Path>) -> anyhow::Result<()> {
    let mut raw = [0u8; 32];
    rand::thread_rng().fill_bytes(&mut raw);

    let hex: String = raw.iter().map(|b| format!("{b:02x}")).collect();

    println!("Paseto key generated successfully:");
    println!("{hex}");

    if let Some(path) = env_file {
        append_key_to_env(path, &hex)?;
    }

    Ok(())
}

fn append_key_to_env(path: &Path, key: &str) -> anyhow::Result<()> {
    if !path.exists() {
        anyhow::bail!("env file not found: {}", path.display());
    }

    let content = std::fs::read_to_string(path)?;
    if content.contains("PASETO_SECRET_KEY") {
        println!(
            "PASETO_SECRET_KEY already exists in {}. No changes were made.",
            path.display()
        );
        return Ok(());
    }

    let mut file = std::fs::OpenOptions::new().append(true).open(path)?;
    writeln!(file)?;
    writeln!(file, "PASETO_SECRET_KEY=\"{key}\"")?;

    println!("The key has been added to {}.", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_env_file(name: &str, content: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!("psk_test_{}_{}", std::process::id(), name));
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_append_key_to_env() {
        let path = temp_env_file("append", "APP_NAME=test\n");

        append_key_to_env(&path, "deadbeef").unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("PASETO_SECRET_KEY=\"deadbeef\""));

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_existing_key_not_overwritten() {
        let path = temp_env_file("existing", "PASETO_SECRET_KEY=\"old\"\n");

        append_key_to_env(&path, "deadbeef").unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("\"old\""));
        assert!(!content.contains("deadbeef"));

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_missing_env_file_is_an_error() {
        let path = std::env::temp_dir().join("psk_test_does_not_exist.env");
        assert!(append_key_to_env(&path, "deadbeef").is_err());
    }
}
