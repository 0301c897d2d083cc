//! 토큰 점검 명령어

use psk_core::Paseto;

/// 토큰을 복호화/검증하고 claim을 출력
pub fn inspect(token: &str, key: Option<&str>) -> anyhow::Result<()> {
    let secret = match key {
        Some(key) => key.to_string(),
        None => std::env::var("PASETO_SECRET_KEY")
            .map_err(|_| anyhow::anyhow!("No key given. Use --key or set PASETO_SECRET_KEY"))?,
    };

    let paseto = Paseto::new(&secret)?;

    match paseto.validator().parse(token) {
        Ok(claims) => {
            println!("{}", serde_json::to_string_pretty(&claims)?);
            Ok(())
        }
        Err(e) => Err(anyhow::anyhow!("{}: {}", e.code(), e)),
    }
}
