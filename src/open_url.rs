use anyhow::{bail, Context, Result};
use std::process::Command;
use url::Url;

/// Open a story link with `open_command` if configured, else the system default.
/// Only http(s) links are opened; story urls come from other users.
pub fn open_url(url: &str, open_command: Option<&str>) -> Result<()> {
    let parsed = Url::parse(url).with_context(|| format!("not a valid link: {}", url))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        bail!("refusing to open {} link", parsed.scheme());
    }
    match open_command {
        Some(cmd) => {
            Command::new(cmd)
                .arg(parsed.as_str())
                .spawn()
                .with_context(|| format!("failed to run {}", cmd))?;
        }
        None => open::that(parsed.as_str()).context("failed to open browser")?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::open_url;

    #[test]
    fn rejects_non_http_links() {
        assert!(open_url("file:///etc/passwd", None).is_err());
        assert!(open_url("javascript:alert(1)", None).is_err());
        assert!(open_url("nonsense", None).is_err());
    }
}
