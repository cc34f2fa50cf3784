use std::path::Path;

use tokio::io::AsyncWriteExt;

use crate::error::Error;

pub(crate) const TOKEN_FILE_MODE: u32 = 0o644;

/// Replace the contents of `path` with the raw token, leaving it readable by the runner.
#[tracing::instrument(skip_all, fields(path = %path.display()))]
pub(crate) async fn write_token(path: &Path, token: &str) -> Result<(), Error> {
    let write_error = |source: std::io::Error| Error::WriteToken {
        path: path.to_path_buf(),
        source,
    };

    {
        let mut options = tokio::fs::OpenOptions::new();
        options.create(true).write(true).truncate(true);
        #[cfg(unix)]
        options.mode(TOKEN_FILE_MODE);

        let mut fh = options.open(path).await.map_err(write_error)?;
        fh.write_all(token.as_bytes()).await.map_err(write_error)?;
        fh.flush().await.map_err(write_error)?;
    }

    // The create mode is masked by the umask and ignored for existing files.
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;

        tokio::fs::set_permissions(path, std::fs::Permissions::from_mode(TOKEN_FILE_MODE))
            .await
            .map_err(write_error)?;
    }

    tracing::debug!(bytes = token.len(), "Wrote runner token");
    Ok(())
}
