use crate::cli::actions::Action;
use crate::konto;
use anyhow::{Context, Result};
use url::Url;

/// Handle the server action
pub async fn handle(action: Action) -> Result<()> {
    match action {
        Action::Server { port, dsn } => {
            // Reject an unparseable DSN here instead of deep inside the pool.
            Url::parse(&dsn).context("invalid database DSN")?;

            konto::new(port, dsn).await?;
        }
    }

    Ok(())
}
