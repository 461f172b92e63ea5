use std::sync::Arc;

use anyhow::{Context, Result};

use weekboard_core::{BoardConfig, ChangeNotifier, NoteDate, SyncSession, Vault, VaultWatcher};

use crate::render::Render;

/// Live board: watch the vault and re-render whenever a note changes.
pub async fn run(vault: Vault, reference: NoteDate, config: &BoardConfig) -> Result<()> {
    tokio::fs::create_dir_all(vault.root())
        .await
        .with_context(|| format!("Failed to create vault directory {}", vault.root().display()))?;

    let notifier = Arc::new(ChangeNotifier::new());
    let (_id, mut rx) = notifier.subscribe();

    let _watcher = VaultWatcher::spawn(vault.clone(), notifier, config.quiet_period())
        .context("Failed to watch vault directory")?;

    let mut session = SyncSession::open(vault, reference)
        .await?
        .with_suppress_window(config.suppress_window());

    redraw(&session);

    loop {
        tokio::select! {
            event = rx.recv() => {
                match event {
                    Some(event) => {
                        if session.apply_event(&event) {
                            redraw(&session);
                        }
                    }
                    // Watcher gone; re-read once so the board is not stale.
                    None => {
                        session.refresh().await?;
                        redraw(&session);
                        break;
                    }
                }
            }
            _ = tokio::signal::ctrl_c() => break,
        }
    }

    Ok(())
}

fn redraw(session: &SyncSession) {
    // Clear screen and move the cursor home
    print!("\x1B[2J\x1B[H");
    println!("{}", session.week().render());
    println!("\nWatching for changes. Press Ctrl-C to quit.");
}
