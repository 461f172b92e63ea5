use anyhow::{Context, Result};

use weekboard_core::{NoteDate, Vault};

use crate::render::Render;

pub async fn run(vault: Vault, date: NoteDate, index: usize) -> Result<()> {
    let mut tasks = vault.read(date).await?.tasks;

    let task = tasks
        .get_mut(index)
        .with_context(|| format!("No task at index {index} on {date}"))?;
    task.toggle();
    let rendered = task.render();

    vault.write(date, &tasks).await?;
    println!("{rendered}");

    Ok(())
}
