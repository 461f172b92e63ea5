use anyhow::Result;

use weekboard_core::{NoteDate, TaskFormat, Vault};

pub async fn run(vault: Vault, date: NoteDate, text: String, checkbox: bool) -> Result<()> {
    let format = if checkbox {
        TaskFormat::Checkbox
    } else {
        TaskFormat::Plain
    };

    let tasks = vault.append_task(date, text, format).await?;
    println!("Added to {date} ({} tasks)", tasks.len());

    Ok(())
}
