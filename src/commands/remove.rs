use anyhow::Result;

use weekboard_core::{NoteDate, Vault};

pub async fn run(vault: Vault, date: NoteDate, index: usize) -> Result<()> {
    let tasks = vault.remove_task(date, index).await?;
    println!("Removed task {index} from {date} ({} left)", tasks.len());

    Ok(())
}
