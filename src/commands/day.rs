use anyhow::Result;

use weekboard_core::{NoteDate, Vault};

use crate::render::Render;

pub async fn run(vault: Vault, date: NoteDate) -> Result<()> {
    let note = vault.read(date).await?;
    println!("{}", note.render());
    Ok(())
}
