use anyhow::Result;

use weekboard_core::{NoteDate, Vault};

use crate::render::Render;

pub async fn run(vault: Vault, reference: NoteDate, json: bool) -> Result<()> {
    let week = vault.read_week(reference).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&week)?);
    } else {
        println!("{}", week.render());
    }

    Ok(())
}
