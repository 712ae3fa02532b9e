use std::path::Path;

use colored::Colorize;
use comfy_table::{CellAlignment, ContentArrangement, Table};
use miette::Result;
use tw_core::World;

pub fn run(file: &Path) -> Result<()> {
    let adventure = super::load_adventure(file)?;
    let world = adventure.world();

    println!("  All checks passed for '{}'.", world.metadata.title.bold());
    if !world.metadata.author.is_empty() {
        println!("  by {}", world.metadata.author);
    }
    println!();
    println!("{}", summary(world));
    println!();
    println!("  Start: {}", start_label(world));

    Ok(())
}

fn summary(world: &World) -> Table {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Collection", "Count"]);

    let rows = [
        ("rooms", world.room_count()),
        ("exits", world.exit_count()),
        ("items", world.item_count()),
        ("npcs", world.npc_count()),
        ("puzzles", world.puzzle_count()),
        ("events", world.event_count()),
        ("verbs", world.vocabulary().verbs().count()),
        ("aliases", world.vocabulary().aliases().count()),
    ];
    for (name, count) in rows {
        table.add_row(vec![name.to_string(), count.to_string()]);
    }
    if let Some(column) = table.column_mut(1) {
        column.set_cell_alignment(CellAlignment::Right);
    }
    table
}

fn start_label(world: &World) -> String {
    let key = world.start_room();
    match world.room(key) {
        Some(room) => format!("{} ({key})", room.name),
        None => key.to_string(),
    }
}
