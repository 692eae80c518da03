use ramsight_games::GameTable;

pub(crate) fn run() {
    let table = GameTable::builtin();
    println!("  {:<16} {:<20} Modes", "Id", "Name");
    println!("  {}", "-".repeat(50));
    for entry in table.entries() {
        let modes = entry
            .modes()
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        println!("  {:<16} {:<20} {modes}", entry.id, entry.name);
    }
}
