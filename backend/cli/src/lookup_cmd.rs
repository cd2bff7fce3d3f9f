//! Offline lookups: `chat`, `advice` and `labels`.

use anyhow::Result;
use krishimitra_core::{resolve, respond, DiseaseLabel};

use crate::terminal_output::{note_warn, render_table, urgency_badge, Column};

pub fn chat(question: &str) {
    println!("{}", respond(question));
}

pub fn advice(label: &str) -> Result<()> {
    if label.parse::<DiseaseLabel>().is_err() {
        note_warn(&format!("Unknown label '{label}'; showing general advice"));
    }
    println!("{}", serde_json::to_string_pretty(resolve(label))?);
    Ok(())
}

pub fn labels() {
    let columns = [
        Column::right("#"),
        Column::left("Label"),
        Column::left("Urgency"),
    ];
    let rows: Vec<Vec<String>> = DiseaseLabel::ALL
        .iter()
        .map(|label| {
            vec![
                label.index().to_string(),
                label.to_string(),
                urgency_badge(label.advice().urgency()),
            ]
        })
        .collect();
    print!("{}", render_table(&columns, &rows));
}
