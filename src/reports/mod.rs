use cipherforge::alphabet::Alphabet;
use cipherforge::annealer::sweep::SweepResult;
use cipherforge::error::CfResult;
use cipherforge::model::LanguageModel;
use comfy_table::presets::ASCII_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use std::path::Path;

fn show(c: char) -> String {
    match c {
        ' ' => "␣".to_string(),
        _ => c.escape_default().to_string(),
    }
}

/// Cipher -> plain pairs, ten per row.
pub fn print_key_table(name: &str, mapping: &[(char, char)]) {
    println!("\nKey: {}", name);
    let mut table = Table::new();
    table.load_preset(ASCII_FULL);

    let cols = 10;

    for chunk in mapping.chunks(cols) {
        let cipher: Vec<Cell> = chunk
            .iter()
            .map(|&(c, _)| Cell::new(show(c)).set_alignment(CellAlignment::Center))
            .collect();
        let plain: Vec<Cell> = chunk
            .iter()
            .map(|&(_, p)| {
                Cell::new(show(p))
                    .set_alignment(CellAlignment::Center)
                    .fg(Color::Green)
            })
            .collect();
        table.add_row(cipher);
        table.add_row(plain);
    }
    println!("{}", table);
}

pub fn print_bigram_report(model: &LanguageModel, limit: usize) {
    let alphabet: &Alphabet = model.alphabet();
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.add_row(vec![
        Cell::new("Bigram").add_attribute(Attribute::Bold),
        Cell::new("Count"),
        Cell::new("P(cur|prev)").fg(Color::Cyan),
    ]);
    for i in 1..=2 {
        if let Some(col) = table.column_mut(i) {
            col.set_cell_alignment(CellAlignment::Right);
        }
    }

    for (prev, cur, count) in model.most_common_bigrams(limit) {
        table.add_row(vec![
            Cell::new(format!(
                "{}{}",
                show(alphabet.symbol(prev)),
                show(alphabet.symbol(cur))
            ))
            .add_attribute(Attribute::Bold),
            Cell::new(count),
            Cell::new(format!("{:.4}", model.bigram_probability(cur, prev))).fg(Color::Cyan),
        ]);
    }
    println!(
        "\nCorpus: {} symbols over |Σ| = {}",
        model.total_unigrams(),
        alphabet.len()
    );
    println!("{}", table);
}

pub fn print_sweep_report(results: &[SweepResult]) {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.add_row(vec![
        Cell::new("T0").add_attribute(Attribute::Bold),
        Cell::new("Rate"),
        Cell::new("Threshold"),
        Cell::new("Steps"),
        Cell::new("Acc"),
        Cell::new("Energy").fg(Color::Cyan),
        Cell::new("Plaintext"),
    ]);
    for i in 0..=5 {
        if let Some(col) = table.column_mut(i) {
            col.set_cell_alignment(CellAlignment::Right);
        }
    }

    for r in results {
        let preview: String = r.plaintext.chars().take(40).map(show).collect();
        table.add_row(vec![
            Cell::new(r.initial_temperature).add_attribute(Attribute::Bold),
            Cell::new(r.cooling_rate),
            Cell::new(format!("{:e}", r.threshold)),
            Cell::new(r.steps),
            Cell::new(r.accepted),
            Cell::new(format!("{:.2}", r.energy)).fg(Color::Cyan),
            Cell::new(preview),
        ]);
    }
    println!("\n{}", table);
}

pub fn write_sweep_csv<P: AsRef<Path>>(path: P, results: &[SweepResult]) -> CfResult<()> {
    let mut wtr = csv::Writer::from_path(path)?;
    for r in results {
        wtr.serialize(r)?;
    }
    wtr.flush()?;
    Ok(())
}
