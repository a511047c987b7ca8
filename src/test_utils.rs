use std::io::Write;
use tempfile::NamedTempFile;

/// Animals cycled through by [`animal_line`], indexed by `line % len`.
pub const ANIMALS: [&str; 12] = [
    "cat", "dog", "tiger", "horse", "rabbit", "owl", "fox", "panda", "wolf", "eagle", "otter",
    "bison",
];

/// Line `i` of the animal fixture, newline included.
pub fn animal_line(i: usize) -> String {
    format!(
        "Line {} this line contains a random animal: {}\n",
        i,
        ANIMALS[i % ANIMALS.len()]
    )
}

/// Temp log holding lines `1..=lines` of the animal fixture.
pub fn write_animal_log(lines: usize) -> std::io::Result<NamedTempFile> {
    let content: String = (1..=lines).map(animal_line).collect();
    write_log(content.as_bytes())
}

pub fn write_log(content: &[u8]) -> std::io::Result<NamedTempFile> {
    let mut file = NamedTempFile::new()?;
    file.write_all(content)?;
    file.flush()?;
    Ok(file)
}
