use std::fs;
use std::io;
use std::path::Path;

/// Class names in model output order, one per output unit.
///
/// The file format is one class per line, `<index> <name>`, as shipped
/// with the common ImageNet label dumps. Everything after the first
/// space belongs to the name, which may itself contain spaces and
/// commas ("285 Egyptian cat").
#[derive(Debug, Clone)]
pub struct LabelTable {
    names: Vec<String>,
}

impl LabelTable {
    pub fn load(path: &Path) -> io::Result<Self> {
        let text = fs::read_to_string(path)?;
        Ok(Self::parse(&text))
    }

    pub fn parse(text: &str) -> Self {
        let names = text
            .lines()
            .map(|line| line.trim_end())
            .filter(|line| !line.is_empty())
            .map(display_name)
            .collect();
        Self { names }
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.names.get(index).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

fn display_name(line: &str) -> String {
    match line.split_once(' ') {
        Some((_, name)) => name.to_string(),
        None => line.to_string(),
    }
}
