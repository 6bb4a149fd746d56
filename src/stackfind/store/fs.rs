use super::memory::MemoryStack;
use crate::error::{FindError, Result};
use crate::model::Stack;
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

/// A stack document on disk.
///
/// Files ending in `.gz` hold gzip-compressed JSON, anything else plain JSON.
pub struct StackFile {
    path: PathBuf,
}

impl StackFile {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn is_compressed(&self) -> bool {
        self.path
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case("gz"))
            .unwrap_or(false)
    }

    pub fn read(&self) -> Result<Stack> {
        if !self.path.exists() {
            return Err(FindError::Store(format!(
                "Stack file not found: {}",
                self.path.display()
            )));
        }

        let file = File::open(&self.path).map_err(FindError::Io)?;
        let stack: Stack = if self.is_compressed() {
            serde_json::from_reader(BufReader::new(GzDecoder::new(file)))
                .map_err(FindError::Serialization)?
        } else {
            serde_json::from_reader(BufReader::new(file)).map_err(FindError::Serialization)?
        };
        tracing::debug!(
            path = %self.path.display(),
            cards = stack.cards.len(),
            widgets = stack.widgets.len(),
            "stack loaded"
        );
        Ok(stack)
    }

    /// Reads the file and builds an indexed in-memory stack from it.
    pub fn load(&self) -> Result<MemoryStack> {
        let stack = self.read()?;
        check_references(&stack)?;
        Ok(MemoryStack::from_stack(stack))
    }

    pub fn save(&self, stack: &Stack) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(FindError::Io)?;
            }
        }

        let file = File::create(&self.path).map_err(FindError::Io)?;
        if self.is_compressed() {
            let mut encoder = GzEncoder::new(BufWriter::new(file), Compression::default());
            serde_json::to_writer(&mut encoder, stack).map_err(FindError::Serialization)?;
            encoder.finish().map_err(FindError::Io)?.flush()?;
        } else {
            let mut writer = BufWriter::new(file);
            serde_json::to_writer_pretty(&mut writer, stack).map_err(FindError::Serialization)?;
            writer.flush()?;
        }
        Ok(())
    }
}

/// Rejects stacks whose cards or widgets point at owners that do not exist.
fn check_references(stack: &Stack) -> Result<()> {
    use crate::model::Owner;
    use std::collections::HashSet;

    let backgrounds: HashSet<_> = stack.backgrounds.iter().map(|b| b.id).collect();
    let cards: HashSet<_> = stack.cards.iter().map(|c| c.id).collect();

    if cards.len() != stack.cards.len() {
        return Err(FindError::Store("Duplicate card ids in stack".to_string()));
    }

    for card in &stack.cards {
        if !backgrounds.contains(&card.background) {
            return Err(FindError::Store(format!(
                "Card {} references unknown background {}",
                card.id, card.background
            )));
        }
    }

    for widget in &stack.widgets {
        let ok = match widget.owner {
            Owner::Card(id) => cards.contains(&id),
            Owner::Background(id) => backgrounds.contains(&id),
        };
        if !ok {
            return Err(FindError::Store(format!(
                "Widget {} has no owner in this stack",
                widget.id
            )));
        }
    }
    Ok(())
}
