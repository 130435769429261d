//! The print boundary: rendered documents go to plain-text files.

use std::{
  fs,
  io,
  path::{Path, PathBuf},
};

/// A rendered document ready to be written out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Printable {
  pub file_name: String,
  pub text:      String,
}

impl Printable {
  pub fn offer_letter(id: &str, text: String) -> Self {
    Self {
      file_name: format!("offer-letter-{id}.txt"),
      text,
    }
  }

  pub fn slip(id: &str, text: String) -> Self {
    Self {
      file_name: format!("slip-{id}.txt"),
      text,
    }
  }

  /// Write into `dir`, replacing any earlier print of the same document.
  pub fn write_to(&self, dir: &Path) -> io::Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let path = dir.join(&self.file_name);
    fs::write(&path, &self.text)?;
    tracing::info!(path = %path.display(), "document printed");
    Ok(path)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn file_names() {
    assert_eq!(
      Printable::offer_letter("APP-4821", String::new()).file_name,
      "offer-letter-APP-4821.txt"
    );
    assert_eq!(Printable::slip("APP-1001", String::new()).file_name, "slip-APP-1001.txt");
  }

  #[test]
  fn writes_text_into_directory() {
    let dir = std::env::temp_dir().join(format!("admission-print-{}", uuid::Uuid::new_v4()));
    let doc = Printable::slip("APP-1001", "APPLICATION SLIP\n".into());
    let path = doc.write_to(&dir).unwrap();
    assert_eq!(path, dir.join("slip-APP-1001.txt"));
    assert_eq!(fs::read_to_string(&path).unwrap(), "APPLICATION SLIP\n");
    fs::remove_dir_all(dir).ok();
  }
}
