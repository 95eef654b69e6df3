use crate::model::Roster;
use anyhow::{bail, Context};
use std::collections::BTreeSet;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Persistance de la liste des personnes (jamais des plannings générés).
pub trait Storage {
    fn load(&self) -> anyhow::Result<Roster>;
    /// Sauvegarde atomique.
    fn save(&self, roster: &Roster) -> anyhow::Result<()>;
}

pub struct JsonStorage {
    path: PathBuf,
}

impl JsonStorage {
    pub fn open<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Roster vide si le fichier n'existe pas encore ; erreur s'il est illisible.
    pub fn load_or_default(&self) -> anyhow::Result<Roster> {
        if !self.path.exists() {
            tracing::debug!(path = %self.path.display(), "no roster file, starting empty");
            return Ok(Roster::default());
        }
        self.load()
    }
}

/// Les personnes sont désignées par leur nom (CLI, rapports) : noms uniques,
/// ancienneté >= 1.
pub fn check_roster(roster: &Roster) -> anyhow::Result<()> {
    let mut names = BTreeSet::new();
    for p in &roster.people {
        if p.name.trim().is_empty() {
            bail!("person with an empty name");
        }
        if p.seniority == 0 {
            bail!("seniority of {} must be at least 1", p.name);
        }
        if !names.insert(p.name.as_str()) {
            bail!("duplicate person name: {}", p.name);
        }
    }
    Ok(())
}

impl Storage for JsonStorage {
    fn load(&self) -> anyhow::Result<Roster> {
        let data =
            fs::read(&self.path).with_context(|| format!("reading {}", self.path.display()))?;
        let roster: Roster = serde_json::from_slice(&data)
            .with_context(|| format!("parsing roster {}", self.path.display()))?;
        check_roster(&roster).with_context(|| format!("invalid roster {}", self.path.display()))?;
        tracing::debug!(path = %self.path.display(), people = roster.people.len(), "roster loaded");
        Ok(roster)
    }

    /// Refuse d'écrire une liste invalide ; le fichier existant reste intact.
    fn save(&self, roster: &Roster) -> anyhow::Result<()> {
        check_roster(roster)?;
        let json = serde_json::to_vec_pretty(roster)?;
        let dir = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        let mut tmp = NamedTempFile::new_in(dir).context("creating temp file")?;
        tmp.write_all(&json)?;
        tmp.flush()?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).context("atomic rename")?;
        Ok(())
    }
}
