use log::{debug, trace};
use serde_json::Value;
use std::{
    collections::BTreeMap,
    fs, io,
    path::Path,
};

use crate::{
    error::ManifestError,
    types::{DeclaredDependency, DependencyTier, PackageName},
};

/// The parts of `package.json` the analysis reads.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Manifest {
    pub name: Option<String>,
    pub version: Option<String>,
    tiers: BTreeMap<DependencyTier, BTreeMap<PackageName, String>>,
}

impl Manifest {
    pub fn read(path: &Path) -> Result<Self, ManifestError> {
        debug!("Reading manifest: {}", path.display());
        let content = fs::read_to_string(path).map_err(|source| {
            if source.kind() == io::ErrorKind::NotFound {
                ManifestError::NotFound(path.to_path_buf())
            } else {
                ManifestError::Read { path: path.to_path_buf(), source }
            }
        })?;
        Self::parse(&content)
            .map_err(|source| ManifestError::Parse { path: path.to_path_buf(), source })
    }

    pub fn parse(content: &str) -> Result<Self, serde_json::Error> {
        let value: Value = serde_json::from_str(content)?;
        Ok(Self::from_value(&value))
    }

    /// Absent or non-object tiers read as empty.
    pub fn from_value(value: &Value) -> Self {
        let text = |key: &str| value.get(key).and_then(Value::as_str).map(str::to_string);

        let mut tiers = BTreeMap::new();
        for tier in DependencyTier::ALL {
            let entries: BTreeMap<PackageName, String> = match value.get(tier.key()) {
                Some(Value::Object(map)) => map
                    .iter()
                    .map(|(name, range)| {
                        let range =
                            range.as_str().map_or_else(|| range.to_string(), str::to_string);
                        (name.clone(), range)
                    })
                    .collect(),
                Some(other) => {
                    debug!("Treating non-object {} ({}) as empty", tier, other);
                    BTreeMap::new()
                }
                None => BTreeMap::new(),
            };
            trace!("{} declares {} packages", tier, entries.len());
            tiers.insert(tier, entries);
        }

        Self { name: text("name"), version: text("version"), tiers }
    }

    /// Package names declared in `tier`, sorted.
    pub fn tier(&self, tier: DependencyTier) -> impl Iterator<Item = &str> {
        self.tiers.get(&tier).into_iter().flat_map(|deps| deps.keys().map(String::as_str))
    }

    pub fn declared_dependencies(&self) -> Vec<DeclaredDependency> {
        DependencyTier::ALL
            .into_iter()
            .flat_map(|tier| self.tier(tier).map(move |name| DeclaredDependency::new(name, tier)))
            .collect()
    }
}
