//! The volume job table
//!
//! Which volumes to build is data, not code: a TOML manifest naming the
//! covers pack and, per volume, its number, resident flag, output name and
//! ordered body inputs. The default manifest is compiled into the binary.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use serde::Deserialize;
use tracing::debug;
use crate::error::{Error, Result};

const BUILTIN_MANIFEST: &str = include_str!("../assets/volumes.toml");

/// Every volume to assemble, plus the shared covers pack
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VolumeManifest {
    /// Multi-page PDF whose page N-1 is volume N's cover
    pub covers_pack: PathBuf,
    /// Volumes in the order they are built
    #[serde(rename = "volume")]
    pub volumes: Vec<VolumeJob>,
}

/// One volume: where its cover and body come from and where it goes
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VolumeJob {
    /// 1-based volume number, also the cover's page position in the pack
    pub number: u32,
    /// Resident volumes carry the second footer line
    #[serde(default)]
    pub resident: bool,
    /// Final file name, written to the output directory
    pub output: String,
    /// Body PDFs, concatenated in this order
    pub inputs: Vec<PathBuf>,
}

impl VolumeJob {
    pub fn cover_file_name(&self) -> String {
        format!("Cover_Volume_{}.pdf", self.number)
    }

    pub fn body_file_name(&self) -> String {
        format!("Body_Volume_{}.pdf", self.number)
    }

    pub fn merged_file_name(&self) -> String {
        format!("Merged_Volume_{}.pdf", self.number)
    }

    fn intermediate_file_names(&self) -> [String; 3] {
        [self.cover_file_name(), self.body_file_name(), self.merged_file_name()]
    }
}

impl VolumeManifest {
    /// The manifest shipped with the binary
    pub fn builtin() -> Result<Self> {
        Self::from_toml_str(BUILTIN_MANIFEST)
    }

    /// Parse and validate a manifest from TOML text
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let manifest: Self =
            toml::from_str(text).map_err(|e| Error::InvalidManifest(e.to_string()))?;
        manifest.validate()?;
        Ok(manifest)
    }

    /// Load and validate a manifest file
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::MissingInput(path.to_path_buf()));
        }

        let text = std::fs::read_to_string(path)?;
        let manifest = Self::from_toml_str(&text)?;
        debug!(path = %path.display(), volumes = manifest.volumes.len(), "loaded manifest");
        Ok(manifest)
    }

    /// Check the job table is internally consistent
    ///
    /// Volume numbers must be positive and unique (they name the
    /// intermediate files), every volume needs a body, and output names must
    /// be plain, unique file names that cannot be overwritten by another
    /// volume's intermediates.
    pub fn validate(&self) -> Result<()> {
        if self.volumes.is_empty() {
            return Err(Error::InvalidManifest("no volumes listed".to_string()));
        }

        let mut numbers = HashSet::new();
        let mut outputs = HashSet::new();
        let intermediates: HashSet<String> = self
            .volumes
            .iter()
            .flat_map(VolumeJob::intermediate_file_names)
            .collect();

        for job in &self.volumes {
            if job.number == 0 {
                return Err(Error::InvalidManifest(
                    "volume numbers start at 1".to_string(),
                ));
            }
            if !numbers.insert(job.number) {
                return Err(Error::InvalidManifest(format!(
                    "volume {} is listed twice",
                    job.number
                )));
            }
            if job.inputs.is_empty() {
                return Err(Error::InvalidManifest(format!(
                    "volume {} has no inputs",
                    job.number
                )));
            }
            if Path::new(&job.output).file_name().and_then(|name| name.to_str())
                != Some(job.output.as_str())
            {
                return Err(Error::InvalidManifest(format!(
                    "volume {} output must be a plain file name: {}",
                    job.number, job.output
                )));
            }
            if intermediates.contains(&job.output) {
                return Err(Error::InvalidManifest(format!(
                    "volume {} output collides with an intermediate file: {}",
                    job.number, job.output
                )));
            }
            if !outputs.insert(job.output.as_str()) {
                return Err(Error::InvalidManifest(format!(
                    "output {} is used by more than one volume",
                    job.output
                )));
            }
        }

        Ok(())
    }

    /// Every file a run reads, covers pack first, without duplicates
    pub fn required_inputs(&self) -> Vec<&Path> {
        let mut seen = HashSet::new();
        std::iter::once(self.covers_pack.as_path())
            .chain(self.volumes.iter().flat_map(|job| job.inputs.iter().map(PathBuf::as_path)))
            .filter(|path| seen.insert(*path))
            .collect()
    }
}
