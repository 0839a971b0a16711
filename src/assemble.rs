//! Volume assembly: cover, body, merge, footer
//!
//! Volumes are built one after another. For each volume:
//!
//! 1. its cover is extracted from the covers pack (`Cover_Volume_<N>.pdf`)
//! 2. its inputs are concatenated (`Body_Volume_<N>.pdf`)
//! 3. the cover is prepended to the body (`Merged_Volume_<N>.pdf`)
//! 4. the footer is stamped on every page after the cover (final output)
//!
//! The intermediates are ordinary files in the output directory and are kept
//! unless [`Assembler::keep_intermediates`] is turned off.

use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use crate::error::Result;
use crate::manifest::{VolumeJob, VolumeManifest};
use crate::pdf::{
    concat_pdfs, count_pages, extract_cover, prepend_cover, stamp_footer, ConcatOptions, FooterOptions,
};
use crate::validate::require_inputs;

/// A finished volume
#[derive(Debug, Clone, PartialEq)]
pub struct AssembledVolume {
    pub number: u32,
    /// Path of the final, stamped PDF
    pub output: PathBuf,
    /// Pages in the final PDF, cover included
    pub page_count: usize,
}

/// Builds volumes from a root folder of source PDFs into an output folder
#[derive(Debug, Clone)]
pub struct Assembler {
    root: PathBuf,
    out_dir: PathBuf,
    keep_intermediates: bool,
}

impl Assembler {
    /// Read sources from `root` and write to `root/out`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let out_dir = root.join("out");
        Self {
            root,
            out_dir,
            keep_intermediates: true,
        }
    }

    /// Write outputs somewhere other than `root/out`
    pub fn with_out_dir(mut self, out_dir: impl Into<PathBuf>) -> Self {
        self.out_dir = out_dir.into();
        self
    }

    /// Whether Cover/Body/Merged files stay on disk after a volume is done
    pub fn keep_intermediates(mut self, keep: bool) -> Self {
        self.keep_intermediates = keep;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }

    /// Confirm every file the manifest needs is present
    pub fn validate(&self, manifest: &VolumeManifest) -> Result<()> {
        require_inputs(&self.root, &manifest.required_inputs())?;
        Ok(())
    }

    /// Validate, then build every volume in manifest order
    ///
    /// `on_volume` is called as each volume finishes. The first failure
    /// aborts the run; volumes already written stay on disk.
    pub fn run<F>(&self, manifest: &VolumeManifest, on_volume: F) -> Result<Vec<AssembledVolume>>
    where
        F: FnMut(&AssembledVolume),
    {
        self.validate(manifest)?;
        self.assemble_all(manifest, on_volume)
    }

    /// Build every volume without re-checking inputs
    pub fn assemble_all<F>(&self, manifest: &VolumeManifest, mut on_volume: F) -> Result<Vec<AssembledVolume>>
    where
        F: FnMut(&AssembledVolume),
    {
        std::fs::create_dir_all(&self.out_dir)?;

        let mut assembled = Vec::with_capacity(manifest.volumes.len());
        for job in &manifest.volumes {
            let volume = self.assemble_volume(manifest, job)?;
            on_volume(&volume);
            assembled.push(volume);
        }

        info!(volumes = assembled.len(), out_dir = %self.out_dir.display(), "assembly complete");
        Ok(assembled)
    }

    /// Build one volume: cover, body, merged, stamped
    pub fn assemble_volume(&self, manifest: &VolumeManifest, job: &VolumeJob) -> Result<AssembledVolume> {
        let cover = self.out_dir.join(job.cover_file_name());
        let body = self.out_dir.join(job.body_file_name());
        let merged = self.out_dir.join(job.merged_file_name());
        let output = self.out_dir.join(&job.output);

        info!(volume = job.number, resident = job.resident, "assembling volume");

        extract_cover(&self.root.join(&manifest.covers_pack), job.number, &cover)?;

        let body_pages = concat_pdfs(&ConcatOptions {
            input_paths: job.inputs.iter().map(|input| self.root.join(input)).collect(),
            output_path: body.clone(),
        })?;
        debug!(volume = job.number, pages = body_pages, "concatenated body");

        let merged_pages = prepend_cover(&cover, &body, &merged)?;
        debug!(volume = job.number, pages = merged_pages, "prepended cover");
        stamp_footer(&merged, &output, &FooterOptions::for_volume(job.resident))?;

        // Report what was actually written
        let page_count = count_pages(&output)?;

        if !self.keep_intermediates {
            for path in [&cover, &body, &merged] {
                if let Err(e) = std::fs::remove_file(path) {
                    warn!(path = %path.display(), error = %e, "could not remove intermediate");
                }
            }
        }

        Ok(AssembledVolume {
            number: job.number,
            output,
            page_count,
        })
    }
}
