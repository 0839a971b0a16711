//! HomePlanet Volumes Library
//!
//! Assembles per-volume PDF booklets from a folder of source PDFs:
//! - Extract a volume's cover from the shared covers pack
//! - Concatenate the volume's body PDFs
//! - Prepend the cover to the body
//! - Stamp a footer on every page after the cover
//!
//! # Example
//!
//! ```no_run
//! use homeplanet_volumes::assemble::Assembler;
//! use homeplanet_volumes::manifest::VolumeManifest;
//!
//! let manifest = VolumeManifest::builtin().expect("built-in manifest");
//! let assembler = Assembler::new(".");
//!
//! assembler
//!     .run(&manifest, |volume| println!("Volume {} done", volume.number))
//!     .expect("Failed to assemble volumes");
//! ```

pub mod error;
pub mod pdf;
pub mod manifest;
pub mod validate;
pub mod assemble;

// Re-export commonly used items
pub use error::{Error, Result};
pub use assemble::{AssembledVolume, Assembler};
pub use manifest::{VolumeJob, VolumeManifest};
