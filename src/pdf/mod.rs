//! PDF manipulation module

pub mod pages;
pub mod metadata;
pub mod metrics;
pub mod cover;
pub mod concat;
pub mod footer;

// Re-export commonly used items
pub use pages::{build_document, load_document, save_document, PageSource};
pub use metadata::{count_pages, media_box, PageBox};
pub use cover::{cover_index, extract_cover, prepend_cover};
pub use concat::{concat_pdfs, ConcatOptions};
pub use footer::{stamp_document, stamp_footer, FooterLine, FooterOptions};
