//! Helper functions shared by the SEO generator and the static outputs

mod html;
mod url;

pub use html::*;
pub use url::*;
