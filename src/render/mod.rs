//! Render a finished [`Extraction`] as target source text.

pub mod c;
pub mod typescript;

use crate::config::Config;
use crate::extract::Extraction;
use crate::target::Target;

impl Target {
    /// Named references are renamed through the registry here, not during resolution.
    pub fn render(&self, ir: &Extraction, config: &Config) -> String {
        match self {
            Target::C => c::render(ir, config),
            Target::TypeScript => typescript::render(ir, config),
        }
    }
}
