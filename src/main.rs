//! # photo-organize CLI
//!
//! Command-line interface for the photo organizer.
//!
//! ## Usage
//! ```bash
//! photo-organize
//! photo-organize --source ~/Desktop/dump --destination ~/Photos
//! ```

mod cli;

use photo_organizer::Result;

fn main() -> Result<()> {
    cli::run()
}
