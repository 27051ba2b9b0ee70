//! # image-scan CLI
//!
//! Command-line interface for the image scanner.
//!
//! ## Usage
//! ```bash
//! image-scan inspect photo.jpg
//! image-scan inspect ~/Pictures --output json
//! ```

mod cli;

use image_scanner::Result;

fn main() -> Result<()> {
    cli::run()
}
