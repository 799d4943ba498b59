//! Assets compiled into the binary.

use include_dir::{include_dir, Dir};

/// The `cursor-template/` tree copied into a project by `init_cursor`.
pub static CURSOR_TEMPLATE: Dir<'_> = include_dir!("$CARGO_MANIFEST_DIR/assets/cursor-template");

/// Packaged default rules document.
pub fn default_rules() -> Option<&'static str> {
    CURSOR_TEMPLATE
        .get_file("rules.md")
        .and_then(|file| file.contents_utf8())
}
