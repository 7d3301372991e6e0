//! Resource directory and font file discovery.
//!
//! The resource directory normally sits next to the executable:
//!
//! - `<exe dir>/resources` for installed binaries
//! - `<bundle>/Contents/Resources` for macOS app bundles
//! - `<exe dir>/../resources` for IDE build layouts
//!
//! Fonts are looked up by family name in the platform font directories, e.g.
//! `"Roboto"` matches `Roboto.ttf` first and `Roboto-Regular.ttf` otherwise.
//!
//! # Example
//!
//! ```ignore
//! use tickloop::services::resources::{find_font_path, find_resource_path};
//!
//! let argv0 = std::env::args().next().unwrap_or_default();
//! let resources = find_resource_path(&argv0);
//! let cjk = find_font_path("NotoSansCJK");
//! ```

use camino::{Utf8Path, Utf8PathBuf};
use regex::Regex;
use std::fs;

const FONT_EXTENSIONS: [&str; 3] = ["ttf", "ttc", "otf"];

/// Find the resource directory for an executable invoked as `argv0`
///
/// Relative invocations are resolved against the current working directory.
/// The returned path is not guaranteed to exist; the run loop checks it before
/// starting.
pub fn find_resource_path(argv0: &str) -> Utf8PathBuf {
    let argv0 = argv0.replace('\\', "/");

    // Chop off the process name
    let exe_dir = match argv0.rfind('/') {
        Some(idx) => &argv0[..idx],
        None => "",
    };

    let is_absolute = argv0.starts_with('/')
        || (argv0.len() > 3 && argv0.as_bytes()[1] == b':' && argv0.as_bytes()[2] == b'/');

    let path = if is_absolute {
        Utf8PathBuf::from(exe_dir)
    } else {
        let cwd = current_dir();

        // Launched from inside a bundle's resource directory
        if cfg!(target_os = "macos") && cwd.as_str().ends_with("/Contents/Resources") {
            return cwd;
        }

        if exe_dir.is_empty() {
            cwd
        } else {
            cwd.join(exe_dir)
        }
    };

    if cfg!(target_os = "macos") && path.file_name() == Some("MacOS") {
        if let Some(contents) = path.parent() {
            return contents.join("Resources");
        }
    }

    let resource_path = path.join("resources");
    if resource_path.is_dir() {
        resource_path
    } else {
        path.join("..").join("resources")
    }
}

/// Find a font file by path or by family name
///
/// Returns `font` itself when it names an existing file, otherwise searches
/// [`system_font_dirs`].
pub fn find_font_path(font: &str) -> Option<Utf8PathBuf> {
    let as_path = Utf8Path::new(font);
    if as_path.is_file() {
        return Some(as_path.to_path_buf());
    }

    find_font_in_dirs(font, &system_font_dirs())
}

/// Search `dirs` recursively for the font family `font`
///
/// Within each directory an exact stem match (`Roboto.ttf`) wins over a style
/// variant (`Roboto-Regular.ttf`, `RobotoMedium.otf`, ...). Directories are
/// searched in order.
pub fn find_font_in_dirs(font: &str, dirs: &[Utf8PathBuf]) -> Option<Utf8PathBuf> {
    if font.is_empty() {
        return None;
    }

    let variant = Regex::new(&format!(
        r"^{}-?(Regular|Normal|Medium|Narrow)\.(ttf|ttc|otf)$",
        regex::escape(font)
    ))
    .ok()?;

    for dir in dirs {
        let mut candidates = Vec::new();
        collect_font_files(dir, font, &mut candidates);
        candidates.sort();

        if let Some(exact) = candidates.iter().find(|p| p.file_stem() == Some(font)) {
            return Some(exact.clone());
        }

        if let Some(styled) = candidates
            .iter()
            .find(|p| p.file_name().is_some_and(|name| variant.is_match(name)))
        {
            return Some(styled.clone());
        }
    }

    tracing::debug!("Font '{}' not found in {} directories", font, dirs.len());
    None
}

/// Platform font directories, most specific last
pub fn system_font_dirs() -> Vec<Utf8PathBuf> {
    let home = std::env::var("HOME").unwrap_or_default();

    if cfg!(target_os = "macos") {
        vec![
            Utf8PathBuf::from("/System/Library/Fonts"),
            Utf8PathBuf::from("/Library/Fonts"),
            Utf8PathBuf::from(format!("{}/Library/Fonts", home)),
        ]
    } else if cfg!(windows) {
        vec![Utf8PathBuf::from("c:/Windows/Fonts")]
    } else {
        vec![
            Utf8PathBuf::from("/usr/share/fonts"),
            Utf8PathBuf::from(format!("{}/.fonts", home)),
        ]
    }
}

/// Collect font files under `dir` whose name starts with `font`
fn collect_font_files(dir: &Utf8Path, font: &str, out: &mut Vec<Utf8PathBuf>) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };

    for entry in entries.flatten() {
        let Ok(path) = Utf8PathBuf::try_from(entry.path()) else {
            continue;
        };
        let Ok(file_type) = entry.file_type() else {
            continue;
        };

        // Symlinked directories are not followed, which avoids cycles
        if file_type.is_dir() {
            collect_font_files(&path, font, out);
            continue;
        }

        let is_font = path
            .extension()
            .is_some_and(|ext| FONT_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()));
        let name_matches = path.file_name().is_some_and(|name| name.starts_with(font));

        if is_font && name_matches && path.is_file() {
            out.push(path);
        }
    }
}

fn current_dir() -> Utf8PathBuf {
    std::env::current_dir()
        .ok()
        .and_then(|p| Utf8PathBuf::try_from(p).ok())
        .unwrap_or_else(|| Utf8PathBuf::from("."))
}
