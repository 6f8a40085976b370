use std::fs;
use std::io;
use std::path::Path;

/// Filesystem operations needed before a note can be written. The export
/// pipeline injects the real disk filesystem; tests inject a fake.
pub trait FileSystem {
    fn exists(&self, path: &Path) -> bool;
    fn create_dir_all(&self, path: &Path) -> io::Result<()>;
}

/// The host filesystem, backed by `std::fs`.
pub struct DiskFileSystem;

impl FileSystem for DiskFileSystem {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        fs::create_dir_all(path)
    }
}

/// Ensure the directory a file will be written into exists.
///
/// Performs at most one existence check and one recursive create request.
/// Creation failures propagate to the caller.
pub fn ensure_parent_dir<F: FileSystem>(filesystem: &F, file_path: &Path) -> io::Result<()> {
    let Some(dir) = file_path.parent() else {
        return Ok(());
    };

    if filesystem.exists(dir) {
        return Ok(());
    }

    filesystem.create_dir_all(dir)
}

const TO_SPACE_CHARS: [char; 2] = ['*', '?'];
const TO_DASH_CHARS: [char; 5] = [':', '"', '<', '>', '|'];

/// Collapse every maximal run of whitespace mixed with `illegal` characters
/// into `replacement`. Runs of plain whitespace are left alone.
fn collapse_runs(input: &str, illegal: &[char], replacement: &str) -> String {
    let chars: Vec<char> = input.chars().collect();
    let mut out = String::with_capacity(input.len());
    let mut i = 0;

    while i < chars.len() {
        if illegal.contains(&chars[i]) || chars[i].is_whitespace() {
            let mut j = i;
            let mut saw_illegal = false;
            while j < chars.len() && (illegal.contains(&chars[j]) || chars[j].is_whitespace()) {
                saw_illegal |= illegal.contains(&chars[j]);
                j += 1;
            }

            if saw_illegal {
                out.push_str(replacement);
            } else {
                out.extend(&chars[i..j]);
            }
            i = j;
        } else {
            out.push(chars[i]);
            i += 1;
        }
    }

    out
}

/// Replace characters that are unsafe in file names on common platforms.
///
/// Runs containing `*` or `?` collapse to a single space; runs containing
/// `:`, `"`, `<`, `>` or `|` collapse to `" - "`.
pub fn replace_illegal_chars(s: &str) -> String {
    let spaced = collapse_runs(s, &TO_SPACE_CHARS, " ");
    let dashed = collapse_runs(spaced.trim(), &TO_DASH_CHARS, " - ");
    dashed.trim().to_string()
}

/// Sanitize a note path so every segment is safe to create on disk.
///
/// The directory part and the file name are cleaned separately so the
/// extension survives untouched; separators are normalized to `/`.
/// Sanitizing an already-sanitized path returns it unchanged.
pub fn sanitize_file_path(file_path: &str) -> String {
    let normalized = file_path.replace('\\', "/");

    let (dir, base) = match normalized.rfind('/') {
        Some(idx) => (&normalized[..idx], &normalized[idx + 1..]),
        None => ("", normalized.as_str()),
    };

    // The extension starts at the last dot of the base name; a leading dot
    // marks a hidden file, not an extension.
    let (name, ext) = match base.rfind('.') {
        Some(idx) if idx > 0 => (&base[..idx], &base[idx..]),
        _ => (base, ""),
    };

    let dir = replace_illegal_chars(dir);
    let name = replace_illegal_chars(name);

    if dir.is_empty() {
        format!("{}{}", name, ext)
    } else {
        format!("{}/{}{}", dir, name, ext)
    }
}
