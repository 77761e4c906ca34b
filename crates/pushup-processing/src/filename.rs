//! Filename splitting for uploaded files

/// An upload filename split into stem and extension.
///
/// Splitting follows the usual "last dot" rule: `photo.jpg` gives `photo` and
/// `.jpg`, `archive.tar.gz` gives `archive.tar` and `.gz`. Leading dots belong
/// to the stem, so `.hidden` has no extension. Any directory part sent by the
/// client is discarded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileName {
    /// Base name without directories, e.g. `photo.jpg`
    pub name: String,
    pub stem: String,
    /// Extension including the dot, or empty
    pub extension: String,
}

impl FileName {
    /// Returns `None` when nothing usable remains after dropping directories.
    pub fn parse(raw: &str) -> Option<Self> {
        let name = raw.rsplit(|c| c == '/' || c == '\\').next().unwrap_or(raw).trim();
        if name.is_empty() || name == "." || name == ".." {
            return None;
        }

        let (stem, extension) = split_extension(name);
        Some(FileName {
            name: name.to_string(),
            stem: stem.to_string(),
            extension: extension.to_string(),
        })
    }
}

fn split_extension(name: &str) -> (&str, &str) {
    match name.rfind('.') {
        Some(dot) if name[..dot].chars().any(|c| c != '.') => name.split_at(dot),
        _ => (name, ""),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn split(raw: &str) -> (String, String) {
        let parsed = FileName::parse(raw).unwrap();
        (parsed.stem, parsed.extension)
    }

    #[test]
    fn test_simple_extension() {
        assert_eq!(split("photo.jpg"), ("photo".into(), ".jpg".into()));
        assert_eq!(split("photo.JPEG"), ("photo".into(), ".JPEG".into()));
    }

    #[test]
    fn test_last_dot_wins() {
        assert_eq!(split("archive.tar.gz"), ("archive.tar".into(), ".gz".into()));
        assert_eq!(split("trailing."), ("trailing".into(), ".".into()));
    }

    #[test]
    fn test_leading_dots_are_not_extensions() {
        assert_eq!(split(".hidden"), (".hidden".into(), "".into()));
        assert_eq!(split("..double"), ("..double".into(), "".into()));
        assert_eq!(split(".hidden.png"), (".hidden".into(), ".png".into()));
    }

    #[test]
    fn test_no_extension() {
        assert_eq!(split("README"), ("README".into(), "".into()));
    }

    #[test]
    fn test_directories_are_dropped() {
        let parsed = FileName::parse("C:\\Users\\me\\photo.jpg").unwrap();
        assert_eq!(parsed.name, "photo.jpg");
        assert_eq!(split("../../etc/photo.png"), ("photo".into(), ".png".into()));
    }

    #[test]
    fn test_unusable_names() {
        assert!(FileName::parse("").is_none());
        assert!(FileName::parse("   ").is_none());
        assert!(FileName::parse("uploads/").is_none());
        assert!(FileName::parse("..").is_none());
    }
}
