use std::borrow::Borrow;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

/// A kernel module identity derived from a filename in `modules.dep`.
///
/// The database records modules by filename, often with a directory prefix
/// and a `.ko` suffix. The canonical name is the basename with that suffix
/// stripped; equality, ordering and hashing all use the canonical name, so
/// two entries pointing at the same module compare equal regardless of how
/// the database spelled them.
#[derive(Debug, Clone)]
pub struct ModuleName {
    filename: String,
    name: String,
}

impl ModuleName {
    pub fn new(filename: impl Into<String>) -> Self {
        let filename = filename.into();
        let base = match filename.rsplit_once('/') {
            Some((_, base)) => base,
            None => filename.as_str(),
        };
        let name = base.strip_suffix(".ko").unwrap_or(base).to_string();
        Self { filename, name }
    }

    /// Canonical name: basename with any `.ko` suffix stripped.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The filename exactly as the database recorded it, path prefix and
    /// suffix included. Needed to print full module paths.
    pub fn filename(&self) -> &str {
        &self.filename
    }
}

impl PartialEq for ModuleName {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for ModuleName {}

impl PartialEq<str> for ModuleName {
    fn eq(&self, other: &str) -> bool {
        self.name == other
    }
}

impl PartialEq<&str> for ModuleName {
    fn eq(&self, other: &&str) -> bool {
        self.name == *other
    }
}

impl Hash for ModuleName {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

// Lets maps and sets keyed by `ModuleName` be queried with a bare `&str`.
// Sound because `Eq` and `Hash` above delegate to the name string.
impl Borrow<str> for ModuleName {
    fn borrow(&self) -> &str {
        &self.name
    }
}

impl PartialOrd for ModuleName {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ModuleName {
    fn cmp(&self, other: &Self) -> Ordering {
        self.name.cmp(&other.name)
    }
}

impl fmt::Display for ModuleName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn strips_directory_and_suffix() {
        let m = ModuleName::new("kernel/drivers/usb/storage/usb-storage.ko");
        assert_eq!(m.name(), "usb-storage");
        assert_eq!(m.filename(), "kernel/drivers/usb/storage/usb-storage.ko");
    }

    #[test]
    fn bare_name_passes_through() {
        let m = ModuleName::new("ext4");
        assert_eq!(m.name(), "ext4");
        assert_eq!(m.filename(), "ext4");
    }

    #[test]
    fn suffix_only_stripped_at_end() {
        let m = ModuleName::new("drivers/net.ko.d/e1000.ko");
        assert_eq!(m.name(), "e1000");
    }

    #[test]
    fn equality_ignores_path_and_suffix() {
        let a = ModuleName::new("kernel/fs/ext4/ext4.ko");
        let b = ModuleName::new("ext4");
        assert_eq!(a, b);
        assert_eq!(a, "ext4");
    }

    #[test]
    fn set_lookup_by_bare_str() {
        let mut set = HashSet::new();
        set.insert(ModuleName::new("kernel/fs/ext4/ext4.ko"));
        assert!(set.contains("ext4"));
        assert!(!set.contains("xfs"));
    }

    #[test]
    fn ordering_is_by_canonical_name() {
        let mut names = vec![
            ModuleName::new("z/aaa.ko"),
            ModuleName::new("a/zzz.ko"),
        ];
        names.sort();
        assert_eq!(names[0].name(), "aaa");
        assert_eq!(names[1].name(), "zzz");
    }
}
