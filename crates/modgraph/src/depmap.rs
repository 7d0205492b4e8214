use std::collections::HashMap;
use std::fs;
use std::path::Path;

use glob::Pattern;

use crate::error::GraphError;
use crate::name::ModuleName;

/// The parsed `modules.dep` database.
///
/// Each entry maps a module to its flattened dependency list with the module
/// itself prepended, so looking up any one key yields its whole closure in a
/// single step. The lists in the database are already transitive per entry;
/// no recursive walking happens here or in the resolver.
///
/// Key iteration (`names`) preserves the file order of entries. That order
/// is what glob expansion and inversion callers observe, so it must stay
/// deterministic; internally the map is a `HashMap` paired with an
/// insertion-order vector of keys.
#[derive(Debug, Default)]
pub struct DepMap {
    entries: HashMap<ModuleName, Vec<ModuleName>>,
    order: Vec<ModuleName>,
}

impl DepMap {
    /// Loads and parses a `modules.dep` file.
    pub fn load(path: &Path) -> Result<Self, GraphError> {
        let text = fs::read_to_string(path).map_err(|source| GraphError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text, path)
    }

    /// Parses database text. One record per line:
    /// `<module-filename>:<whitespace-separated dependency filenames>`.
    /// Only the first colon is significant; blank lines are skipped.
    pub(crate) fn parse(text: &str, path: &Path) -> Result<Self, GraphError> {
        let mut map = Self::default();
        for (idx, raw) in text.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() {
                continue;
            }
            let (module, dep_list) =
                line.split_once(':')
                    .ok_or_else(|| GraphError::MissingSeparator {
                        path: path.to_path_buf(),
                        line: idx + 1,
                    })?;

            let key = ModuleName::new(module.trim());
            // A module always depends on itself; prepending the key means
            // resolving this entry pulls the module in along with its deps.
            let mut deps = vec![key.clone()];
            deps.extend(dep_list.split_whitespace().map(ModuleName::new));
            map.insert(key, deps)?;
        }
        Ok(map)
    }

    fn insert(&mut self, key: ModuleName, deps: Vec<ModuleName>) -> Result<(), GraphError> {
        if self.entries.contains_key(&key) {
            // A key defined twice means a corrupt or mid-regeneration
            // database; never silently overwrite.
            return Err(GraphError::DuplicateModule {
                name: key.name().to_string(),
            });
        }
        self.order.push(key.clone());
        self.entries.insert(key, deps);
        Ok(())
    }

    /// Dependency list (self first) for an exact canonical name.
    pub fn get(&self, name: &str) -> Option<&[ModuleName]> {
        self.entries.get(name).map(Vec::as_slice)
    }

    /// Key identity and dependency list for an exact canonical name.
    pub fn lookup(&self, name: &str) -> Option<(&ModuleName, &[ModuleName])> {
        self.entries
            .get_key_value(name)
            .map(|(key, deps)| (key, deps.as_slice()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Every known module, in the order the database listed them.
    pub fn names(&self) -> impl Iterator<Item = &ModuleName> {
        self.order.iter()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Canonical names matching a glob pattern, in database order. A pattern
    /// matching nothing yields an empty vector, not an error.
    pub fn expand_glob(&self, pattern: &str) -> Result<Vec<String>, GraphError> {
        let compiled = Pattern::new(pattern).map_err(|source| GraphError::BadPattern {
            pattern: pattern.to_string(),
            source,
        })?;
        Ok(self
            .order
            .iter()
            .filter(|module| compiled.matches(module.name()))
            .map(|module| module.name().to_string())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GraphError;

    fn parse(text: &str) -> Result<DepMap, GraphError> {
        DepMap::parse(text, Path::new("modules.dep"))
    }

    #[test]
    fn parses_entries_with_self_first() {
        let map = parse("a.ko:\nb.ko: a.ko\nc.ko: b.ko a.ko\n").unwrap();
        assert_eq!(map.len(), 3);
        assert!(map.contains("b"));
        assert!(!map.contains("d"));

        let c = map.get("c").unwrap();
        let names: Vec<&str> = c.iter().map(ModuleName::name).collect();
        assert_eq!(names, ["c", "b", "a"]);
    }

    #[test]
    fn entry_with_no_deps_is_just_itself() {
        let map = parse("kernel/fs/ext4/ext4.ko:\n").unwrap();
        let deps = map.get("ext4").unwrap();
        assert_eq!(deps.len(), 1);
        assert_eq!(deps[0].name(), "ext4");
    }

    #[test]
    fn skips_blank_lines() {
        let map = parse("a.ko:\n\n  \nb.ko: a.ko\n").unwrap();
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn names_preserve_file_order() {
        let map = parse("zz.ko:\naa.ko:\nmm.ko:\n").unwrap();
        let order: Vec<&str> = map.names().map(ModuleName::name).collect();
        assert_eq!(order, ["zz", "aa", "mm"]);
    }

    #[test]
    fn duplicate_key_is_rejected() {
        let err = parse("a.ko:\nkernel/a.ko: b.ko\n").unwrap_err();
        match err {
            GraphError::DuplicateModule { name } => assert_eq!(name, "a"),
            other => panic!("expected DuplicateModule, got {other}"),
        }
    }

    #[test]
    fn missing_separator_reports_line() {
        let err = parse("a.ko:\nnot a record\n").unwrap_err();
        match err {
            GraphError::MissingSeparator { line, .. } => assert_eq!(line, 2),
            other => panic!("expected MissingSeparator, got {other}"),
        }
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let err = DepMap::load(Path::new("/nonexistent/modules.dep")).unwrap_err();
        assert!(matches!(err, GraphError::Io { .. }));
    }

    #[test]
    fn glob_expansion_in_database_order() {
        let map = parse("usb-storage.ko:\next4.ko:\nusb-core.ko:\n").unwrap();
        let matches = map.expand_glob("usb-*").unwrap();
        assert_eq!(matches, ["usb-storage", "usb-core"]);
    }

    #[test]
    fn glob_matching_nothing_is_empty() {
        let map = parse("ext4.ko:\n").unwrap();
        assert!(map.expand_glob("zz*").unwrap().is_empty());
    }

    #[test]
    fn invalid_glob_pattern_is_reported() {
        let map = parse("ext4.ko:\n").unwrap();
        let err = map.expand_glob("[").unwrap_err();
        assert!(matches!(err, GraphError::BadPattern { .. }));
    }
}
