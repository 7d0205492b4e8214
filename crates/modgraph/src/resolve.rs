use std::collections::HashSet;

use crate::depmap::DepMap;
use crate::error::GraphError;
use crate::name::ModuleName;

/// Disambiguates a requested module name against the dependency map's keys.
///
/// Tools spell module names with dashes or underscores interchangeably, so
/// the database may have been built with either convention. Try the name as
/// given, then with every underscore replaced by a dash. This is the single
/// normalization point; past it, lookups are exact.
pub fn resolve_key<'a>(requested: &str, map: &'a DepMap) -> Result<&'a ModuleName, GraphError> {
    resolve_entry(requested, map).map(|(key, _)| key)
}

fn resolve_entry<'a>(
    requested: &str,
    map: &'a DepMap,
) -> Result<(&'a ModuleName, &'a [ModuleName]), GraphError> {
    if let Some(entry) = map.lookup(requested) {
        return Ok(entry);
    }
    let dashed = requested.replace('_', "-");
    if let Some(entry) = map.lookup(&dashed) {
        return Ok(entry);
    }
    Err(GraphError::UnresolvedModule {
        name: requested.to_string(),
    })
}

/// Resolves a seed list to its full transitive closure.
///
/// Each seed's stored list (self + already-flattened deps) is appended in
/// order, skipping modules seen earlier, so the result holds each module
/// once in first-discovered order. Any unresolvable seed fails the whole
/// resolution. An empty seed list yields an empty result.
pub fn resolve(seeds: &[String], map: &DepMap) -> Result<Vec<ModuleName>, GraphError> {
    let mut resolved: Vec<ModuleName> = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();

    for seed in seeds {
        let (_, deps) = resolve_entry(seed, map)?;
        for dep in deps {
            if seen.insert(dep.name().to_string()) {
                resolved.push(dep.clone());
            }
        }
    }

    Ok(resolved)
}

/// Complement of a resolved list against every module the map knows:
/// "what may be removed" given "what must be kept". Sorted by canonical
/// name so the output is deterministic.
pub fn invert(resolved: &[ModuleName], map: &DepMap) -> Vec<ModuleName> {
    let kept: HashSet<&str> = resolved.iter().map(ModuleName::name).collect();
    let mut removable: Vec<ModuleName> = map
        .names()
        .filter(|module| !kept.contains(module.name()))
        .cloned()
        .collect();
    removable.sort();
    removable
}

/// Expands seed tokens before resolution. A token containing `*` or `?` is
/// replaced in place by the map's matching canonical names in database
/// order; other tokens pass through untouched. A pattern matching nothing
/// contributes nothing.
pub fn expand_seeds(seeds: &[String], map: &DepMap) -> Result<Vec<String>, GraphError> {
    let mut expanded = Vec::new();
    for seed in seeds {
        if seed.contains(['*', '?']) {
            expanded.extend(map.expand_glob(seed)?);
        } else {
            expanded.push(seed.clone());
        }
    }
    Ok(expanded)
}
