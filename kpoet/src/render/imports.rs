//! Import table for file rendering.

use std::collections::HashSet;

use indexmap::{IndexMap, IndexSet};

use crate::types::ClassName;

/// An explicit import declared on a file.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Import {
    /// Fully-qualified name, e.g. `kotlinx.coroutines.launch`.
    pub qualified: String,
    /// Optional `as` alias.
    pub alias: Option<String>,
}

impl Import {
    /// Create a plain import.
    pub fn new(qualified: impl Into<String>) -> Self {
        Self {
            qualified: qualified.into(),
            alias: None,
        }
    }

    /// Create an aliased import.
    pub fn aliased(qualified: impl Into<String>, alias: impl Into<String>) -> Self {
        Self {
            qualified: qualified.into(),
            alias: Some(alias.into()),
        }
    }

    fn simple_name(&self) -> &str {
        self.qualified
            .rsplit('.')
            .next()
            .unwrap_or(self.qualified.as_str())
    }

    fn line(&self) -> String {
        match &self.alias {
            Some(alias) => format!("import {} as {}", self.qualified, alias),
            None => format!("import {}", self.qualified),
        }
    }
}

/// Resolution of top-level classes to the names a file may use for them.
///
/// Maintains insertion order so the first class claiming a simple name
/// keeps it and later ones stay fully qualified.
#[derive(Debug, Clone, Default)]
pub(crate) struct ImportTable {
    /// Canonical top-level name -> simple name or alias.
    resolved: IndexMap<String, String>,
    /// Rendered import lines, sorted and deduplicated.
    lines: Vec<String>,
}

impl ImportTable {
    /// Build the table for a file in `package`.
    pub(crate) fn new(
        package: &str,
        explicit: &[Import],
        referenced: &IndexSet<ClassName>,
    ) -> Self {
        let mut table = Self::default();
        let mut taken = HashSet::new();
        let mut lines = IndexSet::new();

        for import in explicit {
            let name = import
                .alias
                .clone()
                .unwrap_or_else(|| import.simple_name().to_string());
            taken.insert(name.clone());
            table.resolved.insert(import.qualified.clone(), name);
            lines.insert(import.line());
        }

        for class in referenced {
            let canonical = class.canonical_name();
            if table.resolved.contains_key(&canonical) {
                continue;
            }
            // Classes in the default package cannot be imported into a named one.
            if class.package().is_empty() && !package.is_empty() {
                continue;
            }
            let simple = class.simple_name().to_string();
            if !taken.insert(simple.clone()) {
                continue;
            }
            if class.package() != package && !class.is_default_import() {
                lines.insert(format!("import {}", canonical));
            }
            table.resolved.insert(canonical, simple);
        }

        table.lines = lines.into_iter().collect();
        table.lines.sort();
        table
    }

    /// Resolve a class to the text used to reference it.
    pub(crate) fn resolve(&self, class: &ClassName) -> String {
        let top = class.top_level().canonical_name();
        match self.resolved.get(&top) {
            Some(name) => {
                let mut parts = vec![name.as_str()];
                parts.extend(class.simple_names()[1..].iter().map(String::as_str));
                parts.join(".")
            }
            None => class.canonical_name(),
        }
    }

    /// Iterate over import lines in output order.
    pub(crate) fn lines(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(String::as_str)
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.lines.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn referenced(classes: &[ClassName]) -> IndexSet<ClassName> {
        classes.iter().cloned().collect()
    }

    #[test]
    fn test_imports_foreign_classes() {
        let vehicle = ClassName::new("com.example.api", "Vehicle");
        let table = ImportTable::new("com.example", &[], &referenced(&[vehicle.clone()]));

        assert_eq!(table.lines().collect::<Vec<_>>(), ["import com.example.api.Vehicle"]);
        assert_eq!(table.resolve(&vehicle), "Vehicle");
    }

    #[test]
    fn test_same_package_and_default_imports_skip_lines() {
        let car = ClassName::new("com.example", "Car");
        let string = ClassName::new("kotlin", "String");
        let classes = referenced(&[car.clone(), string.clone()]);
        let table = ImportTable::new("com.example", &[], &classes);

        assert_eq!(table.len(), 0);
        assert_eq!(table.resolve(&car), "Car");
        assert_eq!(table.resolve(&string), "String");
    }

    #[test]
    fn test_simple_name_collision_keeps_first() {
        let ours = ClassName::new("com.example", "String");
        let kotlin = ClassName::new("kotlin", "String");
        let classes = referenced(&[ours.clone(), kotlin.clone()]);
        let table = ImportTable::new("com.example", &[], &classes);

        assert_eq!(table.resolve(&ours), "String");
        assert_eq!(table.resolve(&kotlin), "kotlin.String");
    }

    #[test]
    fn test_nested_class_resolves_through_top_level() {
        let entry = ClassName::new("java.util", "Map").nested("Entry");
        let table = ImportTable::new("com.example", &[], &referenced(&[entry.top_level()]));

        assert_eq!(table.resolve(&entry), "Map.Entry");
        assert_eq!(table.lines().collect::<Vec<_>>(), ["import java.util.Map"]);
    }

    #[test]
    fn test_aliased_import() {
        let date = ClassName::new("java.sql", "Date");
        let aliased = [Import::aliased("java.sql.Date", "SqlDate")];
        let table = ImportTable::new("com.example", &aliased, &referenced(&[date.clone()]));

        assert_eq!(table.resolve(&date), "SqlDate");
        assert_eq!(
            table.lines().collect::<Vec<_>>(),
            ["import java.sql.Date as SqlDate"]
        );
    }

    #[test]
    fn test_lines_are_sorted() {
        let table = ImportTable::new(
            "",
            &[Import::new("kotlinx.coroutines.launch")],
            &referenced(&[ClassName::new("java.io", "File")]),
        );
        assert_eq!(
            table.lines().collect::<Vec<_>>(),
            ["import java.io.File", "import kotlinx.coroutines.launch"]
        );
    }
}
