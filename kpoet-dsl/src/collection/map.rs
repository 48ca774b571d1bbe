use std::ops::{AddAssign, Index};

use indexmap::IndexMap;
use kpoet::{ParameterSpec, PropertySpec, Result, TypeName, TypeSpec};
use tracing::debug;

use super::{Keyed, SpecHandle};
use crate::scope::{BuilderScope, ParameterScope, PropertyScope, TypeScope, run};

/// A name-keyed view over specs such as parameters, properties and enum
/// constants.
///
/// Keys are unique. Writing to an existing key replaces the entry in place,
/// keeping its original position.
#[derive(Debug)]
pub struct SpecMap<'a, T> {
    entries: &'a mut IndexMap<String, T>,
}

impl<'a, T> SpecMap<'a, T> {
    pub fn new(entries: &'a mut IndexMap<String, T>) -> Self {
        Self { entries }
    }

    /// Store `value` under `key`, replacing any previous entry.
    pub fn set(&mut self, key: impl Into<String>, value: T) -> &mut Self {
        let key = key.into();
        if self.entries.contains_key(&key) {
            debug!(key = %key, "replacing existing entry");
        }
        self.entries.insert(key, value);
        self
    }

    /// Configure a spec in `scope` and store it under `key`.
    pub fn set_with<S, F>(
        &mut self,
        key: impl Into<String>,
        scope: S,
        configure: F,
    ) -> Result<&mut Self>
    where
        S: BuilderScope<Spec = T>,
        F: FnOnce(&mut S) -> Result<()>,
    {
        let value = run(scope, configure)?;
        Ok(self.set(key, value))
    }

    pub fn get(&self, key: &str) -> Option<&T> {
        self.entries.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> indexmap::map::Iter<'_, String, T> {
        self.entries.iter()
    }

    pub fn keys(&self) -> indexmap::map::Keys<'_, String, T> {
        self.entries.keys()
    }

    pub fn values(&self) -> indexmap::map::Values<'_, String, T> {
        self.entries.values()
    }

    /// Look up the spec a handle from this map refers to.
    pub fn resolve(&self, handle: &SpecHandle<T>) -> Option<&T> {
        self.get(handle.name())
    }

    fn setting_with<S, F>(&mut self, key: String, scope: S, configure: F) -> Result<SpecHandle<T>>
    where
        S: BuilderScope<Spec = T>,
        F: FnOnce(&mut S) -> Result<()>,
    {
        self.set_with(key.clone(), scope, configure)?;
        Ok(SpecHandle::new(key))
    }
}

impl<T: Keyed> SpecMap<'_, T> {
    /// Store a built spec under its own name.
    pub fn add(&mut self, value: T) -> &mut Self {
        let key = value.key().to_string();
        self.set(key, value)
    }

    /// Configure a spec in `scope` and store it under its own name.
    pub fn add_with<S, F>(&mut self, scope: S, configure: F) -> Result<&mut Self>
    where
        S: BuilderScope<Spec = T>,
        F: FnOnce(&mut S) -> Result<()>,
    {
        let value = run(scope, configure)?;
        Ok(self.add(value))
    }

    pub fn extend(&mut self, values: impl IntoIterator<Item = T>) -> &mut Self {
        for value in values {
            self.add(value);
        }
        self
    }
}

impl SpecMap<'_, ParameterSpec> {
    pub fn add_parameter<F>(
        &mut self,
        name: impl Into<String>,
        type_name: impl Into<TypeName>,
        configure: F,
    ) -> Result<&mut Self>
    where
        F: FnOnce(&mut ParameterScope) -> Result<()>,
    {
        self.add_with(ParameterScope::new(ParameterSpec::builder(name, type_name)), configure)
    }

    pub fn adding_parameter<F>(
        &mut self,
        name: impl Into<String>,
        type_name: impl Into<TypeName>,
        configure: F,
    ) -> Result<SpecHandle<ParameterSpec>>
    where
        F: FnOnce(&mut ParameterScope) -> Result<()>,
    {
        let name = name.into();
        let scope = ParameterScope::new(ParameterSpec::builder(name.clone(), type_name));
        self.setting_with(name, scope, configure)
    }
}

impl SpecMap<'_, PropertySpec> {
    pub fn add_property<F>(
        &mut self,
        name: impl Into<String>,
        type_name: impl Into<TypeName>,
        configure: F,
    ) -> Result<&mut Self>
    where
        F: FnOnce(&mut PropertyScope) -> Result<()>,
    {
        self.add_with(PropertyScope::new(PropertySpec::builder(name, type_name)), configure)
    }

    pub fn adding_property<F>(
        &mut self,
        name: impl Into<String>,
        type_name: impl Into<TypeName>,
        configure: F,
    ) -> Result<SpecHandle<PropertySpec>>
    where
        F: FnOnce(&mut PropertyScope) -> Result<()>,
    {
        let name = name.into();
        let scope = PropertyScope::new(PropertySpec::builder(name.clone(), type_name));
        self.setting_with(name, scope, configure)
    }
}

/// Enum constants: the key is the constant name and the value its anonymous
/// body, which carries constructor arguments and overrides.
impl SpecMap<'_, TypeSpec> {
    pub fn add_constant<F>(&mut self, name: impl Into<String>, configure: F) -> Result<&mut Self>
    where
        F: FnOnce(&mut TypeScope) -> Result<()>,
    {
        self.set_with(name, TypeScope::new(TypeSpec::anonymous_class_builder()), configure)
    }

    /// Add a constant without arguments or body.
    pub fn add_constant_of(&mut self, name: impl Into<String>) -> Result<&mut Self> {
        self.add_constant(name, |_| Ok(()))
    }

    pub fn adding_constant<F>(
        &mut self,
        name: impl Into<String>,
        configure: F,
    ) -> Result<SpecHandle<TypeSpec>>
    where
        F: FnOnce(&mut TypeScope) -> Result<()>,
    {
        let scope = TypeScope::new(TypeSpec::anonymous_class_builder());
        self.setting_with(name.into(), scope, configure)
    }
}

impl<T> Index<&str> for SpecMap<'_, T> {
    type Output = T;

    /// # Panics
    ///
    /// Panics if `key` is not present.
    fn index(&self, key: &str) -> &T {
        &self.entries[key]
    }
}

impl<T: Keyed> AddAssign<T> for SpecMap<'_, T> {
    fn add_assign(&mut self, value: T) {
        self.add(value);
    }
}

#[cfg(test)]
mod tests {
    use kpoet::{Error, KModifier, args};

    use super::*;
    use crate::entry::{build_class, build_enum};

    #[test]
    fn test_last_write_wins() {
        let mut entries: IndexMap<String, PropertySpec> = IndexMap::new();
        let mut map = SpecMap::new(&mut entries);
        map.add_property("speed", TypeName::int(), |_| Ok(())).unwrap();
        map.add_property("name", TypeName::string(), |_| Ok(())).unwrap();
        map.add_property("speed", TypeName::long(), |p| {
            p.mutable(true);
            Ok(())
        })
        .unwrap();

        assert_eq!(map.len(), 2);
        assert_eq!(map.keys().collect::<Vec<_>>(), ["speed", "name"]);
        assert_eq!(map["speed"].type_name(), &TypeName::long());
        assert!(map["speed"].is_mutable());
    }

    #[test]
    fn test_set_under_explicit_key() {
        let mut entries: IndexMap<String, PropertySpec> = IndexMap::new();
        let mut map = SpecMap::new(&mut entries);
        let first = PropertySpec::new("a", TypeName::int()).unwrap();
        let second = PropertySpec::new("b", TypeName::int()).unwrap();
        map.set("slot", first).set("slot", second.clone());

        assert_eq!(map.len(), 1);
        assert_eq!(map.get("slot"), Some(&second));
    }

    #[test]
    fn test_add_matches_direct_builder() {
        let mut entries: IndexMap<String, ParameterSpec> = IndexMap::new();
        SpecMap::new(&mut entries)
            .add_parameter("speed", TypeName::int(), |p| {
                p.add_modifier(KModifier::Vararg);
                Ok(())
            })
            .unwrap();

        let mut direct = ParameterSpec::builder("speed", TypeName::int());
        direct.add_modifier(KModifier::Vararg);
        assert_eq!(entries["speed"], direct.build().unwrap());
    }

    #[test]
    fn test_failed_configuration_keeps_previous_entry() {
        let mut entries: IndexMap<String, PropertySpec> = IndexMap::new();
        let mut map = SpecMap::new(&mut entries);
        map.add_property("speed", TypeName::int(), |_| Ok(())).unwrap();
        let result = map.add_property("speed", TypeName::long(), |p| {
            p.initializer("%S %S", args!["only one"])?;
            Ok(())
        });

        assert!(result.is_err());
        assert_eq!(map["speed"].type_name(), &TypeName::int());
    }

    #[test]
    fn test_adding_handles() {
        let mut entries: IndexMap<String, ParameterSpec> = IndexMap::new();
        let mut map = SpecMap::new(&mut entries);
        let speed = map
            .adding_parameter("speed", TypeName::int(), |_| Ok(()))
            .unwrap();

        assert_eq!(speed.name(), "speed");
        assert_eq!(map.resolve(&speed).map(ParameterSpec::name), Some("speed"));
        map += ParameterSpec::new("gear", TypeName::int()).unwrap();
        assert!(map.contains("gear"));
    }

    #[test]
    fn test_enum_constants_keyed_by_name() {
        let mut entries: IndexMap<String, TypeSpec> = IndexMap::new();
        let mut map = SpecMap::new(&mut entries);
        map.add_constant("ELECTRIC", |body| {
            body.superclass_constructor_parameter("%L", args![0])?;
            Ok(())
        })
        .unwrap();
        let diesel = map.adding_constant("DIESEL", |_| Ok(())).unwrap();
        map.add_constant_of("ELECTRIC").unwrap();

        assert_eq!(map.keys().collect::<Vec<_>>(), ["ELECTRIC", "DIESEL"]);
        assert!(map["ELECTRIC"].superclass_constructor_params().is_empty());
        assert!(map.resolve(&diesel).is_some());
    }

    #[test]
    fn test_blank_constant_fails_enum_build() {
        let result = build_enum("Gear", |e| {
            e.enum_constants().add_constant_of("")?;
            Ok(())
        });

        let err = result.unwrap_err();
        assert!(matches!(*err, Error::InvalidName { .. }));
    }

    #[test]
    fn test_property_under_foreign_key_conflicts_on_build() {
        let result = build_class("Car", |car| {
            let mut props = car.properties();
            props.set("slot", PropertySpec::new("wheels", TypeName::int())?);
            props.add_property("wheels", TypeName::int(), |_| Ok(()))?;
            Ok(())
        });

        let err = result.unwrap_err();
        assert!(matches!(*err, Error::IllegalMember { .. }));
    }
}
