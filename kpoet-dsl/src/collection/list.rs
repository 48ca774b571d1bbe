use std::ops::AddAssign;

use kpoet::{
    AnnotationSpec, Arg, CodeBlock, FileMember, FunSpec, PropertySpec, Result, TypeAliasSpec,
    TypeName, TypeSpec, TypeSpecBuilder,
};

use super::{Keyed, SpecHandle};
use crate::scope::{
    AnnotationScope, BuilderScope, FunScope, PropertyScope, TypeAliasScope, TypeScope, run,
};

/// An ordered view over a list of specs.
///
/// Every insertion appends, so iteration order is insertion order. Specs
/// built through a configuration closure are appended only when the closure
/// and the build both succeed.
#[derive(Debug)]
pub struct SpecList<'a, T> {
    items: &'a mut Vec<T>,
}

impl<'a, T> SpecList<'a, T> {
    pub fn new(items: &'a mut Vec<T>) -> Self {
        Self { items }
    }

    /// Append a built spec.
    pub fn add(&mut self, value: impl Into<T>) -> &mut Self {
        self.items.push(value.into());
        self
    }

    /// Configure a spec in `scope` and append the result.
    pub fn add_with<S, F>(&mut self, scope: S, configure: F) -> Result<&mut Self>
    where
        S: BuilderScope,
        S::Spec: Into<T>,
        F: FnOnce(&mut S) -> Result<()>,
    {
        let spec = run(scope, configure)?;
        self.items.push(spec.into());
        Ok(self)
    }

    pub fn extend(&mut self, values: impl IntoIterator<Item = T>) -> &mut Self {
        self.items.extend(values);
        self
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    pub fn last(&self) -> Option<&T> {
        self.items.last()
    }

    fn adding_with<S, F>(&mut self, name: String, scope: S, configure: F) -> Result<SpecHandle<T>>
    where
        S: BuilderScope,
        S::Spec: Into<T>,
        F: FnOnce(&mut S) -> Result<()>,
    {
        self.add_with(scope, configure)?;
        Ok(SpecHandle::new(name))
    }
}

impl<T: Keyed> SpecList<'_, T> {
    /// Find a spec by name. Lists allow duplicates; the last one wins.
    pub fn find(&self, name: &str) -> Option<&T> {
        self.items.iter().rev().find(|item| item.key() == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.find(name).is_some()
    }

    /// Look up the spec a handle from this list refers to.
    pub fn resolve(&self, handle: &SpecHandle<T>) -> Option<&T> {
        self.find(handle.name())
    }
}

impl<T: From<TypeSpec>> SpecList<'_, T> {
    pub fn add_class<F>(&mut self, name: impl Into<String>, configure: F) -> Result<&mut Self>
    where
        F: FnOnce(&mut TypeScope) -> Result<()>,
    {
        self.add_type(TypeSpec::class_builder(name), configure)
    }

    pub fn add_interface<F>(&mut self, name: impl Into<String>, configure: F) -> Result<&mut Self>
    where
        F: FnOnce(&mut TypeScope) -> Result<()>,
    {
        self.add_type(TypeSpec::interface_builder(name), configure)
    }

    pub fn add_object<F>(&mut self, name: impl Into<String>, configure: F) -> Result<&mut Self>
    where
        F: FnOnce(&mut TypeScope) -> Result<()>,
    {
        self.add_type(TypeSpec::object_builder(name), configure)
    }

    /// Add an unnamed `companion object`.
    pub fn add_companion<F>(&mut self, configure: F) -> Result<&mut Self>
    where
        F: FnOnce(&mut TypeScope) -> Result<()>,
    {
        self.add_type(TypeSpec::companion_object_builder(None), configure)
    }

    pub fn add_enum<F>(&mut self, name: impl Into<String>, configure: F) -> Result<&mut Self>
    where
        F: FnOnce(&mut TypeScope) -> Result<()>,
    {
        self.add_type(TypeSpec::enum_builder(name), configure)
    }

    pub fn add_annotation_class<F>(
        &mut self,
        name: impl Into<String>,
        configure: F,
    ) -> Result<&mut Self>
    where
        F: FnOnce(&mut TypeScope) -> Result<()>,
    {
        self.add_type(TypeSpec::annotation_builder(name), configure)
    }

    fn add_type<F>(&mut self, builder: TypeSpecBuilder, configure: F) -> Result<&mut Self>
    where
        F: FnOnce(&mut TypeScope) -> Result<()>,
    {
        self.add_with(TypeScope::new(builder), configure)
    }
}

impl<T: From<TypeSpec> + Keyed> SpecList<'_, T> {
    pub fn adding_class<F>(
        &mut self,
        name: impl Into<String>,
        configure: F,
    ) -> Result<SpecHandle<T>>
    where
        F: FnOnce(&mut TypeScope) -> Result<()>,
    {
        let name = name.into();
        let scope = TypeScope::new(TypeSpec::class_builder(name.clone()));
        self.adding_with(name, scope, configure)
    }

    pub fn adding_interface<F>(
        &mut self,
        name: impl Into<String>,
        configure: F,
    ) -> Result<SpecHandle<T>>
    where
        F: FnOnce(&mut TypeScope) -> Result<()>,
    {
        let name = name.into();
        let scope = TypeScope::new(TypeSpec::interface_builder(name.clone()));
        self.adding_with(name, scope, configure)
    }

    pub fn adding_object<F>(
        &mut self,
        name: impl Into<String>,
        configure: F,
    ) -> Result<SpecHandle<T>>
    where
        F: FnOnce(&mut TypeScope) -> Result<()>,
    {
        let name = name.into();
        let scope = TypeScope::new(TypeSpec::object_builder(name.clone()));
        self.adding_with(name, scope, configure)
    }

    pub fn adding_enum<F>(&mut self, name: impl Into<String>, configure: F) -> Result<SpecHandle<T>>
    where
        F: FnOnce(&mut TypeScope) -> Result<()>,
    {
        let name = name.into();
        let scope = TypeScope::new(TypeSpec::enum_builder(name.clone()));
        self.adding_with(name, scope, configure)
    }
}

impl<T: From<FunSpec>> SpecList<'_, T> {
    pub fn add_fun<F>(&mut self, name: impl Into<String>, configure: F) -> Result<&mut Self>
    where
        F: FnOnce(&mut FunScope) -> Result<()>,
    {
        self.add_with(FunScope::new(FunSpec::builder(name)), configure)
    }
}

impl<T: From<FunSpec> + Keyed> SpecList<'_, T> {
    pub fn adding_fun<F>(&mut self, name: impl Into<String>, configure: F) -> Result<SpecHandle<T>>
    where
        F: FnOnce(&mut FunScope) -> Result<()>,
    {
        let name = name.into();
        let scope = FunScope::new(FunSpec::builder(name.clone()));
        self.adding_with(name, scope, configure)
    }
}

impl SpecList<'_, FunSpec> {
    /// Add a secondary constructor.
    pub fn add_constructor<F>(&mut self, configure: F) -> Result<&mut Self>
    where
        F: FnOnce(&mut FunScope) -> Result<()>,
    {
        self.add_with(FunScope::new(FunSpec::constructor_builder()), configure)
    }
}

impl SpecList<'_, FileMember> {
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
    ) -> Result<SpecHandle<FileMember>>
    where
        F: FnOnce(&mut PropertyScope) -> Result<()>,
    {
        let name = name.into();
        let scope = PropertyScope::new(PropertySpec::builder(name.clone(), type_name));
        self.adding_with(name, scope, configure)
    }

    pub fn add_type_alias<F>(
        &mut self,
        name: impl Into<String>,
        type_name: impl Into<TypeName>,
        configure: F,
    ) -> Result<&mut Self>
    where
        F: FnOnce(&mut TypeAliasScope) -> Result<()>,
    {
        self.add_with(TypeAliasScope::new(TypeAliasSpec::builder(name, type_name)), configure)
    }
}

impl SpecList<'_, AnnotationSpec> {
    pub fn add_annotation<F>(
        &mut self,
        type_name: impl Into<TypeName>,
        configure: F,
    ) -> Result<&mut Self>
    where
        F: FnOnce(&mut AnnotationScope) -> Result<()>,
    {
        self.add_with(AnnotationScope::new(AnnotationSpec::builder(type_name)), configure)
    }
}

impl SpecList<'_, CodeBlock> {
    /// Append a block parsed from `format`.
    pub fn add_code(
        &mut self,
        format: &str,
        args: impl IntoIterator<Item = Arg>,
    ) -> Result<&mut Self> {
        let code = CodeBlock::of(format, args)?;
        Ok(self.add(code))
    }
}

impl<T, V: Into<T>> AddAssign<V> for SpecList<'_, T> {
    fn add_assign(&mut self, value: V) {
        self.add(value);
    }
}

impl<'s, T> IntoIterator for &'s SpecList<'_, T> {
    type Item = &'s T;
    type IntoIter = std::slice::Iter<'s, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use kpoet::{ClassName, KModifier, args};

    use super::*;
    use crate::scope::CodeAppend;

    #[test]
    fn test_insertion_order_is_iteration_order() {
        let mut funs: Vec<FunSpec> = Vec::new();
        let mut list = SpecList::new(&mut funs);
        for name in ["start", "drive", "park", "drive"] {
            list.add_fun(name, |_| Ok(())).unwrap();
        }
        list += FunSpec::builder("stop").build().unwrap();

        let names: Vec<_> = list.iter().map(FunSpec::name).collect();
        assert_eq!(names, ["start", "drive", "park", "drive", "stop"]);
        assert_eq!(list.len(), 5);
    }

    #[test]
    fn test_add_fun_matches_direct_builder() {
        let mut funs: Vec<FunSpec> = Vec::new();
        SpecList::new(&mut funs)
            .add_fun("honk", |f| {
                f.add_modifier(KModifier::Open)
                    .append_line("println(%S)", args!["Beep"])?;
                Ok(())
            })
            .unwrap();

        let mut direct = FunSpec::builder("honk");
        direct
            .add_modifier(KModifier::Open)
            .add_statement("println(%S)", args!["Beep"])
            .unwrap();
        assert_eq!(funs, [direct.build().unwrap()]);
    }

    #[test]
    fn test_type_subtypes_match_direct_builders() {
        let mut types: Vec<TypeSpec> = Vec::new();
        let mut list = SpecList::new(&mut types);
        list.add_class("Car", |_| Ok(()))
            .unwrap()
            .add_interface("Vehicle", |_| Ok(()))
            .unwrap()
            .add_object("Registry", |_| Ok(()))
            .unwrap()
            .add_companion(|_| Ok(()))
            .unwrap()
            .add_enum("Gear", |e| {
                e.enum_constants().add_constant_of("PARK")?;
                Ok(())
            })
            .unwrap()
            .add_annotation_class("Fast", |_| Ok(()))
            .unwrap();

        let mut gear = TypeSpec::enum_builder("Gear");
        gear.add_enum_constant_of("PARK").unwrap();
        let expected = vec![
            TypeSpec::class_builder("Car").build().unwrap(),
            TypeSpec::interface_builder("Vehicle").build().unwrap(),
            TypeSpec::object_builder("Registry").build().unwrap(),
            TypeSpec::companion_object_builder(None).build().unwrap(),
            gear.build().unwrap(),
            TypeSpec::annotation_builder("Fast").build().unwrap(),
        ];
        assert_eq!(types, expected);
    }

    #[test]
    fn test_failed_configuration_adds_nothing() {
        let mut funs: Vec<FunSpec> = Vec::new();
        let mut list = SpecList::new(&mut funs);
        list.add_fun("ok", |_| Ok(())).unwrap();
        let result = list.add_fun("broken", |f| {
            f.append_line("%L", args![])?;
            Ok(())
        });

        assert!(result.is_err());
        assert_eq!(list.len(), 1);
        assert!(!list.contains("broken"));
    }

    #[test]
    fn test_adding_handle_resolves_to_entry() {
        let mut types: Vec<TypeSpec> = Vec::new();
        let mut list = SpecList::new(&mut types);
        let car = list.adding_class("Car", |_| Ok(())).unwrap();
        let gear = list
            .adding_enum("Gear", |e| {
                e.enum_constants().add_constant_of("PARK")?;
                Ok(())
            })
            .unwrap();

        assert_eq!(car.name(), "Car");
        assert_eq!(list.resolve(&car).and_then(TypeSpec::name), Some("Car"));
        assert_eq!(list.resolve(&gear).map(|t| t.enum_constants().len()), Some(1));
    }

    #[test]
    fn test_annotations_and_code() {
        let mut annotations: Vec<AnnotationSpec> = Vec::new();
        SpecList::new(&mut annotations)
            .add_annotation(ClassName::new("kotlin", "Suppress"), |a| {
                a.members().add_code("%S", args!["unused"])?;
                Ok(())
            })
            .unwrap();
        assert_eq!(annotations[0].to_string(), "@Suppress(\"unused\")");
    }

    #[test]
    fn test_file_members_accept_every_kind() {
        let mut members: Vec<FileMember> = Vec::new();
        let mut list = SpecList::new(&mut members);
        list.add_class("Car", |_| Ok(()))
            .unwrap()
            .add_fun("main", |_| Ok(()))
            .unwrap()
            .add_type_alias("Speed", TypeName::int(), |_| Ok(()))
            .unwrap();
        let max = list
            .adding_property("MAX", TypeName::int(), |p| {
                p.add_modifier(KModifier::Const).initializer("%L", args![9])?;
                Ok(())
            })
            .unwrap();

        assert!(matches!(list.resolve(&max), Some(FileMember::Property(_))));
        let keys: Vec<_> = list.iter().map(Keyed::key).collect();
        assert_eq!(keys, ["Car", "main", "Speed", "MAX"]);
    }
}
