// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Per-type constraint descriptors.
//!
//! A type opts into validation by implementing [`Constrained`], declaring each
//! property with a typed accessor and its constraints. The validator builds the
//! descriptor on first use and caches it per type.

use std::collections::HashSet;
use std::fmt;

use crate::constraint::{CompiledConstraint, Constraint, FieldValue, PropertyKind};
use crate::error::ConstraintError;
use crate::validator::Cascade;

/// A record type whose properties carry constraint declarations.
pub trait Constrained: Sized + 'static {
    /// Declare properties and constraints on the builder and compile them.
    fn describe(builder: DescriptorBuilder<Self>) -> Result<TypeDescriptor<Self>, ConstraintError>;
}

/// Build and compile the descriptor for `T` without caching it.
pub fn describe<T: Constrained>() -> Result<TypeDescriptor<T>, ConstraintError> {
    T::describe(DescriptorBuilder::new())
}

/// Erase a nested record for use as a cascade accessor result.
pub fn cascade<N: Constrained>(value: Option<&N>) -> Option<&dyn Cascade> {
    value.map(|nested| nested as &dyn Cascade)
}

/// Typed property accessor.
pub(crate) enum Accessor<T> {
    Text(fn(&T) -> Option<&str>),
    Integer(fn(&T) -> Option<i64>),
    Flag(fn(&T) -> Option<bool>),
    Nested(fn(&T) -> Option<&dyn Cascade>),
}

impl<T> Accessor<T> {
    fn kind(&self) -> PropertyKind {
        match self {
            Self::Text(_) => PropertyKind::Text,
            Self::Integer(_) => PropertyKind::Integer,
            Self::Flag(_) => PropertyKind::Flag,
            Self::Nested(_) => PropertyKind::Nested,
        }
    }
}

struct PropertyDeclaration<T> {
    name: &'static str,
    accessor: Accessor<T>,
    constraints: Vec<Constraint>,
}

/// Collects property declarations for a type.
pub struct DescriptorBuilder<T> {
    type_name: &'static str,
    properties: Vec<PropertyDeclaration<T>>,
}

impl<T: Constrained> DescriptorBuilder<T> {
    pub(crate) fn new() -> Self {
        let full = std::any::type_name::<T>();
        Self {
            type_name: full.rsplit("::").next().unwrap_or(full),
            properties: Vec::new(),
        }
    }

    /// Override the type name used in violation reports.
    pub fn named(mut self, type_name: &'static str) -> Self {
        self.type_name = type_name;
        self
    }

    pub fn text(
        self,
        name: &'static str,
        accessor: fn(&T) -> Option<&str>,
        constraints: impl IntoIterator<Item = Constraint>,
    ) -> Self {
        self.property(name, Accessor::Text(accessor), constraints)
    }

    pub fn integer(
        self,
        name: &'static str,
        accessor: fn(&T) -> Option<i64>,
        constraints: impl IntoIterator<Item = Constraint>,
    ) -> Self {
        self.property(name, Accessor::Integer(accessor), constraints)
    }

    pub fn flag(
        self,
        name: &'static str,
        accessor: fn(&T) -> Option<bool>,
        constraints: impl IntoIterator<Item = Constraint>,
    ) -> Self {
        self.property(name, Accessor::Flag(accessor), constraints)
    }

    /// Declare a nested record. Use [`cascade`] to build the accessor result.
    pub fn nested(
        self,
        name: &'static str,
        accessor: fn(&T) -> Option<&dyn Cascade>,
        constraints: impl IntoIterator<Item = Constraint>,
    ) -> Self {
        self.property(name, Accessor::Nested(accessor), constraints)
    }

    fn property(
        mut self,
        name: &'static str,
        accessor: Accessor<T>,
        constraints: impl IntoIterator<Item = Constraint>,
    ) -> Self {
        self.properties.push(PropertyDeclaration {
            name,
            accessor,
            constraints: constraints.into_iter().collect(),
        });
        self
    }

    /// Compile every declaration. Fails on the first invalid one.
    pub fn build(self) -> Result<TypeDescriptor<T>, ConstraintError> {
        let type_name = self.type_name;
        let mut seen = HashSet::with_capacity(self.properties.len());
        let mut properties = Vec::with_capacity(self.properties.len());

        for declaration in self.properties {
            if !seen.insert(declaration.name) {
                return Err(ConstraintError::DuplicateProperty {
                    type_name,
                    property: declaration.name,
                });
            }

            let kind = declaration.accessor.kind();
            let constraints = declaration
                .constraints
                .iter()
                .map(|c| c.compile(type_name, declaration.name, kind))
                .collect::<Result<Vec<_>, _>>()?;

            properties.push(PropertyDescriptor {
                name: declaration.name,
                accessor: declaration.accessor,
                constraints,
            });
        }

        Ok(TypeDescriptor {
            type_name,
            properties,
        })
    }
}

/// A compiled property: accessor plus ready-to-evaluate constraints.
pub(crate) struct PropertyDescriptor<T> {
    pub(crate) name: &'static str,
    accessor: Accessor<T>,
    pub(crate) constraints: Vec<CompiledConstraint>,
}

impl<T> PropertyDescriptor<T> {
    /// Read the property. The second element is set for present nested values.
    pub(crate) fn read<'a>(&self, value: &'a T) -> (FieldValue<'a>, Option<&'a dyn Cascade>) {
        match &self.accessor {
            Accessor::Text(get) => (FieldValue::Text(get(value)), None),
            Accessor::Integer(get) => (FieldValue::Integer(get(value)), None),
            Accessor::Flag(get) => (FieldValue::Flag(get(value)), None),
            Accessor::Nested(get) => {
                let nested = get(value);
                (
                    FieldValue::Nested {
                        present: nested.is_some(),
                    },
                    nested,
                )
            }
        }
    }
}

/// Compiled constraint layout of one record type.
pub struct TypeDescriptor<T> {
    type_name: &'static str,
    pub(crate) properties: Vec<PropertyDescriptor<T>>,
}

impl<T> TypeDescriptor<T> {
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn property_count(&self) -> usize {
        self.properties.len()
    }

    /// Total number of constraints across all properties.
    pub fn constraint_count(&self) -> usize {
        self.properties.iter().map(|p| p.constraints.len()).sum()
    }

    pub fn property_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.properties.iter().map(|p| p.name)
    }
}

impl<T> fmt::Debug for TypeDescriptor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeDescriptor")
            .field("type_name", &self.type_name)
            .field("properties", &self.property_count())
            .field("constraints", &self.constraint_count())
            .finish()
    }
}
