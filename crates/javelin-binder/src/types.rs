//! Library type declarations.
//!
//! Types that are not part of the bound tree (JDK, protobuf runtime) are
//! described with `TypeDecl` and registered on the binder before binding.

use serde::Deserialize;

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct FieldDecl {
    pub name: String,
    pub type_name: String,
    pub is_static: bool,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct MethodDecl {
    pub name: String,
    pub parameter_types: Vec<String>,
    pub return_type: String,
    pub is_static: bool,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct TypeDecl {
    pub qualified_name: String,
    /// Qualified names of direct supertypes
    pub supertypes: Vec<String>,
    pub fields: Vec<FieldDecl>,
    pub methods: Vec<MethodDecl>,
}

impl TypeDecl {
    pub fn new(qualified_name: impl Into<String>) -> TypeDecl {
        TypeDecl {
            qualified_name: qualified_name.into(),
            ..TypeDecl::default()
        }
    }

    pub fn extends(mut self, supertype: impl Into<String>) -> TypeDecl {
        self.supertypes.push(supertype.into());
        self
    }

    pub fn field(mut self, name: &str, type_name: &str) -> TypeDecl {
        self.fields.push(FieldDecl {
            name: name.to_string(),
            type_name: type_name.to_string(),
            is_static: false,
        });
        self
    }

    pub fn static_field(mut self, name: &str, type_name: &str) -> TypeDecl {
        self.fields.push(FieldDecl {
            name: name.to_string(),
            type_name: type_name.to_string(),
            is_static: true,
        });
        self
    }

    pub fn method(mut self, name: &str, parameter_types: &[&str], return_type: &str) -> TypeDecl {
        self.methods.push(MethodDecl {
            name: name.to_string(),
            parameter_types: parameter_types.iter().map(|p| p.to_string()).collect(),
            return_type: return_type.to_string(),
            is_static: false,
        });
        self
    }

    pub fn static_method(
        mut self,
        name: &str,
        parameter_types: &[&str],
        return_type: &str,
    ) -> TypeDecl {
        self.methods.push(MethodDecl {
            name: name.to_string(),
            parameter_types: parameter_types.iter().map(|p| p.to_string()).collect(),
            return_type: return_type.to_string(),
            is_static: true,
        });
        self
    }

    /// Last segment of the qualified name.
    pub fn simple_name(&self) -> &str {
        simple_name(&self.qualified_name)
    }
}

/// `java.time.Duration` -> `Duration`, `a.Outer.Inner` -> `Inner`.
pub fn simple_name(qualified_name: &str) -> &str {
    qualified_name
        .rsplit_once('.')
        .map_or(qualified_name, |(_, simple)| simple)
}
