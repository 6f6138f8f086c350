use rustc_hash::FxHashMap;
use tracing::debug;

use super::{describe, type_::primitive_type, type_package};
use crate::{
    codegen::naming::{class_name, enum_member_name},
    error::GenerateError,
    ir::RawSchema,
    model::{EnumMember, EnumType, PrimitiveType},
    parse::{ChoiceDef, PrimitiveFormat},
    settings::Settings,
};

/// The result of mapping a choice schema.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum EnumMapping {
    Enum(EnumType),
    /// The schema doesn't have a usable name, so values of this type are
    /// plain primitives.
    Degraded(PrimitiveFormat),
}

/// Maps choice schemas to enums.
#[derive(Clone, Copy, Debug)]
pub struct EnumMapper<'a> {
    settings: &'a Settings,
}

impl<'a> EnumMapper<'a> {
    #[inline]
    pub fn new(settings: &'a Settings) -> Self {
        Self { settings }
    }

    /// Maps a choice schema, using the schema's own expandability and
    /// the configured member naming.
    pub fn map(&self, schema: &RawSchema<'_>, choice: &ChoiceDef) -> Result<EnumMapping, GenerateError> {
        self.resolve(
            schema,
            choice,
            !choice.sealed,
            self.settings.use_source_enum_member_names(),
        )
    }

    /// Maps a choice schema to an enum.
    ///
    /// Schemas without a name, or named `enum`, map to their value type
    /// instead. Member names are derived from each value, or from the
    /// value's source name if `use_source_names` is set. Members whose
    /// names collide get a `_1`, `_2`, ... suffix, counted separately
    /// for each colliding name.
    pub fn resolve(
        &self,
        schema: &RawSchema<'_>,
        choice: &ChoiceDef,
        expandable: bool,
        use_source_names: bool,
    ) -> Result<EnumMapping, GenerateError> {
        let Some(name) = schema
            .name
            .map(str::trim)
            .filter(|name| !name.is_empty() && !name.eq_ignore_ascii_case("enum"))
        else {
            debug!(path = %schema.path, "Enum has no usable name; mapping it to its value type");
            return Ok(EnumMapping::Degraded(choice.choice_type));
        };

        let name = class_name(name);
        let package = type_package(self.settings, schema.info, &name, false);
        let description = describe(
            schema.info.summary.as_deref(),
            schema.info.description.as_deref(),
        )
        .unwrap_or_else(|| format!("Defines values for {name}."));
        let value_type = match primitive_type(choice.choice_type) {
            Some(
                ty @ (PrimitiveType::Boolean
                | PrimitiveType::Int
                | PrimitiveType::Long
                | PrimitiveType::Float
                | PrimitiveType::Double),
            ) => ty,
            _ => PrimitiveType::String,
        };

        let mut members: Vec<EnumMember> = Vec::with_capacity(choice.choices.len());
        let mut collisions: FxHashMap<String, usize> = FxHashMap::default();
        for value_def in &choice.choices {
            let value = value_def.value.to_string();
            let source = match value_def.name.as_deref() {
                Some(source) if use_source_names => source,
                _ => value.as_str(),
            };
            let base = enum_member_name(source);
            let member = if members.iter().any(|member| member.name == base) {
                let count = collisions.entry(base.clone()).or_default();
                *count += 1;
                let suffixed = format!("{base}_{count}");
                if members.iter().any(|member| member.name == suffixed) {
                    return Err(GenerateError::NamingCollisionExhausted {
                        name,
                        member: suffixed,
                    });
                }
                suffixed
            } else {
                base
            };
            members.push(EnumMember {
                name: member,
                value,
                description: value_def.description.clone(),
            });
        }

        Ok(EnumMapping::Enum(EnumType {
            to_method: choice
                .serialization_method
                .clone()
                .unwrap_or_else(|| format!("to{}", value_type.method_suffix())),
            from_method: choice
                .deserialization_method
                .clone()
                .unwrap_or_else(|| format!("from{}", value_type.method_suffix())),
            package,
            name,
            description,
            expandable: expandable && value_type == PrimitiveType::String,
            value_type,
            members,
        }))
    }
}
