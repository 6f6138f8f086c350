//! Java naming conventions.

use heck::{ToLowerCamelCase, ToUpperCamelCase};
use itertools::Itertools;

use super::WordSegments;

/// Reserved words that can't be used as Java identifiers.
const JAVA_KEYWORDS: &[&str] = &[
    "abstract",
    "assert",
    "boolean",
    "break",
    "byte",
    "case",
    "catch",
    "char",
    "class",
    "const",
    "continue",
    "default",
    "do",
    "double",
    "else",
    "enum",
    "extends",
    "false",
    "final",
    "finally",
    "float",
    "for",
    "goto",
    "if",
    "implements",
    "import",
    "instanceof",
    "int",
    "interface",
    "long",
    "native",
    "new",
    "null",
    "package",
    "private",
    "protected",
    "public",
    "return",
    "short",
    "static",
    "strictfp",
    "super",
    "switch",
    "synchronized",
    "this",
    "throw",
    "throws",
    "transient",
    "true",
    "try",
    "void",
    "volatile",
    "while",
    "_",
];

#[inline]
pub fn is_keyword(name: &str) -> bool {
    JAVA_KEYWORDS.contains(&name)
}

/// Returns `true` if `name` is a valid, non-reserved Java identifier.
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    (unicode_ident::is_xid_start(first) || first == '_' || first == '$')
        && chars.all(|c| unicode_ident::is_xid_continue(c) || c == '$')
        && !is_keyword(name)
}

/// Returns `true` if `name` is a dot-separated sequence of
/// Java identifiers.
///
/// # Examples
///
/// ```
/// # use clientele_core::codegen::naming::is_package_name;
/// assert!(is_package_name("com.contoso.widgets"));
/// assert!(!is_package_name("com.contoso..widgets"));
/// assert!(!is_package_name("com.contoso.new"));
/// ```
pub fn is_package_name(name: &str) -> bool {
    name.split('.').all(is_identifier)
}

/// Converts a name to a Java class name, like `WidgetProperties`.
pub fn class_name(name: &str) -> String {
    let name = name.to_upper_camel_case();
    match name.chars().next() {
        None => "Model".to_owned(),
        Some(c) if c.is_ascii_digit() => format!("_{name}"),
        Some(_) => name,
    }
}

/// Converts a name to a Java variable, parameter, or method name,
/// like `resourceGroupName`.
pub fn variable_name(name: &str) -> String {
    let name = name.to_lower_camel_case();
    match name.chars().next() {
        None => "parameter".to_owned(),
        Some(c) if c.is_ascii_digit() => format!("_{name}"),
        Some(_) if is_keyword(&name) => format!("{name}Parameter"),
        Some(_) => name,
    }
}

/// Converts a name to an `UPPER_SNAKE_CASE` enum member name.
///
/// # Examples
///
/// ```
/// # use clientele_core::codegen::naming::enum_member_name;
/// assert_eq!(enum_member_name("Standard_LRS"), "STANDARD_LRS");
/// assert_eq!(enum_member_name("inProgress"), "IN_PROGRESS");
/// assert_eq!(enum_member_name("2021-10-01"), "_2021_10_01");
/// assert_eq!(enum_member_name("*"), "EMPTY");
/// ```
pub fn enum_member_name(name: &str) -> String {
    let name = WordSegments::new(name)
        .map(|word| word.to_uppercase())
        .join("_");
    match name.chars().next() {
        None => "EMPTY".to_owned(),
        Some(c) if c.is_ascii_digit() => format!("_{name}"),
        Some(_) => name,
    }
}

/// Returns the name of the getter for a property, like `getEndpoint`.
pub fn getter_name(property: &str) -> String {
    format!("get{}", property.to_upper_camel_case())
}

/// Returns the name of the setter for a property, like `setEndpoint`.
pub fn setter_name(property: &str) -> String {
    format!("set{}", property.to_upper_camel_case())
}

/// Returns the name of a fluent setter for a property, like `withEndpoint`.
pub fn wither_name(property: &str) -> String {
    format!("with{}", property.to_upper_camel_case())
}

/// Quotes a string as a Java string literal.
pub fn string_literal(value: &str) -> String {
    let mut literal = String::with_capacity(value.len() + 2);
    literal.push('"');
    for c in value.chars() {
        match c {
            '"' => literal.push_str("\\\""),
            '\\' => literal.push_str("\\\\"),
            '\n' => literal.push_str("\\n"),
            '\r' => literal.push_str("\\r"),
            '\t' => literal.push_str("\\t"),
            c => literal.push(c),
        }
    }
    literal.push('"');
    literal
}
