//! Grammar productions for XQuery and its dialects.
//!
//! This module implements all `parse_*` methods as an extension of `Parser`.
//! One superset grammar covers XQuery 3.0, the Update Facility, Full Text,
//! the Scripting Extension and MarkLogic's additions.
//!
//! Productions that may not match return `bool` and consume nothing when
//! they return `false`, so callers can chain alternatives with `||`.

mod atoms;
mod constructors;
mod expressions;
mod flwor;
mod full_text;
mod module;
mod paths;
mod primary;
mod scripting;
mod types;
mod update;

/// Names that never start a function call.
const RESERVED_FUNCTION_NAMES: &[&str] = &[
    "attribute",
    "comment",
    "document-node",
    "element",
    "empty-sequence",
    "function",
    "if",
    "item",
    "namespace-node",
    "node",
    "processing-instruction",
    "schema-attribute",
    "schema-element",
    "switch",
    "text",
    "typeswitch",
];

/// Names that start a kind test when followed by `(`. `binary` is added
/// under the MarkLogic profile.
const KIND_TEST_NAMES: &[&str] = &[
    "attribute",
    "comment",
    "document-node",
    "element",
    "namespace-node",
    "node",
    "processing-instruction",
    "schema-attribute",
    "schema-element",
    "text",
];

const FORWARD_AXES: &[&str] = &[
    "attribute",
    "child",
    "descendant",
    "descendant-or-self",
    "following",
    "following-sibling",
    "namespace",
    "property",
    "self",
];

const REVERSE_AXES: &[&str] = &[
    "ancestor",
    "ancestor-or-self",
    "parent",
    "preceding",
    "preceding-sibling",
];

const VALUE_COMPARISONS: &[&str] = &["eq", "ne", "lt", "le", "gt", "ge", "is"];

/// Annotations written as bare keywords before `variable` or `function`.
const COMPATIBILITY_ANNOTATIONS: &[&str] = &["updating", "sequential", "simple", "private"];
