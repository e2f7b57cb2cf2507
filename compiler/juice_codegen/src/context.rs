//! Generator state.
//!
//! The [`Generator`] holds everything that lives for one compilation unit:
//! the output sections, the anchor buffer used by `?`, the temporary-name
//! counter and the set of types whose namespace object already exists.

use rustc_hash::FxHashSet;

/// Output section a piece of generated code belongs to.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) enum Section {
    Imports,
    Types,
    Impls,
    Body,
}

/// Per-unit generation state.
///
/// One generator can be reused for several units; [`Generator::generate`]
/// resets it first.
#[derive(Debug, Default)]
pub struct Generator {
    pub(crate) namespace: String,
    pub(crate) module_name: String,
    imports: String,
    types: String,
    impls: String,
    body: String,
    /// Statements to place right before the statement being lowered.
    anchor: String,
    /// Types whose namespace object has been emitted.
    registered_types: FxHashSet<String>,
    /// Set while lowering `export $T := ...`.
    pub(crate) export_types: bool,
    next_id: u32,
}

impl Generator {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn reset(&mut self, namespace: &str, module_name: &str) {
        *self = Generator {
            namespace: namespace.to_string(),
            module_name: module_name.to_string(),
            ..Generator::default()
        };
    }

    /// A fresh temporary name: `__0`, `__1`, ...
    pub(crate) fn unique_id(&mut self) -> String {
        let n = self.next_id;
        self.next_id += 1;
        format!("__{n}")
    }

    /// Append `text` as its own line(s) to `section`.
    pub(crate) fn emit(&mut self, section: Section, text: &str) {
        let buffer = match section {
            Section::Imports => &mut self.imports,
            Section::Types => &mut self.types,
            Section::Impls => &mut self.impls,
            Section::Body => &mut self.body,
        };
        buffer.push_str(text);
        buffer.push('\n');
    }

    pub(crate) fn push_anchor(&mut self, text: &str) {
        self.anchor.push_str(text);
        self.anchor.push('\n');
    }

    /// Run `f` with an empty anchor, returning its result together with
    /// whatever it anchored. The enclosing anchor is restored afterwards.
    pub(crate) fn with_fresh_anchor<T>(&mut self, f: impl FnOnce(&mut Self) -> T) -> (T, String) {
        let outer = std::mem::take(&mut self.anchor);
        let result = f(self);
        let inner = std::mem::replace(&mut self.anchor, outer);
        (result, inner)
    }

    /// Record `name` as registered; `false` if it already was.
    pub(crate) fn register_type(&mut self, name: &str) -> bool {
        self.registered_types.insert(name.to_string())
    }

    /// The runtime tag of a constructor: `namespace.module@type#ctor`.
    pub(crate) fn type_tag(&self, type_name: &str, ctor: &str) -> String {
        format!(
            "{}.{}@{type_name}#{ctor}",
            self.namespace, self.module_name
        )
    }

    /// Concatenate the non-empty sections.
    pub(crate) fn take_output(&mut self) -> String {
        let sections = [
            std::mem::take(&mut self.imports),
            std::mem::take(&mut self.types),
            std::mem::take(&mut self.impls),
            std::mem::take(&mut self.body),
        ];
        sections
            .into_iter()
            .filter(|section| !section.is_empty())
            .collect::<Vec<_>>()
            .join("\n")
    }
}
