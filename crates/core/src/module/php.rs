//! Minimal PHP class model for generated plugin classes

use regex::Regex;
use serde::Serialize;

use crate::types::NAMESPACE_SEPARATOR;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PhpMethod {
    pub name: String,
    /// Rendered parameter declarations, one per line in the output
    pub params: Vec<String>,
    pub body: String,
}

impl PhpMethod {
    pub fn new(name: impl Into<String>, params: Vec<String>, body: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            params,
            body: body.into(),
        }
    }

    fn render(&self, out: &mut String) {
        out.push_str(&format!("    public function {}(", self.name));
        if self.params.is_empty() {
            out.push_str(") {\n");
        } else {
            out.push('\n');
            out.push_str(
                &self
                    .params
                    .iter()
                    .map(|param| format!("        {param}"))
                    .collect::<Vec<_>>()
                    .join(",\n"),
            );
            out.push_str("\n    ) {\n");
        }
        for line in self.body.lines() {
            out.push_str(&format!("        {line}\n"));
        }
        out.push_str("    }\n");
    }
}

/// A class addressed by its path relative to the module namespace
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PhpClass {
    pub namespace_path: String,
    pub methods: Vec<PhpMethod>,
}

impl PhpClass {
    pub fn new(namespace_path: impl Into<String>) -> Self {
        Self {
            namespace_path: namespace_path.into(),
            methods: Vec::new(),
        }
    }

    /// Adds a method, replacing any existing method with the same name
    pub fn add_method(&mut self, method: PhpMethod) {
        match self.methods.iter_mut().find(|m| m.name == method.name) {
            Some(existing) => *existing = method,
            None => self.methods.push(method),
        }
    }

    pub fn merge(&mut self, other: PhpClass) {
        for method in other.methods {
            self.add_method(method);
        }
    }

    pub fn class_name(&self) -> &str {
        self.namespace_path
            .rsplit(NAMESPACE_SEPARATOR)
            .next()
            .unwrap_or(&self.namespace_path)
    }

    /// Path of the class file relative to the module root
    pub fn file_path(&self) -> String {
        format!("{}.php", self.namespace_path.replace(NAMESPACE_SEPARATOR, "/"))
    }

    pub fn render(&self, module_namespace: &str) -> String {
        let mut namespace = module_namespace.to_string();
        if let Some((parent, _)) = self.namespace_path.rsplit_once(NAMESPACE_SEPARATOR) {
            namespace.push(NAMESPACE_SEPARATOR);
            namespace.push_str(parent);
        }

        let mut out = String::new();
        out.push_str("<?php\ndeclare(strict_types=1);\n\n");
        out.push_str(&format!("namespace {namespace};\n\n"));
        out.push_str(&format!("class {}\n{{\n", self.class_name()));
        for method in &self.methods {
            out.push('\n');
            method.render(&mut out);
        }
        out.push_str("}\n");
        out
    }

    /// Adds this class's methods to an existing class file. Methods the file
    /// already declares are left untouched, new ones go before the closing
    /// brace. Returns `None` when there is nothing to add or the file has no
    /// closing brace to insert before.
    pub fn merge_into_source(&self, existing: &str) -> Option<String> {
        let missing: Vec<&PhpMethod> = self
            .methods
            .iter()
            .filter(|method| !declares_method(existing, &method.name))
            .collect();
        if missing.is_empty() {
            return None;
        }

        let close = existing.rfind('}')?;
        let (head, tail) = existing.split_at(close);
        let mut out = head.trim_end().to_string();
        out.push('\n');
        for method in missing {
            out.push('\n');
            method.render(&mut out);
        }
        out.push_str(tail);
        Some(out)
    }
}

fn declares_method(source: &str, name: &str) -> bool {
    Regex::new(&format!(r"\bfunction\s+{}\s*\(", regex::escape(name)))
        .map(|pattern| pattern.is_match(source))
        .unwrap_or(false)
}
