use crate::schema::path::DottedPath;

/// Audit policy annotation attached to a schema field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuditPolicy {
    /// Replace changed values at this path with the redaction marker.
    pub is_redacted: bool,
    /// Drop this path (and everything below it) from the diff.
    pub ignore: bool,
    /// Path the annotation applies to, overriding the field's structural path.
    pub path: Option<DottedPath>,
}

impl AuditPolicy {
    /// Shorthand for a redaction annotation.
    pub fn redacted() -> Self {
        Self {
            is_redacted: true,
            ..Self::default()
        }
    }

    /// Shorthand for an ignore annotation.
    pub fn ignored() -> Self {
        Self {
            ignore: true,
            ..Self::default()
        }
    }

    /// Pin the annotation to an explicit dotted path.
    pub fn at(mut self, path: DottedPath) -> Self {
        self.path = Some(path);
        self
    }
}

/// What a schema field holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKind {
    /// Scalar, array or any other value the diff treats as an opaque leaf.
    Primitive,
    /// Reference to other documents by id. To-one and to-many references
    /// share a kind; normalization maps arrays element-wise.
    Relationship,
    /// Named container whose children live under `name.` in the document.
    Group { fields: Vec<SchemaField> },
    /// Presentational wrapper (collapsible, row, unnamed tab). Its children
    /// sit at the wrapper's own level in the document.
    Layout { fields: Vec<SchemaField> },
}

/// One node of a collection or global schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaField {
    pub name: Option<String>,
    pub kind: FieldKind,
    pub policy: Option<AuditPolicy>,
}

impl SchemaField {
    fn named(name: &str, kind: FieldKind) -> Self {
        Self {
            name: Some(name.to_string()),
            kind,
            policy: None,
        }
    }

    /// A plain data field.
    pub fn primitive(name: &str) -> Self {
        Self::named(name, FieldKind::Primitive)
    }

    /// A relationship or upload field.
    pub fn relationship(name: &str) -> Self {
        Self::named(name, FieldKind::Relationship)
    }

    /// A named group nesting `fields`.
    pub fn group(name: &str, fields: Vec<SchemaField>) -> Self {
        Self::named(name, FieldKind::Group { fields })
    }

    /// A nameless layout wrapper around `fields`.
    pub fn layout(fields: Vec<SchemaField>) -> Self {
        Self {
            name: None,
            kind: FieldKind::Layout { fields },
            policy: None,
        }
    }

    /// Attach an audit policy annotation.
    pub fn with_policy(mut self, policy: AuditPolicy) -> Self {
        self.policy = Some(policy);
        self
    }

    /// Child fields for groups and layout wrappers; empty otherwise.
    pub fn children(&self) -> &[SchemaField] {
        match &self.kind {
            FieldKind::Group { fields } | FieldKind::Layout { fields } => fields,
            FieldKind::Primitive | FieldKind::Relationship => &[],
        }
    }

    pub fn is_redacted(&self) -> bool {
        self.policy.as_ref().is_some_and(|p| p.is_redacted)
    }

    pub fn is_ignored(&self) -> bool {
        self.policy.as_ref().is_some_and(|p| p.ignore)
    }

    /// The explicit path override, if one was declared.
    pub fn policy_path(&self) -> Option<&DottedPath> {
        self.policy.as_ref().and_then(|p| p.path.as_ref())
    }
}
