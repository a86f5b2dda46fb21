use crate::diff::Op;

/// Output role selecting one of the configured colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Equal,
    Added,
    Deleted,
    /// `---`/`+++` file header lines
    Header,
    /// `@@` hunk range lines
    Label,
}

impl From<Op> for Role {
    fn from(op: Op) -> Self {
        match op {
            Op::Equal => Role::Equal,
            Op::Added => Role::Added,
            Op::Deleted => Role::Deleted,
        }
    }
}

/// ANSI escape sequences used when color output is enabled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Colors {
    pub equal: String,
    pub added: String,
    pub deleted: String,
    pub header: String,
    pub label: String,
    pub reset: String,
}

impl Colors {
    /// A table with every sequence empty.
    #[must_use]
    pub fn none() -> Self {
        Self {
            equal: String::new(),
            added: String::new(),
            deleted: String::new(),
            header: String::new(),
            label: String::new(),
            reset: String::new(),
        }
    }

    #[must_use]
    pub fn get(&self, role: Role) -> &str {
        match role {
            Role::Equal => &self.equal,
            Role::Added => &self.added,
            Role::Deleted => &self.deleted,
            Role::Header => &self.header,
            Role::Label => &self.label,
        }
    }

    pub(crate) fn get_mut(&mut self, role: Role) -> &mut String {
        match role {
            Role::Equal => &mut self.equal,
            Role::Added => &mut self.added,
            Role::Deleted => &mut self.deleted,
            Role::Header => &mut self.header,
            Role::Label => &mut self.label,
        }
    }
}

impl Default for Colors {
    fn default() -> Self {
        Self {
            equal: "\x1b[97m".to_string(),
            added: "\x1b[32m".to_string(),
            deleted: "\x1b[31m".to_string(),
            header: "\x1b[97m".to_string(),
            label: "\x1b[96m".to_string(),
            reset: "\x1b[0m".to_string(),
        }
    }
}
