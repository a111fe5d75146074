//! Compare form state: the four inputs sent to the backend.

/// One of the four form inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    /// Source-hosting account.
    Workspace,
    /// Repository within the workspace.
    RepoSlug,
    /// Base commit.
    FromCommit,
    /// Target commit.
    ToCommit,
}

impl FormField {
    /// All fields in display order.
    pub const ALL: [FormField; 4] = [
        FormField::Workspace,
        FormField::RepoSlug,
        FormField::FromCommit,
        FormField::ToCommit,
    ];

    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            FormField::Workspace => "Workspace",
            FormField::RepoSlug => "Repository Slug",
            FormField::FromCommit => "From Commit",
            FormField::ToCommit => "To Commit",
        }
    }

    /// Query parameter name on the compare endpoint.
    pub fn query_key(self) -> &'static str {
        match self {
            FormField::Workspace => "workspace",
            FormField::RepoSlug => "repoSlug",
            FormField::FromCommit => "fromCommit",
            FormField::ToCommit => "toCommit",
        }
    }

    /// Next field, or `None` after the last one.
    pub fn next(self) -> Option<FormField> {
        match self {
            FormField::Workspace => Some(FormField::RepoSlug),
            FormField::RepoSlug => Some(FormField::FromCommit),
            FormField::FromCommit => Some(FormField::ToCommit),
            FormField::ToCommit => None,
        }
    }

    /// Previous field, or `None` before the first one.
    pub fn prev(self) -> Option<FormField> {
        match self {
            FormField::Workspace => None,
            FormField::RepoSlug => Some(FormField::Workspace),
            FormField::FromCommit => Some(FormField::RepoSlug),
            FormField::ToCommit => Some(FormField::FromCommit),
        }
    }
}

/// The four compare inputs. No cross-field invariants; values are sent as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompareForm {
    /// Workspace identifier.
    pub workspace: String,
    /// Repository slug.
    pub repo_slug: String,
    /// Base commit identifier.
    pub from_commit: String,
    /// Target commit identifier.
    pub to_commit: String,
}

impl CompareForm {
    /// Create a form from its four values.
    pub fn new(
        workspace: impl Into<String>,
        repo_slug: impl Into<String>,
        from_commit: impl Into<String>,
        to_commit: impl Into<String>,
    ) -> Self {
        Self {
            workspace: workspace.into(),
            repo_slug: repo_slug.into(),
            from_commit: from_commit.into(),
            to_commit: to_commit.into(),
        }
    }

    /// Read a field.
    pub fn get(&self, field: FormField) -> &str {
        match field {
            FormField::Workspace => &self.workspace,
            FormField::RepoSlug => &self.repo_slug,
            FormField::FromCommit => &self.from_commit,
            FormField::ToCommit => &self.to_commit,
        }
    }

    /// Mutable access to a field.
    pub fn get_mut(&mut self, field: FormField) -> &mut String {
        match field {
            FormField::Workspace => &mut self.workspace,
            FormField::RepoSlug => &mut self.repo_slug,
            FormField::FromCommit => &mut self.from_commit,
            FormField::ToCommit => &mut self.to_commit,
        }
    }

    /// Query parameters in endpoint order.
    pub fn query_pairs(&self) -> [(&'static str, &str); 4] {
        FormField::ALL.map(|field| (field.query_key(), self.get(field)))
    }
}
