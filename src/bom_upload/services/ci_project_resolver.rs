//! Project name/version derivation for GitLab CI pipelines.
//!
//! The caller captures the CI variables once (see [`GitlabCiContext::from_lookup`])
//! and this module decides, without touching the environment, whether the
//! pipeline should upload at all and under which project coordinates.

use std::fmt;

/// Snapshot of the GitLab CI variables relevant to project resolution
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GitlabCiContext {
    pub merge_request_iid: Option<String>,
    pub commit_branch: Option<String>,
    pub commit_tag: Option<String>,
    pub project_title: Option<String>,
    pub commit_ref_name: Option<String>,
}

impl GitlabCiContext {
    pub const MERGE_REQUEST_IID: &'static str = "CI_MERGE_REQUEST_IID";
    pub const COMMIT_BRANCH: &'static str = "CI_COMMIT_BRANCH";
    pub const COMMIT_TAG: &'static str = "CI_COMMIT_TAG";
    pub const PROJECT_TITLE: &'static str = "CI_PROJECT_TITLE";
    pub const COMMIT_REF_NAME: &'static str = "CI_COMMIT_REF_NAME";

    /// Builds a context from a variable lookup, e.g. `|k| std::env::var(k).ok()`.
    ///
    /// Empty values are treated as unset, matching how GitLab leaves
    /// variables blank outside the matching pipeline type.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        Self {
            merge_request_iid: get(Self::MERGE_REQUEST_IID),
            commit_branch: get(Self::COMMIT_BRANCH),
            commit_tag: get(Self::COMMIT_TAG),
            project_title: get(Self::PROJECT_TITLE),
            commit_ref_name: get(Self::COMMIT_REF_NAME),
        }
    }
}

/// Which pipeline types are allowed to upload
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GitlabUploadPolicy {
    pub branch: bool,
    pub tag: bool,
    pub merge_request: bool,
}

/// Kind of GitLab pipeline detected from the CI variables
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineKind {
    MergeRequest,
    Branch,
    Tag,
}

impl fmt::Display for PipelineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineKind::MergeRequest => write!(f, "merge request"),
            PipelineKind::Branch => write!(f, "branch"),
            PipelineKind::Tag => write!(f, "tag"),
        }
    }
}

/// Result of resolving project coordinates in a CI pipeline
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProjectResolution {
    /// Upload under these coordinates. Either may still be empty if neither
    /// the caller nor the CI variables supplied it; the upload workflow
    /// rejects that as a configuration error.
    Resolved { name: String, version: String },
    /// The pipeline type is not enabled for uploads
    Skipped { pipeline: PipelineKind },
}

/// Decides whether and as what a GitLab pipeline uploads its BOM.
///
/// Skip checks run in order merge request, branch, tag. Explicit name and
/// version win over `CI_PROJECT_TITLE` / `CI_COMMIT_REF_NAME`.
pub fn resolve_gitlab_project(
    explicit_name: &str,
    explicit_version: &str,
    ci: &GitlabCiContext,
    policy: GitlabUploadPolicy,
) -> ProjectResolution {
    let skip_rules = [
        (
            ci.merge_request_iid.is_some(),
            policy.merge_request,
            PipelineKind::MergeRequest,
        ),
        (ci.commit_branch.is_some(), policy.branch, PipelineKind::Branch),
        (ci.commit_tag.is_some(), policy.tag, PipelineKind::Tag),
    ];

    for (detected, enabled, pipeline) in skip_rules {
        if detected && !enabled {
            return ProjectResolution::Skipped { pipeline };
        }
    }

    let name = non_blank(explicit_name)
        .or(ci.project_title.as_deref())
        .unwrap_or_default()
        .to_string();
    let version = non_blank(explicit_version)
        .or(ci.commit_ref_name.as_deref())
        .unwrap_or_default()
        .to_string();

    ProjectResolution::Resolved { name, version }
}

fn non_blank(value: &str) -> Option<&str> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}
