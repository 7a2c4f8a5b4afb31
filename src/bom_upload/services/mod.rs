pub mod ci_project_resolver;

pub use ci_project_resolver::{
    resolve_gitlab_project, GitlabCiContext, GitlabUploadPolicy, PipelineKind, ProjectResolution,
};
