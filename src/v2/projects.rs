use super::models::{DefaultQueryParams, ListFieldsResponse, ListProjectsResponse, ProjectDetails};
use super::DiscoveryV2;
use crate::client::options::{option_setters, request_options, RequestOptions};
use crate::client::{DetailedResponse, RequestContext};
use crate::Result;
use reqwest::Method;
use serde::Serialize;
use std::collections::HashMap;

#[derive(Debug, Clone, Default)]
pub struct ListProjectsOptions {
    pub headers: HashMap<String, String>,
}

impl ListProjectsOptions {
    pub fn new() -> Self {
        Self::default()
    }
}

request_options!(ListProjectsOptions);

#[derive(Debug, Clone, Default, Serialize)]
pub struct CreateProjectOptions {
    pub name: String,
    /// Project type, e.g. `document_retrieval`.
    #[serde(rename = "type")]
    pub type_: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_query_parameters: Option<DefaultQueryParams>,
    #[serde(skip)]
    pub headers: HashMap<String, String>,
}

impl CreateProjectOptions {
    pub fn new(name: impl Into<String>, type_: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_: type_.into(),
            ..Default::default()
        }
    }
}

option_setters!(CreateProjectOptions {
    with_default_query_parameters => default_query_parameters: DefaultQueryParams,
});
request_options!(CreateProjectOptions; name, type_);

#[derive(Debug, Clone, Default)]
pub struct GetProjectOptions {
    pub project_id: String,
    pub headers: HashMap<String, String>,
}

impl GetProjectOptions {
    pub fn new(project_id: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            ..Default::default()
        }
    }
}

request_options!(GetProjectOptions; project_id);

#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateProjectOptions {
    #[serde(skip)]
    pub project_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip)]
    pub headers: HashMap<String, String>,
}

impl UpdateProjectOptions {
    pub fn new(project_id: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            ..Default::default()
        }
    }
}

option_setters!(UpdateProjectOptions { with_name => name: String });
request_options!(UpdateProjectOptions; project_id);

#[derive(Debug, Clone, Default)]
pub struct DeleteProjectOptions {
    pub project_id: String,
    pub headers: HashMap<String, String>,
}

impl DeleteProjectOptions {
    pub fn new(project_id: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            ..Default::default()
        }
    }
}

request_options!(DeleteProjectOptions; project_id);

#[derive(Debug, Clone, Default)]
pub struct ListFieldsOptions {
    pub project_id: String,
    /// Restrict the listing to these collections; all collections when empty.
    pub collection_ids: Vec<String>,
    pub headers: HashMap<String, String>,
}

impl ListFieldsOptions {
    pub fn new(project_id: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            ..Default::default()
        }
    }

    pub fn with_collection_ids(mut self, ids: Vec<String>) -> Self {
        self.collection_ids = ids;
        self
    }
}

request_options!(ListFieldsOptions; project_id);

impl DiscoveryV2 {
    /// List the projects of this instance.
    pub async fn list_projects(
        &self,
        options: &ListProjectsOptions,
    ) -> Result<DetailedResponse<ListProjectsResponse>> {
        self.list_projects_with_context(&RequestContext::background(), options)
            .await
    }

    pub async fn list_projects_with_context(
        &self,
        ctx: &RequestContext,
        options: &ListProjectsOptions,
    ) -> Result<DetailedResponse<ListProjectsResponse>> {
        options.validate()?;
        let request = self
            .request(Method::GET, "/v2/projects", "ListProjects")
            .headers(options.headers());
        self.service.send(ctx, request).await
    }

    /// Create a project. Answers `201 Created`.
    pub async fn create_project(
        &self,
        options: &CreateProjectOptions,
    ) -> Result<DetailedResponse<ProjectDetails>> {
        self.create_project_with_context(&RequestContext::background(), options)
            .await
    }

    pub async fn create_project_with_context(
        &self,
        ctx: &RequestContext,
        options: &CreateProjectOptions,
    ) -> Result<DetailedResponse<ProjectDetails>> {
        options.validate()?;
        let request = self
            .request(Method::POST, "/v2/projects", "CreateProject")
            .headers(options.headers())
            .serialize_body(options)?;
        self.service.send(ctx, request).await
    }

    pub async fn get_project(
        &self,
        options: &GetProjectOptions,
    ) -> Result<DetailedResponse<ProjectDetails>> {
        self.get_project_with_context(&RequestContext::background(), options)
            .await
    }

    pub async fn get_project_with_context(
        &self,
        ctx: &RequestContext,
        options: &GetProjectOptions,
    ) -> Result<DetailedResponse<ProjectDetails>> {
        options.validate()?;
        let request = self
            .request(Method::GET, "/v2/projects/{project_id}", "GetProject")
            .path_param("project_id", &options.project_id)
            .headers(options.headers());
        self.service.send(ctx, request).await
    }

    pub async fn update_project(
        &self,
        options: &UpdateProjectOptions,
    ) -> Result<DetailedResponse<ProjectDetails>> {
        self.update_project_with_context(&RequestContext::background(), options)
            .await
    }

    pub async fn update_project_with_context(
        &self,
        ctx: &RequestContext,
        options: &UpdateProjectOptions,
    ) -> Result<DetailedResponse<ProjectDetails>> {
        options.validate()?;
        let request = self
            .request(Method::POST, "/v2/projects/{project_id}", "UpdateProject")
            .path_param("project_id", &options.project_id)
            .headers(options.headers())
            .serialize_body(options)?;
        self.service.send(ctx, request).await
    }

    /// Delete a project and every collection in it. Answers `204 No Content`.
    pub async fn delete_project(
        &self,
        options: &DeleteProjectOptions,
    ) -> Result<DetailedResponse<()>> {
        self.delete_project_with_context(&RequestContext::background(), options)
            .await
    }

    pub async fn delete_project_with_context(
        &self,
        ctx: &RequestContext,
        options: &DeleteProjectOptions,
    ) -> Result<DetailedResponse<()>> {
        options.validate()?;
        let request = self
            .request(Method::DELETE, "/v2/projects/{project_id}", "DeleteProject")
            .path_param("project_id", &options.project_id)
            .headers(options.headers());
        self.service.send_no_content(ctx, request).await
    }

    /// List the queryable fields across the project's collections.
    pub async fn list_fields(
        &self,
        options: &ListFieldsOptions,
    ) -> Result<DetailedResponse<ListFieldsResponse>> {
        self.list_fields_with_context(&RequestContext::background(), options)
            .await
    }

    pub async fn list_fields_with_context(
        &self,
        ctx: &RequestContext,
        options: &ListFieldsOptions,
    ) -> Result<DetailedResponse<ListFieldsResponse>> {
        options.validate()?;
        let request = self
            .request(Method::GET, "/v2/projects/{project_id}/fields", "ListFields")
            .path_param("project_id", &options.project_id)
            .query_list("collection_ids", &options.collection_ids)
            .headers(options.headers());
        self.service.send(ctx, request).await
    }
}
