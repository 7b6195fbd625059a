use super::models::{
    CreateDocumentClassifier, DocumentClassifier, DocumentClassifierModel,
    DocumentClassifierModels, DocumentClassifiers, UpdateDocumentClassifier,
};
use super::DiscoveryV2;
use crate::client::options::{option_setters, request_options, RequestOptions};
use crate::client::{DetailedResponse, FilePart, RequestContext};
use crate::Result;
use reqwest::Method;
use serde::Serialize;
use std::collections::HashMap;

const CLASSIFIERS: &str = "/v2/projects/{project_id}/document_classifiers";
const CLASSIFIER: &str = "/v2/projects/{project_id}/document_classifiers/{classifier_id}";
const MODELS: &str = "/v2/projects/{project_id}/document_classifiers/{classifier_id}/models";
const MODEL: &str =
    "/v2/projects/{project_id}/document_classifiers/{classifier_id}/models/{model_id}";

#[derive(Debug, Clone, Default)]
pub struct ListDocumentClassifiersOptions {
    pub project_id: String,
    pub headers: HashMap<String, String>,
}

impl ListDocumentClassifiersOptions {
    pub fn new(project_id: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            ..Default::default()
        }
    }
}

request_options!(ListDocumentClassifiersOptions; project_id);

/// Train a classifier from a CSV of labelled examples.
#[derive(Debug, Clone, Default)]
pub struct CreateDocumentClassifierOptions {
    pub project_id: String,
    pub training_data: Option<FilePart>,
    pub classifier: Option<CreateDocumentClassifier>,
    pub test_data: Option<FilePart>,
    pub headers: HashMap<String, String>,
}

impl CreateDocumentClassifierOptions {
    pub fn new(
        project_id: impl Into<String>,
        training_data: FilePart,
        classifier: CreateDocumentClassifier,
    ) -> Self {
        Self {
            project_id: project_id.into(),
            training_data: Some(training_data),
            classifier: Some(classifier),
            ..Default::default()
        }
    }
}

option_setters!(CreateDocumentClassifierOptions { with_test_data => test_data: FilePart });
request_options!(CreateDocumentClassifierOptions; project_id, training_data, classifier);

#[derive(Debug, Clone, Default)]
pub struct GetDocumentClassifierOptions {
    pub project_id: String,
    pub classifier_id: String,
    pub headers: HashMap<String, String>,
}

impl GetDocumentClassifierOptions {
    pub fn new(project_id: impl Into<String>, classifier_id: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            classifier_id: classifier_id.into(),
            ..Default::default()
        }
    }
}

request_options!(GetDocumentClassifierOptions; project_id, classifier_id);

#[derive(Debug, Clone, Default)]
pub struct UpdateDocumentClassifierOptions {
    pub project_id: String,
    pub classifier_id: String,
    pub classifier: Option<UpdateDocumentClassifier>,
    pub training_data: Option<FilePart>,
    pub test_data: Option<FilePart>,
    pub headers: HashMap<String, String>,
}

impl UpdateDocumentClassifierOptions {
    pub fn new(
        project_id: impl Into<String>,
        classifier_id: impl Into<String>,
        classifier: UpdateDocumentClassifier,
    ) -> Self {
        Self {
            project_id: project_id.into(),
            classifier_id: classifier_id.into(),
            classifier: Some(classifier),
            ..Default::default()
        }
    }
}

option_setters!(UpdateDocumentClassifierOptions {
    with_training_data => training_data: FilePart,
    with_test_data => test_data: FilePart,
});
request_options!(UpdateDocumentClassifierOptions; project_id, classifier_id, classifier);

#[derive(Debug, Clone, Default)]
pub struct DeleteDocumentClassifierOptions {
    pub project_id: String,
    pub classifier_id: String,
    pub headers: HashMap<String, String>,
}

impl DeleteDocumentClassifierOptions {
    pub fn new(project_id: impl Into<String>, classifier_id: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            classifier_id: classifier_id.into(),
            ..Default::default()
        }
    }
}

request_options!(DeleteDocumentClassifierOptions; project_id, classifier_id);

#[derive(Debug, Clone, Default)]
pub struct ListDocumentClassifierModelsOptions {
    pub project_id: String,
    pub classifier_id: String,
    pub headers: HashMap<String, String>,
}

impl ListDocumentClassifierModelsOptions {
    pub fn new(project_id: impl Into<String>, classifier_id: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            classifier_id: classifier_id.into(),
            ..Default::default()
        }
    }
}

request_options!(ListDocumentClassifierModelsOptions; project_id, classifier_id);

/// Training hyper-parameters for a new classifier model.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CreateDocumentClassifierModelOptions {
    #[serde(skip)]
    pub project_id: String,
    #[serde(skip)]
    pub classifier_id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub learning_rate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub l1_regularization_strengths: Option<Vec<f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub l2_regularization_strengths: Option<Vec<f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub training_max_steps: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub improvement_ratio: Option<f64>,
    #[serde(skip)]
    pub headers: HashMap<String, String>,
}

impl CreateDocumentClassifierModelOptions {
    pub fn new(
        project_id: impl Into<String>,
        classifier_id: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            project_id: project_id.into(),
            classifier_id: classifier_id.into(),
            name: name.into(),
            ..Default::default()
        }
    }
}

option_setters!(CreateDocumentClassifierModelOptions {
    with_description => description: String,
    with_learning_rate => learning_rate: f64,
    with_l1_regularization_strengths => l1_regularization_strengths: Vec<f64>,
    with_l2_regularization_strengths => l2_regularization_strengths: Vec<f64>,
    with_training_max_steps => training_max_steps: i64,
    with_improvement_ratio => improvement_ratio: f64,
});
request_options!(CreateDocumentClassifierModelOptions; project_id, classifier_id, name);

#[derive(Debug, Clone, Default)]
pub struct GetDocumentClassifierModelOptions {
    pub project_id: String,
    pub classifier_id: String,
    pub model_id: String,
    pub headers: HashMap<String, String>,
}

impl GetDocumentClassifierModelOptions {
    pub fn new(
        project_id: impl Into<String>,
        classifier_id: impl Into<String>,
        model_id: impl Into<String>,
    ) -> Self {
        Self {
            project_id: project_id.into(),
            classifier_id: classifier_id.into(),
            model_id: model_id.into(),
            ..Default::default()
        }
    }
}

request_options!(GetDocumentClassifierModelOptions; project_id, classifier_id, model_id);

#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateDocumentClassifierModelOptions {
    #[serde(skip)]
    pub project_id: String,
    #[serde(skip)]
    pub classifier_id: String,
    #[serde(skip)]
    pub model_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip)]
    pub headers: HashMap<String, String>,
}

impl UpdateDocumentClassifierModelOptions {
    pub fn new(
        project_id: impl Into<String>,
        classifier_id: impl Into<String>,
        model_id: impl Into<String>,
    ) -> Self {
        Self {
            project_id: project_id.into(),
            classifier_id: classifier_id.into(),
            model_id: model_id.into(),
            ..Default::default()
        }
    }
}

option_setters!(UpdateDocumentClassifierModelOptions {
    with_name => name: String,
    with_description => description: String,
});
request_options!(UpdateDocumentClassifierModelOptions; project_id, classifier_id, model_id);

#[derive(Debug, Clone, Default)]
pub struct DeleteDocumentClassifierModelOptions {
    pub project_id: String,
    pub classifier_id: String,
    pub model_id: String,
    pub headers: HashMap<String, String>,
}

impl DeleteDocumentClassifierModelOptions {
    pub fn new(
        project_id: impl Into<String>,
        classifier_id: impl Into<String>,
        model_id: impl Into<String>,
    ) -> Self {
        Self {
            project_id: project_id.into(),
            classifier_id: classifier_id.into(),
            model_id: model_id.into(),
            ..Default::default()
        }
    }
}

request_options!(DeleteDocumentClassifierModelOptions; project_id, classifier_id, model_id);

impl DiscoveryV2 {
    pub async fn list_document_classifiers(
        &self,
        options: &ListDocumentClassifiersOptions,
    ) -> Result<DetailedResponse<DocumentClassifiers>> {
        self.list_document_classifiers_with_context(&RequestContext::background(), options)
            .await
    }

    pub async fn list_document_classifiers_with_context(
        &self,
        ctx: &RequestContext,
        options: &ListDocumentClassifiersOptions,
    ) -> Result<DetailedResponse<DocumentClassifiers>> {
        options.validate()?;
        let request = self
            .request(Method::GET, CLASSIFIERS, "ListDocumentClassifiers")
            .path_param("project_id", &options.project_id)
            .headers(options.headers());
        self.service.send(ctx, request).await
    }

    /// Answers `201 Created`.
    pub async fn create_document_classifier(
        &self,
        options: &CreateDocumentClassifierOptions,
    ) -> Result<DetailedResponse<DocumentClassifier>> {
        self.create_document_classifier_with_context(&RequestContext::background(), options)
            .await
    }

    pub async fn create_document_classifier_with_context(
        &self,
        ctx: &RequestContext,
        options: &CreateDocumentClassifierOptions,
    ) -> Result<DetailedResponse<DocumentClassifier>> {
        options.validate()?;
        let mut request = self
            .request(Method::POST, CLASSIFIERS, "CreateDocumentClassifier")
            .path_param("project_id", &options.project_id)
            .headers(options.headers());
        if let Some(training_data) = &options.training_data {
            request = request.form_file("training_data", training_data.clone());
        }
        request = request.form_json("classifier", &options.classifier)?;
        if let Some(test_data) = &options.test_data {
            request = request.form_file("test_data", test_data.clone());
        }
        self.service.send(ctx, request).await
    }

    pub async fn get_document_classifier(
        &self,
        options: &GetDocumentClassifierOptions,
    ) -> Result<DetailedResponse<DocumentClassifier>> {
        self.get_document_classifier_with_context(&RequestContext::background(), options)
            .await
    }

    pub async fn get_document_classifier_with_context(
        &self,
        ctx: &RequestContext,
        options: &GetDocumentClassifierOptions,
    ) -> Result<DetailedResponse<DocumentClassifier>> {
        options.validate()?;
        let request = self
            .request(Method::GET, CLASSIFIER, "GetDocumentClassifier")
            .path_param("project_id", &options.project_id)
            .path_param("classifier_id", &options.classifier_id)
            .headers(options.headers());
        self.service.send(ctx, request).await
    }

    /// Answers `201 Created`.
    pub async fn update_document_classifier(
        &self,
        options: &UpdateDocumentClassifierOptions,
    ) -> Result<DetailedResponse<DocumentClassifier>> {
        self.update_document_classifier_with_context(&RequestContext::background(), options)
            .await
    }

    pub async fn update_document_classifier_with_context(
        &self,
        ctx: &RequestContext,
        options: &UpdateDocumentClassifierOptions,
    ) -> Result<DetailedResponse<DocumentClassifier>> {
        options.validate()?;
        let mut request = self
            .request(Method::POST, CLASSIFIER, "UpdateDocumentClassifier")
            .path_param("project_id", &options.project_id)
            .path_param("classifier_id", &options.classifier_id)
            .headers(options.headers())
            .form_json("classifier", &options.classifier)?;
        if let Some(training_data) = &options.training_data {
            request = request.form_file("training_data", training_data.clone());
        }
        if let Some(test_data) = &options.test_data {
            request = request.form_file("test_data", test_data.clone());
        }
        self.service.send(ctx, request).await
    }

    /// Answers `204 No Content`.
    pub async fn delete_document_classifier(
        &self,
        options: &DeleteDocumentClassifierOptions,
    ) -> Result<DetailedResponse<()>> {
        self.delete_document_classifier_with_context(&RequestContext::background(), options)
            .await
    }

    pub async fn delete_document_classifier_with_context(
        &self,
        ctx: &RequestContext,
        options: &DeleteDocumentClassifierOptions,
    ) -> Result<DetailedResponse<()>> {
        options.validate()?;
        let request = self
            .request(Method::DELETE, CLASSIFIER, "DeleteDocumentClassifier")
            .path_param("project_id", &options.project_id)
            .path_param("classifier_id", &options.classifier_id)
            .headers(options.headers());
        self.service.send_no_content(ctx, request).await
    }

    pub async fn list_document_classifier_models(
        &self,
        options: &ListDocumentClassifierModelsOptions,
    ) -> Result<DetailedResponse<DocumentClassifierModels>> {
        self.list_document_classifier_models_with_context(&RequestContext::background(), options)
            .await
    }

    pub async fn list_document_classifier_models_with_context(
        &self,
        ctx: &RequestContext,
        options: &ListDocumentClassifierModelsOptions,
    ) -> Result<DetailedResponse<DocumentClassifierModels>> {
        options.validate()?;
        let request = self
            .request(Method::GET, MODELS, "ListDocumentClassifierModels")
            .path_param("project_id", &options.project_id)
            .path_param("classifier_id", &options.classifier_id)
            .headers(options.headers());
        self.service.send(ctx, request).await
    }

    /// Start training a model. Answers `201 Created`.
    pub async fn create_document_classifier_model(
        &self,
        options: &CreateDocumentClassifierModelOptions,
    ) -> Result<DetailedResponse<DocumentClassifierModel>> {
        self.create_document_classifier_model_with_context(&RequestContext::background(), options)
            .await
    }

    pub async fn create_document_classifier_model_with_context(
        &self,
        ctx: &RequestContext,
        options: &CreateDocumentClassifierModelOptions,
    ) -> Result<DetailedResponse<DocumentClassifierModel>> {
        options.validate()?;
        let request = self
            .request(Method::POST, MODELS, "CreateDocumentClassifierModel")
            .path_param("project_id", &options.project_id)
            .path_param("classifier_id", &options.classifier_id)
            .headers(options.headers())
            .serialize_body(options)?;
        self.service.send(ctx, request).await
    }

    pub async fn get_document_classifier_model(
        &self,
        options: &GetDocumentClassifierModelOptions,
    ) -> Result<DetailedResponse<DocumentClassifierModel>> {
        self.get_document_classifier_model_with_context(&RequestContext::background(), options)
            .await
    }

    pub async fn get_document_classifier_model_with_context(
        &self,
        ctx: &RequestContext,
        options: &GetDocumentClassifierModelOptions,
    ) -> Result<DetailedResponse<DocumentClassifierModel>> {
        options.validate()?;
        let request = self
            .request(Method::GET, MODEL, "GetDocumentClassifierModel")
            .path_param("project_id", &options.project_id)
            .path_param("classifier_id", &options.classifier_id)
            .path_param("model_id", &options.model_id)
            .headers(options.headers());
        self.service.send(ctx, request).await
    }

    /// Answers `201 Created`.
    pub async fn update_document_classifier_model(
        &self,
        options: &UpdateDocumentClassifierModelOptions,
    ) -> Result<DetailedResponse<DocumentClassifierModel>> {
        self.update_document_classifier_model_with_context(&RequestContext::background(), options)
            .await
    }

    pub async fn update_document_classifier_model_with_context(
        &self,
        ctx: &RequestContext,
        options: &UpdateDocumentClassifierModelOptions,
    ) -> Result<DetailedResponse<DocumentClassifierModel>> {
        options.validate()?;
        let request = self
            .request(Method::POST, MODEL, "UpdateDocumentClassifierModel")
            .path_param("project_id", &options.project_id)
            .path_param("classifier_id", &options.classifier_id)
            .path_param("model_id", &options.model_id)
            .headers(options.headers())
            .serialize_body(options)?;
        self.service.send(ctx, request).await
    }

    /// Answers `204 No Content`.
    pub async fn delete_document_classifier_model(
        &self,
        options: &DeleteDocumentClassifierModelOptions,
    ) -> Result<DetailedResponse<()>> {
        self.delete_document_classifier_model_with_context(&RequestContext::background(), options)
            .await
    }

    pub async fn delete_document_classifier_model_with_context(
        &self,
        ctx: &RequestContext,
        options: &DeleteDocumentClassifierModelOptions,
    ) -> Result<DetailedResponse<()>> {
        options.validate()?;
        let request = self
            .request(Method::DELETE, MODEL, "DeleteDocumentClassifierModel")
            .path_param("project_id", &options.project_id)
            .path_param("classifier_id", &options.classifier_id)
            .path_param("model_id", &options.model_id)
            .headers(options.headers());
        self.service.send_no_content(ctx, request).await
    }
}
