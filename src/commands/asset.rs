//! Asset Commands
//!
//! Uploads go out as multipart with `file` plus exactly one owner field.

use uuid::Uuid;

use taskflow_client::endpoints;
use taskflow_client::models::Asset;
use taskflow_client::transport::FilePart;
use taskflow_client::{ApiClient, ApiError, MultipartForm};

/// What an asset hangs off
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetOwner {
    Task(Uuid),
    Project(Uuid),
}

impl AssetOwner {
    pub fn list_path(&self) -> String {
        match self {
            AssetOwner::Task(id) => endpoints::task_assets(id),
            AssetOwner::Project(id) => endpoints::project_assets(id),
        }
    }

    fn field(&self) -> (&'static str, String) {
        match self {
            AssetOwner::Task(id) => ("task", id.to_string()),
            AssetOwner::Project(id) => ("project", id.to_string()),
        }
    }
}

pub async fn upload_asset(client: &ApiClient, owner: AssetOwner, file: FilePart) -> Result<Asset, ApiError> {
    let (name, value) = owner.field();
    let form = MultipartForm::new().text(name, value).file(file);
    client.upload(&owner.list_path(), form).await
}

pub async fn delete_asset(client: &ApiClient, id: Uuid) -> Result<(), ApiError> {
    client.delete(&endpoints::asset(id)).await
}
