use tracing::{debug, error, info, instrument};

use crate::api::{PowercastApi, UploadFile};
use crate::error::Result;

/// What the CSV widget shows after pressing upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadOutcome {
    /// Nothing was selected; no request was made.
    NoFiles,
    Inserted(u64),
    NothingInserted,
}

impl UploadOutcome {
    /// The selection is cleared only after rows actually landed.
    pub fn clears_selection(&self) -> bool {
        matches!(self, UploadOutcome::Inserted(_))
    }

    pub fn message(&self) -> String {
        match self {
            UploadOutcome::NoFiles => "Please select at least one CSV file.".to_string(),
            UploadOutcome::Inserted(n) => format!("Inserted {} records.", n),
            UploadOutcome::NothingInserted => "No records inserted.".to_string(),
        }
    }
}

/// Sends every selected file in a single multipart request.
#[instrument(skip(api, files), fields(files = files.len()))]
pub async fn upload_selected<A>(api: &A, files: &[UploadFile]) -> Result<UploadOutcome>
where
    A: PowercastApi + ?Sized,
{
    if files.is_empty() {
        debug!("Upload requested without files");
        return Ok(UploadOutcome::NoFiles);
    }

    let response = api.upload_files(files).await.inspect_err(|e| {
        error!("Upload of {} files failed: {}", files.len(), e);
    })?;

    info!("Upload inserted {} records", response.inserted);
    Ok(if response.inserted > 0 {
        UploadOutcome::Inserted(response.inserted)
    } else {
        UploadOutcome::NothingInserted
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApiError;
    use crate::testing::MockApi;
    use common::UploadResponse;

    #[tokio::test]
    async fn test_zero_files_makes_no_request() {
        let api = MockApi::default();
        let outcome = upload_selected(&api, &[]).await.unwrap();
        assert_eq!(outcome, UploadOutcome::NoFiles);
        assert!(!outcome.clears_selection());
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn test_all_files_go_in_one_request() {
        let mut api = MockApi::default();
        api.upload = Ok(UploadResponse {
            inserted: 48,
            message: None,
        });
        let files = vec![UploadFile::new("a.csv", "x"), UploadFile::new("b.csv", "y")];

        let outcome = upload_selected(&api, &files).await.unwrap();

        assert_eq!(api.calls(), vec!["POST /upload files=a.csv,b.csv".to_string()]);
        assert_eq!(outcome, UploadOutcome::Inserted(48));
        assert!(outcome.clears_selection());
        assert_eq!(outcome.message(), "Inserted 48 records.");
    }

    #[tokio::test]
    async fn test_nothing_inserted_keeps_selection() {
        let api = MockApi::default();
        let outcome = upload_selected(&api, &[UploadFile::new("a.csv", "")]).await.unwrap();
        assert_eq!(outcome, UploadOutcome::NothingInserted);
        assert!(!outcome.clears_selection());
    }

    #[tokio::test]
    async fn test_backend_error_propagates() {
        let mut api = MockApi::default();
        api.upload = Err(ApiError::Backend {
            status: 400,
            message: "No files uploaded".into(),
        });
        let err = upload_selected(&api, &[UploadFile::new("a.csv", "")]).await.unwrap_err();
        assert_eq!(err.to_string(), "No files uploaded");
    }
}
