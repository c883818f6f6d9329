use thiserror::Error;

use crate::export::ExportError;
use crate::gallery::ImportError;

/// Failures the host reports to the user. None of them are fatal.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Storage permission denied")]
    PermissionDenied,
    #[error(transparent)]
    Export(#[from] ExportError),
    #[error(transparent)]
    Import(#[from] ImportError),
}

impl AppError {
    pub fn user_message(&self) -> String {
        match self {
            AppError::PermissionDenied => "Oops you just denied the permission.".to_owned(),
            AppError::Export(err) => err.user_message().to_owned(),
            AppError::Import(ImportError::Unsupported(name)) => {
                format!("{} is not a picture.", name)
            }
            AppError::Import(_) => "Could not open that picture.".to_owned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_messages() {
        assert_eq!(
            AppError::from(ExportError::CacheDirUnavailable).user_message(),
            "Cache directory not available!"
        );
        assert_eq!(
            AppError::from(ExportError::WorkerLost).user_message(),
            "Something went wrong while saving the file."
        );
        assert_eq!(
            AppError::from(ImportError::Unsupported("notes.txt".to_owned())).user_message(),
            "notes.txt is not a picture."
        );
        assert_eq!(AppError::from(ImportError::Empty).user_message(), "Could not open that picture.");
    }
}
