//! Layout errors

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("layout engine error: {0:?}")]
    Taffy(taffy::TaffyError),
    #[error("layout node is not part of the tree")]
    UnknownNode,
    #[error("element is not part of the document")]
    UnknownElement,
}

impl From<taffy::TaffyError> for LayoutError {
    fn from(err: taffy::TaffyError) -> Self {
        LayoutError::Taffy(err)
    }
}
