use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StockroomError {
    #[error("name must be at most {max} characters (got {actual})")]
    NameTooLong { max: usize, actual: usize },

    #[error("description must be at most {max} characters (got {actual})")]
    DescriptionTooLong { max: usize, actual: usize },
}
